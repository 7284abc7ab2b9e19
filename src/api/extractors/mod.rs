//! Custom request extractors.

mod id;
mod validated_json;

pub use id::{PathId, QueryId};
pub use validated_json::ValidatedJson;
