//! API middleware.

mod auth;
mod cors;

pub use auth::{resolve_role, CallerRole};
pub use cors::{group_cors, group_layers};
