//! Access control policy for staff-account operations.
//!
//! A flat allow-list: every rule is spelled out, nothing is inherited
//! between roles.

use super::StaffRole;
use crate::errors::{AppError, AppResult};

/// Operations on staff-account records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffOperation {
    List,
    Create,
    Update,
    Delete,
}

/// Decide whether a caller with `role` may perform `operation`.
///
/// `None` is a caller that asserted no (or an unrecognized) role.
pub fn permits(role: Option<StaffRole>, operation: StaffOperation) -> bool {
    match operation {
        StaffOperation::List => true,
        StaffOperation::Create | StaffOperation::Update | StaffOperation::Delete => {
            matches!(role, Some(StaffRole::SuperAdmin))
        }
    }
}

/// Same as [`permits`], as a `Result` for use with `?`.
pub fn authorize(role: Option<StaffRole>, operation: StaffOperation) -> AppResult<()> {
    if permits(role, operation) {
        Ok(())
    } else {
        tracing::debug!(?role, ?operation, "Staff operation denied");
        Err(AppError::Forbidden)
    }
}
