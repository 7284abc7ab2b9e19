//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod booking;
pub mod catalog_service;
pub mod client;
pub mod staff_user;
