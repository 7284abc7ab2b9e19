//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod access;
pub mod booking;
pub mod catalog;
pub mod client;
pub mod password;
pub mod staff;

pub use access::{authorize, permits, StaffOperation};
pub use booking::{Booking, BookingChanges, BookingDraft, BookingResponse, BookingStats, NewBooking};
pub use catalog::{CatalogEntry, CatalogEntryChanges, CatalogEntryDraft, NewCatalogEntry};
pub use client::{Client, ClientProfile, ClientRegistration, NewClient};
pub use password::Password;
pub use staff::{
    normalize_login, NewStaffUser, StaffRole, StaffUser, StaffUserChanges, StaffUserDraft,
    StaffUserResponse,
};
