//! Cleaning booking API - backend for a cleaning service's website.
//!
//! Accepts booking requests from the public form, lets clients register
//! and sign in, and gives staff a place to manage bookings, the service
//! catalog and their own accounts.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities, validation and access policy
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, mail notifications)
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create the first staff administrator
//! cargo run -- bootstrap-admin --full-name Root --phone 1 --login root --password secret
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Booking, Password, StaffRole, StaffUser};
pub use errors::{AppError, AppResult};
pub use infra::Database;
