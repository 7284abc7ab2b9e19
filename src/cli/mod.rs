//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `bootstrap-admin` - Seed the first super_admin

pub mod args;

pub use args::{Cli, Commands};
