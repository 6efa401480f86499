//! CLI module - Command-line interface for the application.
//!
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Sample menu data

pub mod args;

pub use args::{Cli, Commands};
