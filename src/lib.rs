//! Restaurant API - ordering backend for a single restaurant.
//!
//! Customers register, log in with a bearer token, browse the menu grouped
//! by category, place orders and read back their order history.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: command-line entry points (`serve`, `migrate`, `seed`)
//! - **config**: settings loaded from the environment, plus constants
//! - **domain**: users, menu items, orders and password hashing
//! - **services**: use cases behind traits (`AuthService`, `MenuService`, `OrderService`)
//! - **infra**: SeaORM entities, repositories, migrations and the Unit of Work
//! - **api**: Axum handlers, middleware, routes and the OpenAPI document
//! - **types**: shared response types
//! - **errors**: the application error type and its HTTP mapping
//!
//! # CLI Usage
//!
//! ```bash
//! cargo run -- serve
//! cargo run -- migrate status
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
