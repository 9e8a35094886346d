//! users-api - list the users table over HTTP
//!
//! A small axum service backed by SeaORM. The store is either a local
//! SQLite file (`file:local.db`) or a remote Turso / libSQL database,
//! picked from `TURSO_DATABASE_URL` / `TURSO_AUTH_TOKEN` at startup.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities
//! - **services**: Application use cases
//! - **infra**: Database connections, remote client, repositories
//! - **api**: HTTP handlers, routes and OpenAPI docs
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
pub use config::{Config, DatabaseTarget};
pub use domain::User;
pub use errors::{AppError, AppResult};
pub use infra::Database;
