//! Infrastructure layer - External systems integration
//!
//! - Database connections (local SQLite file or remote Turso) and migrations
//! - Remote database client
//! - Repositories

pub mod db;
pub mod repositories;
pub mod turso;

pub use db::{Backend, Database, Migrator};
pub use repositories::{UserRepository, UserStore};
pub use turso::{TursoClient, TursoError, TursoProxy};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
