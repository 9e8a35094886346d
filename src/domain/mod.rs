//! Domain layer - Core entities
//!
//! Models here are independent of the storage backend.

pub mod user;

pub use user::{NewUser, User};
