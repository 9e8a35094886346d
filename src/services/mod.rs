//! Application services layer - Use cases.
//!
//! Services depend on repository traits rather than concrete stores.

mod user_service;

pub use user_service::{UserManager, UserService};
