//! Application state shared by all handlers.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection, created once at startup
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire services on top of an open database.
    pub fn from_database(database: Arc<Database>) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let user_service = Arc::new(UserManager::new(users));

        Self {
            user_service,
            database,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
