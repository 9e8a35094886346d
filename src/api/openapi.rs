//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, root_handler, user_handler};
use crate::domain::User;

/// OpenAPI documentation for the users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "users-api",
        version = "0.1.0",
        description = "Lists users from a local SQLite file or a remote Turso database",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        root_handler::root,
        health_handler::health_check,
        user_handler::list_users,
    ),
    components(
        schemas(
            User,
            health_handler::HealthResponse,
        )
    ),
    tags(
        (name = "General", description = "Greeting and health"),
        (name = "Users", description = "User listing")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/"));
        assert!(paths.iter().any(|p| p.as_str() == "/users"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
