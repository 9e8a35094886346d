//! Root greeting.

use crate::config::GREETING;

/// Static greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "General",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    )
)]
pub async fn root() -> &'static str {
    GREETING
}
