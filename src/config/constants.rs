//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Body returned by the root endpoint
pub const GREETING: &str = "Hello from users-api";

// =============================================================================
// Database
// =============================================================================

/// Remote database URL (Turso / libSQL)
pub const ENV_TURSO_DATABASE_URL: &str = "TURSO_DATABASE_URL";

/// Auth token for the remote database
pub const ENV_TURSO_AUTH_TOKEN: &str = "TURSO_AUTH_TOKEN";

/// Local database file used when no remote URL is configured
pub const DEFAULT_LOCAL_DATABASE_PATH: &str = "local.db";

/// Scheme prefix for file-backed connection strings
pub const FILE_SCHEME_PREFIX: &str = "file:";

/// Query parameter carrying the remote auth token
pub const AUTH_TOKEN_PARAM: &str = "authToken";

// =============================================================================
// Remote Database Client
// =============================================================================

/// Path of the pipeline endpoint, relative to the database base URL
pub const TURSO_PIPELINE_PATH: &str = "v2/pipeline";

/// Per-request timeout for the remote database
pub const TURSO_REQUEST_TIMEOUT_SECONDS: u64 = 30;
