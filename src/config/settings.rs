//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    AUTH_TOKEN_PARAM, DEFAULT_LOCAL_DATABASE_PATH, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    ENV_TURSO_AUTH_TOKEN, ENV_TURSO_DATABASE_URL, FILE_SCHEME_PREFIX,
};

/// Where the users table lives.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// File-backed SQLite database on local disk
    Local { path: String },
    /// Remote Turso / libSQL endpoint
    Remote {
        url: String,
        auth_token: Option<String>,
    },
}

impl DatabaseTarget {
    /// Resolve the target from the two optional Turso variables.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars(url: Option<String>, auth_token: Option<String>) -> Self {
        let url = url.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let auth_token = auth_token
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match url {
            Some(url) => DatabaseTarget::Remote { url, auth_token },
            None => DatabaseTarget::Local {
                path: DEFAULT_LOCAL_DATABASE_PATH.to_string(),
            },
        }
    }

    /// Connection string in libSQL client form.
    ///
    /// `file:<path>` for local targets, the bare URL for a remote target
    /// without a token, `<url>?authToken=<token>` otherwise.
    pub fn connection_string(&self) -> String {
        match self {
            DatabaseTarget::Local { path } => format!("{}{}", FILE_SCHEME_PREFIX, path),
            DatabaseTarget::Remote {
                url,
                auth_token: None,
            } => url.clone(),
            DatabaseTarget::Remote {
                url,
                auth_token: Some(token),
            } => {
                let separator = if url.contains('?') { '&' } else { '?' };
                format!("{}{}{}={}", url, separator, AUTH_TOKEN_PARAM, token)
            }
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DatabaseTarget::Remote { .. })
    }
}

impl std::fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseTarget::Local { path } => f.debug_struct("Local").field("path", path).finish(),
            DatabaseTarget::Remote { url, auth_token } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("auth_token", &auth_token.as_ref().map(|_| "[REDACTED]"))
                .finish(),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub database: DatabaseTarget,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Never fails: anything missing or unparsable falls back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration against an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database: DatabaseTarget::from_vars(
                lookup(ENV_TURSO_DATABASE_URL),
                lookup(ENV_TURSO_AUTH_TOKEN),
            ),
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Connection string for the configured database.
    pub fn database_url(&self) -> String {
        self.database.connection_string()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn falls_back_to_local_file_without_turso_vars() {
        let config = config_from(&[]);

        assert_eq!(
            config.database,
            DatabaseTarget::Local {
                path: "local.db".to_string()
            }
        );
        assert_eq!(config.database_url(), "file:local.db");
        assert!(!config.database.is_remote());
    }

    #[test]
    fn remote_url_without_token_has_no_auth_param() {
        let config = config_from(&[("TURSO_DATABASE_URL", "libsql://db-org.turso.io")]);

        assert_eq!(config.database_url(), "libsql://db-org.turso.io");
        assert!(!config.database_url().contains("authToken"));
    }

    #[test]
    fn remote_url_with_token_appends_auth_param() {
        let config = config_from(&[
            ("TURSO_DATABASE_URL", "libsql://db-org.turso.io"),
            ("TURSO_AUTH_TOKEN", "secret-token"),
        ]);

        assert_eq!(
            config.database_url(),
            "libsql://db-org.turso.io?authToken=secret-token"
        );
    }

    #[test]
    fn token_is_appended_to_existing_query() {
        let target = DatabaseTarget::from_vars(
            Some("libsql://db-org.turso.io?tls=1".to_string()),
            Some("t".to_string()),
        );

        assert_eq!(
            target.connection_string(),
            "libsql://db-org.turso.io?tls=1&authToken=t"
        );
    }

    #[test]
    fn token_alone_does_not_select_remote() {
        let config = config_from(&[("TURSO_AUTH_TOKEN", "secret-token")]);

        assert_eq!(config.database_url(), "file:local.db");
    }

    #[test]
    fn empty_values_are_treated_as_unset() {
        let config = config_from(&[("TURSO_DATABASE_URL", ""), ("TURSO_AUTH_TOKEN", "")]);
        assert_eq!(config.database_url(), "file:local.db");

        let config = config_from(&[
            ("TURSO_DATABASE_URL", "https://db.example.com"),
            ("TURSO_AUTH_TOKEN", "  "),
        ]);
        assert_eq!(config.database_url(), "https://db.example.com");
    }

    #[test]
    fn surrounding_whitespace_is_stripped() {
        let target = DatabaseTarget::from_vars(
            Some(" libsql://db-org.turso.io \n".to_string()),
            Some("\tsecret-token ".to_string()),
        );

        assert_eq!(
            target,
            DatabaseTarget::Remote {
                url: "libsql://db-org.turso.io".to_string(),
                auth_token: Some("secret-token".to_string()),
            }
        );
    }

    #[test]
    fn server_defaults_and_overrides() {
        let config = config_from(&[]);
        assert_eq!(config.server_addr(), "0.0.0.0:3000");

        let config = config_from(&[("SERVER_HOST", "127.0.0.1"), ("SERVER_PORT", "8080")]);
        assert_eq!(config.server_addr(), "127.0.0.1:8080");

        let config = config_from(&[("SERVER_PORT", "not-a-port")]);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = config_from(&[
            ("TURSO_DATABASE_URL", "libsql://db-org.turso.io"),
            ("TURSO_AUTH_TOKEN", "secret-token"),
        ]);

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
