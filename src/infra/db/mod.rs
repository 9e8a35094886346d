//! Database connection and initialization.

use std::sync::Arc;

use sea_orm::{
    ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbBackend, DbErr,
    ProxyDatabaseTrait, RuntimeErr, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::config::{Config, DatabaseTarget, FILE_SCHEME_PREFIX};
use crate::infra::turso::{TursoClient, TursoProxy};

pub mod migrations;

pub use migrations::Migrator;

/// Backend behind a connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// SQLite file on local disk
    LocalFile,
    /// Turso / libSQL over HTTP
    Remote,
}

impl Backend {
    /// Classify a libSQL-style connection string.
    pub fn detect(connection_string: &str) -> Result<Self, DbErr> {
        if connection_string.starts_with(FILE_SCHEME_PREFIX) {
            return Ok(Backend::LocalFile);
        }

        const REMOTE_SCHEMES: &[&str] = &["libsql://", "https://", "http://", "wss://", "ws://"];
        if REMOTE_SCHEMES
            .iter()
            .any(|scheme| connection_string.starts_with(scheme))
        {
            return Ok(Backend::Remote);
        }

        Err(DbErr::Conn(RuntimeErr::Internal(format!(
            "unsupported database url scheme: {}",
            connection_string.split(':').next().unwrap_or_default()
        ))))
    }
}

/// SeaORM URL for a `file:` connection string; the file is created if missing.
pub fn sqlite_url(connection_string: &str) -> String {
    let path = connection_string
        .strip_prefix(FILE_SCHEME_PREFIX)
        .unwrap_or(connection_string);
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("sqlite://{}{}mode=rwc", path, separator)
}

/// Whether `err` only says a table has not been created yet.
fn is_missing_table(err: &DbErr) -> bool {
    err.to_string().contains("no such table")
}

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
    backend: Backend,
}

impl Database {
    /// Open the configured database.
    ///
    /// Local files get pending migrations applied on connect; a remote
    /// schema is managed with the `migrate` command.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let database = Self::connect_without_migrations(config).await?;

        if database.backend == Backend::LocalFile {
            database.run_migrations().await?;
            tracing::info!("Database connected and migrations applied");
        } else {
            tracing::info!("Remote database connected");
        }

        Ok(database)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        match &config.database {
            DatabaseTarget::Local { .. } => Self::connect_file(&config.database_url()).await,
            DatabaseTarget::Remote { url, auth_token } => match Backend::detect(url)? {
                Backend::LocalFile => Self::connect_file(url).await,
                Backend::Remote => Self::connect_remote(url, auth_token.clone()).await,
            },
        }
    }

    /// Open a `file:` connection string as a local SQLite database.
    async fn connect_file(connection_string: &str) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(sqlite_url(connection_string)).await?;
        Ok(Self {
            connection,
            backend: Backend::LocalFile,
        })
    }

    /// Open a remote database through the Turso HTTP client.
    ///
    /// The token is sent as-is; it is never round-tripped through a URL.
    pub async fn connect_remote(url: &str, auth_token: Option<String>) -> Result<Self, DbErr> {
        let client = TursoClient::from_url(url, auth_token)?;
        tracing::debug!(endpoint = %client.pipeline_url(), "Using remote database");

        let proxy: Box<dyn ProxyDatabaseTrait> = Box::new(TursoProxy::new(client));
        let connection = SeaDatabase::connect_proxy(DbBackend::Sqlite, Arc::new(proxy)).await?;

        Ok(Self {
            connection,
            backend: Backend::Remote,
        })
    }

    /// Connect to any SeaORM URL (e.g. `sqlite::memory:`) and apply migrations.
    pub async fn connect_url(url: &str) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(url).await?;
        let database = Self {
            connection,
            backend: Backend::LocalFile,
        };
        database.run_migrations().await?;
        Ok(database)
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        // Nothing is applied until the bookkeeping table exists
        let applied: std::collections::HashSet<String> = match seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await
        {
            Ok(rows) => rows.into_iter().map(|m| m.version).collect(),
            Err(e) if is_missing_table(&e) => Default::default(),
            Err(e) => return Err(e),
        };

        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_backend_from_scheme() {
        assert_eq!(Backend::detect("file:local.db").unwrap(), Backend::LocalFile);
        assert_eq!(
            Backend::detect("libsql://db-org.turso.io?authToken=x").unwrap(),
            Backend::Remote
        );
        assert_eq!(
            Backend::detect("https://db-org.turso.io").unwrap(),
            Backend::Remote
        );
        assert!(matches!(
            Backend::detect("postgres://localhost/db"),
            Err(DbErr::Conn(_))
        ));
    }

    #[test]
    fn file_connection_string_maps_to_sqlite_url() {
        assert_eq!(sqlite_url("file:local.db"), "sqlite://local.db?mode=rwc");
        assert_eq!(sqlite_url("file:/tmp/app.db"), "sqlite:///tmp/app.db?mode=rwc");
        assert_eq!(
            sqlite_url("file:a.db?cache=shared"),
            "sqlite://a.db?cache=shared&mode=rwc"
        );
    }

    #[test]
    fn only_missing_tables_count_as_unmigrated() {
        let missing = DbErr::Query(RuntimeErr::Internal(
            "statement failed: no such table: seaql_migrations".to_string(),
        ));
        let outage = DbErr::Conn(RuntimeErr::Internal("server responded with 503".to_string()));

        assert!(is_missing_table(&missing));
        assert!(!is_missing_table(&outage));
    }

    #[tokio::test]
    async fn in_memory_database_migrates_and_pings() {
        let db = Database::connect_url("sqlite::memory:").await.unwrap();

        db.ping().await.unwrap();
        let status = db.migration_status().await.unwrap();
        assert!(!status.is_empty());
        assert!(status.iter().all(|(_, applied)| *applied));
    }
}
