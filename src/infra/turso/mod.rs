//! Remote database access for Turso / libSQL.
//!
//! Statements are sent over HTTP to the pipeline endpoint and surfaced to
//! SeaORM through its proxy connection, so the ORM layer is the same for
//! local and remote stores.

mod client;
pub mod protocol;
mod proxy;

use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

pub use client::TursoClient;
pub use proxy::TursoProxy;

/// Errors raised while talking to the remote database
#[derive(Error, Debug)]
pub enum TursoError {
    #[error("invalid database url: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("statement failed: {message}")]
    Statement {
        message: String,
        code: Option<String>,
    },

    #[error("malformed response: {0}")]
    Protocol(String),

    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
}

impl TursoError {
    /// Whether the failure happened before the server could answer.
    pub fn is_connection(&self) -> bool {
        match self {
            TursoError::InvalidUrl(_) => true,
            TursoError::Http(e) => e.is_connect() || e.is_timeout(),
            TursoError::Status { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Convert into a SeaORM error, using `kind` unless the failure is a
    /// connection problem.
    pub fn into_db_err(self, kind: fn(RuntimeErr) -> DbErr) -> DbErr {
        let runtime = RuntimeErr::Internal(self.to_string());
        if self.is_connection() {
            DbErr::Conn(runtime)
        } else {
            kind(runtime)
        }
    }
}

impl From<TursoError> for DbErr {
    fn from(err: TursoError) -> Self {
        err.into_db_err(DbErr::Query)
    }
}
