//! HTTP client for the libSQL pipeline endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::debug;

use super::protocol::{HranaValue, PipelineRequest, PipelineResponse, Stmt, StmtResult};
use super::TursoError;
use crate::config::{AUTH_TOKEN_PARAM, TURSO_PIPELINE_PATH, TURSO_REQUEST_TIMEOUT_SECONDS};

/// Client bound to one remote database
#[derive(Clone)]
pub struct TursoClient {
    http: Client,
    pipeline_url: Url,
    auth_token: Option<String>,
}

impl std::fmt::Debug for TursoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TursoClient")
            .field("pipeline_url", &self.pipeline_url.as_str())
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl TursoClient {
    /// Build a client for a libSQL database URL such as
    /// `libsql://db-org.turso.io`.
    ///
    /// `libsql:` and `wss:` map to HTTPS, `ws:` to plain HTTP. The token is
    /// used verbatim; when absent, an `authToken` query parameter already in
    /// the URL is used instead.
    pub fn from_url(database_url: &str, auth_token: Option<String>) -> Result<Self, TursoError> {
        let normalized = normalize_scheme(database_url);
        let mut url = Url::parse(&normalized)
            .map_err(|e| TursoError::InvalidUrl(format!("{}: {}", redact(database_url), e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TursoError::InvalidUrl(format!(
                "unsupported scheme {:?}",
                url.scheme()
            )));
        }

        let embedded_token = url
            .query_pairs()
            .find(|(key, _)| key == AUTH_TOKEN_PARAM)
            .map(|(_, value)| value.into_owned());
        url.set_query(None);

        let auth_token = auth_token
            .or(embedded_token)
            .filter(|token| !token.is_empty());

        Self::new(url, auth_token)
    }

    /// Build a client for `base_url` (an http(s) database URL).
    pub fn new(mut base_url: Url, auth_token: Option<String>) -> Result<Self, TursoError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let pipeline_url = base_url
            .join(TURSO_PIPELINE_PATH)
            .map_err(|e| TursoError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(TURSO_REQUEST_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            http,
            pipeline_url,
            auth_token,
        })
    }

    /// Endpoint statements are posted to.
    pub fn pipeline_url(&self) -> &Url {
        &self.pipeline_url
    }

    /// Execute one statement and return its result set.
    pub async fn execute(
        &self,
        sql: &str,
        args: Vec<HranaValue>,
    ) -> Result<StmtResult, TursoError> {
        debug!(sql, args = args.len(), "Executing remote statement");

        let body = PipelineRequest::single(Stmt {
            sql: sql.to_string(),
            args,
            want_rows: true,
        });

        let mut request = self.http.post(self.pipeline_url.clone()).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TursoError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let pipeline: PipelineResponse = response
            .json()
            .await
            .map_err(|e| TursoError::Protocol(e.to_string()))?;

        pipeline.into_stmt_result()
    }
}

fn normalize_scheme(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("libsql://") {
        format!("https://{}", rest)
    } else if let Some(rest) = url.strip_prefix("wss://") {
        format!("https://{}", rest)
    } else if let Some(rest) = url.strip_prefix("ws://") {
        format!("http://{}", rest)
    } else {
        url.to_string()
    }
}

/// Drop the query string so tokens never end up in logs or errors.
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
