//! Wire types for the libSQL pipeline endpoint (`POST /v2/pipeline`).
//!
//! Only the subset used here is modelled: `execute` and `close` requests,
//! and their results.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sea_orm::Value;
use serde::{Deserialize, Serialize};

use super::TursoError;

/// Body of a pipeline request
#[derive(Debug, Serialize)]
pub struct PipelineRequest {
    pub requests: Vec<StreamRequest>,
}

impl PipelineRequest {
    /// A single statement followed by closing the stream.
    pub fn single(stmt: Stmt) -> Self {
        Self {
            requests: vec![StreamRequest::Execute { stmt }, StreamRequest::Close],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamRequest {
    Execute { stmt: Stmt },
    Close,
}

/// A SQL statement with positional arguments
#[derive(Debug, Serialize)]
pub struct Stmt {
    pub sql: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<HranaValue>,
    pub want_rows: bool,
}

/// A dynamically typed SQL value as encoded on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HranaValue {
    Null,
    /// 64-bit integer, sent as a decimal string
    Integer { value: String },
    Float { value: f64 },
    Text { value: String },
    Blob { base64: String },
}

impl HranaValue {
    pub fn integer(n: impl ToString) -> Self {
        HranaValue::Integer {
            value: n.to_string(),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        HranaValue::Text { value: s.into() }
    }
}

/// Body of a pipeline response
#[derive(Debug, Deserialize)]
pub struct PipelineResponse {
    pub results: Vec<StreamResult>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamResult {
    Ok { response: StreamResponse },
    Error { error: ProtocolError },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamResponse {
    Execute { result: StmtResult },
    Close,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct ProtocolError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Outcome of one executed statement
#[derive(Debug, Deserialize)]
pub struct StmtResult {
    pub cols: Vec<Col>,
    pub rows: Vec<Vec<HranaValue>>,
    pub affected_row_count: u64,
    #[serde(default)]
    pub last_insert_rowid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Col {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decltype: Option<String>,
}

impl PipelineResponse {
    /// Extract the result of the first (execute) request.
    pub fn into_stmt_result(self) -> Result<StmtResult, TursoError> {
        match self.results.into_iter().next() {
            Some(StreamResult::Ok {
                response: StreamResponse::Execute { result },
            }) => Ok(result),
            Some(StreamResult::Ok { .. }) => Err(TursoError::Protocol(
                "expected an execute response".to_string(),
            )),
            Some(StreamResult::Error { error }) => Err(TursoError::Statement {
                message: error.message,
                code: error.code,
            }),
            None => Err(TursoError::Protocol("empty pipeline response".to_string())),
        }
    }
}

/// SQLite column affinity, derived from a declared column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Integer,
    Boolean,
    Real,
    Text,
    Blob,
}

impl Affinity {
    pub fn from_decltype(decltype: Option<&str>) -> Self {
        let Some(decltype) = decltype else {
            return Affinity::Text;
        };
        let upper = decltype.to_ascii_uppercase();

        if upper.starts_with("BOOL") {
            Affinity::Boolean
        } else if upper.contains("INT") {
            Affinity::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            Affinity::Text
        } else if upper.contains("BLOB") {
            Affinity::Blob
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            Affinity::Real
        } else {
            Affinity::Text
        }
    }

    /// Typed NULL matching this affinity.
    fn null(self) -> Value {
        match self {
            Affinity::Integer => Value::BigInt(None),
            Affinity::Boolean => Value::Bool(None),
            Affinity::Real => Value::Double(None),
            Affinity::Text => Value::String(None),
            Affinity::Blob => Value::Bytes(None),
        }
    }
}

/// Encode an ORM bind parameter.
pub fn encode_value(value: &Value) -> Result<HranaValue, TursoError> {
    let encoded = match value {
        Value::Bool(v) => v.map(|b| HranaValue::integer(b as i64)),
        Value::TinyInt(v) => v.map(HranaValue::integer),
        Value::SmallInt(v) => v.map(HranaValue::integer),
        Value::Int(v) => v.map(HranaValue::integer),
        Value::BigInt(v) => v.map(HranaValue::integer),
        Value::TinyUnsigned(v) => v.map(HranaValue::integer),
        Value::SmallUnsigned(v) => v.map(HranaValue::integer),
        Value::Unsigned(v) => v.map(HranaValue::integer),
        Value::BigUnsigned(v) => match v {
            Some(n) => Some(HranaValue::integer(i64::try_from(*n).map_err(|_| {
                TursoError::UnsupportedValue(format!("{} does not fit in a 64-bit integer", n))
            })?)),
            None => None,
        },
        Value::Float(v) => v.map(|f| HranaValue::Float { value: f as f64 }),
        Value::Double(v) => v.map(|f| HranaValue::Float { value: f }),
        Value::String(v) => v.as_ref().map(|s| HranaValue::text(s.as_str())),
        Value::Char(v) => v.map(|c| HranaValue::text(c.to_string())),
        Value::Bytes(v) => v.as_ref().map(|b| HranaValue::Blob {
            base64: STANDARD.encode(b.as_slice()),
        }),
        other => return Err(TursoError::UnsupportedValue(format!("{:?}", other))),
    };

    Ok(encoded.unwrap_or(HranaValue::Null))
}

/// Decode a wire value into an ORM value, using the column's declared type
/// to pick the Rust-side representation.
pub fn decode_value(value: HranaValue, decltype: Option<&str>) -> Result<Value, TursoError> {
    let affinity = Affinity::from_decltype(decltype);

    match value {
        HranaValue::Null => Ok(affinity.null()),
        HranaValue::Integer { value } => {
            let n: i64 = value
                .parse()
                .map_err(|_| TursoError::Protocol(format!("invalid integer {:?}", value)))?;
            Ok(match affinity {
                Affinity::Boolean => Value::Bool(Some(n != 0)),
                Affinity::Real => Value::Double(Some(n as f64)),
                _ => Value::BigInt(Some(n)),
            })
        }
        HranaValue::Float { value } => Ok(Value::Double(Some(value))),
        HranaValue::Text { value } => Ok(Value::String(Some(Box::new(value)))),
        HranaValue::Blob { base64 } => {
            let bytes = STANDARD
                .decode(base64.as_bytes())
                .map_err(|e| TursoError::Protocol(format!("invalid blob encoding: {}", e)))?;
            Ok(Value::Bytes(Some(Box::new(bytes))))
        }
    }
}
