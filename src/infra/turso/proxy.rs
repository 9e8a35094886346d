//! SeaORM proxy connection backed by [`TursoClient`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::{DbErr, ProxyDatabaseTrait, ProxyExecResult, ProxyRow, Statement};

use super::protocol::{decode_value, encode_value, HranaValue, StmtResult};
use super::{TursoClient, TursoError};

/// Adapter handing SeaORM statements to the remote database.
///
/// Each statement runs in its own pipeline, so transactions are not
/// carried across calls.
#[derive(Debug, Clone)]
pub struct TursoProxy {
    client: TursoClient,
}

impl TursoProxy {
    pub fn new(client: TursoClient) -> Self {
        Self { client }
    }

    async fn run(&self, statement: &Statement) -> Result<StmtResult, TursoError> {
        let args = match &statement.values {
            Some(values) => values
                .0
                .iter()
                .map(encode_value)
                .collect::<Result<Vec<HranaValue>, _>>()?,
            None => Vec::new(),
        };

        self.client.execute(&statement.sql, args).await
    }
}

/// Convert a result set into name-keyed proxy rows.
fn into_proxy_rows(result: StmtResult) -> Result<Vec<ProxyRow>, TursoError> {
    let StmtResult { cols, rows, .. } = result;

    rows.into_iter()
        .map(|row| {
            if row.len() != cols.len() {
                return Err(TursoError::Protocol(format!(
                    "row has {} values for {} columns",
                    row.len(),
                    cols.len()
                )));
            }

            let mut values = BTreeMap::new();
            for (index, (col, value)) in cols.iter().zip(row).enumerate() {
                let name = col.name.clone().unwrap_or_else(|| index.to_string());
                values.insert(name, decode_value(value, col.decltype.as_deref())?);
            }
            Ok(ProxyRow { values })
        })
        .collect()
}

#[async_trait]
impl ProxyDatabaseTrait for TursoProxy {
    async fn query(&self, statement: Statement) -> Result<Vec<ProxyRow>, DbErr> {
        let result = self
            .run(&statement)
            .await
            .map_err(|e| e.into_db_err(DbErr::Query))?;

        into_proxy_rows(result).map_err(|e| e.into_db_err(DbErr::Query))
    }

    async fn execute(&self, statement: Statement) -> Result<ProxyExecResult, DbErr> {
        let result = self
            .run(&statement)
            .await
            .map_err(|e| e.into_db_err(DbErr::Exec))?;

        let last_insert_id = result
            .last_insert_rowid
            .as_deref()
            .and_then(|id| id.parse::<u64>().ok())
            .unwrap_or_default();

        Ok(ProxyExecResult {
            last_insert_id,
            rows_affected: result.affected_row_count,
        })
    }

    async fn ping(&self) -> Result<(), DbErr> {
        self.client
            .execute("SELECT 1", Vec::new())
            .await
            .map(|_| ())
            .map_err(|e| e.into_db_err(DbErr::Conn))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Value;

    use super::super::protocol::Col;
    use super::*;

    fn col(name: &str, decltype: &str) -> Col {
        Col {
            name: Some(name.to_string()),
            decltype: Some(decltype.to_string()),
        }
    }

    #[test]
    fn rows_are_keyed_by_column_name() {
        let result = StmtResult {
            cols: vec![col("id", "INTEGER"), col("name", "TEXT")],
            rows: vec![vec![HranaValue::integer(3), HranaValue::text("Ada")]],
            affected_row_count: 0,
            last_insert_rowid: None,
        };

        let rows = into_proxy_rows(result).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values.get("id"), Some(&Value::BigInt(Some(3))));
        assert_eq!(
            rows[0].values.get("name"),
            Some(&Value::String(Some(Box::new("Ada".to_string()))))
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = StmtResult {
            cols: vec![col("id", "INTEGER"), col("name", "TEXT")],
            rows: vec![vec![HranaValue::integer(3)]],
            affected_row_count: 0,
            last_insert_rowid: None,
        };

        assert!(into_proxy_rows(result).is_err());
    }
}
