//! One live database connection and the handful of read paths the console needs.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::mysql::{MySqlConnection, MySqlRow};
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::types::BigDecimal;
use sqlx::{Column, Connection, Executor, Row as _, Statement, TypeInfo};
use tracing::{debug, warn};

use crate::database::error::DatabaseError;
use crate::database::query_builder::SqlStatement;

/// A decoded row, keyed by column name.
pub type Row = Map<String, Value>;

/// Column names in result order plus the decoded rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// A single open connection. Statements run sequentially; the owner must call
/// [`Catalog::close`] once it is done, on every path.
#[async_trait]
pub trait Catalog: Send {
    /// First column of every row, as text.
    async fn query_names(&mut self, stmt: &SqlStatement) -> Result<Vec<String>, DatabaseError>;

    /// First column of the first row, as an integer.
    async fn query_count(&mut self, stmt: &SqlStatement) -> Result<i64, DatabaseError>;

    /// Column names from the result-set description; rows are discarded.
    async fn describe(&mut self, stmt: &SqlStatement) -> Result<Vec<String>, DatabaseError>;

    async fn query_rows(&mut self, stmt: &SqlStatement) -> Result<ResultSet, DatabaseError>;

    async fn close(self: Box<Self>);
}

pub struct MySqlCatalog {
    conn: MySqlConnection,
}

impl MySqlCatalog {
    pub fn new(conn: MySqlConnection) -> Self {
        Self { conn }
    }

    /// Prepare, read the column description, then bind and fetch.
    async fn run(&mut self, stmt: &SqlStatement) -> Result<(Vec<String>, Vec<MySqlRow>), DatabaseError> {
        if stmt.placeholder_count() != stmt.params.len() {
            return Err(DatabaseError::QueryError(format!(
                "statement expects {} parameters, got {}",
                stmt.placeholder_count(),
                stmt.params.len()
            )));
        }

        debug!(query = %stmt.query, params = stmt.params.len(), "executing statement");

        let prepared = (&mut self.conn).prepare(stmt.query.as_str()).await?;
        let columns = prepared
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect::<Vec<_>>();

        let mut query = prepared.query();
        for param in stmt.params.iter() {
            query = query.bind(param.as_str());
        }
        let rows = query.fetch_all(&mut self.conn).await?;
        Ok((columns, rows))
    }
}

#[async_trait]
impl Catalog for MySqlCatalog {
    async fn query_names(&mut self, stmt: &SqlStatement) -> Result<Vec<String>, DatabaseError> {
        let (_, rows) = self.run(stmt).await?;
        rows.iter()
            .map(|row| match decode_value(row, 0) {
                Value::String(s) => Ok(s),
                other => Err(DatabaseError::QueryError(format!("expected a text column, got {}", other))),
            })
            .collect()
    }

    async fn query_count(&mut self, stmt: &SqlStatement) -> Result<i64, DatabaseError> {
        let (_, rows) = self.run(stmt).await?;
        let row = rows
            .first()
            .ok_or_else(|| DatabaseError::QueryError("count query returned no rows".to_string()))?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    async fn describe(&mut self, stmt: &SqlStatement) -> Result<Vec<String>, DatabaseError> {
        let (columns, _) = self.run(stmt).await?;
        Ok(columns)
    }

    async fn query_rows(&mut self, stmt: &SqlStatement) -> Result<ResultSet, DatabaseError> {
        let (columns, rows) = self.run(stmt).await?;
        let rows = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), decode_value(row, i)))
                    .collect::<Row>()
            })
            .collect();
        Ok(ResultSet { columns, rows })
    }

    async fn close(self: Box<Self>) {
        let MySqlCatalog { conn } = *self;
        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close database connection cleanly");
        }
    }
}

/// Best-effort conversion of a MySQL value to JSON. Type compatibility is
/// checked by sqlx, so the first decoder that accepts the column wins.
fn decode_value(row: &MySqlRow, index: usize) -> Value {
    // NULL decodes as None for any Option<T>, so this also catches NULLs of every type.
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return v.map(Value::String).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Value::Number(v.into());
    }
    if let Ok(v) = row.try_get::<u64, _>(index) {
        return Value::Number(v.into());
    }
    if let Ok(v) = row.try_get::<BigDecimal, _>(index) {
        return Value::String(v.to_string());
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return serde_json::Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<f32, _>(index) {
        return serde_json::Number::from_f64(v as f64).map(Value::Number).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<DateTime<Utc>, _>(index) {
        return Value::String(v.to_rfc3339());
    }
    if let Ok(v) = row.try_get::<NaiveDateTime, _>(index) {
        return Value::String(v.to_string());
    }
    if let Ok(v) = row.try_get::<NaiveDate, _>(index) {
        return Value::String(v.to_string());
    }
    if let Ok(v) = row.try_get::<NaiveTime, _>(index) {
        return Value::String(v.to_string());
    }
    if let Ok(v) = row.try_get::<bool, _>(index) {
        return Value::Bool(v);
    }
    if let Ok(v) = row.try_get::<Value, _>(index) {
        return v;
    }
    if let Ok(v) = row.try_get::<Vec<u8>, _>(index) {
        return Value::String(String::from_utf8_lossy(&v).into_owned());
    }

    let type_name = row.column(index).type_info().name().to_string();
    debug!(column = index, column_type = %type_name, "no decoder for column type");
    unsupported(&type_name)
}

/// Marker for a value that could not be decoded, so it never reads as NULL.
fn unsupported(type_name: &str) -> Value {
    Value::String(format!("<{}>", type_name))
}
