//! In-memory stand-ins for the database so browse flows can be tested
//! without a MySQL server. The fake understands exactly the statements
//! `QueryBuilder` produces and records every one it executes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::database::{Catalog, Connector, Credentials, DatabaseError, ResultSet, Row, SqlStatement};

#[derive(Debug, Clone)]
pub struct FakeTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl FakeTable {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: vec![],
        }
    }

    pub fn row(mut self, values: Vec<Value>) -> Self {
        self.rows.push(values);
        self
    }
}

#[derive(Default)]
struct Inner {
    tables: Vec<FakeTable>,
    accepted: Vec<Credentials>,
    failing_on: Option<String>,
    executed: Mutex<Vec<SqlStatement>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// Shared handle: the connector and every catalog it hands out see the same state.
#[derive(Clone, Default)]
pub struct FakeDatabase {
    inner: Arc<Inner>,
}

impl FakeDatabase {
    pub fn new(tables: Vec<FakeTable>, accepted: Vec<Credentials>) -> Self {
        Self {
            inner: Arc::new(Inner { tables, accepted, ..Default::default() }),
        }
    }

    /// Any statement whose text contains `fragment` fails with a query error.
    pub fn failing_on(tables: Vec<FakeTable>, accepted: Vec<Credentials>, fragment: &str) -> Self {
        Self {
            inner: Arc::new(Inner {
                tables,
                accepted,
                failing_on: Some(fragment.to_string()),
                ..Default::default()
            }),
        }
    }

    pub fn connector(&self) -> FakeConnector {
        FakeConnector { db: self.clone() }
    }

    pub fn executed(&self) -> Vec<SqlStatement> {
        self.inner.executed.lock().unwrap().clone()
    }

    pub fn executed_queries(&self) -> Vec<String> {
        self.executed().into_iter().map(|s| s.query).collect()
    }

    pub fn opened(&self) -> usize {
        self.inner.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.inner.closed.load(Ordering::SeqCst)
    }

    fn table(&self, name: &str) -> Option<&FakeTable> {
        self.inner.tables.iter().find(|t| t.name == name)
    }

    fn record(&self, stmt: &SqlStatement) -> Result<(), DatabaseError> {
        self.inner.executed.lock().unwrap().push(stmt.clone());
        match &self.inner.failing_on {
            Some(fragment) if stmt.query.contains(fragment.as_str()) => {
                Err(DatabaseError::QueryError(format!("simulated failure on {}", fragment)))
            }
            _ => Ok(()),
        }
    }

    /// Table named in the first backtick-quoted identifier of the statement.
    fn target(&self, stmt: &SqlStatement) -> Result<&FakeTable, DatabaseError> {
        let name = stmt
            .query
            .split('`')
            .nth(1)
            .ok_or_else(|| DatabaseError::QueryError(format!("no table in {}", stmt.query)))?;
        self.table(name)
            .ok_or_else(|| DatabaseError::QueryError(format!("Table '{}' doesn't exist", name)))
    }
}

pub struct FakeConnector {
    db: FakeDatabase,
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, credentials: &Credentials) -> Option<Box<dyn Catalog>> {
        if !self.db.inner.accepted.contains(credentials) {
            return None;
        }
        self.db.inner.opened.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(FakeCatalog { db: self.db.clone() }))
    }
}

pub struct FakeCatalog {
    db: FakeDatabase,
}

fn unwrap_like(pattern: &str) -> String {
    pattern.trim_matches('%').to_lowercase()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn query_names(&mut self, stmt: &SqlStatement) -> Result<Vec<String>, DatabaseError> {
        self.db.record(stmt)?;
        let needle = stmt.params.get(1).map(|p| unwrap_like(p)).unwrap_or_default();
        Ok(self
            .db
            .inner
            .tables
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .map(|t| t.name.clone())
            .collect())
    }

    async fn query_count(&mut self, stmt: &SqlStatement) -> Result<i64, DatabaseError> {
        self.db.record(stmt)?;
        let name = stmt.params.get(1).map(String::as_str).unwrap_or_default();
        Ok(self.db.table(name).map(|_| 1).unwrap_or(0))
    }

    async fn describe(&mut self, stmt: &SqlStatement) -> Result<Vec<String>, DatabaseError> {
        self.db.record(stmt)?;
        Ok(self.db.target(stmt)?.columns.clone())
    }

    async fn query_rows(&mut self, stmt: &SqlStatement) -> Result<ResultSet, DatabaseError> {
        self.db.record(stmt)?;
        let table = self.db.target(stmt)?;
        let needle = stmt.params.first().map(|p| unwrap_like(p));

        let rows = table
            .rows
            .iter()
            .filter(|values| match &needle {
                Some(needle) => values.iter().any(|v| cell_text(v).to_lowercase().contains(needle)),
                None => true,
            })
            .map(|values| {
                table
                    .columns
                    .iter()
                    .cloned()
                    .zip(values.iter().cloned())
                    .collect::<Row>()
            })
            .collect();

        Ok(ResultSet { columns: table.columns.clone(), rows })
    }

    async fn close(self: Box<Self>) {
        self.db.inner.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// A small schema shared by the browse tests.
pub fn sample_database() -> FakeDatabase {
    FakeDatabase::new(sample_tables(), vec![Credentials::new("javier", "secreto")])
}

pub fn sample_tables() -> Vec<FakeTable> {
    use serde_json::json;

    vec![
        FakeTable::new("clientes", &["id", "nombre", "ciudad"])
            .row(vec![json!(1), json!("Ana Smith"), json!("Madrid")])
            .row(vec![json!(2), json!("Luis Pérez"), json!("Sevilla")])
            .row(vec![json!(3), json!("Marta"), Value::Null]),
        FakeTable::new("pedidos", &["id", "cliente_id", "total"])
            .row(vec![json!(10), json!(1), json!("19.99")]),
        FakeTable::new("vacia", &[]),
    ]
}
