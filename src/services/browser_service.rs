use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::database::guard::{sanitize_search, TableName};
use crate::database::{Catalog, Connector, Credentials, QueryBuilder, ResultSet};
use crate::error::ConsoleError;
use crate::types::Flash;

pub const LIST_SEARCH_REJECTED: &str = "Invalid search term";
pub const VIEW_SEARCH_REJECTED: &str = "Invalid search term. SQL commands are not allowed.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableListing {
    pub tables: Vec<String>,
    /// Set when the search term was rejected and the list is unfiltered.
    pub notice: Option<Flash>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub table: String,
    pub result: ResultSet,
    /// Set when the search term was rejected and nothing was queried.
    pub notice: Option<Flash>,
}

/// Schema browsing on behalf of one user. Every call opens its own
/// connection with the caller's credentials and closes it before returning.
#[derive(Clone)]
pub struct SchemaBrowser {
    connector: Arc<dyn Connector>,
    schema: String,
}

impl SchemaBrowser {
    pub fn new(connector: Arc<dyn Connector>, schema: impl Into<String>) -> Self {
        Self { connector, schema: schema.into() }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Table names in the schema. A rejected search term drops the filter
    /// and attaches a warning instead of failing.
    pub async fn list_tables(&self, credentials: &Credentials, search: &str) -> Result<TableListing, ConsoleError> {
        let mut catalog = self.open(credentials).await?;
        let outcome = list_tables(catalog.as_mut(), &self.schema, search).await;
        catalog.close().await;
        outcome
    }

    /// Columns and rows of one table. The name is validated before any
    /// connection is made; a rejected search term aborts with empty results.
    pub async fn view_table(
        &self,
        credentials: &Credentials,
        table_name: &str,
        search: &str,
    ) -> Result<TableView, ConsoleError> {
        let table =
            TableName::parse(table_name).ok_or_else(|| ConsoleError::InvalidTableName(table_name.to_string()))?;

        let mut catalog = self.open(credentials).await?;
        let outcome = view_table(catalog.as_mut(), &self.schema, &table, search).await;
        catalog.close().await;
        outcome
    }

    async fn open(&self, credentials: &Credentials) -> Result<Box<dyn Catalog>, ConsoleError> {
        self.connector.connect(credentials).await.ok_or(ConsoleError::Connection)
    }
}

async fn list_tables(catalog: &mut dyn Catalog, schema: &str, search: &str) -> Result<TableListing, ConsoleError> {
    let mut notice = None;
    let filter = if search.is_empty() {
        None
    } else {
        let safe = sanitize_search(search);
        if safe.is_empty() {
            info!(search = %search, "search term rejected, listing unfiltered");
            notice = Some(Flash::warning(LIST_SEARCH_REJECTED));
        }
        Some(safe)
    };

    let stmt = QueryBuilder::list_tables(schema, filter.as_deref());
    let tables = catalog.query_names(&stmt).await?;
    debug!(schema = %schema, count = tables.len(), "listed tables");

    Ok(TableListing { tables, notice })
}

async fn view_table(
    catalog: &mut dyn Catalog,
    schema: &str,
    table: &TableName,
    search: &str,
) -> Result<TableView, ConsoleError> {
    let exists = catalog.query_count(&QueryBuilder::table_exists(schema, table)).await?;
    if exists == 0 {
        return Err(ConsoleError::TableNotFound(table.to_string()));
    }

    if search.is_empty() {
        let result = catalog.query_rows(&QueryBuilder::select_all(table)).await?;
        return Ok(TableView { table: table.to_string(), result, notice: None });
    }

    let safe = sanitize_search(search);
    if safe.is_empty() {
        info!(table = %table, search = %search, "search term rejected, not querying");
        return Ok(TableView {
            table: table.to_string(),
            result: ResultSet::default(),
            notice: Some(Flash::warning(VIEW_SEARCH_REJECTED)),
        });
    }

    let columns = catalog.describe(&QueryBuilder::probe_columns(table)).await?;
    let result = catalog
        .query_rows(&QueryBuilder::select_matching(table, &columns, &safe))
        .await?;
    debug!(table = %table, columns = columns.len(), rows = result.rows.len(), "filtered table view");

    Ok(TableView { table: table.to_string(), result, notice: None })
}
