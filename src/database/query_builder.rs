use crate::database::guard::{like_pattern, quote_identifier, TableName};

/// SQL text plus the values bound to its `?` placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    pub query: String,
    pub params: Vec<String>,
}

impl SqlStatement {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), params: vec![] }
    }

    pub fn bind(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Number of `?` placeholders, ignoring any inside backtick-quoted identifiers.
    pub fn placeholder_count(&self) -> usize {
        let mut quoted = false;
        self.query
            .chars()
            .filter(|&c| {
                if c == '`' {
                    quoted = !quoted;
                }
                c == '?' && !quoted
            })
            .count()
    }
}

pub struct QueryBuilder;

impl QueryBuilder {
    /// Table names in `schema`, optionally narrowed to names containing `search` (case-insensitive).
    pub fn list_tables(schema: &str, search: Option<&str>) -> SqlStatement {
        let base = "SELECT table_name AS table_name FROM information_schema.tables WHERE table_schema = ?";
        match search {
            Some(term) if !term.is_empty() => {
                SqlStatement::new(format!("{} AND LOWER(table_name) LIKE LOWER(?)", base))
                    .bind(schema)
                    .bind(like_pattern(term))
            }
            _ => SqlStatement::new(base).bind(schema),
        }
    }

    pub fn table_exists(schema: &str, table: &TableName) -> SqlStatement {
        SqlStatement::new(
            "SELECT COUNT(*) AS count FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
        )
        .bind(schema)
        .bind(table.as_str())
    }

    pub fn select_all(table: &TableName) -> SqlStatement {
        SqlStatement::new(format!("SELECT * FROM {}", table.quoted()))
    }

    /// Zero-row query whose only purpose is the result-set description.
    pub fn probe_columns(table: &TableName) -> SqlStatement {
        SqlStatement::new(format!("SELECT * FROM {} LIMIT 0", table.quoted()))
    }

    /// Rows where any column matches `%term%`. `columns` must come from the
    /// driver's metadata for `table`, never from request input.
    pub fn select_matching(table: &TableName, columns: &[String], term: &str) -> SqlStatement {
        if columns.is_empty() {
            return Self::select_all(table);
        }

        let conditions = columns
            .iter()
            .map(|c| format!("{} LIKE ?", quote_identifier(c)))
            .collect::<Vec<_>>()
            .join(" OR ");

        let pattern = like_pattern(term);
        columns.iter().fold(
            SqlStatement::new(format!("SELECT * FROM {} WHERE {}", table.quoted(), conditions)),
            |stmt, _| stmt.bind(pattern.clone()),
        )
    }
}
