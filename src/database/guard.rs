//! Input guards for anything that ends up in SQL text.
//!
//! Values always travel as bound parameters. Identifiers cannot be bound, so
//! a table name has to pass [`validate_table_name`] before it is interpolated,
//! and every interpolated identifier goes through [`quote_identifier`].

/// Substrings that cause a search term to be rejected, matched case-insensitively.
pub const SEARCH_DENYLIST: &[&str] = &[
    "'", "\"", ";", "--", "/*", "*/", "drop", "delete", "update", "insert", "union", "select", "from",
    "where", "=", "<", ">",
];

/// Accepts only non-empty names made of ASCII letters, digits and underscore.
pub fn validate_table_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns the term unchanged, or an empty string if it contains a denylisted token.
pub fn sanitize_search(term: &str) -> String {
    if term.is_empty() {
        return String::new();
    }

    let lowered = term.to_lowercase();
    if SEARCH_DENYLIST.iter().any(|token| lowered.contains(token)) {
        return String::new();
    }
    term.to_string()
}

/// Wrap an identifier in MySQL backticks, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// `%term%` for a substring `LIKE` match.
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}

/// A table name that has passed [`validate_table_name`]. The query builder only
/// accepts this type, so an unchecked string cannot reach identifier position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn parse(name: &str) -> Option<Self> {
        validate_table_name(name).then(|| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        quote_identifier(&self.0)
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
