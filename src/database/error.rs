use thiserror::Error;

/// Errors raised while talking to the database over an open connection.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
