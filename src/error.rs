use thiserror::Error;

use crate::database::DatabaseError;
use crate::types::Flash;

/// Everything a browse request can fail with. The `Display` text is what the
/// user sees in the flash message.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The path segment is not a plain identifier; no query was attempted.
    #[error("Invalid table name")]
    InvalidTableName(String),

    /// Missing from the schema or invisible to the connected user. The two
    /// cases are indistinguishable to the user.
    #[error("Table does not exist or you lack permission to see it")]
    TableNotFound(String),

    #[error("Database connection error")]
    Connection,

    #[error("Error: {0}")]
    Execution(#[from] DatabaseError),
}

impl ConsoleError {
    pub fn flash(&self) -> Flash {
        Flash::danger(self.to_string())
    }

    /// Log at a level matching who is at fault.
    pub fn log(&self) {
        match self {
            ConsoleError::InvalidTableName(name) => {
                tracing::warn!(table = %name, "rejected table name")
            }
            ConsoleError::TableNotFound(name) => {
                tracing::info!(table = %name, "table not found or not visible")
            }
            ConsoleError::Connection => tracing::warn!("no database connection for session"),
            ConsoleError::Execution(e) => tracing::error!(error = %e, "query execution failed"),
        }
    }
}
