// handlers/protected - every handler here takes a `SessionUser`, so requests
// without session credentials never reach them.
pub mod table;
pub mod tables;

use serde::Deserialize;

pub use table::view_table;
pub use tables::list_tables;

/// `?search=` shared by both browse pages. Absent means empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}
