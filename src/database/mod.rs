pub mod catalog;
pub mod connector;
pub mod error;
pub mod guard;
pub mod query_builder;

pub use catalog::{Catalog, MySqlCatalog, ResultSet, Row};
pub use connector::{Connector, Credentials, MySqlConnector};
pub use error::DatabaseError;
pub use guard::{sanitize_search, validate_table_name, TableName};
pub use query_builder::{QueryBuilder, SqlStatement};
