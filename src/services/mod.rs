pub mod browser_service;

pub use browser_service::{SchemaBrowser, TableListing, TableView};
