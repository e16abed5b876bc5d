pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod services;
pub mod types;
pub mod views;

pub use config::AppConfig;
pub use error::ConsoleError;
pub use router::{app, AppState};

#[cfg(test)]
pub mod testing;
