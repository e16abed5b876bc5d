use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;
use sqlx::ConnectOptions;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;
use crate::database::catalog::{Catalog, MySqlCatalog};

/// Database login, which doubles as the console login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opens connections to the configured schema. Failure of any kind yields
/// `None`; callers treat that uniformly as a connection error.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, credentials: &Credentials) -> Option<Box<dyn Catalog>>;
}

pub struct MySqlConnector {
    config: DatabaseConfig,
}

impl MySqlConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn options(&self, credentials: &Credentials) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&credentials.username)
            .password(&credentials.password)
            .database(&self.config.schema)
            .charset(&self.config.charset)
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    async fn connect(&self, credentials: &Credentials) -> Option<Box<dyn Catalog>> {
        let options = self.options(credentials);

        match tokio::time::timeout(self.config.connect_timeout(), options.connect()).await {
            Ok(Ok(conn)) => {
                debug!(user = %credentials.username, schema = %self.config.schema, "opened database connection");
                Some(Box::new(MySqlCatalog::new(conn)))
            }
            Ok(Err(e)) => {
                warn!(user = %credentials.username, host = %self.config.host, error = %e, "database connection failed");
                None
            }
            Err(_) => {
                warn!(
                    user = %credentials.username,
                    host = %self.config.host,
                    timeout_secs = self.config.connect_timeout_secs,
                    "database connection timed out"
                );
                None
            }
        }
    }
}
