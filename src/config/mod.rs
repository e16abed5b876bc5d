use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Process-wide configuration. Built once at startup and handed to the
/// router as shared state; nothing in here is ever taken from a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    /// The single schema this console browses.
    pub schema: String,
    pub charset: String,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to derive the cookie encryption key. When unset a random
    /// key is generated per process, so sessions do not survive a restart.
    #[serde(skip_serializing)]
    pub secret: Option<String>,
    pub cookie_name: String,
    pub flash_cookie_name: String,
    pub secure_cookies: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                debug: false,
            },
            database: DatabaseConfig {
                host: "debiandb".to_string(),
                port: 3306,
                schema: "javierdb".to_string(),
                charset: "utf8mb4".to_string(),
                connect_timeout_secs: 10,
            },
            session: SessionConfig {
                secret: None,
                cookie_name: "console_session".to_string(),
                flash_cookie_name: "console_flash".to_string(),
                secure_cookies: false,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DB_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("DB_SCHEMA") {
            self.database.schema = v;
        }
        if let Ok(v) = env::var("DB_CHARSET") {
            self.database.charset = v;
        }
        if let Ok(v) = env::var("DB_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.session.secret = Some(v).filter(|s| !s.is_empty());
        }
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            self.session.cookie_name = v;
        }
        if let Ok(v) = env::var("SESSION_SECURE_COOKIES") {
            self.session.secure_cookies = v.parse().unwrap_or(self.session.secure_cookies);
        }

        self
    }

    /// Replace the bind address and debug toggle, typically with values from the command line.
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
