use clap::Parser;

use crate::config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "db-console")]
#[command(about = "Web console for browsing the tables of a MySQL schema")]
#[command(version)]
pub struct Cli {
    #[arg(long, env = "HOST", default_value = "0.0.0.0", help = "Address to bind the HTTP server to")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000, help = "Port to bind the HTTP server to")]
    pub port: u16,

    #[arg(long, env = "DEBUG", help = "Verbose logging and per-request traces")]
    pub debug: bool,
}

impl Cli {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            debug: self.debug,
        }
    }

    /// Default log directive when RUST_LOG is not set.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
