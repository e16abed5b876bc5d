use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use db_console::cli::Cli;
use db_console::config::AppConfig;
use db_console::database::MySqlConnector;
use db_console::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_HOST, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = AppConfig::from_env().with_server(cli.server_config());
    info!(
        db_host = %config.database.host,
        db_port = config.database.port,
        schema = %config.database.schema,
        debug = config.server.debug,
        "starting database console"
    );

    let bind_addr = config.bind_addr();
    let connector = Arc::new(MySqlConnector::new(config.database.clone()));
    let app = app(AppState::new(config, connector));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
