use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::AppConfig;
use crate::database::Connector;
use crate::handlers::{protected, public};
use crate::services::SchemaBrowser;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub connector: Arc<dyn Connector>,
    pub browser: SchemaBrowser,
    key: Key,
}

impl AppState {
    pub fn new(config: AppConfig, connector: Arc<dyn Connector>) -> Self {
        let key = cookie_key(config.session.secret.as_deref());
        let browser = SchemaBrowser::new(connector.clone(), config.database.schema.clone());
        Self { config: Arc::new(config), connector, browser, key }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

/// Cookie encryption key. A configured secret is stretched to the 64 bytes
/// the key needs; without one every process start invalidates old sessions.
fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => {
            warn!("SESSION_SECRET not set, using a random per-process cookie key");
            Key::generate()
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::login_form).post(public::login_submit))
        .route("/login", get(public::login_form).post(public::login_submit))
        .route("/logout", get(public::logout))
        .route("/health", get(public::health))
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/tables", get(protected::list_tables))
        .route("/table/:table_name", get(protected::view_table))
}
