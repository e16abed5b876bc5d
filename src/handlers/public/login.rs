// GET|POST / and /login

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::database::Credentials;
use crate::handlers::redirect_with;
use crate::middleware::CookieSession;
use crate::router::AppState;
use crate::types::Flash;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login - render the form along with any pending messages.
pub async fn login_form(session: CookieSession) -> impl IntoResponse {
    let (session, flashes) = session.take_flashes();
    (session, Html(views::login_page(&flashes)))
}

/// POST /login - the credentials are valid exactly when the database accepts
/// a connection made with them. Only then are they stored in the session.
pub async fn login_submit(
    State(state): State<AppState>,
    session: CookieSession,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = Credentials::new(form.username, form.password);

    match state.connector.connect(&credentials).await {
        Some(catalog) => {
            catalog.close().await;
            info!(user = %credentials.username, "login succeeded");
            let welcome = Flash::success(format!("Welcome {}!", credentials.username));
            redirect_with(session.sign_in(&credentials), welcome, "/tables")
        }
        None => {
            warn!(user = %credentials.username, "login rejected");
            let (session, mut flashes) = session.take_flashes();
            flashes.push(Flash::danger("Invalid credentials"));
            (session, Html(views::login_page(&flashes))).into_response()
        }
    }
}
