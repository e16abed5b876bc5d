use axum::response::Response;
use tracing::info;

use crate::handlers::redirect_with;
use crate::middleware::CookieSession;
use crate::types::Flash;

/// GET /logout - drop the stored credentials and return to the login page.
pub async fn logout(session: CookieSession) -> Response {
    if let Some(credentials) = session.credentials() {
        info!(user = %credentials.username, "logged out");
    }
    redirect_with(session.sign_out(), Flash::info("Session closed"), "/login")
}
