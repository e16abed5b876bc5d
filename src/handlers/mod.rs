// handlers/mod.rs - two tiers, mirroring the session model:
// Public (no session) -> Protected (session credentials required)
pub mod public;
pub mod protected;

use axum::response::{IntoResponse, Redirect, Response};

use crate::middleware::CookieSession;
use crate::types::Flash;

/// Redirect (303) after queueing a flash message for the target page.
pub fn redirect_with(session: CookieSession, flash: Flash, to: &str) -> Response {
    (session.flash(flash), Redirect::to(to)).into_response()
}
