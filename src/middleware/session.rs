use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, IntoResponseParts, Redirect, Response, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;
use tracing::{debug, error};

use crate::config::{AppConfig, SessionConfig};
use crate::database::Credentials;
use crate::middleware::flash;
use crate::types::Flash;

/// The browser session: login credentials plus pending flash messages, both
/// kept in encrypted cookies. Return it from a handler to write changes back.
///
/// The credentials cookie holds the database password for the lifetime of the
/// browser session so each request can reconnect as the user. It is only
/// cleared by [`CookieSession::sign_out`].
pub struct CookieSession {
    jar: PrivateCookieJar,
    settings: SessionConfig,
}

impl CookieSession {
    pub fn new(jar: PrivateCookieJar, settings: SessionConfig) -> Self {
        Self { jar, settings }
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.jar
            .get(&self.settings.cookie_name)
            .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
    }

    pub fn sign_in(self, credentials: &Credentials) -> Self {
        let value = match serde_json::to_string(credentials) {
            Ok(value) => value,
            Err(e) => {
                error!(error = %e, "failed to encode session credentials");
                return self;
            }
        };
        let cookie = self.build_cookie(&self.settings.cookie_name, value, None);
        Self { jar: self.jar.add(cookie), settings: self.settings }
    }

    pub fn sign_out(self) -> Self {
        let session_cookie = self.clear_cookie(&self.settings.cookie_name);
        let flash_cookie = self.clear_cookie(&self.settings.flash_cookie_name);
        Self { jar: self.jar.remove(session_cookie).remove(flash_cookie), settings: self.settings }
    }

    /// Queue a message for the next rendered page.
    pub fn flash(self, message: Flash) -> Self {
        let mut queue = flash::pending(&self.jar, &self.settings.flash_cookie_name);
        queue.push(message);
        let Some(value) = flash::encode(&queue) else {
            return self;
        };
        let cookie = self.build_cookie(&self.settings.flash_cookie_name, value, Some(Duration::minutes(5)));
        Self { jar: self.jar.add(cookie), settings: self.settings }
    }

    /// Drain pending messages; the cookie is cleared when the session is returned.
    pub fn take_flashes(self) -> (Self, Vec<Flash>) {
        let queue = flash::pending(&self.jar, &self.settings.flash_cookie_name);
        if queue.is_empty() {
            return (self, queue);
        }
        let cookie = self.clear_cookie(&self.settings.flash_cookie_name);
        (Self { jar: self.jar.remove(cookie), settings: self.settings }, queue)
    }

    fn build_cookie(&self, name: &str, value: String, max_age: Option<Duration>) -> Cookie<'static> {
        let mut builder = Cookie::build(Cookie::new(name.to_string(), value))
            .path("/")
            .http_only(true)
            .secure(self.settings.secure_cookies)
            .same_site(SameSite::Lax);
        if let Some(age) = max_age {
            builder = builder.max_age(age);
        }
        builder.build()
    }

    fn clear_cookie(&self, name: &str) -> Cookie<'static> {
        Cookie::build(Cookie::new(name.to_string(), ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CookieSession
where
    S: Send + Sync,
    Key: FromRef<S>,
    Arc<AppConfig>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        let config = Arc::<AppConfig>::from_ref(state);
        Ok(Self::new(jar, config.session.clone()))
    }
}

impl IntoResponseParts for CookieSession {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

/// A request that carries session credentials. Without them the request is
/// redirected to the login page with a warning.
pub struct SessionUser {
    pub credentials: Credentials,
    pub session: CookieSession,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    Key: FromRef<S>,
    Arc<AppConfig>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = match CookieSession::from_request_parts(parts, state).await {
            Ok(session) => session,
            Err(never) => match never {},
        };

        match session.credentials() {
            Some(credentials) => Ok(Self { credentials, session }),
            None => {
                debug!(path = %parts.uri.path(), "no session, redirecting to login");
                let session = session.flash(Flash::warning("Please log in first"));
                Err((session, Redirect::to("/login")).into_response())
            }
        }
    }
}
