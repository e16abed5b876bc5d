//! One-shot status messages carried in their own encrypted cookie.

use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::error;

use crate::types::Flash;

/// Pending messages stored under `name`, oldest first.
pub fn pending(jar: &PrivateCookieJar, name: &str) -> Vec<Flash> {
    jar.get(name)
        .and_then(|cookie| serde_json::from_str::<Vec<Flash>>(cookie.value()).ok())
        .unwrap_or_default()
}

/// Serialize the queue for storage. `None` means the queue could not be encoded.
pub fn encode(flashes: &[Flash]) -> Option<String> {
    match serde_json::to_string(flashes) {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = %e, "failed to encode flash messages");
            None
        }
    }
}
