use axum::response::Json;
use serde_json::{json, Value};

/// GET /health - liveness only. The console has no database credentials of
/// its own, so the database is not probed here.
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now(),
        }
    }))
}
