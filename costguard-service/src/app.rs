// Application state and router wiring
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::handler::{self, ShutdownNotifier};

pub struct AppState {
    pub shutdown: ShutdownNotifier,
}

impl AppState {
    pub fn new(shutdown: ShutdownNotifier) -> Self {
        Self { shutdown }
    }
}

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/invoke", post(handler::invoke))
        .with_state(state)
}

/// Create CORS layer with permissive settings
pub fn create_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "service": "costguard", "status": "ok" }))
}
