//! API Router and Application State
//!
//! Central routing configuration and shared state.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    dispatch::{self, Dispatcher},
    line::{callback, Messenger},
    quake::EventSource,
    state::LastSeenStore,
};

/// Liveness text served at `/`.
pub const HOME_BODY: &str = "地震速報Bot動いてます！🌏";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Dispatch cycle runner behind `/checkquake`
    pub dispatcher: Dispatcher,
    /// Messaging client used for webhook replies
    pub messenger: Arc<dyn Messenger>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        config: Config,
        source: Arc<dyn EventSource>,
        store: Arc<dyn LastSeenStore>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        let dispatcher = Dispatcher::new(
            source,
            store,
            messenger.clone(),
            config.target_user_id.clone(),
        );
        Self {
            config: Arc::new(config),
            dispatcher,
            messenger,
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        // Health check
        .route("/health", get(health_check))
        // Scheduler entry point
        .route("/checkquake", get(dispatch::check_quake))
        // LINE webhook
        .route("/callback", post(callback::callback))
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

async fn home() -> &'static str {
    HOME_BODY
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Whether a push recipient is configured
    recipient_configured: bool,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        recipient_configured: state.config.has_recipient(),
    })
}
