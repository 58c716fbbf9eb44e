//! cropwise library - crop and fertilizer recommendation service
//!
//! Two pre-trained recommenders behind one HTTP interface: a JSON API
//! (`POST /predict/crop`, `POST /predict/fertilizer`) and an HTML form
//! (`GET /`, `POST /predict`) that scores both targets at once.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod model;

pub use model::ArtifactStore;

/// Application state shared across HTTP handlers
///
/// The artifact store is read-only after startup; handlers share it
/// through the `Arc` with no locking.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(artifacts: ArtifactStore) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/predict", post(api::predict_form))
        .route("/predict/crop", post(api::predict_crop))
        .route("/predict/fertilizer", post(api::predict_fertilizer))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
