//! Error types for cropwise
//!
//! `PredictError` is the per-request pipeline taxonomy; `ApiError` maps it
//! onto HTTP at the handler boundary. `ArtifactError` only occurs during
//! startup loading and is never converted to a response: the process
//! refuses to serve without all four artifacts.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

use crate::features::{Measurement, Target};

/// Per-request inference pipeline failure.
#[derive(Debug, Error)]
pub enum PredictError {
    /// A required measurement was absent from the request.
    #[error("missing measurement: {0}")]
    MissingMeasurement(Measurement),

    /// A measurement was present but not a finite number.
    #[error("invalid measurement: {0} must be a finite number")]
    InvalidMeasurement(Measurement),

    /// The request body could not be parsed at all.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Assembled vector length disagrees with the fitted artifact width.
    /// Defensive: indicates artifact/column-table drift, not client input.
    #[error("{target} artifacts expect {expected} features, got {got}")]
    ShapeMismatch {
        target: Target,
        expected: usize,
        got: usize,
    },
}

/// Fatal artifact loading failure (startup only).
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact parsed but its fitted parameters are unusable
    /// (mismatched widths, zero scale entries, label/weight disagreement).
    #[error("invalid artifact {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    /// Scaler/model/column-table widths disagree for one target.
    #[error("{target} artifacts are inconsistent: {reason}")]
    Inconsistent { target: Target, reason: String },
}

/// HTTP boundary wrapper for [`PredictError`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub PredictError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            // Validation failures are the client's to fix.
            PredictError::MissingMeasurement(_)
            | PredictError::InvalidMeasurement(_)
            | PredictError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            // Shape drift is a server-side defect; log it, keep the
            // response body structured, leak nothing else.
            PredictError::ShapeMismatch { .. } => {
                tracing::error!(error = %self.0, "feature vector shape mismatch");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string(),
            "status": "failed",
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
