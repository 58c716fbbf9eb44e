//! JSON prediction endpoints
//!
//! `POST /predict/crop` and `POST /predict/fertilizer`. Bodies are JSON
//! objects of measurement name to number; extractor rejections are mapped
//! to the structured failure payload instead of axum's default text body.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ApiResult, PredictError};
use crate::features::{MeasurementSet, Target};
use crate::AppState;

/// POST /predict/crop response
#[derive(Debug, Serialize)]
pub struct CropResponse {
    pub recommended_crop: String,
    pub status: String,
}

/// POST /predict/fertilizer response
#[derive(Debug, Serialize)]
pub struct FertilizerResponse {
    pub recommended_fertilizer: String,
    pub status: String,
}

/// POST /predict/crop
///
/// Body: `{nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall}`
pub async fn predict_crop(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<CropResponse>> {
    let measurements = extract_measurements(payload)?;
    let prediction = state.artifacts.predict(Target::Crop, &measurements)?;

    tracing::debug!(label = %prediction.label, "crop prediction served");

    Ok(Json(CropResponse {
        recommended_crop: prediction.label,
        status: "success".to_string(),
    }))
}

/// POST /predict/fertilizer
///
/// Body: `{nitrogen, phosphorus, potassium, temperature, humidity, moisture}`
pub async fn predict_fertilizer(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<FertilizerResponse>> {
    let measurements = extract_measurements(payload)?;
    let prediction = state.artifacts.predict(Target::Fertilizer, &measurements)?;

    tracing::debug!(label = %prediction.label, "fertilizer prediction served");

    Ok(Json(FertilizerResponse {
        recommended_fertilizer: prediction.label,
        status: "success".to_string(),
    }))
}

/// Map the extractor result into a validated measurement set.
///
/// Rejection text from axum is already client-safe (parse position and
/// expected type, no internals), so it is passed through as the message.
fn extract_measurements(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<MeasurementSet, PredictError> {
    let Json(body) = payload.map_err(|rejection| {
        PredictError::MalformedRequest(rejection.body_text())
    })?;
    MeasurementSet::from_json(&body)
}
