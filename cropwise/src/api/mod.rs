//! HTTP API handlers for cropwise

pub mod health;
pub mod predict;
pub mod ui;

pub use health::health_routes;
pub use predict::{predict_crop, predict_fertilizer};
pub use ui::{predict_form, serve_index};
