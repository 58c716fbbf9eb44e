//! Form variant: input page and combined prediction
//!
//! Serves the embedded input form and handles its POST, scoring both
//! targets from one submission. Failures re-render the page with the
//! error message inline; no raw internals ever reach the browser.

use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};

use crate::error::PredictError;
use crate::features::{MeasurementSet, Target};
use crate::AppState;

const INDEX_HTML: &str = include_str!("../ui/index.html");
const RESULT_MARKER: &str = "<!-- RESULT -->";

/// GET /
///
/// Serves the input form with no result block.
pub async fn serve_index() -> Html<String> {
    Html(render_page(""))
}

/// POST /predict
///
/// Form fields: `Nitrogen, Phosphorus, Potassium, Temperature, Humidity,
/// pH, Rainfall, Moisture`. Scores both targets and re-renders the page
/// annotated with the two labels, or with the failure message inline.
pub async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Html<String> {
    match score_both(&state, form) {
        Ok((crop, fertilizer)) => Html(render_page(&format!(
            r#"<div class="result">
  <p>Recommended crop: <strong>{crop}</strong></p>
  <p>Recommended fertilizer: <strong>{fertilizer}</strong></p>
</div>"#
        ))),
        Err(err) => {
            tracing::debug!(error = %err, "form prediction rejected");
            Html(render_page(&format!(
                r#"<div class="error"><p>{err}</p></div>"#
            )))
        }
    }
}

fn score_both(
    state: &AppState,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<(String, String), PredictError> {
    let Form(fields) =
        form.map_err(|rejection| PredictError::MalformedRequest(rejection.body_text()))?;
    let measurements = MeasurementSet::from_form(&fields)?;
    let crop = state.artifacts.predict(Target::Crop, &measurements)?;
    let fertilizer = state.artifacts.predict(Target::Fertilizer, &measurements)?;
    Ok((crop.label, fertilizer.label))
}

fn render_page(result_fragment: &str) -> String {
    INDEX_HTML.replace(RESULT_MARKER, result_fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_the_result_marker() {
        assert!(INDEX_HTML.contains(RESULT_MARKER));
    }

    #[test]
    fn render_injects_fragment_once() {
        let page = render_page("<p>hello</p>");
        assert!(page.contains("<p>hello</p>"));
        assert!(!page.contains(RESULT_MARKER));
    }
}
