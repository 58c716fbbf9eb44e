//! Artifact loading and the per-target inference adapter
//!
//! The four fitted artifacts are loaded once at startup and held immutably
//! for the process lifetime. Load failures are fatal: the service cannot
//! serve without all four, so `main` aborts before binding the listener.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{ArtifactError, PredictError};
use crate::features::{MeasurementSet, Target};
use crate::model::{LinearClassifier, StandardScaler};

pub const CROP_SCALER_FILE: &str = "crop_scaler.json";
pub const CROP_MODEL_FILE: &str = "crop_model.json";
pub const FERTILIZER_SCALER_FILE: &str = "fertilizer_scaler.json";
pub const FERTILIZER_MODEL_FILE: &str = "fertilizer_model.json";

/// A single recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub target: Target,
    pub label: String,
}

/// One target's fitted (scaler, model) pair.
#[derive(Debug, Clone)]
pub struct Recommender {
    scaler: StandardScaler,
    classifier: LinearClassifier,
}

impl Recommender {
    pub fn new(scaler: StandardScaler, classifier: LinearClassifier) -> Self {
        Self { scaler, classifier }
    }

    pub fn labels(&self) -> &[String] {
        self.classifier.labels()
    }

    /// Scale then score a feature vector.
    ///
    /// The length check must not be skipped: a wrong-width vector fed to
    /// the scaler would produce a plausible-looking but meaningless label.
    pub fn predict(&self, target: Target, features: &[f64]) -> Result<String, PredictError> {
        let expected = self.scaler.n_features();
        if features.len() != expected {
            return Err(PredictError::ShapeMismatch {
                target,
                expected,
                got: features.len(),
            });
        }
        let scaled = self.scaler.transform(features);
        Ok(self.classifier.predict(&scaled).to_string())
    }

    /// Cross-check scaler, model, and column table widths for one target.
    fn check_consistent(&self, target: Target) -> Result<(), ArtifactError> {
        let columns = target.columns().len();
        let scaler = self.scaler.n_features();
        let model = self.classifier.n_features();
        if scaler != columns || model != columns {
            return Err(ArtifactError::Inconsistent {
                target,
                reason: format!(
                    "column table has {columns} features, scaler fitted on {scaler}, model fitted on {model}"
                ),
            });
        }
        Ok(())
    }
}

/// All four fitted artifacts, immutable after load.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    crop: Recommender,
    fertilizer: Recommender,
}

impl ArtifactStore {
    /// Load and validate all four artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let crop = Recommender::new(
            load_artifact::<StandardScaler>(dir, CROP_SCALER_FILE)?,
            load_artifact::<LinearClassifier>(dir, CROP_MODEL_FILE)?,
        );
        let fertilizer = Recommender::new(
            load_artifact::<StandardScaler>(dir, FERTILIZER_SCALER_FILE)?,
            load_artifact::<LinearClassifier>(dir, FERTILIZER_MODEL_FILE)?,
        );
        let store = Self::from_parts(crop, fertilizer)?;
        info!(
            "Loaded artifacts from {} ({} crop labels, {} fertilizer labels)",
            dir.display(),
            store.crop.labels().len(),
            store.fertilizer.labels().len()
        );
        Ok(store)
    }

    /// Assemble a store from already-built recommenders (tests build these
    /// in memory), applying the same cross-checks as [`Self::load`].
    pub fn from_parts(crop: Recommender, fertilizer: Recommender) -> Result<Self, ArtifactError> {
        crop.check_consistent(Target::Crop)?;
        fertilizer.check_consistent(Target::Fertilizer)?;
        Ok(Self { crop, fertilizer })
    }

    pub fn recommender(&self, target: Target) -> &Recommender {
        match target {
            Target::Crop => &self.crop,
            Target::Fertilizer => &self.fertilizer,
        }
    }

    /// Run the whole pipeline for one target: assemble, scale, score.
    pub fn predict(
        &self,
        target: Target,
        measurements: &MeasurementSet,
    ) -> Result<Prediction, PredictError> {
        let features = measurements.assemble(target)?;
        let label = self.recommender(target).predict(target, &features)?;
        Ok(Prediction { target, label })
    }
}

fn load_artifact<T>(dir: &Path, file: &str) -> Result<T, ArtifactError>
where
    T: DeserializeOwned + Validate,
{
    let path = dir.join(file);
    let contents = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;
    let artifact: T = serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
        path: path.clone(),
        source,
    })?;
    artifact
        .validate()
        .map_err(|reason| ArtifactError::Invalid { path, reason })?;
    Ok(artifact)
}

/// Load-time sanity check shared by both artifact kinds.
trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for StandardScaler {
    fn validate(&self) -> Result<(), String> {
        StandardScaler::validate(self)
    }
}

impl Validate for LinearClassifier {
    fn validate(&self) -> Result<(), String> {
        LinearClassifier::validate(self)
    }
}
