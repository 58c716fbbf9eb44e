//! Fitted standardization transform
//!
//! Mirrors the scaler the models were trained behind: per-feature mean
//! and scale vectors captured at fit time, applied as `(x - mean) / scale`.

use serde::Deserialize;

/// A fitted affine normalization, loaded from a scaler artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Number of features this scaler was fitted on.
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Check the fitted parameters are usable. Called once at load time.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self.mean.is_empty() {
            return Err("scaler has zero features".to_string());
        }
        if let Some(i) = self.scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(format!("scale[{i}] is not a usable divisor"));
        }
        Ok(())
    }

    /// Apply the fitted transform elementwise.
    ///
    /// Callers must have already checked the vector length against
    /// [`Self::n_features`]; the adapter in `store.rs` does this.
    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        debug_assert_eq!(features.len(), self.n_features());
        features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_applies_fitted_affine() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 4.0]);
        assert_eq!(scaler.transform(&[14.0, -8.0]), vec![2.0, -2.0]);
    }

    #[test]
    fn identity_scaler_passes_values_through() {
        let scaler = StandardScaler::new(vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]);
        assert_eq!(scaler.transform(&[1.5, -2.0, 0.0]), vec![1.5, -2.0, 0.0]);
    }

    #[test]
    fn validate_rejects_zero_scale() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 0.0]);
        assert!(scaler.validate().unwrap_err().contains("scale[1]"));
    }

    #[test]
    fn validate_rejects_mismatched_widths() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0]);
        assert!(scaler.validate().is_err());
    }
}
