//! Fitted multiclass linear decision function
//!
//! A model artifact stores one weight row and one intercept per label;
//! prediction is argmax over `W·x + b`. The softmax the original trainer
//! applied is monotonic, so argmax over raw scores picks the same label.

use serde::Deserialize;

/// A fitted classifier, loaded from a model artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    labels: Vec<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    pub fn new(labels: Vec<String>, weights: Vec<Vec<f64>>, intercepts: Vec<f64>) -> Self {
        Self {
            labels,
            weights,
            intercepts,
        }
    }

    /// Number of features this model was fitted on.
    pub fn n_features(&self) -> usize {
        self.weights.first().map(Vec::len).unwrap_or(0)
    }

    /// The label set this model can emit.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Check the fitted parameters are usable. Called once at load time.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.labels.is_empty() {
            return Err("model has no labels".to_string());
        }
        if self.weights.len() != self.labels.len() {
            return Err(format!(
                "{} labels but {} weight rows",
                self.labels.len(),
                self.weights.len()
            ));
        }
        if self.intercepts.len() != self.labels.len() {
            return Err(format!(
                "{} labels but {} intercepts",
                self.labels.len(),
                self.intercepts.len()
            ));
        }
        let width = self.n_features();
        if width == 0 {
            return Err("model has zero features".to_string());
        }
        if let Some(i) = self.weights.iter().position(|row| row.len() != width) {
            return Err(format!("weight row {i} has {} entries, expected {width}", self.weights[i].len()));
        }
        Ok(())
    }

    /// Score every label and return the best one. Ties go to the first row.
    ///
    /// Callers must have already checked the vector length against
    /// [`Self::n_features`]; the adapter in `store.rs` does this.
    pub fn predict(&self, features: &[f64]) -> &str {
        debug_assert_eq!(features.len(), self.n_features());
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, (row, intercept)) in self.weights.iter().zip(&self.intercepts).enumerate() {
            let score: f64 = row
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
                + intercept;
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        &self.labels[best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> LinearClassifier {
        LinearClassifier::new(
            vec!["rice".to_string(), "maize".to_string()],
            vec![vec![1.0, 0.0], vec![-1.0, 0.0]],
            vec![0.0, 0.0],
        )
    }

    #[test]
    fn predict_picks_highest_score() {
        let model = two_class();
        assert_eq!(model.predict(&[3.0, 0.0]), "rice");
        assert_eq!(model.predict(&[-3.0, 0.0]), "maize");
    }

    #[test]
    fn ties_go_to_the_first_label() {
        let model = two_class();
        assert_eq!(model.predict(&[0.0, 5.0]), "rice");
    }

    #[test]
    fn intercept_shifts_the_decision() {
        let model = LinearClassifier::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0], vec![1.0]],
            vec![0.0, 10.0],
        );
        assert_eq!(model.predict(&[1.0]), "b");
    }

    #[test]
    fn validate_rejects_ragged_weight_rows() {
        let model = LinearClassifier::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0, 2.0], vec![1.0]],
            vec![0.0, 0.0],
        );
        assert!(model.validate().unwrap_err().contains("weight row 1"));
    }

    #[test]
    fn validate_rejects_label_weight_disagreement() {
        let model = LinearClassifier::new(
            vec!["a".to_string()],
            vec![vec![1.0], vec![2.0]],
            vec![0.0, 0.0],
        );
        assert!(model.validate().is_err());
    }
}
