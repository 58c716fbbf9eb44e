//! Measurement names, per-target column tables, and feature assembly
//!
//! The column tables below are the single source of truth for feature
//! ordering. Each scaler/model pair was fitted on exactly this ordering;
//! a reordered vector produces a wrong-but-plausible prediction instead
//! of a visible error, so the order must never be derived ad hoc in a
//! handler.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::PredictError;

/// A recognized soil/weather measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measurement {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
    Moisture,
}

impl Measurement {
    /// Canonical lowercase name, as used in the JSON request bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Measurement::Nitrogen => "nitrogen",
            Measurement::Phosphorus => "phosphorus",
            Measurement::Potassium => "potassium",
            Measurement::Temperature => "temperature",
            Measurement::Humidity => "humidity",
            Measurement::Ph => "ph",
            Measurement::Rainfall => "rainfall",
            Measurement::Moisture => "moisture",
        }
    }

    /// Resolve a request key to a measurement.
    ///
    /// Case-insensitive so the HTML form's capitalized field names
    /// (`Nitrogen`, `pH`, ...) resolve to the same measurement as the
    /// JSON API's lowercase keys. Unrecognized keys return `None` and
    /// are ignored by the callers.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "nitrogen" => Some(Measurement::Nitrogen),
            "phosphorus" => Some(Measurement::Phosphorus),
            "potassium" => Some(Measurement::Potassium),
            "temperature" => Some(Measurement::Temperature),
            "humidity" => Some(Measurement::Humidity),
            "ph" => Some(Measurement::Ph),
            "rainfall" => Some(Measurement::Rainfall),
            "moisture" => Some(Measurement::Moisture),
            _ => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column ordering the crop scaler/model pair was fitted on.
pub const CROP_COLUMNS: [Measurement; 7] = [
    Measurement::Nitrogen,
    Measurement::Phosphorus,
    Measurement::Potassium,
    Measurement::Temperature,
    Measurement::Humidity,
    Measurement::Ph,
    Measurement::Rainfall,
];

/// Column ordering the fertilizer scaler/model pair was fitted on.
pub const FERTILIZER_COLUMNS: [Measurement; 6] = [
    Measurement::Nitrogen,
    Measurement::Phosphorus,
    Measurement::Potassium,
    Measurement::Temperature,
    Measurement::Humidity,
    Measurement::Moisture,
];

/// Which of the two recommendation tasks a request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Crop,
    Fertilizer,
}

impl Target {
    /// The feature ordering this target's artifacts were fitted on.
    pub fn columns(&self) -> &'static [Measurement] {
        match self {
            Target::Crop => &CROP_COLUMNS,
            Target::Fertilizer => &FERTILIZER_COLUMNS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Crop => "crop",
            Target::Fertilizer => "fertilizer",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated measurements extracted from one request.
///
/// Every stored value is a finite f64; non-finite and non-numeric input
/// is rejected at construction so downstream code never sees NaN.
#[derive(Debug, Clone, Default)]
pub struct MeasurementSet {
    values: HashMap<Measurement, f64>,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, rejecting NaN and infinities.
    pub fn insert(&mut self, name: Measurement, value: f64) -> Result<(), PredictError> {
        if !value.is_finite() {
            return Err(PredictError::InvalidMeasurement(name));
        }
        self.values.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: Measurement) -> Option<f64> {
        self.values.get(&name).copied()
    }

    /// Extract measurements from a JSON object body.
    ///
    /// Unrecognized keys are ignored. A recognized key whose value is not
    /// a finite number fails with `InvalidMeasurement` naming the field.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, PredictError> {
        let mut set = Self::new();
        for (key, value) in body {
            let Some(name) = Measurement::from_key(key) else {
                continue;
            };
            let number = value
                .as_f64()
                .ok_or(PredictError::InvalidMeasurement(name))?;
            set.insert(name, number)?;
        }
        Ok(set)
    }

    /// Extract measurements from urlencoded form fields.
    ///
    /// Field values arrive as strings; anything that does not parse as a
    /// finite number fails with `InvalidMeasurement` naming the field.
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self, PredictError> {
        let mut set = Self::new();
        for (key, value) in fields {
            let Some(name) = Measurement::from_key(key) else {
                continue;
            };
            let number: f64 = value
                .trim()
                .parse()
                .map_err(|_| PredictError::InvalidMeasurement(name))?;
            set.insert(name, number)?;
        }
        Ok(set)
    }

    /// Assemble the ordered feature vector for a target.
    ///
    /// Walks the target's column table in order; the first missing
    /// measurement aborts the whole assembly, never a partial vector.
    pub fn assemble(&self, target: Target) -> Result<Vec<f64>, PredictError> {
        let columns = target.columns();
        let mut vector = Vec::with_capacity(columns.len());
        for &name in columns {
            let value = self
                .get(name)
                .ok_or(PredictError::MissingMeasurement(name))?;
            vector.push(value);
        }
        Ok(vector)
    }
}
