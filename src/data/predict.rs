use std::fmt;

use super::model::Dataset;
use crate::error::ViewerError;

/// Column the calibration check averages.
pub const SENSOR_COLUMN: &str = "sensor_value";

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// The two-valued calibration verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    CalibrationRequired,
    FunctioningNormally,
}

impl Prediction {
    /// A mean strictly above `threshold` requires calibration. A missing
    /// mean (no numeric readings) never does.
    pub fn from_mean(mean: Option<f64>, threshold: f64) -> Self {
        match mean {
            Some(m) if m > threshold => Prediction::CalibrationRequired,
            _ => Prediction::FunctioningNormally,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::CalibrationRequired => write!(f, "System requires calibration"),
            Prediction::FunctioningNormally => write!(f, "System functioning normally"),
        }
    }
}

/// Result of a successful Predict: the verdict plus the mean it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionOutcome {
    pub mean: Option<f64>,
    pub prediction: Prediction,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Arithmetic mean of the numeric cells in `column`; text and empty cells
/// are skipped. `Ok(None)` when the column has no numeric cell at all.
pub fn column_mean(dataset: &Dataset, column: &str) -> Result<Option<f64>, ViewerError> {
    let cells = dataset
        .column(column)
        .ok_or_else(|| ViewerError::MissingColumn(column.to_string()))?;

    let (sum, count) = cells
        .filter_map(|c| c.as_f64())
        .fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));

    Ok((count > 0).then(|| sum / count as f64))
}

/// Average `sensor_value` and compare it against `threshold`.
pub fn predict(dataset: &Dataset, threshold: f64) -> Result<PredictionOutcome, ViewerError> {
    let mean = column_mean(dataset, SENSOR_COLUMN)?;
    Ok(PredictionOutcome {
        mean,
        prediction: Prediction::from_mean(mean, threshold),
    })
}
