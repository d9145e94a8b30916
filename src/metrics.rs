use std::fmt;
use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// R² score
// ---------------------------------------------------------------------------

/// Fewest scored rows for which R² means anything.
pub const MIN_SCORED_ROWS: usize = 2;

/// Coefficient of determination, `1 − SS_res / SS_tot`.
///
/// A constant `y_true` has `SS_tot == 0`; the score is then 1.0 for an exact
/// prediction and 0.0 otherwise, so the result is always finite. A single
/// sample is always such a case. Infinite or NaN input is rejected.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(PipelineError::InvalidMetricInput(format!(
            "{} targets but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    let Some(mean) = y_true.mean() else {
        return Err(PipelineError::InvalidMetricInput(
            "cannot score an empty target vector".to_string(),
        ));
    };

    if y_true.iter().chain(y_pred.iter()).any(|v| !v.is_finite()) {
        return Err(PipelineError::InvalidMetricInput(
            "targets or predictions contain infinite or NaN values".to_string(),
        ));
    }

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        if y_true.len() < MIN_SCORED_ROWS {
            log::warn!(
                "R² is not well-defined with fewer than two samples; forcing a finite score"
            );
        } else {
            log::warn!("R² undefined for constant targets; forcing a finite score");
        }
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

// ---------------------------------------------------------------------------
// Metrics record
// ---------------------------------------------------------------------------

/// The persisted metrics file: `{"r2": <float>}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metrics {
    pub r2: f64,
}

impl Metrics {
    /// Overwrite `path` with this record, 2-space indented.
    pub fn save(&self, path: &Path) -> Result<()> {
        // serde_json writes non-finite floats as `null`.
        if !self.r2.is_finite() {
            return Err(PipelineError::NonFiniteMetric(self.r2));
        }
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::io(path, e.into()))?;
        std::fs::write(path, text).map_err(|e| PipelineError::io(path, e))?;
        log::debug!("metrics written to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| PipelineError::parse(path, e))
    }
}

// ---------------------------------------------------------------------------
// FitQuality – human reading of an R² score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitQuality {
    /// Explains all variability.
    Perfect,
    Excellent,
    Good,
    Moderate,
    /// Explains less than half the variability.
    Weak,
    /// No better than predicting the mean.
    Poor,
    /// Worse than predicting the mean.
    VeryPoor,
}

impl FitQuality {
    /// Band around zero treated as "about the mean".
    const NEAR_ZERO: f64 = 0.05;

    pub fn from_r2(r2: f64) -> Self {
        if r2 >= 1.0 {
            FitQuality::Perfect
        } else if r2 >= 0.9 {
            FitQuality::Excellent
        } else if r2 >= 0.7 {
            FitQuality::Good
        } else if r2 >= 0.5 {
            FitQuality::Moderate
        } else if r2.abs() <= Self::NEAR_ZERO {
            FitQuality::Poor
        } else if r2 > 0.0 {
            FitQuality::Weak
        } else {
            // NaN lands here as well.
            FitQuality::VeryPoor
        }
    }

    /// Rating of a score computed over `n_scored` rows, or `None` when there
    /// were too few rows for the score to be meaningful.
    pub fn rate(r2: f64, n_scored: usize) -> Option<Self> {
        (n_scored >= MIN_SCORED_ROWS).then(|| Self::from_r2(r2))
    }
}

impl fmt::Display for FitQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FitQuality::Perfect => "perfect",
            FitQuality::Excellent => "excellent",
            FitQuality::Good => "good",
            FitQuality::Moderate => "moderate",
            FitQuality::Weak => "weak",
            FitQuality::Poor => "poor (about the mean)",
            FitQuality::VeryPoor => "very poor (worse than the mean)",
        };
        f.write_str(label)
    }
}
