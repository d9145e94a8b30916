use std::io::ErrorKind;
use std::path::Path;

use linfa_linalg::svd::SVD;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ModelLoadError, PipelineError, Result};

/// Singular values at or below this fraction of the largest count as zero.
const RANK_RTOL: f64 = 1e-10;

// ---------------------------------------------------------------------------
// LinearModel – fitted coefficients, the persisted artifact
// ---------------------------------------------------------------------------

/// A fitted linear function `price = x · coefficients + intercept`.
///
/// `features[i]` names the input column multiplied by `coefficients[i]`, so a
/// loaded model can be checked against the column order it will be fed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Ordinary least squares with intercept on `(x, y)`.
    ///
    /// A rank-deficient design (a constant feature, or features that are
    /// exact multiples of each other) gets the minimum-norm solution.
    pub fn fit(features: &[&str], x: &Array2<f64>, y: &Array1<f64>) -> Result<Self> {
        if x.ncols() != features.len() {
            return Err(PipelineError::FeatureMismatch {
                expected: features.len(),
                found: x.ncols(),
            });
        }
        if x.nrows() != y.len() {
            return Err(PipelineError::Fit(format!(
                "{} feature rows but {} targets",
                x.nrows(),
                y.len()
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(PipelineError::Fit(
                "training data contains infinite or NaN values".to_string(),
            ));
        }

        let (coefficients, intercept, rank) = least_squares(x, y)?;
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PipelineError::Fit("fitted parameters are not finite".to_string()));
        }
        if rank < features.len() {
            log::warn!(
                "design matrix has rank {rank} for {} features; using the minimum-norm solution",
                features.len()
            );
        }

        let model = LinearModel {
            features: features.iter().map(|f| f.to_string()).collect(),
            coefficients: coefficients.to_vec(),
            intercept,
        };
        log::info!(
            "fitted OLS on {} rows: coefficients={:?} intercept={}",
            x.nrows(),
            model.coefficients,
            model.intercept
        );
        Ok(model)
    }

    /// Predict one value per row of `x`.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(PipelineError::FeatureMismatch {
                expected: self.coefficients.len(),
                found: x.ncols(),
            });
        }
        let coefficients = Array1::from(self.coefficients.clone());
        Ok(x.dot(&coefficients) + self.intercept)
    }

    // -- Persistence --

    /// Write the model as pretty JSON, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::io(path, e.into()))?;
        std::fs::write(path, text).map_err(|e| PipelineError::io(path, e))?;
        log::debug!("model written to {}", path.display());
        Ok(())
    }

    /// Read a model written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                PipelineError::ModelLoad(ModelLoadError::NotFound(path.to_path_buf()))
            }
            _ => PipelineError::io(path, e),
        })?;
        let model: LinearModel = serde_json::from_str(&text).map_err(|e| ModelLoadError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if model.coefficients.len() != model.features.len() {
            return Err(ModelLoadError::Malformed {
                path: path.to_path_buf(),
                message: format!(
                    "{} coefficients for {} features",
                    model.coefficients.len(),
                    model.features.len()
                ),
            }
            .into());
        }
        Ok(model)
    }

    /// [`load`](Self::load), then require the model to use exactly `features`
    /// in that order.
    pub fn load_expecting(path: &Path, features: &[&str]) -> Result<Self> {
        let model = Self::load(path)?;
        if model.features.iter().map(String::as_str).ne(features.iter().copied()) {
            return Err(ModelLoadError::ShapeMismatch {
                expected: features.iter().map(|f| f.to_string()).collect(),
                found: model.features,
            }
            .into());
        }
        Ok(model)
    }
}

/// Minimum-norm least squares with intercept, from the SVD of the centred
/// design. Returns `(coefficients, intercept, rank)`.
///
/// With `Xc = U S Vt`, the solution is `sum_i v_i (v_i . Xc^T y) / s_i^2` over
/// the non-negligible singular values, so `U` is never formed.
fn least_squares(x: &Array2<f64>, y: &Array1<f64>) -> Result<(Array1<f64>, f64, usize)> {
    let no_rows = || PipelineError::Fit("no training rows".to_string());
    let x_mean = x.mean_axis(Axis(0)).ok_or_else(no_rows)?;
    let y_mean = y.mean().ok_or_else(no_rows)?;
    let xc = x - &x_mean;
    let yc = y - y_mean;

    let mut coefficients = Array1::<f64>::zeros(x.ncols());
    let mut rank = 0;
    // Every feature constant (or a single row): nothing to decompose.
    if xc.iter().any(|v| *v != 0.0) {
        let (_, sigma, vt) = xc
            .svd(false, true)
            .map_err(|e| PipelineError::Fit(e.to_string()))?;
        let vt = vt.ok_or_else(|| {
            PipelineError::Fit("SVD returned no right singular vectors".to_string())
        })?;

        let cutoff = sigma.fold(0.0_f64, |m, &s| m.max(s)) * RANK_RTOL;
        let xty = xc.t().dot(&yc);
        for (&s, v) in sigma.iter().zip(vt.rows()) {
            if s > cutoff {
                coefficients.scaled_add(v.dot(&xty) / (s * s), &v);
                rank += 1;
            }
        }
    }

    let intercept = y_mean - x_mean.dot(&coefficients);
    Ok((coefficients, intercept, rank))
}
