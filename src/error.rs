use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Every failure the loader, validator, trainer and evaluator can report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),

    #[error("invalid train/test split: {0}")]
    InvalidSplit(String),

    #[error("linear regression fit failed: {0}")]
    Fit(String),

    #[error("expected {expected} feature columns, got {found}")]
    FeatureMismatch { expected: usize, found: usize },

    #[error("invalid metric input: {0}")]
    InvalidMetricInput(String),

    #[error("refusing to persist non-finite R² score {0}")]
    NonFiniteMetric(f64),
}

impl PipelineError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        PipelineError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// The first dataset invariant a validation pass found violated.
///
/// Rows are 0-based data rows (the header is not counted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required column missing: {0}")]
    MissingColumn(String),

    #[error("dataset contains null values (first in '{column}' at row {row})")]
    NullValues { column: String, row: usize },

    #[error("invalid values in '{column}': must be > 0 (first at row {row})")]
    NonPositive { column: String, row: usize },

    #[error("non-numeric value in '{column}' at row {row}")]
    NonNumeric { column: String, row: usize },
}

// ---------------------------------------------------------------------------
// Model load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed model file {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("model features {found:?} do not match expected {expected:?}")]
    ShapeMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}
