//! Linear-regression training pipeline for house price data.
//!
//! ```text
//!  loader ─▶ validate(Minimal) ─▶ train ─▶ model.json + metrics.json
//!  loader ─────────────────────▶ evaluate ◀─ model.json ─▶ metrics.json
//! ```
//!
//! Each workflow is a straight-line batch job driven by a [`PipelineConfig`].

pub mod config;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod regression;
pub mod split;
pub mod train;

pub use config::{PipelineConfig, SplitConfig};
pub use data::model::{Cell, Column, HouseDataset};
pub use data::validate::ValidationProfile;
pub use error::{ModelLoadError, PipelineError, Result, ValidationError};
pub use metrics::{FitQuality, Metrics};
pub use regression::LinearModel;
