use ndarray::Array1;

use crate::config::{PipelineConfig, SplitConfig};
use crate::data::loader::load_file;
use crate::data::model::{HouseDataset, FEATURE_COLUMNS, TARGET_COLUMN};
use crate::data::validate::ValidationProfile;
use crate::error::{PipelineError, Result};
use crate::metrics::{r2_score, FitQuality, Metrics};
use crate::regression::LinearModel;
use crate::split::{take_rows, train_test_split};

/// Result of one training run.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub model: LinearModel,
    /// R² on the held-out test partition.
    pub r2: f64,
    pub n_train: usize,
    pub n_test: usize,
}

impl TrainOutcome {
    /// `None` when the test partition is a single row.
    pub fn quality(&self) -> Option<FitQuality> {
        FitQuality::rate(self.r2, self.n_test)
    }
}

/// Split, fit and score an already loaded dataset. No files are touched.
///
/// The dataset is expected to have passed [`ValidationProfile::Minimal`];
/// feature columns that are missing or non-numeric are reported here.
pub fn train(dataset: &HouseDataset, split: &SplitConfig) -> Result<TrainOutcome> {
    let x = dataset.matrix(&FEATURE_COLUMNS)?;
    let y = Array1::from(dataset.numeric_column(TARGET_COLUMN)?);

    let parts = train_test_split(dataset.len(), split)?;
    let (x_train, y_train) = take_rows(&x, &y, &parts.train);
    let (x_test, y_test) = take_rows(&x, &y, &parts.test);

    let model = LinearModel::fit(&FEATURE_COLUMNS, &x_train, &y_train)?;
    let preds = model.predict(&x_test)?;
    let r2 = r2_score(&y_test, &preds)?;

    Ok(TrainOutcome {
        model,
        r2,
        n_train: parts.train.len(),
        n_test: parts.test.len(),
    })
}

/// The full training workflow: load, validate (minimal profile), train, then
/// write the model and `{"r2": ..}` to the configured paths. On any error
/// neither file is written.
pub fn train_and_persist(config: &PipelineConfig) -> Result<TrainOutcome> {
    let dataset = load_file(&config.data_path)?;
    ValidationProfile::Minimal.check(&dataset)?;

    let outcome = train(&dataset, &config.split)?;
    log::info!(
        "trained on {} rows, tested on {}, R² = {}",
        outcome.n_train,
        outcome.n_test,
        outcome.r2
    );

    if !outcome.r2.is_finite() {
        return Err(PipelineError::NonFiniteMetric(outcome.r2));
    }
    outcome.model.save(&config.model_path)?;
    Metrics { r2: outcome.r2 }.save(&config.metrics_path)?;
    Ok(outcome)
}
