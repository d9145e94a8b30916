use ndarray::Array1;

use crate::config::PipelineConfig;
use crate::data::loader::load_file;
use crate::data::model::{HouseDataset, FEATURE_COLUMNS, TARGET_COLUMN};
use crate::error::Result;
use crate::metrics::{r2_score, FitQuality, Metrics};
use crate::regression::LinearModel;

#[derive(Debug, Clone)]
pub struct EvalOutcome {
    /// R² over every row of the dataset.
    pub r2: f64,
    pub n_rows: usize,
}

impl EvalOutcome {
    pub fn quality(&self) -> Option<FitQuality> {
        FitQuality::rate(self.r2, self.n_rows)
    }
}

/// Score `model` against every row of `dataset`.
pub fn evaluate(dataset: &HouseDataset, model: &LinearModel) -> Result<EvalOutcome> {
    let x = dataset.matrix(&FEATURE_COLUMNS)?;
    let y = Array1::from(dataset.numeric_column(TARGET_COLUMN)?);
    let preds = model.predict(&x)?;
    let r2 = r2_score(&y, &preds)?;
    Ok(EvalOutcome {
        r2,
        n_rows: dataset.len(),
    })
}

/// Reload the persisted model, score it on the full dataset and overwrite
/// the metrics file. The dataset is not validated first.
pub fn evaluate_and_persist(config: &PipelineConfig) -> Result<EvalOutcome> {
    let dataset = load_file(&config.data_path)?;
    let model = LinearModel::load_expecting(&config.model_path, &FEATURE_COLUMNS)?;

    let outcome = evaluate(&dataset, &model)?;
    log::info!("evaluated on {} rows, R² = {}", outcome.n_rows, outcome.r2);

    Metrics { r2: outcome.r2 }.save(&config.metrics_path)?;
    Ok(outcome)
}
