use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::SplitConfig;
use crate::error::{PipelineError, Result};

/// Row indices of a train/test partition, in shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` and cut it into train and test parts.
///
/// The test part holds `ceil(test_size * n_rows)` rows. The same seed and row
/// count always produce the same partition.
pub fn train_test_split(n_rows: usize, config: &SplitConfig) -> Result<SplitIndices> {
    let test_size = config.test_size;
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::InvalidSplit(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }

    let n_test = (test_size * n_rows as f64).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(PipelineError::InvalidSplit(format!(
            "{n_rows} rows with test_size={test_size} leaves {n_train} train / {n_test} test rows"
        )));
    }

    let mut rng = match config.random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut indices: Vec<usize> = (0..n_rows).collect();
    indices.shuffle(&mut rng);

    let test = indices.split_off(n_train);
    log::debug!("split {n_rows} rows into {n_train} train / {n_test} test");
    Ok(SplitIndices {
        train: indices,
        test,
    })
}

/// Gather the rows named by `indices` from a feature matrix and target vector.
pub fn take_rows(x: &Array2<f64>, y: &Array1<f64>, indices: &[usize]) -> (Array2<f64>, Array1<f64>) {
    (x.select(Axis(0), indices), y.select(Axis(0), indices))
}
