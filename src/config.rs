use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_DATA_PATH: &str = "data/houses.csv";
pub const DEFAULT_MODEL_PATH: &str = "model.json";
pub const DEFAULT_METRICS_PATH: &str = "metrics.json";

/// Fraction of rows held out for the test partition.
pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_RANDOM_STATE: u64 = 42;

// ---------------------------------------------------------------------------
// Configuration structs
// ---------------------------------------------------------------------------

/// Train/test split hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    /// Must lie strictly between 0 and 1.
    pub test_size: f64,
    /// Shuffle seed. `None` seeds from OS entropy and is not reproducible.
    pub random_state: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            random_state: Some(DEFAULT_RANDOM_STATE),
        }
    }
}

/// Paths and hyperparameters shared by the train and evaluate workflows.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub metrics_path: PathBuf,
    pub split: SplitConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            metrics_path: PathBuf::from(DEFAULT_METRICS_PATH),
            split: SplitConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_metrics_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.metrics_path = path.into();
        self
    }

    pub fn with_split(mut self, split: SplitConfig) -> Self {
        self.split = split;
        self
    }

    /// Re-root all three paths under `dir`, keeping their relative layout.
    pub fn rooted_at(self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            data_path: dir.join(&self.data_path),
            model_path: dir.join(&self.model_path),
            metrics_path: dir.join(&self.metrics_path),
            split: self.split,
        }
    }
}
