use anyhow::Context;

use house_regression::train::train_and_persist;
use house_regression::{FitQuality, PipelineConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Starting model training...");
    let config = PipelineConfig::default();
    let outcome = train_and_persist(&config).context("training failed")?;

    println!(
        "Training complete on {} rows ({} held out). R² = {:.4} ({})",
        outcome.n_train + outcome.n_test,
        outcome.n_test,
        outcome.r2,
        describe(outcome.quality())
    );
    println!(
        "Model written to {}, metrics to {}",
        config.model_path.display(),
        config.metrics_path.display()
    );
    Ok(())
}

fn describe(quality: Option<FitQuality>) -> String {
    match quality {
        Some(q) => q.to_string(),
        None => "undefined: fewer than two scored rows".to_string(),
    }
}
