use anyhow::Context;

use house_regression::evaluate::evaluate_and_persist;
use house_regression::{FitQuality, PipelineConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Starting model evaluation...");
    let config = PipelineConfig::default();
    let outcome = evaluate_and_persist(&config).context("evaluation failed")?;

    println!(
        "Evaluation complete on {} rows. R² = {:.4} ({})",
        outcome.n_rows,
        outcome.r2,
        describe(outcome.quality())
    );
    Ok(())
}

fn describe(quality: Option<FitQuality>) -> String {
    match quality {
        Some(q) => q.to_string(),
        None => "undefined: fewer than two scored rows".to_string(),
    }
}
