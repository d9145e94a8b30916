use std::path::Path;
use std::process::ExitCode;

use house_regression::data::loader::load_file;
use house_regression::{PipelineConfig, PipelineError, Result, ValidationProfile};

fn validate(path: &Path) -> Result<()> {
    let dataset = load_file(path)?;
    ValidationProfile::Strict.check(&dataset)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    println!("Starting data validation...");
    let config = PipelineConfig::default();

    match validate(&config.data_path) {
        Ok(()) => {
            println!("Data validation completed successfully!");
            ExitCode::SUCCESS
        }
        Err(PipelineError::Validation(e)) => {
            println!("Validation failed: {e}");
            ExitCode::from(1)
        }
        Err(e) => {
            println!("Unexpected error: {e}");
            ExitCode::from(1)
        }
    }
}
