use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use house_regression::config::DEFAULT_DATA_PATH;

const N_HOUSES: usize = 40;

// Ground-truth relation the noise is added to.
const PRICE_PER_SQM: f64 = 1500.0;
const PRICE_PER_BEDROOM: f64 = 10_000.0;
const BASE_PRICE: f64 = 30_000.0;
const NOISE_STD: f64 = 15_000.0;

/// Box-Muller transform for a normal sample.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let output_path = Path::new(DEFAULT_DATA_PATH);
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(["size", "bedrooms", "price"])?;

    for _ in 0..N_HOUSES {
        let bedrooms: u32 = rng.gen_range(1..=5);
        // Larger houses tend to have more bedrooms, but not in lockstep.
        let size = (25.0 * bedrooms as f64 + rng.gen_range(10.0..60.0)).round();
        let price = PRICE_PER_SQM * size + PRICE_PER_BEDROOM * bedrooms as f64 + BASE_PRICE;
        let price = gauss(&mut rng, price, NOISE_STD).max(1_000.0).round();

        writer.write_record([size.to_string(), bedrooms.to_string(), price.to_string()])?;
    }
    writer.flush()?;

    println!("Wrote {N_HOUSES} houses to {}", output_path.display());
    Ok(())
}
