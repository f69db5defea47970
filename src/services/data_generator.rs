use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

use crate::config::BenchConfig;
use crate::domain::record::{Dataset, Record};
use crate::services::error_handling::{BenchResult, PerformanceMonitor};

/// Records produced per rayon task; each chunk owns its own RNG.
const CHUNK_SIZE: usize = 16_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub min_age: u8,
    pub age_span: u8,
    pub registered_span_ms: i64,
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            min_age: 18,
            age_span: 80,
            registered_span_ms: 1_000_000_000_000,
            seed: None,
        }
    }
}

fn chunk_rng(seed: Option<u64>, chunk: usize) -> StdRng {
    match seed {
        Some(seed) => {
            StdRng::seed_from_u64(seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        }
        None => StdRng::from_entropy(),
    }
}

fn generate_one(
    index: usize,
    rng: &mut StdRng,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) -> Record {
    let age = options.min_age + rng.gen_range(0..options.age_span.max(1));
    let back_ms = (rng.r#gen::<f64>() * options.registered_span_ms.max(0) as f64) as i64;
    // Spans past chrono's range pin to its earliest instant
    let registered = Duration::try_milliseconds(back_ms)
        .and_then(|back| now.checked_sub_signed(back))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    Record::new(index as u64 + 1, age, registered)
}

/// Generates `count` records with ids `1..=count`, in id order.
pub fn generate_records(
    count: usize,
    options: &GeneratorOptions,
    now: DateTime<Utc>,
) -> Vec<Record> {
    let options = *options;
    (0..count.div_ceil(CHUNK_SIZE))
        .into_par_iter()
        .flat_map_iter(move |chunk| {
            let mut rng = chunk_rng(options.seed, chunk);
            let start = chunk * CHUNK_SIZE;
            let end = (start + CHUNK_SIZE).min(count);
            (start..end).map(move |i| generate_one(i, &mut rng, &options, now))
        })
        .collect()
}

pub fn generate_dataset(config: &BenchConfig, now: DateTime<Utc>) -> BenchResult<Dataset> {
    config.validate()?;

    let monitor = PerformanceMonitor::new("generate_dataset", 5_000.0);
    let records = generate_records(config.row_count, &config.generator_options(), now);
    let dataset = Dataset::from_records(records);

    info!(
        rows = dataset.len(),
        duration_ms = monitor.elapsed_ms(),
        "Generated dataset"
    );
    Ok(dataset)
}
