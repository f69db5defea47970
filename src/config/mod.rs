mod bench_config;

pub use bench_config::{BenchConfig, CONFIG_PATH_ENV, MAX_REGISTERED_SPAN_MS, MAX_ROWS};
