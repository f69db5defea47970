use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::services::data_generator::GeneratorOptions;
use crate::services::error_handling::{BenchError, BenchResult};
use crate::services::virtualizer::VirtualizerOptions;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "TABLE_BENCH_CONFIG";

/// Row positions are stored as `u32`.
pub const MAX_ROWS: usize = u32::MAX as usize;

/// Ten thousand years; keeps `now - span` well inside chrono's date range.
pub const MAX_REGISTERED_SPAN_MS: i64 = 10_000 * 31_557_600_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of synthetic records generated at mount
    pub row_count: usize,

    /// Fixed height of every body row
    pub row_height_px: f64,

    /// Height of the scrollable viewport
    pub viewport_height_px: f64,

    /// Rows rendered beyond each edge of the visible window
    pub overscan: usize,

    pub min_age: u8,

    /// Ages fall in `min_age..min_age + age_span`
    pub age_span: u8,

    /// Registration timestamps reach this far back from now
    pub registered_span_ms: i64,

    /// Fixes the random stream so runs are reproducible
    pub seed: Option<u64>,

    /// Measurements kept by the performance recorder
    pub max_measurements: usize,

    /// Mirror the search box into the `?search=` URL parameter (web only)
    pub sync_search_to_url: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            row_count: 1_000_000,
            row_height_px: 35.0,
            viewport_height_px: 600.0,
            overscan: 20,
            min_age: 18,
            age_span: 80,
            registered_span_ms: 1_000_000_000_000,
            seed: None,
            max_measurements: 256,
            sync_search_to_url: true,
        }
    }
}

fn parse_override<T: FromStr>(key: &str, raw: &str) -> BenchResult<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| BenchError::invalid_config(key, format!("{:?}: {}", raw, e)))
}

impl BenchConfig {
    pub fn from_json_str(content: &str) -> BenchResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_path(path: &Path) -> BenchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> BenchResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| BenchError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `rows`, `overscan`, `seed` and `viewport` overrides from `lookup`,
    /// then validates the result.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> BenchResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("rows") {
            self.row_count = parse_override("rows", &raw)?;
        }
        if let Some(raw) = lookup("overscan") {
            self.overscan = parse_override("overscan", &raw)?;
        }
        if let Some(raw) = lookup("seed") {
            self.seed = Some(parse_override("seed", &raw)?);
        }
        if let Some(raw) = lookup("viewport") {
            self.viewport_height_px = parse_override("viewport", &raw)?;
        }
        self.validate()
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.row_count > MAX_ROWS {
            return Err(BenchError::DatasetTooLarge {
                requested: self.row_count,
                max: MAX_ROWS,
            });
        }
        if !(self.row_height_px.is_finite() && self.row_height_px > 0.0) {
            return Err(BenchError::invalid_config("row_height_px", "must be a positive number"));
        }
        if !(self.viewport_height_px.is_finite() && self.viewport_height_px > 0.0) {
            return Err(BenchError::invalid_config(
                "viewport_height_px",
                "must be a positive number",
            ));
        }
        if self.age_span == 0 {
            return Err(BenchError::invalid_config("age_span", "must be at least 1"));
        }
        if u16::from(self.min_age) + u16::from(self.age_span) - 1 > u16::from(u8::MAX) {
            return Err(BenchError::invalid_config(
                "age_span",
                format!("ages from {} would exceed {}", self.min_age, u8::MAX),
            ));
        }
        if self.registered_span_ms < 0 {
            return Err(BenchError::invalid_config("registered_span_ms", "must not be negative"));
        }
        if self.registered_span_ms > MAX_REGISTERED_SPAN_MS {
            return Err(BenchError::invalid_config(
                "registered_span_ms",
                format!("must not exceed {}", MAX_REGISTERED_SPAN_MS),
            ));
        }
        if self.max_measurements == 0 {
            return Err(BenchError::invalid_config("max_measurements", "must be at least 1"));
        }
        Ok(())
    }

    /// Defaults, then the file named by `TABLE_BENCH_CONFIG`, then
    /// `TABLE_BENCH_<KEY>` overrides.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> BenchResult<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load_from_path(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| {
            std::env::var(format!("TABLE_BENCH_{}", key.to_uppercase())).ok()
        })?;
        Ok(config)
    }

    /// Defaults, then overrides from the page's query string.
    #[cfg(target_arch = "wasm32")]
    pub fn from_url() -> BenchResult<Self> {
        let mut config = Self::default();
        config.apply_overrides(crate::services::url_sync::query_param)?;
        Ok(config)
    }

    /// Platform configuration, falling back to defaults when it is unusable.
    pub fn resolve() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let loaded = Self::from_env();
        #[cfg(target_arch = "wasm32")]
        let loaded = Self::from_url();

        match loaded {
            Ok(config) => {
                info!(rows = config.row_count, seed = ?config.seed, "Configuration loaded");
                config
            }
            Err(e) => {
                warn!(error = %e, "Falling back to default configuration");
                Self::default()
            }
        }
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            min_age: self.min_age,
            age_span: self.age_span,
            registered_span_ms: self.registered_span_ms,
            seed: self.seed,
        }
    }

    pub fn virtualizer_options(&self, count: usize) -> VirtualizerOptions {
        VirtualizerOptions {
            count,
            item_size: self.row_height_px,
            overscan: self.overscan,
            viewport_size: self.viewport_height_px,
        }
    }
}
