use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::services::perf;

pub type BenchResult<T> = std::result::Result<T, BenchError>;

/// Custom error types with descriptive messages
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Performance mark not set: {name}")]
    MarkNotFound { name: String },

    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to read configuration file {path:?}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Browser API unavailable: {api}")]
    BrowserApi { api: String },

    #[error("Dataset of {requested} rows exceeds the maximum of {max}")]
    DatasetTooLarge { requested: usize, max: usize },
}

impl BenchError {
    pub fn invalid_config(field: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    pub fn browser_api(api: impl Into<String>) -> Self {
        Self::BrowserApi { api: api.into() }
    }

    /// Missing marks are routine on the benchmark page and never surface to the user.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::MarkNotFound { .. })
    }
}

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    /// Logs a failure that the page recovers from by carrying on.
    pub fn log_recoverable(context: &str, error: &BenchError) {
        if error.is_ignorable() {
            trace!(context = %context, error = %error, "Ignoring unset performance mark");
        } else {
            warn!(context = %context, error = %error, "Recoverable error");
        }
    }

    pub fn log_performance_warning(operation: &str, duration_ms: f64, threshold_ms: f64) {
        if duration_ms > threshold_ms {
            warn!(
                operation = %operation,
                duration_ms = duration_ms,
                threshold_ms = threshold_ms,
                "Operation exceeded performance threshold"
            );
        }
    }
}

/// Performance monitoring
pub struct PerformanceMonitor {
    operation: String,
    start_ms: f64,
    threshold_ms: f64,
}

impl PerformanceMonitor {
    pub fn new(operation: impl Into<String>, threshold_ms: f64) -> Self {
        Self {
            operation: operation.into(),
            start_ms: perf::now_ms(),
            threshold_ms,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        perf::now_ms() - self.start_ms
    }
}

impl Drop for PerformanceMonitor {
    fn drop(&mut self) {
        let duration_ms = self.elapsed_ms();
        LogHelper::log_performance_warning(&self.operation, duration_ms, self.threshold_ms);

        debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );
    }
}
