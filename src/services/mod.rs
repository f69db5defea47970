pub mod data_generator;
pub mod error_handling;
pub mod perf;
pub mod row_model;
pub mod url_sync;
pub mod virtualizer;

pub use data_generator::{generate_dataset, generate_records, GeneratorOptions};
pub use error_handling::{BenchError, BenchResult};
pub use perf::{Measurement, PerfRecorder};
pub use row_model::{GlobalFilter, RowModel};
pub use virtualizer::{VirtualItem, Virtualizer, VirtualizerOptions};
