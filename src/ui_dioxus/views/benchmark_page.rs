use chrono::Utc;
use dioxus::prelude::*;
use tracing::error;

use crate::config::BenchConfig;
use crate::domain::record::SharedDataset;
use crate::services::data_generator::generate_dataset;
use crate::services::error_handling::LogHelper;
use crate::services::perf::{marks, measures, PerfRecorder};
use crate::services::url_sync;
use crate::ui_dioxus::components::DataTable;

/// Generates the dataset once after mount, then hands it to the table.
#[component]
pub fn BenchmarkPage(config: BenchConfig) -> Element {
    let recorder = use_context::<PerfRecorder>();
    let mut dataset = use_signal(|| None::<SharedDataset>);
    let mut failure = use_signal(|| None::<String>);
    let initial_search = use_hook(url_sync::initial_search);

    use_effect({
        let config = config.clone();
        move || {
            recorder.mark(marks::DATA_GEN_START);
            match generate_dataset(&config, Utc::now()) {
                Ok(generated) => {
                    recorder.mark(marks::DATA_GEN_END);
                    if let Err(e) = recorder.measure(
                        measures::DATA_GENERATION,
                        marks::DATA_GEN_START,
                        marks::DATA_GEN_END,
                    ) {
                        LogHelper::log_recoverable("data generation", &e);
                    }
                    dataset.set(Some(SharedDataset::new(generated)));
                }
                Err(e) => {
                    error!(error = %e, "Failed to generate dataset");
                    failure.set(Some(e.to_string()));
                }
            }
        }
    });

    if let Some(message) = failure() {
        return rsx! {
            div {
                style: "padding: 12px; background: #fee2e2; border: 1px solid #fca5a5; border-radius: 6px; color: #991b1b; margin: 20px;",
                "Failed to generate table data: {message}"
            }
        };
    }

    match dataset() {
        Some(dataset) => rsx! {
            DataTable {
                dataset: dataset,
                config: config.clone(),
                initial_search: initial_search.clone(),
            }
        },
        None => rsx! {
            div {
                style: "text-align: center; padding: 40px; color: #6b7280;",
                "Loading table data..."
            }
        },
    }
}
