use dioxus::prelude::*;

use crate::config::BenchConfig;
use crate::services::perf::PerfRecorder;
use crate::ui_dioxus::views::BenchmarkPage;

#[component]
pub fn App() -> Element {
    let config = use_hook(BenchConfig::resolve);

    // Shared by the page and the table so every timing lands in one log
    let capacity = config.max_measurements;
    use_context_provider(move || PerfRecorder::new(capacity));

    rsx! {
        div {
            class: "app-container",
            style: "min-height: 100vh; background: #fafafa;",
            BenchmarkPage { config: config }
        }
    }
}
