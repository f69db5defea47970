use dioxus::prelude::*;

use crate::services::perf::{measures, Measurement};

#[component]
pub fn TimingsPanel(
    measurements: Vec<Measurement>,
    renders: u64,
    matched: usize,
    total: usize,
) -> Element {
    let latest: Vec<(&'static str, String)> = measures::ALL
        .into_iter()
        .map(|name| {
            let duration = measurements
                .iter()
                .rev()
                .find(|m| m.name == name)
                .map(|m| format!("{:.1} ms", m.duration_ms))
                .unwrap_or_else(|| "–".to_string());
            (name, duration)
        })
        .collect();

    rsx! {
        div {
            class: "timings-panel",
            style: "display: flex; gap: 20px; align-items: center; margin-bottom: 10px; font-size: 14px;",

            p { "Re-renders: {renders}" }
            p { "Showing {matched} of {total} rows" }

            for (name, duration) in latest {
                div {
                    key: "{name}",
                    style: "padding: 4px 10px; background: #f3f4f6; border-radius: 6px;",
                    "⏱️ {name}: {duration}"
                }
            }
        }
    }
}
