#![cfg(target_arch = "wasm32")]

use table_bench::services::perf::{marks, measures, PerfRecorder};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_browser_clock_measures_between_marks() {
    let recorder = PerfRecorder::new(8);
    recorder.mark(marks::SEARCH_START);
    recorder.mark(marks::RENDER_END);

    let measurement = recorder
        .measure(measures::SEARCH_DURATION, marks::SEARCH_START, marks::RENDER_END)
        .unwrap();
    assert!(measurement.duration_ms >= 0.0);
    assert!(measurement.start_ms > 0.0);
}
