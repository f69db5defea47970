use table_bench::ui_dioxus::App;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use dioxus_desktop::{Config, WindowBuilder};
    use table_bench::config::BenchConfig;

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Fail fast on a broken config file instead of silently benchmarking defaults
    BenchConfig::from_env().context("Invalid table-bench configuration")?;

    let window = WindowBuilder::new().with_title("Table Bench");
    dioxus_desktop::launch::launch(App, vec![], Config::new().with_window(window));
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // `tracing` events reach the browser console through the `log` facade
    wasm_logger::init(wasm_logger::Config::default());
    dioxus_web::launch::launch(App, vec![], dioxus_web::Config::new());
}
