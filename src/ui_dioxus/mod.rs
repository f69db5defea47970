// Dioxus UI module - the benchmark page and its table components
pub mod app;
pub mod components;
pub mod views;

pub use app::App;
