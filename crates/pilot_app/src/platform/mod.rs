mod app;
mod config;
mod effects;
mod logging;
mod ui;
mod viewport;

pub use app::run_app;
