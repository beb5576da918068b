//! GUI module for the launcher window
//!
//! One window with three areas:
//! - top: executable path, API key and save button
//! - center: console output of the running app
//! - bottom: run state and start/stop controls

mod app;
mod app_eframe;
mod console;
mod runner;
mod settings_panel;
mod status_bar;
mod theme;
mod toast;

pub use app::LauncherApp;
pub use runner::run_gui;
