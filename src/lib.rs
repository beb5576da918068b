//! TradingStar 3 Launcher
//!
//! A small desktop front end for the TradingStar 3 trading app: pick the
//! executable, enter the API key, start and stop the app and watch its console.
//!
//! ## Architecture
//!
//! - [`controller`] owns the single child process. It spawns it, relays
//!   stdout/stderr as events and reports the exit exactly once.
//! - [`session`] is the display-side state: believed run status, a bounded
//!   output history and user notifications. It only talks to the controller
//!   through the [`controller::LauncherApi`] capability.
//! - [`gui`] renders the session with egui, [`config`] persists the launch
//!   parameters.

pub mod config;
pub mod controller;
pub mod domain;
pub mod gui;
pub mod session;

pub use domain::*;
