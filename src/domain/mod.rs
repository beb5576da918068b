//! Core domain types for the TradingStar launcher

mod launch_config;
mod output_line;
mod process_event;
mod run_state;

pub use launch_config::{LaunchConfig, ValidationError, API_KEY_FLAG};
pub(crate) use launch_config::mask_key;
pub use output_line::{OutputLine, OutputStream};
pub use process_event::{ProcessEvent, StartAck, StartResponse, StopOutcome};
pub use run_state::RunState;
