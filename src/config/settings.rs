//! Settings sections of the config file

use serde::{Deserialize, Serialize};

/// `[launcher]` section: what was last launched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Path to the TradingStar 3 executable
    pub executable_path: String,
    /// API key handed to the app with `-k`
    pub api_key: String,
}

/// When the session reports the app as running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningOn {
    /// As soon as the controller confirms the spawn
    #[default]
    Acknowledgement,
    /// Only once the app printed something
    FirstOutput,
}

/// `[session]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub running_on: RunningOn,
}
