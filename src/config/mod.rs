//! Configuration loading and management
//!
//! Persists the last used executable path and API key plus a few session
//! options in `~/.ts-launcher/config.toml`.

mod io;
mod settings;

pub use settings::{LauncherSettings, RunningOn, SessionSettings};

use serde::{Deserialize, Serialize};

use crate::LaunchConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Last used launch parameters
    #[serde(default)]
    pub launcher: LauncherSettings,

    /// Session behaviour
    #[serde(default)]
    pub session: SessionSettings,
}

impl Config {
    /// Launch parameters as stored
    pub fn launch_config(&self) -> LaunchConfig {
        LaunchConfig::new(
            self.launcher.executable_path.clone(),
            self.launcher.api_key.clone(),
        )
    }

    pub fn set_launch_config(&mut self, launch: &LaunchConfig) {
        self.launcher.executable_path = launch.executable_path.clone();
        self.launcher.api_key = launch.api_key.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [launcher]
            executable_path = "/opt/ts3/TradingStar3"
            "#,
        )
        .unwrap();

        assert_eq!(config.launcher.executable_path, "/opt/ts3/TradingStar3");
        assert_eq!(config.launcher.api_key, "");
        assert_eq!(config.session.running_on, RunningOn::Acknowledgement);
    }

    #[test]
    fn test_running_on_is_snake_case() {
        let config: Config = toml::from_str(
            r#"
            [session]
            running_on = "first_output"
            "#,
        )
        .unwrap();
        assert_eq!(config.session.running_on, RunningOn::FirstOutput);
    }

    #[test]
    fn test_launch_config_round_trips_through_settings() {
        let mut config = Config::default();
        config.set_launch_config(&LaunchConfig::new("/valid/app", "key1"));
        assert_eq!(config.launch_config(), LaunchConfig::new("/valid/app", "key1"));
    }
}
