use serde::{Deserialize, Serialize};

/// Command-line flag that carries the API key to the trading app
pub const API_KEY_FLAG: &str = "-k";

/// Why a launch configuration cannot be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Путь к приложению не указан.")]
    MissingPath,

    #[error("API ключ не указан.")]
    MissingApiKey,
}

/// User-supplied executable path and API key pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Path to the TradingStar 3 executable
    pub executable_path: String,
    /// API key passed as `-k <key>`
    pub api_key: String,
}

impl LaunchConfig {
    pub fn new(executable_path: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            executable_path: executable_path.into(),
            api_key: api_key.into(),
        }
    }

    /// Check that both fields are present before anything is spawned
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.executable_path.trim().is_empty() {
            return Err(ValidationError::MissingPath);
        }
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingApiKey);
        }
        Ok(())
    }

    /// Key representation that is safe to put in logs
    pub fn masked_key(&self) -> &'static str {
        mask_key(&self.api_key)
    }
}

pub(crate) fn mask_key(key: &str) -> &'static str {
    if key.is_empty() { "пусто" } else { "***" }
}
