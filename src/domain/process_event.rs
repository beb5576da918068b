use serde::{Deserialize, Serialize};

use crate::controller::LaunchError;

/// Event relayed from the controller to its subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ProcessEvent {
    /// A chunk read from the child's stdout
    Output(String),
    /// A chunk read from the child's stderr
    ErrorOutput(String),
    /// The running process hit an error that is not (yet) a termination
    RuntimeError(String),
    /// The process is gone, emitted exactly once per spawned process
    Terminated(Option<i32>),
}

impl ProcessEvent {
    pub fn is_output(&self) -> bool {
        matches!(self, ProcessEvent::Output(_) | ProcessEvent::ErrorOutput(_))
    }
}

/// Acknowledgement that the OS accepted the spawn request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartAck {
    pub pid: Option<u32>,
}

/// Result of a stop request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// Kill signal delivered, exit will follow as `Terminated`
    Signalled,
    /// Nothing was running
    NotRunning,
    /// Signal delivery failed, the handle was released anyway
    SignalFailed(String),
}

/// Shape of the `start` answer at the command boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&Result<StartAck, LaunchError>> for StartResponse {
    fn from(result: &Result<StartAck, LaunchError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                message: None,
            },
            Err(e) => Self {
                success: false,
                message: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_response_wire_shape() {
        let ok = StartResponse::from(&Ok(StartAck { pid: Some(42) }));
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!({ "success": true }));

        let failed = StartResponse::from(&Err(LaunchError::SpawnFailed("No such file".into())));
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["message"].as_str().unwrap().contains("Ошибка запуска"));
    }

    #[test]
    fn test_terminated_serializes_null_exit_code() {
        let value = serde_json::to_value(ProcessEvent::Terminated(None)).unwrap();
        assert_eq!(value, serde_json::json!({ "kind": "terminated", "payload": null }));
    }
}
