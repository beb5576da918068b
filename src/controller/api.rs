//! Capability handed to the display side

use async_trait::async_trait;

use super::{LaunchError, ProcessController, Subscription};
use crate::{StartAck, StopOutcome};

/// The narrow start/stop/subscribe surface of the controller.
///
/// The session only ever sees this trait, never the OS process API.
#[async_trait]
pub trait LauncherApi: Send + Sync {
    /// Spawn the external app with `-k <api_key>`
    async fn start(&self, executable_path: &str, api_key: &str) -> Result<StartAck, LaunchError>;

    /// Request termination of the running app
    async fn stop(&self) -> StopOutcome;

    /// Register for process events
    fn subscribe(&self) -> Subscription;
}

#[async_trait]
impl LauncherApi for ProcessController {
    async fn start(&self, executable_path: &str, api_key: &str) -> Result<StartAck, LaunchError> {
        ProcessController::start(self, executable_path, api_key)
    }

    async fn stop(&self) -> StopOutcome {
        ProcessController::stop(self).await
    }

    fn subscribe(&self) -> Subscription {
        ProcessController::subscribe(self)
    }
}
