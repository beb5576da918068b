//! Process controller: the privileged side that owns the trading app process.
//!
//! The controller spawns at most one child, relays its stdout/stderr as
//! [`ProcessEvent`]s through an [`EventHub`], and reports the exit exactly once
//! as `Terminated`. The display side never touches the child directly; it only
//! talks to the [`LauncherApi`] capability.

mod api;
mod error;
mod hub;
mod relay;
mod slot;

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::domain::API_KEY_FLAG;
use crate::{OutputStream, ProcessEvent, StartAck, StopOutcome};
use slot::{ActiveProcess, KillReply, ProcessSlot};

pub use api::LauncherApi;
pub use error::LaunchError;
pub use hub::{EventHub, SUBSCRIBER_QUEUE_CAPACITY, Subscription};

/// How long to wait for the pipes to drain after the process exited
const RELAY_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Owns the single external process and its event stream
pub struct ProcessController {
    runtime: Handle,
    slot: Arc<ProcessSlot>,
    hub: EventHub,
}

impl ProcessController {
    /// Create a controller whose background tasks run on `runtime`
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            slot: Arc::new(ProcessSlot::default()),
            hub: EventHub::new(),
        }
    }

    pub fn events(&self) -> &EventHub {
        &self.hub
    }

    pub fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    /// Whether a process handle is currently held
    pub fn is_running(&self) -> bool {
        self.slot.is_occupied()
    }

    pub fn current_pid(&self) -> Option<u32> {
        self.slot.current_pid()
    }

    /// Spawn `<executable_path> -k <api_key>` and start relaying its output.
    ///
    /// Returns as soon as the OS accepted the spawn; readiness of the app is
    /// not awaited. Exit is reported later through the event hub.
    pub fn start(&self, executable_path: &str, api_key: &str) -> Result<StartAck, LaunchError> {
        let result = self.slot.acquire(|generation| {
            if executable_path.trim().is_empty() {
                return Err(LaunchError::MissingPath);
            }

            tracing::info!(
                "Starting {} with key {}",
                executable_path,
                crate::domain::mask_key(api_key)
            );

            let _enter = self.runtime.enter();
            let mut child = Command::new(executable_path)
                .arg(API_KEY_FLAG)
                .arg(api_key)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .spawn()
                .map_err(|e| LaunchError::SpawnFailed(e.to_string()))?;

            let pid = child.id();
            tracing::info!("Process started, pid={:?}", pid);

            let mut relays = Vec::with_capacity(2);
            if let Some(stdout) = child.stdout.take() {
                relays.push(relay::spawn_relay(
                    &self.runtime,
                    stdout,
                    OutputStream::Stdout,
                    self.hub.clone(),
                ));
            }
            if let Some(stderr) = child.stderr.take() {
                relays.push(relay::spawn_relay(
                    &self.runtime,
                    stderr,
                    OutputStream::Stderr,
                    self.hub.clone(),
                ));
            }

            let (kill_tx, kill_rx) = mpsc::channel(1);
            let watch = ExitWatch {
                child,
                generation,
                slot: Arc::clone(&self.slot),
                hub: self.hub.clone(),
                relays,
                kill_rx,
            };
            self.runtime.spawn(watch.run());

            Ok((
                ActiveProcess {
                    pid,
                    generation,
                    kill_tx,
                },
                StartAck { pid },
            ))
        });

        match &result {
            Err(LaunchError::AlreadyRunning) => {
                tracing::warn!("Start rejected: process already running")
            }
            Err(e) => tracing::error!("Failed to start {}: {}", executable_path, e),
            Ok(_) => {}
        }
        result
    }

    /// Ask the current process to terminate.
    ///
    /// Only waits for the signal to be handed to the OS; the exit itself
    /// arrives as `Terminated`.
    pub async fn stop(&self) -> StopOutcome {
        let Some((pid, kill_tx)) = self.slot.kill_handle() else {
            tracing::warn!("Stop requested but no process is running");
            return StopOutcome::NotRunning;
        };

        tracing::info!("Stopping process pid={:?}", pid);
        let (reply_tx, reply_rx) = oneshot::channel();
        if kill_tx.send(reply_tx).await.is_err() {
            tracing::debug!("Process pid={:?} exited before the stop request", pid);
            return StopOutcome::NotRunning;
        }

        match reply_rx.await {
            Ok(Ok(())) => StopOutcome::Signalled,
            Ok(Err(e)) => StopOutcome::SignalFailed(e.to_string()),
            Err(_) => StopOutcome::NotRunning,
        }
    }
}

/// Owns the child until it exits, then releases the slot and emits `Terminated`
struct ExitWatch {
    child: Child,
    generation: u64,
    slot: Arc<ProcessSlot>,
    hub: EventHub,
    relays: Vec<JoinHandle<()>>,
    kill_rx: mpsc::Receiver<KillReply>,
}

impl ExitWatch {
    async fn run(mut self) {
        let pid = self.child.id();

        let exit = loop {
            tokio::select! {
                status = self.child.wait() => break status,
                Some(reply) = self.kill_rx.recv() => {
                    match self.child.start_kill() {
                        Ok(()) => {
                            tracing::info!("Kill signal sent to pid={:?}", pid);
                            let _ = reply.send(Ok(()));
                        }
                        Err(e) => {
                            tracing::error!("Failed to kill process pid={:?}: {}", pid, e);
                            let _ = reply.send(Err(e));
                            // Signal state unknown: drop the handle rather than leave it dangling
                            self.abandon().await;
                            return;
                        }
                    }
                }
            }
        };

        let deadline = tokio::time::Instant::now() + RELAY_DRAIN_TIMEOUT;
        for relay in &mut self.relays {
            if tokio::time::timeout_at(deadline, &mut *relay).await.is_err() {
                tracing::warn!("Output pipe of pid={:?} still open after exit, detaching", pid);
                relay.abort();
                let _ = (&mut *relay).await;
            }
        }

        self.slot.release(self.generation);
        match exit {
            Ok(status) => {
                tracing::info!("Process pid={:?} exited with status: {}", pid, status);
                self.hub.emit(ProcessEvent::Terminated(status.code()));
            }
            Err(e) => {
                tracing::error!("Error waiting for child process pid={:?}: {}", pid, e);
                self.hub.emit(ProcessEvent::RuntimeError(format!(
                    "Ошибка ожидания процесса: {}",
                    e
                )));
                self.hub.emit(ProcessEvent::Terminated(None));
            }
        }
    }

    /// Give up on a process whose kill failed.
    ///
    /// The relays are stopped before the slot is cleared, so nothing from the
    /// abandoned process reaches a later session.
    async fn abandon(self) {
        let pid = self.child.id();
        for relay in &self.relays {
            relay.abort();
        }
        for relay in self.relays {
            let _ = relay.await;
        }
        self.slot.release(self.generation);
        tracing::warn!("Abandoned process pid={:?}", pid);
        self.hub.emit(ProcessEvent::Terminated(None));
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// Child that writes to stdout until it is killed
    fn spawn_chatty() -> Child {
        Command::new("sh")
            .arg("-c")
            .arg("while :; do echo tick; sleep 0.01; done")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .unwrap()
    }

    #[tokio::test]
    async fn test_abandon_releases_slot_and_silences_relays() {
        let runtime = Handle::current();
        let slot = Arc::new(ProcessSlot::default());
        let hub = EventHub::new();
        let mut sub = hub.subscribe();

        let mut child = spawn_chatty();
        let relays = vec![
            relay::spawn_relay(
                &runtime,
                child.stdout.take().unwrap(),
                OutputStream::Stdout,
                hub.clone(),
            ),
            relay::spawn_relay(
                &runtime,
                child.stderr.take().unwrap(),
                OutputStream::Stderr,
                hub.clone(),
            ),
        ];
        let (kill_tx, kill_rx) = mpsc::channel(1);
        let pid = child.id();
        let generation = slot
            .acquire(|generation| {
                Ok((
                    ActiveProcess {
                        pid,
                        generation,
                        kill_tx,
                    },
                    generation,
                ))
            })
            .unwrap();

        let first = tokio::time::timeout(Duration::from_secs(10), sub.recv())
            .await
            .unwrap();
        assert!(matches!(first, Some(ProcessEvent::Output(ref text)) if text.starts_with("tick")));

        let watch = ExitWatch {
            child,
            generation,
            slot: Arc::clone(&slot),
            hub: hub.clone(),
            relays,
            kill_rx,
        };
        watch.abandon().await;
        assert!(!slot.is_occupied());

        tokio::time::sleep(Duration::from_millis(100)).await;
        let mut events = Vec::new();
        while let Some(event) = sub.try_recv() {
            events.push(event);
        }
        let terminated: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ProcessEvent::Terminated(_)))
            .collect();
        assert_eq!(terminated, vec![&ProcessEvent::Terminated(None)]);
        assert_eq!(events.last(), Some(&ProcessEvent::Terminated(None)));
    }
}
