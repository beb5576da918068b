//! Session state: the display-side view of the trading app process.
//!
//! The session turns UI intents into controller requests and folds the
//! controller's acknowledgements and events back into a [`RunState`] and a
//! bounded [`OutputBuffer`]. Requests are dispatched as tasks on the runtime;
//! answers come back over channels and are applied in [`SessionState::poll`],
//! so the UI thread never waits on the controller.

mod buffer;
mod notice;


use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::runtime::Handle;

use crate::config::{RunningOn, SessionSettings};
use crate::controller::{LaunchError, LauncherApi, Subscription};
use crate::{LaunchConfig, OutputLine, ProcessEvent, RunState, StartAck, StopOutcome};

pub use buffer::{OutputBuffer, OUTPUT_BUFFER_CAPACITY};
pub use notice::{Notice, NoticeLevel};

/// Answers from controller requests, tagged with the attempt they belong to
enum ControllerReply {
    Started {
        attempt: u64,
        result: Result<StartAck, LaunchError>,
    },
    StopFinished {
        attempt: u64,
        outcome: StopOutcome,
    },
}

pub struct SessionState {
    api: Arc<dyn LauncherApi>,
    runtime: Handle,
    settings: SessionSettings,

    run_state: RunState,
    output: OutputBuffer,
    subscription: Option<Subscription>,
    notices: VecDeque<Notice>,

    reply_tx: Sender<ControllerReply>,
    reply_rx: Receiver<ControllerReply>,

    /// Incremented per start request, stale replies are dropped
    attempt: u64,
    /// The controller confirmed the spawn for the current attempt
    acknowledged: bool,
    stop_requested: bool,
    pid: Option<u32>,
    last_exit: Option<Option<i32>>,
}

impl SessionState {
    pub fn new(api: Arc<dyn LauncherApi>, runtime: Handle, settings: SessionSettings) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel();
        Self {
            api,
            runtime,
            settings,
            run_state: RunState::Stopped,
            output: OutputBuffer::default(),
            subscription: None,
            notices: VecDeque::new(),
            reply_tx,
            reply_rx,
            attempt: 0,
            acknowledged: false,
            stop_requested: false,
            pid: None,
            last_exit: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Pid reported by the controller for the current process
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// A stop was requested and the exit has not been observed yet
    pub fn is_stopping(&self) -> bool {
        self.stop_requested && self.run_state.is_active()
    }

    /// Exit code of the last finished process (`Some(None)` when unknown)
    pub fn last_exit(&self) -> Option<Option<i32>> {
        self.last_exit
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Validate `config` and ask the controller to start the app
    pub fn request_start(&mut self, config: &LaunchConfig) {
        if self.run_state != RunState::Stopped {
            self.notify(Notice::warning(LaunchError::AlreadyRunning.to_string()));
            return;
        }
        if let Err(e) = config.validate() {
            self.notify(Notice::warning(e.to_string()));
            return;
        }

        tracing::info!("Requesting start of {}", config.executable_path);

        self.output.clear();
        // Subscribe before starting so no early output is missed
        self.subscription = Some(self.api.subscribe());
        self.attempt += 1;
        self.acknowledged = false;
        self.stop_requested = false;
        self.pid = None;
        self.run_state = RunState::Starting;

        let api = Arc::clone(&self.api);
        let reply_tx = self.reply_tx.clone();
        let attempt = self.attempt;
        let path = config.executable_path.clone();
        let key = config.api_key.clone();
        self.runtime.spawn(async move {
            let result = api.start(&path, &key).await;
            let _ = reply_tx.send(ControllerReply::Started { attempt, result });
        });
    }

    /// Ask the controller to stop the app; a no-op when nothing runs
    pub fn request_stop(&mut self) {
        if self.run_state == RunState::Stopped {
            tracing::debug!("Stop requested while stopped, ignoring");
            return;
        }
        if self.stop_requested {
            tracing::debug!("Stop already requested");
            return;
        }

        self.stop_requested = true;
        if self.acknowledged {
            self.dispatch_stop();
        } else {
            tracing::info!("Stop deferred until the start is acknowledged");
        }
        self.notify(Notice::info("Запрос на остановку TradingStar 3 отправлен."));
    }

    /// Apply pending controller replies and process events.
    ///
    /// Returns true when anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok(reply) = self.reply_rx.try_recv() {
            self.apply_reply(reply);
            changed = true;
        }

        while let Some(event) = self.subscription.as_mut().and_then(|s| s.try_recv()) {
            self.apply_event(event);
            changed = true;
        }

        changed
    }

    fn dispatch_stop(&self) {
        let api = Arc::clone(&self.api);
        let reply_tx = self.reply_tx.clone();
        let attempt = self.attempt;
        self.runtime.spawn(async move {
            let outcome = api.stop().await;
            let _ = reply_tx.send(ControllerReply::StopFinished { attempt, outcome });
        });
    }

    fn apply_reply(&mut self, reply: ControllerReply) {
        match reply {
            ControllerReply::Started { attempt, result } => {
                if attempt != self.attempt || self.run_state == RunState::Stopped {
                    tracing::debug!("Ignoring stale start acknowledgement (attempt {})", attempt);
                    return;
                }
                match result {
                    Ok(ack) => {
                        tracing::info!("Start acknowledged, pid={:?}", ack.pid);
                        self.acknowledged = true;
                        self.pid = ack.pid;
                        if self.settings.running_on == RunningOn::Acknowledgement {
                            self.enter_running();
                        }
                        if self.stop_requested {
                            self.dispatch_stop();
                        }
                    }
                    Err(e) => {
                        tracing::error!("Start failed: {}", e);
                        self.reset_to_stopped();
                        self.notify(Notice::error(e.to_string()));
                    }
                }
            }
            ControllerReply::StopFinished { attempt, outcome } => match outcome {
                StopOutcome::Signalled => tracing::debug!("Kill signal delivered"),
                StopOutcome::NotRunning => {
                    tracing::warn!("Controller had no process to stop (attempt {})", attempt)
                }
                StopOutcome::SignalFailed(reason) => {
                    if attempt == self.attempt && self.run_state.is_active() {
                        self.reset_to_stopped();
                        self.last_exit = Some(None);
                    }
                    self.notify(Notice::error(format!("Ошибка остановки процесса: {}", reason)));
                }
            },
        }
    }

    fn apply_event(&mut self, event: ProcessEvent) {
        match event {
            ProcessEvent::Output(text) => self.push_output(OutputLine::stdout(text)),
            ProcessEvent::ErrorOutput(text) => self.push_output(OutputLine::stderr(text)),
            ProcessEvent::RuntimeError(message) => self.notify(Notice::error(message)),
            ProcessEvent::Terminated(code) => {
                self.reset_to_stopped();
                self.last_exit = Some(code);
                let message = match code {
                    Some(code) => format!("TradingStar 3 завершён. Код завершения: {}", code),
                    None => "TradingStar 3 завершён.".to_string(),
                };
                self.notify(Notice::info(message));
            }
        }
    }

    fn push_output(&mut self, line: OutputLine) {
        if self.run_state == RunState::Starting && self.settings.running_on == RunningOn::FirstOutput
        {
            self.enter_running();
        }
        self.output.push(line);
    }

    fn enter_running(&mut self) {
        self.run_state = RunState::Running;
        self.notify(Notice::positive("TradingStar 3 запущен."));
    }

    /// Back to `Stopped`; dropping the subscription unsubscribes from the hub
    fn reset_to_stopped(&mut self) {
        self.run_state = RunState::Stopped;
        self.subscription = None;
        self.acknowledged = false;
        self.stop_requested = false;
        self.pid = None;
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::error!("{}", notice.message),
            NoticeLevel::Warning => tracing::warn!("{}", notice.message),
            NoticeLevel::Info | NoticeLevel::Positive => tracing::info!("{}", notice.message),
        }
        self.notices.push_back(notice);
    }
}
