//! Run command implementation (headless session)

use anyhow::{bail, Result};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use ts_launcher::config::Config;
use ts_launcher::controller::ProcessController;
use ts_launcher::session::{NoticeLevel, SessionState};
use ts_launcher::{ProcessEvent, RunState};

/// Launch the app and relay its console to this terminal until it exits.
///
/// Ctrl-C requests a stop; the command returns once the exit is observed.
pub async fn run_command(
    config_path: &Path,
    path: Option<String>,
    key: Option<String>,
    save: bool,
    json: bool,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    let mut launch = config.launch_config();
    if let Some(path) = path {
        launch.executable_path = path;
    }
    if let Some(key) = key {
        launch.api_key = key;
    }
    launch.validate()?;

    if save {
        config.set_launch_config(&launch);
        config.save_to_file(config_path)?;
    }

    let controller = Arc::new(ProcessController::new(Handle::current()));
    // Separate subscriber so every chunk is printed, not just what the buffer keeps
    let mut printer = controller.subscribe();
    let mut session = SessionState::new(controller.clone(), Handle::current(), config.session);
    session.request_start(&launch);

    let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());
    let mut stop_sent = false;
    let mut ticker = tokio::time::interval(Duration::from_millis(50));

    loop {
        tokio::select! {
            Some(event) = printer.recv() => print_event(&event, json)?,
            result = &mut ctrl_c, if !stop_sent => {
                result?;
                stop_sent = true;
                session.request_stop();
            }
            _ = ticker.tick() => {}
        }

        session.poll();
        for notice in session.take_notices() {
            let prefix = match notice.level {
                NoticeLevel::Error => "[error]",
                NoticeLevel::Warning => "[warn]",
                NoticeLevel::Info | NoticeLevel::Positive => "[launcher]",
            };
            eprintln!("{} {}", prefix, notice.message);
        }

        if session.run_state() == RunState::Stopped {
            break;
        }
    }

    while let Some(event) = printer.try_recv() {
        print_event(&event, json)?;
    }

    match session.last_exit() {
        None => bail!("TradingStar 3 was not started"),
        Some(Some(code)) if code != 0 && !stop_sent => {
            bail!("TradingStar 3 exited with code {}", code)
        }
        Some(_) => Ok(()),
    }
}

/// Relay one event; with `json` every event becomes a line on stdout
fn print_event(event: &ProcessEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        ProcessEvent::Output(text) => {
            print!("{}", text);
            let _ = std::io::stdout().flush();
        }
        ProcessEvent::ErrorOutput(text) => {
            eprint!("{}", text);
        }
        ProcessEvent::RuntimeError(_) | ProcessEvent::Terminated(_) => {}
    }
    Ok(())
}
