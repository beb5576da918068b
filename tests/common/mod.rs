//! Shared test utilities for process controller tests
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tempfile::TempDir;
use ts_launcher::controller::Subscription;
use ts_launcher::ProcessEvent;

static SERIAL: Mutex<()> = Mutex::new(());

/// Serialize tests that write and exec scripts, so a script is never
/// executed while another thread still holds it open for writing
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// Write an executable shell script into `dir`
pub fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
    path
}

pub fn path_str(path: &PathBuf) -> &str {
    path.to_str().expect("Temp path is not UTF-8")
}

/// Wait for the next event, failing the test after 10 seconds
pub async fn next_event(sub: &mut Subscription) -> ProcessEvent {
    tokio::time::timeout(Duration::from_secs(10), sub.recv())
        .await
        .expect("Timed out waiting for process event")
        .expect("Event hub closed")
}

/// Everything a process produced until it terminated
#[derive(Debug, Default)]
pub struct Transcript {
    pub stdout: String,
    pub stderr: String,
    pub errors: Vec<String>,
    pub exit_code: Option<i32>,
}

pub async fn collect_until_terminated(sub: &mut Subscription) -> Transcript {
    let mut transcript = Transcript::default();
    loop {
        match next_event(sub).await {
            ProcessEvent::Output(text) => transcript.stdout.push_str(&text),
            ProcessEvent::ErrorOutput(text) => transcript.stderr.push_str(&text),
            ProcessEvent::RuntimeError(message) => transcript.errors.push(message),
            ProcessEvent::Terminated(code) => {
                transcript.exit_code = code;
                return transcript;
            }
        }
    }
}
