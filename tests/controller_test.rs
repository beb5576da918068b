//! Process controller tests against real child processes.
//!
//! These tests verify that:
//! 1. The app is launched as `<path> -k <key>` with stdout/stderr relayed
//! 2. Only one process can be live; extra starts get `AlreadyRunning`
//! 3. `Terminated` is emitted once and frees the slot for the next start
//! 4. Spawn failures and idle stops are reported without side effects
#![cfg(unix)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::runtime::Handle;
use ts_launcher::controller::{LaunchError, ProcessController};
use ts_launcher::{ProcessEvent, StartResponse, StopOutcome};

use common::{collect_until_terminated, next_event, path_str, serial, write_script};

#[tokio::test]
async fn test_nonexistent_executable_fails_with_spawn_error() {
    let _serial = serial();
    let controller = ProcessController::new(Handle::current());
    let mut sub = controller.subscribe();

    let result = controller.start("/bin/ls_nonexistent", "key1");

    assert!(matches!(result, Err(LaunchError::SpawnFailed(_))));
    let response = StartResponse::from(&result);
    assert!(!response.success);
    assert!(response.message.unwrap().contains("Ошибка запуска"));
    assert!(!controller.is_running());
    assert!(sub.try_recv().is_none());
}

#[tokio::test]
async fn test_empty_path_is_rejected() {
    let _serial = serial();
    let controller = ProcessController::new(Handle::current());

    assert_eq!(controller.start("", "key1"), Err(LaunchError::MissingPath));
    assert!(!controller.is_running());
}

#[tokio::test]
async fn test_passes_api_key_flag_and_relays_output() {
    let _serial = serial();
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "app.sh", "echo \"args: $@\"\necho oops >&2\nexit 3");

    let controller = ProcessController::new(Handle::current());
    let mut sub = controller.subscribe();
    let ack = controller.start(path_str(&script), "key1").unwrap();
    assert!(ack.pid.is_some());

    let transcript = collect_until_terminated(&mut sub).await;
    assert_eq!(transcript.stdout, "args: -k key1\n");
    assert_eq!(transcript.stderr, "oops\n");
    assert!(transcript.errors.is_empty());
    assert_eq!(transcript.exit_code, Some(3));
    assert!(!controller.is_running());
}

#[tokio::test]
async fn test_second_start_rejected_while_running() {
    let _serial = serial();
    let dir = TempDir::new().unwrap();
    let long_running = write_script(&dir, "long.sh", "echo started\nexec sleep 30");
    let quick = write_script(&dir, "quick.sh", "echo done");

    let controller = ProcessController::new(Handle::current());
    let mut sub = controller.subscribe();
    let first = controller.start(path_str(&long_running), "key1").unwrap();
    assert_eq!(next_event(&mut sub).await, ProcessEvent::Output("started\n".into()));

    for _ in 0..3 {
        assert_eq!(
            controller.start(path_str(&quick), "key2"),
            Err(LaunchError::AlreadyRunning)
        );
        assert_eq!(controller.current_pid(), first.pid);
    }

    assert_eq!(controller.stop().await, StopOutcome::Signalled);
    let transcript = collect_until_terminated(&mut sub).await;
    // Killed by a signal, so no exit code
    assert_eq!(transcript.exit_code, None);
    assert!(!controller.is_running());

    controller.start(path_str(&quick), "key2").unwrap();
    let transcript = collect_until_terminated(&mut sub).await;
    assert_eq!(transcript.stdout, "done\n");
    assert_eq!(transcript.exit_code, Some(0));
}

#[tokio::test]
async fn test_stop_without_process_is_noop() {
    let _serial = serial();
    let controller = ProcessController::new(Handle::current());
    let mut sub = controller.subscribe();

    assert_eq!(controller.stop().await, StopOutcome::NotRunning);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sub.try_recv().is_none());
}

#[tokio::test]
async fn test_terminated_is_emitted_exactly_once() {
    let _serial = serial();
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "app.sh", "printf 'line1\\n'");

    let controller = ProcessController::new(Handle::current());
    let mut sub = controller.subscribe();
    controller.start(path_str(&script), "key1").unwrap();

    let transcript = collect_until_terminated(&mut sub).await;
    assert_eq!(transcript.stdout, "line1\n");

    tokio::time::sleep(Duration::from_millis(300)).await;
    while let Some(event) = sub.try_recv() {
        assert!(
            !matches!(event, ProcessEvent::Terminated(_)),
            "Terminated emitted twice"
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_starts_yield_a_single_process() {
    let _serial = serial();
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "long.sh", "exec sleep 30");

    let controller = Arc::new(ProcessController::new(Handle::current()));
    let mut sub = controller.subscribe();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let controller = Arc::clone(&controller);
                let path = path_str(&script).to_string();
                scope.spawn(move || controller.start(&path, "key1"))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| r == &Err(LaunchError::AlreadyRunning))
    );

    assert_eq!(controller.stop().await, StopOutcome::Signalled);
    let transcript = collect_until_terminated(&mut sub).await;
    assert_eq!(transcript.exit_code, None);
    assert_eq!(controller.events().subscriber_count(), 1);
}
