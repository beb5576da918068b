//! Single-writer slot for the one process the controller may own.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::{mpsc, oneshot};

use super::LaunchError;

/// Reply channel for a kill request, carries the signal delivery result
pub(super) type KillReply = oneshot::Sender<std::io::Result<()>>;

/// Handle to the live process; the child itself is owned by its exit watcher
pub(super) struct ActiveProcess {
    pub pid: Option<u32>,
    pub generation: u64,
    pub kill_tx: mpsc::Sender<KillReply>,
}

#[derive(Default)]
struct SlotInner {
    next_generation: u64,
    active: Option<ActiveProcess>,
}

#[derive(Default)]
pub(super) struct ProcessSlot {
    inner: Mutex<SlotInner>,
}

impl ProcessSlot {
    fn lock(&self) -> MutexGuard<'_, SlotInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fill the slot with whatever `spawn` produces, only if it is empty.
    ///
    /// The emptiness check, the spawn and the store happen under one lock, so
    /// a concurrent caller sees either an empty slot or `AlreadyRunning`.
    pub fn acquire<T>(
        &self,
        spawn: impl FnOnce(u64) -> Result<(ActiveProcess, T), LaunchError>,
    ) -> Result<T, LaunchError> {
        let mut inner = self.lock();
        if inner.active.is_some() {
            return Err(LaunchError::AlreadyRunning);
        }

        inner.next_generation += 1;
        let generation = inner.next_generation;
        let (active, out) = spawn(generation)?;
        debug_assert_eq!(active.generation, generation);
        inner.active = Some(active);
        Ok(out)
    }

    /// Clear the slot if it still holds `generation`
    pub fn release(&self, generation: u64) -> bool {
        let mut inner = self.lock();
        match inner.active.as_ref() {
            Some(active) if active.generation == generation => {
                inner.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn kill_handle(&self) -> Option<(Option<u32>, mpsc::Sender<KillReply>)> {
        self.lock()
            .active
            .as_ref()
            .map(|active| (active.pid, active.kill_tx.clone()))
    }

    pub fn current_pid(&self) -> Option<u32> {
        self.lock().active.as_ref().and_then(|active| active.pid)
    }

    pub fn is_occupied(&self) -> bool {
        self.lock().active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_process(pid: u32, generation: u64) -> ActiveProcess {
        let (kill_tx, _kill_rx) = mpsc::channel(1);
        ActiveProcess {
            pid: Some(pid),
            generation,
            kill_tx,
        }
    }

    #[test]
    fn test_second_acquire_is_rejected_without_spawning() {
        let slot = ProcessSlot::default();
        slot.acquire(|generation| Ok((fake_process(100, generation), ())))
            .unwrap();

        let mut spawned = false;
        let result = slot.acquire(|generation| {
            spawned = true;
            Ok((fake_process(200, generation), ()))
        });

        assert_eq!(result, Err(LaunchError::AlreadyRunning));
        assert!(!spawned);
        assert_eq!(slot.current_pid(), Some(100));
    }

    #[test]
    fn test_failed_spawn_leaves_slot_empty() {
        let slot = ProcessSlot::default();
        let result: Result<(), _> =
            slot.acquire(|_| Err(LaunchError::SpawnFailed("denied".into())));

        assert!(matches!(result, Err(LaunchError::SpawnFailed(_))));
        assert!(!slot.is_occupied());
    }

    #[test]
    fn test_stale_generation_cannot_release_newer_process() {
        let slot = ProcessSlot::default();
        let first = slot
            .acquire(|generation| Ok((fake_process(1, generation), generation)))
            .unwrap();
        assert!(slot.release(first));

        let second = slot
            .acquire(|generation| Ok((fake_process(2, generation), generation)))
            .unwrap();
        assert!(!slot.release(first));
        assert_eq!(slot.current_pid(), Some(2));
        assert!(slot.release(second));
        assert!(slot.kill_handle().is_none());
    }
}
