//! Typed event channel between the controller and its subscribers.
//!
//! Every subscriber gets its own bounded mailbox so emitting never blocks the
//! producer. A full mailbox evicts its oldest output chunk; `RuntimeError` and
//! `Terminated` are never evicted. A `Subscription` removes itself from the
//! hub when dropped.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::sync::Notify;

use crate::ProcessEvent;

/// Events held per subscriber before the oldest output is evicted.
///
/// Same size as the session's output buffer, so a stalled reader never
/// loses anything the buffer would have kept.
pub const SUBSCRIBER_QUEUE_CAPACITY: usize = 500;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Default)]
struct Queue {
    events: VecDeque<ProcessEvent>,
    closed: bool,
    overflowed: bool,
}

/// One subscriber's pending events
#[derive(Default)]
struct Mailbox {
    queue: Mutex<Queue>,
    notify: Notify,
}

impl Mailbox {
    fn push(&self, id: u64, event: ProcessEvent) {
        let mut queue = lock(&self.queue);
        if queue.events.len() >= SUBSCRIBER_QUEUE_CAPACITY {
            if let Some(pos) = queue.events.iter().position(ProcessEvent::is_output) {
                queue.events.remove(pos);
                if !queue.overflowed {
                    queue.overflowed = true;
                    tracing::warn!("Event subscriber #{} is lagging, dropping oldest output", id);
                }
            }
        }
        queue.events.push_back(event);
        drop(queue);
        self.notify.notify_one();
    }

    fn pop(&self) -> Option<ProcessEvent> {
        lock(&self.queue).events.pop_front()
    }

    fn close(&self) {
        lock(&self.queue).closed = true;
        self.notify.notify_one();
    }
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: HashMap<u64, Arc<Mailbox>>,
}

impl Drop for HubInner {
    fn drop(&mut self) {
        for mailbox in self.subscribers.values() {
            mailbox.close();
        }
    }
}

/// Fan-out point for process events
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> Subscription {
        let mailbox = Arc::new(Mailbox::default());
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, Arc::clone(&mailbox));
        tracing::debug!("Event subscriber #{} registered", id);

        Subscription {
            id,
            mailbox,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every live subscriber, returns how many received it
    pub fn emit(&self, event: ProcessEvent) -> usize {
        let inner = lock(&self.inner);
        for (id, mailbox) in &inner.subscribers {
            mailbox.push(*id, event.clone());
        }
        inner.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

/// Receiving end of a hub registration
pub struct Subscription {
    id: u64,
    mailbox: Arc<Mailbox>,
    hub: Weak<Mutex<HubInner>>,
}

impl Subscription {
    /// Wait for the next event, `None` once the hub is gone and the queue drained
    pub async fn recv(&mut self) -> Option<ProcessEvent> {
        loop {
            if let Some(event) = self.mailbox.pop() {
                return Some(event);
            }
            if lock(&self.mailbox.queue).closed {
                return None;
            }
            self.mailbox.notify.notified().await;
        }
    }

    /// Take the next queued event without waiting
    pub fn try_recv(&mut self) -> Option<ProcessEvent> {
        self.mailbox.pop()
    }

    /// Explicitly end the subscription (same as dropping it)
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            lock(&inner).subscribers.remove(&self.id);
            tracing::debug!("Event subscriber #{} removed", self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
