//! Debounced change notifications with a subscriber registry.
//!
//! Raw filesystem events go into [`ChangeNotifier::record_event`]. Each call
//! cancels the pending debounce timer and starts a new one; when a timer runs
//! out without being replaced, one [`ChangeSignal`] goes to every subscriber
//! registered at that moment.
//!
//! Subscribers are tracked by id in a `parking_lot::RwLock<HashMap<..>>`.
//! Publishing holds the read lock, registration and removal take the write
//! lock, so a subscriber is either fully registered and receives the signal,
//! or already gone and does not.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Debounce window between the last raw event and the published signal.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Per-subscriber channel capacity. A subscriber whose buffer is full already
/// has a reload pending, so further signals would change nothing.
const SUBSCRIBER_BUFFER: usize = 8;

/// "Something under the served root changed." Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSignal;

/// Registered subscriber senders by id.
type SubscriberRegistry = HashMap<u64, mpsc::Sender<ChangeSignal>>;

struct Registry {
    subscribers: SubscriberRegistry,
    closed: bool,
}

/// Debouncer plus broadcaster, one per server instance.
pub struct ChangeNotifier {
    registry: RwLock<Registry>,
    next_id: AtomicU64,
    /// The single pending debounce timer.
    pending: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

/// Shared notifier handle.
pub type SharedNotifier = Arc<ChangeNotifier>;

impl ChangeNotifier {
    /// Create a notifier with the given debounce window.
    pub fn new(debounce: Duration) -> Self {
        Self {
            registry: RwLock::new(Registry {
                subscribers: HashMap::new(),
                closed: false,
            }),
            next_id: AtomicU64::new(0),
            pending: Mutex::new(None),
            debounce,
        }
    }

    /// The debounce window.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Register a new subscriber.
    ///
    /// After [`close`](Self::close) the returned subscription is already
    /// finished: its first `recv` yields `None`.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);

        {
            let mut registry = self.registry.write();
            if !registry.closed {
                registry.subscribers.insert(id, tx);
            }
        }

        Subscription {
            id,
            receiver: rx,
            notifier: Arc::downgrade(self),
        }
    }

    /// Remove a subscriber. Returns whether it was still registered.
    fn unsubscribe(&self, id: u64) -> bool {
        self.registry.write().subscribers.remove(&id).is_some()
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.read().subscribers.len()
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.registry.read().closed
    }

    /// Record one raw filesystem event.
    ///
    /// Cancels the pending timer, if any, and schedules a publish after the
    /// debounce window. Must be called from within a tokio runtime.
    pub fn record_event(self: &Arc<Self>) {
        let mut pending = self.pending.lock();
        if let Some(timer) = pending.take() {
            timer.abort();
        }
        if self.is_closed() {
            return;
        }

        let notifier = Arc::downgrade(self);
        let deadline = Instant::now() + self.debounce;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(notifier) = notifier.upgrade() {
                tracing::info!("Filesystem change detected. Notifying observers");
                notifier.publish();
            }
        }));
    }

    /// Deliver one signal to every registered subscriber right away.
    ///
    /// Returns how many subscribers accepted it.
    pub fn publish(&self) -> usize {
        let registry = self.registry.read();
        let mut delivered = 0;

        for (id, tx) in &registry.subscribers {
            match tx.try_send(ChangeSignal) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(client = id, "client already has a pending change signal");
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(client = id, "client went away before delivery");
                }
            }
        }

        delivered
    }

    /// Shut the notifier down.
    ///
    /// Cancels the pending timer and drops every subscriber sender, which
    /// ends all open subscriptions. Later subscriptions end immediately.
    pub fn close(&self) {
        {
            let mut registry = self.registry.write();
            registry.closed = true;
            registry.subscribers.clear();
        }
        if let Some(timer) = self.pending.lock().take() {
            timer.abort();
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// One connected client waiting for change signals.
///
/// Dropping it removes the registration; that is the only removal path for a
/// live notifier, so it happens exactly once.
pub struct Subscription {
    id: u64,
    receiver: mpsc::Receiver<ChangeSignal>,
    notifier: Weak<ChangeNotifier>,
}

impl Subscription {
    /// Subscriber id, for logging.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wait for the next signal. `None` once the notifier is closed.
    pub async fn recv(&mut self) -> Option<ChangeSignal> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(notifier) = self.notifier.upgrade() {
            notifier.unsubscribe(self.id);
        }
        tracing::info!(client = self.id, "Client disconnected from watcher");
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
