//! Recursive file system watcher feeding the change notifier.
//!
//! `notify` calls back on its own thread; events are handed over a bounded
//! channel to a tokio task that records them on the [`ChangeNotifier`]. The
//! notifier does the debouncing, so the callback never blocks: if the channel
//! is full, a burst is already queued and the event can be dropped.
//!
//! [`ChangeNotifier`]: crate::serve::ChangeNotifier

use crate::error::{CliError, Result};
use crate::serve::SharedNotifier;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Capacity of the callback → runtime hand-off channel.
const EVENT_BUFFER: usize = 100;

/// Watches the served root for as long as it is alive.
///
/// Dropping the watcher stops both the OS watch and the forwarding task, so
/// no event is acted on after shutdown.
pub struct FileWatcher {
    /// Underlying notify watcher
    _watcher: RecommendedWatcher,
    /// Root directory being watched
    root: PathBuf,
    forwarder: JoinHandle<()>,
}

impl FileWatcher {
    /// Start watching `root` recursively.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns error if the root does not exist or the OS watch cannot be set up
    pub fn start(root: PathBuf, notifier: SharedNotifier) -> Result<Self> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, mut rx) = mpsc::channel::<Event>(EVENT_BUFFER);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) if is_change(&event) => {
                    // A full buffer means a burst is already pending
                    let _ = tx.try_send(event);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        let forwarder = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                tracing::debug!(kind = ?event.kind, paths = ?event.paths, "raw filesystem event");
                notifier.record_event();
            }
        });

        tracing::debug!(root = %root.display(), "watching for changes");

        Ok(Self {
            _watcher: watcher,
            root,
            forwarder,
        })
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}

/// Whether a raw event counts as a change.
///
/// Access events (open, read, close without write) are produced by serving
/// files and would otherwise reload pages in a loop.
fn is_change(event: &Event) -> bool {
    !matches!(event.kind, EventKind::Access(_))
}
