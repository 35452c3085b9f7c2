//! Live-reloading static file server.
//!
//! The request path goes through [`router`], which hands live-update requests
//! to [`stream`] and everything under the prefix to [`resolver`] and
//! [`responder`]. [`watcher`] feeds filesystem events into the per-instance
//! [`notifier`], which debounces them and fans signals out to open streams.

pub mod endpoints;
pub mod mime;
pub mod notifier;
pub mod resolver;
pub mod responder;
pub mod router;
pub mod server;
pub mod state;
pub mod stream;
pub mod watcher;

pub use endpoints::LiveEndpoints;
pub use notifier::{ChangeNotifier, ChangeSignal, SharedNotifier, Subscription, DEFAULT_DEBOUNCE};
pub use resolver::{PathResolver, ResolveError, ResolvedFile};
pub use server::WwwServer;
pub use state::{ServerState, SharedState};
pub use watcher::FileWatcher;
