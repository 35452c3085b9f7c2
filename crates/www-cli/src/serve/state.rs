//! Per-instance server state shared by all request handlers.

use crate::config::WwwConfig;
use crate::serve::{LiveEndpoints, PathResolver, SharedNotifier};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a request handler needs, scoped to one server instance.
pub struct ServerState {
    resolver: PathResolver,
    prefix: String,
    endpoints: LiveEndpoints,
    notifier: SharedNotifier,
}

impl ServerState {
    /// Create server state.
    ///
    /// # Arguments
    ///
    /// * `root` - Canonical directory to serve
    /// * `config` - Validated configuration (normalized prefix, index filename)
    /// * `endpoints` - Reserved live-reload paths for this instance
    /// * `notifier` - Change notifier the stream endpoint subscribes to
    pub fn new(
        root: PathBuf,
        config: &WwwConfig,
        endpoints: LiveEndpoints,
        notifier: SharedNotifier,
    ) -> Self {
        Self {
            resolver: PathResolver::new(root, config.index_filename.clone()),
            prefix: config.prefix.clone(),
            endpoints,
            notifier,
        }
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn endpoints(&self) -> &LiveEndpoints {
        &self.endpoints
    }

    pub fn notifier(&self) -> &SharedNotifier {
        &self.notifier
    }
}

/// Shared state handle for passing around the application.
pub type SharedState = Arc<ServerState>;
