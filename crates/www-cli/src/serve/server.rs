//! HTTP server lifecycle: bind, serve, graceful shutdown.

use crate::config::WwwConfig;
use crate::error::{CliError, Result};
use crate::serve::{router, ChangeNotifier, LiveEndpoints, ServerState, SharedNotifier, SharedState};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A bound, not yet running server instance.
///
/// Owns everything that would otherwise be process-wide: the endpoint pair,
/// the notifier with its debounce timer and subscriber set.
pub struct WwwServer {
    listener: TcpListener,
    router: Router,
    state: SharedState,
    local_addr: SocketAddr,
}

impl WwwServer {
    /// Bind the listener for `root` with `config`.
    ///
    /// `root` must be canonical. Port 0 binds an ephemeral port; see
    /// [`local_addr`](Self::local_addr).
    ///
    /// # Errors
    ///
    /// Returns error if the address cannot be bound
    pub async fn bind(root: PathBuf, config: &WwwConfig) -> Result<Self> {
        let notifier: SharedNotifier = Arc::new(ChangeNotifier::default());
        let state = Arc::new(ServerState::new(
            root,
            config,
            LiveEndpoints::generate(),
            notifier,
        ));

        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|e| {
                CliError::Server(format!(
                    "Failed to bind to {}:{}: {}",
                    config.host, config.port, e
                ))
            })?;
        let local_addr = listener.local_addr()?;

        tracing::debug!(addr = %local_addr, "listener bound");

        Ok(Self {
            listener,
            router: router::build_router(Arc::clone(&state)),
            state,
            local_addr,
        })
    }

    /// Address actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// The notifier to feed filesystem events into.
    pub fn notifier(&self) -> &SharedNotifier {
        self.state.notifier()
    }

    /// Browser URL of the served prefix.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.local_addr, self.state.prefix())
    }

    /// Serve until `shutdown` resolves, then shut down gracefully.
    ///
    /// When `shutdown` resolves the notifier is closed, which ends every open
    /// live-update stream; axum then stops accepting and waits for the
    /// remaining in-flight responses.
    ///
    /// # Errors
    ///
    /// Returns error if the accept loop fails
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let notifier = Arc::clone(self.state.notifier());
        let signal = async move {
            shutdown.await;
            notifier.close();
        };

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))
    }
}
