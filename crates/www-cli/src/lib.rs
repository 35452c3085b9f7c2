//! www - a live-reloading static file server for local development.
//!
//! Serves a directory tree over HTTP and pushes a "changed" event to every
//! open browser tab when something under it changes; an injected script
//! reloads the page.
//!
//! # Architecture
//!
//! - [`serve`] - path resolution, change notification, routing and responses
//! - [`config`] - defaults, `WWW_*` environment variables and flags, merged
//! - [`error`] - error types with actionable messages
//! - [`logger`] - structured logging with tracing
//! - [`ui`] - colored status lines and the startup banner
//! - `commands` - the `serve` command wiring it all together
//!
//! # Example
//!
//! ```rust,no_run
//! use www_cli::config::WwwConfig;
//! use www_cli::serve::{FileWatcher, WwwServer};
//!
//! # async fn run() -> www_cli::Result<()> {
//! let root = std::fs::canonicalize("public")?;
//! let server = WwwServer::bind(root.clone(), &WwwConfig::default()).await?;
//! let _watcher = FileWatcher::start(root, server.notifier().clone())?;
//! println!("serving at {}", server.url());
//! server.run(std::future::pending()).await
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod serve;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
