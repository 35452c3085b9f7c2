//! Serve command implementation.
//!
//! Orchestrates the server lifecycle:
//! - Load and validate configuration
//! - Resolve the served directory
//! - Bind the HTTP server and start the file watcher
//! - Graceful shutdown on Ctrl+C / SIGTERM

use crate::cli::Cli;
use crate::config::{ConfigOverrides, WwwConfig};
use crate::error::{CliError, Result, ResultExt};
use crate::serve::{FileWatcher, WwwServer};
use crate::ui;
use std::path::{Path, PathBuf};

/// Execute the serve command.
///
/// # Errors
///
/// Returns errors for:
/// - Invalid configuration
/// - A served directory that is missing, unreadable or not a directory
/// - Bind failures
/// - File watcher setup failures
pub async fn execute(args: Cli) -> Result<()> {
    let config = WwwConfig::load(&ConfigOverrides::from(&args))?;

    let requested = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let root = resolve_served_root(&requested).await?;

    let server = WwwServer::bind(root.clone(), &config)
        .await
        .with_hint("Pass --port or set WWW_PORT to listen on a different port")?;
    let watcher = FileWatcher::start(root.clone(), server.notifier().clone())?;

    ui::print_banner(&root, &server.url());

    server
        .run(async move {
            shutdown_signal().await;
            ui::info("Shutting down server...");
            drop(watcher);
        })
        .await?;

    ui::success("Bye!");
    Ok(())
}

/// Canonicalize the directory to serve and check that it is one.
pub async fn resolve_served_root(dir: &Path) -> Result<PathBuf> {
    let root = tokio::fs::canonicalize(dir)
        .await
        .map_err(|source| CliError::RootUnavailable {
            path: dir.to_path_buf(),
            source,
        })?;

    let metadata = tokio::fs::metadata(&root)
        .await
        .map_err(|source| CliError::RootUnavailable {
            path: dir.to_path_buf(),
            source,
        })?;

    if !metadata.is_dir() {
        return Err(CliError::NotADirectory(dir.to_path_buf()));
    }

    Ok(root)
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_resolve_served_root_canonicalizes() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("site")).unwrap();

        let dotted = temp.path().join("site/../site/.");
        let root = resolve_served_root(&dotted).await.unwrap();

        assert!(root.is_absolute());
        assert_eq!(root, std::fs::canonicalize(temp.path().join("site")).unwrap());
    }

    #[tokio::test]
    async fn test_resolve_served_root_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let err = resolve_served_root(&missing).await.unwrap_err();
        assert!(matches!(err, CliError::RootUnavailable { ref path, .. } if path == &missing));
        assert!(err.to_string().contains("There was an error attempting to access"));
    }

    #[tokio::test]
    async fn test_resolve_served_root_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("index.html");
        std::fs::write(&file, "<html></html>").unwrap();

        let err = resolve_served_root(&file).await.unwrap_err();
        assert!(matches!(err, CliError::NotADirectory(_)));
    }
}
