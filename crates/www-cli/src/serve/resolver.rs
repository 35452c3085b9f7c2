//! Mapping of request paths onto files inside the served root.
//!
//! Resolution is lexical: the request path is joined onto the root and
//! cleaned (`.` and `..` collapsed) with `path-clean`, then checked for
//! containment before the filesystem is touched. Symlinks inside the root are
//! followed by the stat calls like any other path.
//!
//! Every failure is reported as a [`ResolveError`] so the caller can log why,
//! but callers must answer all of them with the same not-found response.

use path_clean::PathClean;
use std::fs::Metadata;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// A file proven to lie inside the served root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile(PathBuf);

impl ResolvedFile {
    /// Absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

/// Why a request path did not resolve to a servable file.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The cleaned path lies outside the served root
    #[error("request path escapes the served root: {0}")]
    OutsideRoot(String),

    /// The candidate could not be stat'ed (missing, permission denied, ...)
    #[error("cannot stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The candidate exists but is neither a regular file nor a directory
    /// holding a regular index file
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
}

/// Resolves request paths against one served root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    index_filename: String,
}

impl PathResolver {
    /// Create a resolver.
    ///
    /// `root` must be absolute and already canonical; it is compared
    /// lexically against every candidate.
    pub fn new(root: impl Into<PathBuf>, index_filename: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            index_filename: index_filename.into(),
        }
    }

    /// The served root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The filename tried for directory requests.
    pub fn index_filename(&self) -> &str {
        &self.index_filename
    }

    /// Map a decoded request path onto a filesystem path inside the root.
    ///
    /// Pure path arithmetic; the result may not exist.
    pub fn candidate(&self, request_path: &str) -> Result<PathBuf, ResolveError> {
        let relative = request_path.strip_prefix('/').unwrap_or(request_path);
        let candidate = self.root.join(relative).clean();

        if self.is_within_root(&candidate) {
            Ok(candidate)
        } else {
            Err(ResolveError::OutsideRoot(request_path.to_string()))
        }
    }

    /// Resolve a decoded request path to a regular file.
    ///
    /// A directory resolves to its index file. The index step happens once:
    /// an index entry that is itself a directory does not resolve.
    pub async fn resolve(&self, request_path: &str) -> Result<ResolvedFile, ResolveError> {
        let candidate = self.candidate(request_path)?;
        let metadata = stat(&candidate).await?;

        if metadata.is_file() {
            return Ok(ResolvedFile(candidate));
        }
        if !metadata.is_dir() {
            return Err(ResolveError::NotAFile(candidate));
        }

        let index = candidate.join(&self.index_filename);
        let metadata = stat(&index).await?;
        if metadata.is_file() {
            Ok(ResolvedFile(index))
        } else {
            Err(ResolveError::NotAFile(index))
        }
    }

    fn is_within_root(&self, candidate: &Path) -> bool {
        match candidate.strip_prefix(&self.root) {
            Ok(relative) => !matches!(
                relative.components().next(),
                Some(Component::ParentDir | Component::RootDir | Component::Prefix(_))
            ),
            Err(_) => false,
        }
    }
}

async fn stat(path: &Path) -> Result<Metadata, ResolveError> {
    tokio::fs::metadata(path)
        .await
        .map_err(|source| ResolveError::Stat {
            path: path.to_path_buf(),
            source,
        })
}
