//! Request path to filesystem path, with containment.

use std::path::{Path, PathBuf};

use super::ServeError;

/// File served in place of a directory listing when present.
pub const INDEX_FILE: &str = "index.html";

/// What a resolved request turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServedKind {
    /// Stream this regular file. For a directory with an index this is the
    /// index, not the directory.
    File(PathBuf),
    /// List the directory at `canonical_path`.
    Listing,
}

/// A request path that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedPath {
    /// Exactly as it appeared on the request line.
    pub requested_path: String,
    /// Absolute, symlink-free, always inside `root_path`.
    pub canonical_path: PathBuf,
    pub root_path: PathBuf,
    pub kind: ServedKind,
}

/// Maps request paths onto a canonical root directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// `root` must already be canonical; see `ServerConfig::canonical_root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a raw request path.
    ///
    /// Any `..` in the request is refused before the filesystem is touched.
    /// The rest is joined onto the root and canonicalized; a target that does
    /// not exist is `NotFound`, one that lands outside the root (through a
    /// symlink, say) is `Forbidden`. Containment compares whole path
    /// components, so `/srv/wwwEvil` is not inside `/srv/www`.
    pub async fn resolve(&self, request_path: &str) -> Result<ServedPath, ServeError> {
        if request_path.contains("..") {
            return Err(ServeError::Forbidden);
        }

        let relative = request_path.trim_start_matches('/');
        let canonical = tokio::fs::canonicalize(self.root.join(relative))
            .await
            .map_err(|_| ServeError::NotFound)?;

        self.ensure_contained(request_path, &canonical)?;

        let metadata = tokio::fs::metadata(&canonical)
            .await
            .map_err(|_| ServeError::NotFound)?;

        let kind = if metadata.is_dir() {
            // the index may itself be a symlink, so it gets its own check
            match tokio::fs::canonicalize(canonical.join(INDEX_FILE)).await {
                Ok(index) => {
                    self.ensure_contained(request_path, &index)?;
                    match tokio::fs::metadata(&index).await {
                        Ok(meta) if meta.is_file() => ServedKind::File(index),
                        _ => ServedKind::Listing,
                    }
                }
                Err(_) => ServedKind::Listing,
            }
        } else if metadata.is_file() {
            ServedKind::File(canonical.clone())
        } else {
            // sockets, fifos, devices
            return Err(ServeError::NotFound);
        };

        Ok(ServedPath {
            requested_path: request_path.to_string(),
            canonical_path: canonical,
            root_path: self.root.clone(),
            kind,
        })
    }

    fn ensure_contained(&self, request_path: &str, canonical: &Path) -> Result<(), ServeError> {
        if canonical.starts_with(&self.root) {
            return Ok(());
        }
        tracing::warn!(
            path = %request_path,
            resolved = %canonical.display(),
            "Resolved path escapes root"
        );
        Err(ServeError::Forbidden)
    }
}
