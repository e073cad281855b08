//! Static file serving module
//!
//! Rewrites a request path into a location under the root directory and
//! reads it, reporting every failure as an explicit [`ReadOutcome`].

use crate::config::RoutesConfig;
use crate::logger;
use hyper::body::Bytes;
use hyper::StatusCode;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A request path after the rewrite rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Rewritten pathname, always starting with `/`
    pub pathname: String,
    /// `root` and `pathname` concatenated verbatim
    pub file: PathBuf,
}

/// Result of reading a resolved path
#[derive(Debug)]
pub enum ReadOutcome {
    Found(Bytes),
    NotFound,
    /// Permission denied, or the path escapes the root
    Forbidden,
    /// The path names a directory
    NotAFile,
    Failed(io::Error),
}

impl ReadOutcome {
    /// Status the handler answers with
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Found(_) => StatusCode::OK,
            Self::NotFound | Self::NotAFile => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Map a request pathname onto the filesystem
///
/// `/` becomes the index document, a dist asset gets the dist prefix, and
/// the result is appended to `root` without any normalisation.
pub fn resolve_path(request_path: &str, root: &Path, routes: &RoutesConfig) -> ResolvedPath {
    let mut pathname = if request_path.is_empty() || request_path == "/" {
        routes.index_document.clone()
    } else {
        request_path.to_string()
    };

    // Runs after the index rewrite, so an index document listed as a dist
    // asset moves under the prefix as well
    if routes.dist_assets.iter().any(|asset| *asset == pathname) {
        pathname = format!("{}{pathname}", routes.dist_prefix);
    }

    let mut file = OsString::from(root.as_os_str());
    file.push(&pathname);

    ResolvedPath {
        pathname,
        file: PathBuf::from(file),
    }
}

/// True when the `..` segments of `pathname` climb above the root
///
/// Purely lexical: symlinks inside the root may point anywhere.
pub fn escapes_root(pathname: &str) -> bool {
    let mut depth = 0usize;
    for segment in pathname.split('/') {
        match segment {
            "" | "." => {}
            ".." => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return true,
            },
            _ => depth += 1,
        }
    }
    false
}

/// Read the whole file behind `resolved`
///
/// With `confine` set, a pathname that climbs above the root is refused
/// without touching the filesystem.
pub async fn read_resolved(resolved: &ResolvedPath, confine: bool) -> ReadOutcome {
    if confine && escapes_root(&resolved.pathname) {
        logger::log_warning(&format!(
            "Path escapes root, refusing to serve: {}",
            resolved.pathname
        ));
        return ReadOutcome::Forbidden;
    }

    match fs::read(&resolved.file).await {
        Ok(content) => ReadOutcome::Found(Bytes::from(content)),
        Err(e) => classify_error(&resolved.file, e).await,
    }
}

async fn classify_error(file: &Path, error: io::Error) -> ReadOutcome {
    match error.kind() {
        // A file used as a directory (`/index.html/`) or an overlong name
        // is a missing file from the client's point of view
        io::ErrorKind::NotFound
        | io::ErrorKind::NotADirectory
        | io::ErrorKind::InvalidFilename => ReadOutcome::NotFound,
        io::ErrorKind::PermissionDenied => ReadOutcome::Forbidden,
        _ => {
            if fs::metadata(file).await.is_ok_and(|m| m.is_dir()) {
                ReadOutcome::NotAFile
            } else {
                ReadOutcome::Failed(error)
            }
        }
    }
}
