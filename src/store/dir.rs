use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::{Resource, ResourceMetadata, ResourceStore};

/// Serves the resource namespace from a directory on disk.
///
/// Lookup keys have already been traversal-validated by the resolver, so a
/// plain join under the root is safe.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        // Canonical form makes the containment check below a prefix test.
        let root = root.canonicalize().unwrap_or(root);
        Self { root }
    }
}

impl ResourceStore for DirStore {
    fn lookup(&self, path: &str) -> Option<Resource> {
        let full = self.root.join(path.trim_start_matches('/'));

        // Depth validation ran upstream, but a ".." that never drove the
        // counter negative can still survive in the key. Whatever it
        // resolves to must stay under the root.
        let full = match full.canonicalize() {
            Ok(p) => p,
            Err(_) => return None,
        };
        if !full.starts_with(&self.root) {
            tracing::warn!(path = %full.display(), "Lookup outside served root refused");
            return None;
        }

        let file = match std::fs::File::open(&full) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %full.display(), error = %e, "Resource open failed");
                return None;
            }
        };

        let meta = match file.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %full.display(), error = %e, "Resource stat failed");
                return None;
            }
        };
        if !meta.is_file() {
            return None;
        }

        let modified = meta.modified().unwrap_or(UNIX_EPOCH);
        let etag = file_etag(meta.len(), modified);

        Some(Resource {
            reader: Box::new(tokio::fs::File::from_std(file)),
            metadata: ResourceMetadata {
                length: Some(meta.len()),
                modified,
                etag,
            },
        })
    }
}

/// Length and mtime pin down a file's content well enough for a per-run
/// validator; responses mark everything stale between runs anyway.
fn file_etag(len: u64, modified: SystemTime) -> String {
    let secs = modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("\"{:x}-{:x}\"", secs, len)
}
