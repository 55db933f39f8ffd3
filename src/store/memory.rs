use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Cursor;
use std::time::SystemTime;

use crate::store::{Resource, ResourceMetadata, ResourceStore};

/// Serves the resource namespace from an in-process map.
///
/// Models a packaged namespace (everything known at construction) and doubles
/// as the store used throughout the test suite. Entries are immutable once
/// the store is built.
pub struct MemoryStore {
    entries: HashMap<String, Entry>,
}

struct Entry {
    bytes: Vec<u8>,
    metadata: ResourceMetadata,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds a resource under `path` (leading slash, as produced by the
    /// resolver). Consumes and returns self so stores build up fluently.
    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let metadata = ResourceMetadata {
            length: Some(bytes.len() as u64),
            modified: SystemTime::now(),
            etag: content_etag(&bytes),
        };
        self.entries.insert(path.into(), Entry { bytes, metadata });
        self
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore for MemoryStore {
    fn lookup(&self, path: &str) -> Option<Resource> {
        let entry = self.entries.get(path)?;
        Some(Resource {
            reader: Box::new(Cursor::new(entry.bytes.clone())),
            metadata: entry.metadata.clone(),
        })
    }
}

/// Stable per distinct content within one server run.
fn content_etag(bytes: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    format!("\"{:016x}\"", hasher.finish())
}
