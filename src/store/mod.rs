//! Read-only resource namespace
//!
//! The connection handler only ever asks a store one question: "what lives
//! at this path?". The backing (a directory, an in-process map, anything
//! else) is invisible to the HTTP layer.

pub mod dir;
pub mod memory;
pub mod paths;

pub use dir::DirStore;
pub use memory::MemoryStore;
pub use paths::{AliasTable, PathError, PathResolver};

use std::time::SystemTime;

use tokio::io::AsyncRead;

/// What a store knows about a resource without reading its bytes.
#[derive(Debug, Clone)]
pub struct ResourceMetadata {
    /// Total byte length, when determinable upfront
    pub length: Option<u64>,
    /// Last modification time
    pub modified: SystemTime,
    /// Opaque token, stable per distinct content within one server run
    pub etag: String,
}

/// A resolved resource: its metadata plus a byte stream.
pub struct Resource {
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
    pub metadata: ResourceMetadata,
}

/// A read-only resource namespace.
///
/// `path` is the resolver's output (leading slash, traversal-validated,
/// aliases applied). Stores map it onto their backing however they like.
///
/// `lookup` is synchronous and must stay cheap: an open/stat pair at most,
/// never a body read. Keeping it sync keeps the trait object-safe for
/// `Arc<dyn ResourceStore>`; the body itself streams through the async
/// `reader`, so the brief blocking window is bounded by metadata access.
pub trait ResourceStore: Send + Sync {
    fn lookup(&self, path: &str) -> Option<Resource>;
}
