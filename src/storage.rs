//! Host platform file-storage seam.
//!
//! The plugin never touches the host's file tables directly; it goes through
//! this narrow trait, which the host adapter implements over its own storage
//! API and tests implement in memory.

use async_trait::async_trait;

use crate::error::Error;

/// A file as the host file storage describes it: original name, opaque
/// content hash, and the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub content_hash: String,
    pub content: Vec<u8>,
}

/// File-storage operations the plugin needs from the host platform.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// All files attached to a file-manager item, including the directory
    /// placeholder entry the host keeps alongside real files.
    async fn list(&self, item_id: i64) -> Result<Vec<StoredFile>, Error>;

    /// Permanently delete one file, addressed by its content hash.
    ///
    /// Only called after the bridge confirmed the corresponding upload.
    async fn delete(&self, item_id: i64, content_hash: &str) -> Result<(), Error>;
}
