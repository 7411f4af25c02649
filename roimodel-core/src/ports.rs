//! Port traits abstracting all I/O away from the engine.

use async_trait::async_trait;
use camino::Utf8Path;

/// Shared string-keyed namespace, e.g. browser local storage or a directory of files.
///
/// Writers are not coordinated: the last write to a key wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Returns whether the key existed.
    fn remove(&self, key: &str) -> anyhow::Result<bool>;
    fn keys(&self) -> anyhow::Result<Vec<String>>;
}

/// Source of the report logo (JPEG bytes).
#[async_trait]
pub trait LogoSource: Send + Sync {
    async fn load_logo(&self) -> anyhow::Result<Vec<u8>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
