//! Default in-memory and filesystem-backed port implementations.

use crate::ports::{KeyValueStore, LogoSource, WritePort};
use anyhow::Context;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::debug;

/// In-memory key-value store for embedding and testing.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> anyhow::Result<T> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory store lock poisoned"))?;
        Ok(f(&mut guard))
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.with_entries(|m| m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.with_entries(|m| {
            m.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> anyhow::Result<bool> {
        self.with_entries(|m| m.remove(key).is_some())
    }

    fn keys(&self) -> anyhow::Result<Vec<String>> {
        self.with_entries(|m| m.keys().cloned().collect())
    }
}

// Keys become file names; anything outside this set is percent-encoded.
const FILE_NAME_SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');
const ENTRY_EXTENSION: &str = "json";

/// One file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FsKvStore {
    dir: Utf8PathBuf,
}

impl FsKvStore {
    pub fn new(dir: Utf8PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Utf8PathBuf {
        let encoded = utf8_percent_encode(key, FILE_NAME_SAFE).to_string();
        self.dir.join(format!("{encoded}.{ENTRY_EXTENSION}"))
    }
}

impl KeyValueStore for FsKvStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("read {}", path))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| format!("create {}", self.dir))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("write {}", tmp))?;
        fs::rename(&tmp, &path).with_context(|| format!("rename {} -> {}", tmp, path))?;
        debug!(key, path = %path, "stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<bool> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).with_context(|| format!("remove {}", path))?;
        Ok(true)
    }

    fn keys(&self) -> anyhow::Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir).with_context(|| format!("read_dir {}", self.dir))? {
            let entry = entry.with_context(|| format!("read_dir {}", self.dir))?;
            let name = entry.file_name();
            let Some(stem) = name
                .to_str()
                .and_then(|n| n.strip_suffix(&format!(".{ENTRY_EXTENSION}")))
            else {
                continue;
            };
            let key = percent_decode_str(stem)
                .decode_utf8()
                .with_context(|| format!("decode key from {}", stem))?;
            keys.push(key.into_owned());
        }
        keys.sort();
        Ok(keys)
    }
}

/// Reads the logo from a file without blocking the runtime.
#[derive(Debug, Clone)]
pub struct FsLogoSource {
    pub path: Utf8PathBuf,
}

impl FsLogoSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl LogoSource for FsLogoSource {
    async fn load_logo(&self) -> anyhow::Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("read logo {}", self.path))
    }
}

/// Logo bytes held in memory.
#[derive(Debug, Clone)]
pub struct StaticLogoSource {
    bytes: Vec<u8>,
}

impl StaticLogoSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl LogoSource for StaticLogoSource {
    async fn load_logo(&self) -> anyhow::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
