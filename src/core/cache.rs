//! Response cache
//!
//! Raw query responses are stored one file per key under the cache
//! directory. A present entry is returned as-is and never refetched, so
//! repeated runs over the same body are reproducible and offline. A fresh
//! response is stored only once it decodes.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::error::{Result, ResultExt};
use crate::core::models::EntityRef;

/// Byte store keyed by query identity
pub trait ByteCache {
    /// Decode the cached bytes for `key`, or run `fetch` and decode its
    /// output. Fetched bytes are stored only when `decode` accepts them, so
    /// neither fetch errors nor undecodable responses are cached.
    fn get_or_fetch<T, F, D>(&self, key: &str, fetch: F, decode: D) -> Result<T>
    where
        F: FnOnce() -> Result<Vec<u8>>,
        D: FnOnce(&[u8]) -> Result<T>;
}

/// Cache keys for the three responses a run needs
pub struct CacheKey;

impl CacheKey {
    /// Entity data of the body itself
    pub fn body(body: EntityRef) -> String {
        format!("{}.json", body.id())
    }

    /// Feature list of the body
    pub fn objects(body: EntityRef) -> String {
        format!("{}_object.json", body.id())
    }

    /// Crater diameters on the body
    pub fn craters(body: EntityRef) -> String {
        format!("{}_crater.json", body.id())
    }
}

/// Directory-backed cache
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a key
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read an entry if present
    pub fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let mut file = File::open(&path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(Some(buffer))
    }

    /// Store an entry (write to temp, then rename)
    pub fn store(&self, key: &str, data: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Remove an entry if present
    pub fn invalidate(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

impl ByteCache for FileCache {
    fn get_or_fetch<T, F, D>(&self, key: &str, fetch: F, decode: D) -> Result<T>
    where
        F: FnOnce() -> Result<Vec<u8>>,
        D: FnOnce(&[u8]) -> Result<T>,
    {
        if let Some(data) = self.load(key).context(format!("reading cache entry {}", key))? {
            debug!(key, bytes = data.len(), "Cache hit");
            return decode(&data)
                .context(format!("cache entry {}", self.entry_path(key).display()));
        }
        info!(key, "Request {}", self.entry_path(key).display());
        let data = fetch()?;
        let value = decode(&data)?;
        self.store(key, &data)
            .context(format!("writing cache entry {}", key))?;
        Ok(value)
    }
}
