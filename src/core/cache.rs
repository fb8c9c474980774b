//! Two-tier cache for stats.nba.com responses
//!
//! - L1: in-memory LRU cache for repeated lookups within a run
//! - L2: JSON files under the project `cache/` directory that survive between runs
//!
//! Values found on disk are promoted into memory on read.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Key usable for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// String form used as the cache file name (without extension)
    fn to_file_key(&self) -> String;

    fn to_file_path(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.json", self.to_file_key()))
    }
}

/// Cache key for one stats.nba.com request: endpoint plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseCacheKey {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl ResponseCacheKey {
    pub fn new(endpoint: &str, params: &[(&str, String)]) -> Self {
        let mut params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        params.sort();
        Self {
            endpoint: endpoint.to_string(),
            params,
        }
    }
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

impl CacheKey for ResponseCacheKey {
    fn to_file_key(&self) -> String {
        let mut key = sanitize(&self.endpoint.to_lowercase());
        for (name, value) in &self.params {
            key.push('_');
            key.push_str(&sanitize(&name.to_lowercase()));
            key.push('-');
            key.push_str(&sanitize(value));
        }
        key
    }
}

/// LRU memory cache backed by optional file system persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: Arc<Mutex<LruCache<K, V>>>,
    memory_capacity: usize,
    disk_root: Option<PathBuf>,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Memory-only cache
    pub fn new(memory_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            memory_capacity: capacity.get(),
            disk_root: None,
        }
    }

    /// Cache that also persists entries as JSON files under `root`
    pub fn with_disk(memory_capacity: usize, root: impl Into<PathBuf>) -> Self {
        let mut cache = Self::new(memory_capacity);
        cache.disk_root = Some(root.into());
        cache
    }

    fn memory(&self) -> MutexGuard<'_, LruCache<K, V>> {
        // A panic while holding the lock leaves the LRU itself consistent.
        self.memory_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get an item from cache (checks memory first, then disk)
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(value) = self.memory().get(key) {
            return Some(value.clone());
        }

        if let Some(value) = self.get_from_disk(key) {
            self.memory().put(key.clone(), value.clone());
            return Some(value);
        }

        None
    }

    /// Put an item into cache (stores in both memory and disk)
    pub fn put(&self, key: K, value: V) {
        if let Err(e) = self.put_to_disk(&key, &value) {
            tracing::warn!(key = %key.to_file_key(), error = %e, "could not persist cache entry");
        }
        self.memory().put(key, value);
    }

    fn get_from_disk(&self, key: &K) -> Option<V> {
        let root = self.disk_root.as_ref()?;
        let content = try_read_to_string(&key.to_file_path(root))?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, value: &V) -> std::io::Result<()> {
        let Some(root) = self.disk_root.as_ref() else {
            return Ok(());
        };
        let content = serde_json::to_string(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&key.to_file_path(root), &content)
    }

    /// Drop an entry from both tiers
    pub fn invalidate(&self, key: &K) -> std::io::Result<()> {
        self.memory().pop(key);
        if let Some(root) = self.disk_root.as_ref() {
            let path = key.to_file_path(root);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    /// (entries in memory, memory capacity)
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.memory().len(), self.memory_capacity)
    }
}
