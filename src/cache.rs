use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::data_models::Connection;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CacheEntry {
    pub timestamp: DateTime<Utc>,
    pub company: String,
    pub search_type: String,
    /// Parsed but unscored candidates; callers re-score per job context.
    pub data: Vec<Connection>,
}

/// Durable search-result cache so repeat company lookups stay off the API quota.
///
/// Expiry is lazy: a stale entry is treated as a miss and stays on disk until
/// the next `set` for its key overwrites it.
pub struct ConnectionCache {
    cache_file: PathBuf,
    ttl: Duration,
    entries: DashMap<String, CacheEntry>,
    // serializes the full-file rewrite done by `set`
    write_lock: Mutex<()>,
}

impl ConnectionCache {
    pub fn new(cache_file: impl Into<PathBuf>, ttl_hours: i64) -> ConnectionCache {
        let cache_file = cache_file.into();
        let entries = Self::load(&cache_file);
        ConnectionCache {
            cache_file,
            ttl: Duration::hours(ttl_hours),
            entries,
            write_lock: Mutex::new(()),
        }
    }

    /// An unreadable or corrupt cache file starts an empty cache, never an error.
    fn load(path: &Path) -> DashMap<String, CacheEntry> {
        if !path.exists() {
            return DashMap::new();
        }
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, CacheEntry>>(&raw) {
                Ok(map) => map.into_iter().collect(),
                Err(e) => {
                    log::warn!(
                        "cache file {} is corrupt, starting empty: {e:#}",
                        path.display()
                    );
                    DashMap::new()
                }
            },
            Err(e) => {
                log::warn!(
                    "could not read cache file {}, starting empty: {e:#}",
                    path.display()
                );
                DashMap::new()
            }
        }
    }

    fn cache_key(company: &str, search_type: &str) -> String {
        let raw_key = format!("{}:{}", company.trim().to_lowercase(), search_type);
        let mut hasher = Sha256::new();
        hasher.update(raw_key.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn get(&self, company: &str, search_type: &str) -> Option<Vec<Connection>> {
        let key = Self::cache_key(company, search_type);
        let entry = self.entries.get(&key)?;
        if Utc::now() - entry.timestamp < self.ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    /// Overwrites the entry and persists the whole store before returning,
    /// so a crash right after `set` cannot lose the entry. Each call rewrites
    /// the full file; fine here since writes are tier-bounded per session.
    pub async fn set(&self, company: &str, search_type: &str, data: Vec<Connection>) -> Result<()> {
        let key = Self::cache_key(company, search_type);
        self.entries.insert(
            key,
            CacheEntry {
                timestamp: Utc::now(),
                company: company.to_string(),
                search_type: search_type.to_string(),
                data,
            },
        );
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let snapshot: BTreeMap<String, CacheEntry> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let raw = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.cache_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating cache dir {}", parent.display()))?;
            }
        }
        fs::write(&self.cache_file, raw)
            .with_context(|| format!("writing cache file {}", self.cache_file.display()))
    }
}

#[test]
fn test_cache_key_normalizes_company() {
    let a = ConnectionCache::cache_key("  Acme Corp  ", "t1");
    let b = ConnectionCache::cache_key("acme corp", "t1");
    let c = ConnectionCache::cache_key("acme corp", "t2");
    assert_eq!(a, b);
    assert_ne!(a, c);
    // sha256 hex digest
    assert_eq!(a.len(), 64);
}
