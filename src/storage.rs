//! Saved packing lists on top of a string key-value capability

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::debug;

use crate::PackwiseError;
use crate::cache::PersistentCache;
use crate::models::PackingList;

const LIST_KEY_PREFIX: &str = "packing-list:";
const MAX_LIST_KEY_LEN: usize = 64;

/// Minimal string key-value store
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn set(&self, key: &str, value: String) -> Result<()>;
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

#[async_trait]
impl ListStore for PersistentCache {
    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.put_permanent(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        PersistentCache::get::<String>(self, key).await
    }
}

/// In-process store, used when no data directory is available and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStore for MemoryStore {
    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .read()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?
            .get(key)
            .cloned())
    }
}

/// Check that `key` can name a saved list and be addressed as one URL path
/// segment: 1 to 64 ASCII letters, digits, `-`, `_` or `.`.
pub fn validate_list_key(key: &str) -> crate::Result<()> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if key.is_empty() || key.len() > MAX_LIST_KEY_LEN || !key.chars().all(allowed) {
        return Err(PackwiseError::validation(format!(
            "List key '{key}' must be 1-{MAX_LIST_KEY_LEN} letters, digits, '-', '_' or '.'"
        )));
    }
    Ok(())
}

fn list_key(key: &str) -> String {
    format!("{LIST_KEY_PREFIX}{key}")
}

/// Serialize a list as JSON under a caller-chosen key
pub async fn save_list(store: &dyn ListStore, key: &str, list: &PackingList) -> Result<()> {
    let json = serde_json::to_string(list).context("Failed to serialize packing list")?;
    store.set(&list_key(key), json).await?;
    debug!(key, "Saved packing list");
    Ok(())
}

/// Load a previously saved list; `None` when nothing is stored under `key`
pub async fn load_list(store: &dyn ListStore, key: &str) -> Result<Option<PackingList>> {
    let Some(json) = store.get(&list_key(key)).await? else {
        return Ok(None);
    };

    let list = serde_json::from_str(&json)
        .with_context(|| format!("Stored packing list '{key}' is not valid JSON"))?;
    Ok(Some(list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TravelerType, TripRequest};
    use crate::packing;
    use rstest::rstest;
    use tempfile::TempDir;

    fn sample_list() -> PackingList {
        packing::generate(&TripRequest::new("Cancun", 6, TravelerType::Couple)).unwrap()
    }

    #[rstest]
    #[case("cancun", true)]
    #[case("trip-2025_v1.json", true)]
    #[case("", false)]
    #[case("a/b", false)]
    #[case("has space", false)]
    #[case("caf\u{e9}", false)]
    fn test_list_key_validation(#[case] key: &str, #[case] valid: bool) {
        assert_eq!(validate_list_key(key).is_ok(), valid);
    }

    #[test]
    fn test_overlong_list_key() {
        assert!(validate_list_key(&"k".repeat(64)).is_ok());
        assert!(validate_list_key(&"k".repeat(65)).is_err());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let mut list = sample_list();
        list.toggle("Beach Essentials", "Beach towel");

        save_list(&store, "cancun", &list).await.unwrap();
        let loaded = load_list(&store, "cancun").await.unwrap().unwrap();
        assert_eq!(loaded, list);
    }

    #[tokio::test]
    async fn test_missing_list() {
        let store = MemoryStore::new();
        assert!(load_list(&store, "nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_list_is_an_error() {
        let store = MemoryStore::new();
        store.set("packing-list:broken", "{not json".to_string()).await.unwrap();
        assert!(load_list(&store, "broken").await.is_err());
    }

    #[tokio::test]
    async fn test_persistent_cache_as_list_store() {
        let dir = TempDir::new().unwrap();
        let cache = PersistentCache::open(dir.path()).unwrap();
        let list = sample_list();

        save_list(&cache, "trip", &list).await.unwrap();
        assert_eq!(load_list(&cache, "trip").await.unwrap(), Some(list));
    }
}
