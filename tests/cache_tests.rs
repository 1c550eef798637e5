use anyhow::Result;

use refnet::cache::ConnectionCache;
use refnet::data_models::Connection;

mod test_helpers {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEST_CACHE_COUNTER: AtomicUsize = AtomicUsize::new(0);

    pub fn unique_cache_path(name: &str) -> PathBuf {
        let count = TEST_CACHE_COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis();
        std::env::temp_dir().join(format!("refnet_cache_{name}_{timestamp}_{count}.json"))
    }

    pub fn connection(slug: &str) -> Connection {
        Connection::new(
            "Test Person".into(),
            "Engineer".into(),
            "Acme".into(),
            format!("https://linkedin.com/in/{slug}"),
            "snippet".into(),
            "Primary Alumni".into(),
            1,
            50,
        )
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_entries_survive_a_new_instance() -> Result<()> {
    let path = unique_cache_path("persist");

    let cache = ConnectionCache::new(&path, 24);
    cache
        .set("Acme", "tier1_query", vec![connection("alice")])
        .await?;
    drop(cache);

    let reopened = ConnectionCache::new(&path, 24);
    let data = reopened.get("Acme", "tier1_query").unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].profile_link, "https://linkedin.com/in/alice");
    Ok(())
}

#[tokio::test]
async fn test_company_key_is_normalized() -> Result<()> {
    let path = unique_cache_path("normalize");
    let cache = ConnectionCache::new(&path, 24);

    cache
        .set("  Acme Corp  ", "tier1_query", vec![connection("alice")])
        .await?;
    assert!(cache.get("acme corp", "tier1_query").is_some());
    assert!(cache.get("acme corp", "tier2_query").is_none());
    Ok(())
}

#[tokio::test]
async fn test_expired_entry_behaves_as_missing() -> Result<()> {
    let path = unique_cache_path("expired");

    // zero TTL: freshly written entries are already stale for readers
    let cache = ConnectionCache::new(&path, 0);
    cache
        .set("Acme", "tier1_query", vec![connection("alice")])
        .await?;
    assert!(cache.get("Acme", "tier1_query").is_none());

    // the stale entry is still on disk, a longer TTL can serve it
    let reopened = ConnectionCache::new(&path, 24);
    assert!(reopened.get("Acme", "tier1_query").is_some());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_starts_empty() -> Result<()> {
    let path = unique_cache_path("corrupt");
    std::fs::write(&path, "definitely { not json")?;

    let cache = ConnectionCache::new(&path, 24);
    assert!(cache.get("Acme", "tier1_query").is_none());

    // and the cache is usable again after the next write
    cache
        .set("Acme", "tier1_query", vec![connection("bob")])
        .await?;
    assert!(cache.get("Acme", "tier1_query").is_some());
    Ok(())
}

#[tokio::test]
async fn test_set_overwrites_previous_entry() -> Result<()> {
    let path = unique_cache_path("overwrite");
    let cache = ConnectionCache::new(&path, 24);

    cache
        .set("Acme", "tier1_query", vec![connection("alice")])
        .await?;
    cache
        .set("Acme", "tier1_query", vec![connection("bob"), connection("carol")])
        .await?;

    let data = cache.get("Acme", "tier1_query").unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].profile_link, "https://linkedin.com/in/bob");
    Ok(())
}

#[tokio::test]
async fn test_missing_parent_directory_is_created() -> Result<()> {
    let dir = unique_cache_path("nested_dir");
    let path = dir.join("deep").join("cache.json");

    let cache = ConnectionCache::new(&path, 24);
    cache
        .set("Acme", "tier1_query", vec![connection("alice")])
        .await?;
    assert!(path.exists());
    Ok(())
}
