use crate::error::{FeedError, Result};
use crate::loader::{parse_feed, read_feed_bytes, FeedOptions, ProjectionFeed};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// SHA-256 hex digest of the feed contents
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Cheap file metadata checked before hashing
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

#[derive(Debug)]
struct CacheEntry {
    path: PathBuf,
    stamp: FileStamp,
    feed: Arc<ProjectionFeed>,
}

/// Load-once cache for the projection feed
///
/// The parsed and ranked feed is reused until the file's content fingerprint
/// changes or [`FeedCache::invalidate`] is called. Unchanged metadata skips
/// reading the file at all.
#[derive(Debug)]
pub struct FeedCache {
    options: FeedOptions,
    entry: RwLock<Option<CacheEntry>>,
}

impl FeedCache {
    /// Create an empty cache
    pub fn new(options: FeedOptions) -> Self {
        Self { options, entry: RwLock::new(None) }
    }

    /// Return the cached feed for `path`, loading it if the contents changed
    pub async fn get_or_load<P: AsRef<Path>>(&self, path: P) -> Result<Arc<ProjectionFeed>> {
        let path = path.as_ref();
        let stamp = file_stamp(path).await?;

        if let Some(entry) = self.entry.read().as_ref() {
            if entry.path == path && entry.stamp == stamp {
                debug!("Feed metadata unchanged, serving cached feed");
                return Ok(entry.feed.clone());
            }
        }

        let bytes = read_feed_bytes(path).await?;
        let digest = fingerprint(&bytes);

        {
            let mut guard = self.entry.write();
            if let Some(entry) = guard.as_mut() {
                if entry.path == path && entry.feed.fingerprint() == digest {
                    debug!("Feed fingerprint unchanged, serving cached feed");
                    entry.stamp = stamp;
                    return Ok(entry.feed.clone());
                }
            }
        }

        let feed = Arc::new(parse_feed(&bytes, &self.options)?);
        info!("Feed cache (re)loaded from {:?} ({} records)", path, feed.record_count());

        *self.entry.write() =
            Some(CacheEntry { path: path.to_path_buf(), stamp, feed: feed.clone() });
        Ok(feed)
    }

    /// Currently cached feed, if any
    pub fn cached(&self) -> Option<Arc<ProjectionFeed>> {
        self.entry.read().as_ref().map(|entry| entry.feed.clone())
    }

    /// Drop the cached feed so the next access reloads it
    pub fn invalidate(&self) {
        if self.entry.write().take().is_some() {
            info!("Feed cache invalidated");
        }
    }
}

async fn file_stamp(path: &Path) -> Result<FileStamp> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(FileStamp { modified: metadata.modified().ok(), len: metadata.len() }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(FeedError::Missing { path: path.to_path_buf() })
        }
        Err(source) => Err(FeedError::Io { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_V1: &str = "\
league,team,ensemble_projected,projected_pts,p5,p95
L,A,50.0,45.0,40,60
L,B,40.0,45.0,30,50
";

    const FEED_V2: &str = "\
league,team,ensemble_projected,projected_pts,p5,p95
L,A,50.0,45.0,40,60
L,B,40.0,45.0,30,50
L,C,30.0,35.0,20,40
";

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint(b"abc"), fingerprint(b"abc"));
        assert_ne!(fingerprint(b"abc"), fingerprint(b"abd"));
        assert_eq!(fingerprint(b"").len(), 64);
    }

    #[tokio::test]
    async fn test_cache_reuses_unchanged_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, FEED_V1).unwrap();

        let cache = FeedCache::new(FeedOptions::default());
        let first = cache.get_or_load(&path).await.unwrap();
        let second = cache.get_or_load(&path).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_touched_file_with_same_bytes_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, FEED_V1).unwrap();

        let cache = FeedCache::new(FeedOptions::default());
        let first = cache.get_or_load(&path).await.unwrap();

        std::fs::write(&path, FEED_V1).unwrap();
        let later = SystemTime::now() + std::time::Duration::from_secs(60);
        std::fs::File::options().write(true).open(&path).unwrap().set_modified(later).unwrap();

        let second = cache.get_or_load(&path).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // the refreshed stamp now short-circuits before any read
        let third = cache.get_or_load(&path).await.unwrap();
        assert!(Arc::ptr_eq(&first, &third));
    }

    #[tokio::test]
    async fn test_cache_reloads_on_content_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, FEED_V1).unwrap();

        let cache = FeedCache::new(FeedOptions::default());
        let first = cache.get_or_load(&path).await.unwrap();

        std::fs::write(&path, FEED_V2).unwrap();
        let second = cache.get_or_load(&path).await.unwrap();

        assert_ne!(first.fingerprint(), second.fingerprint());
        assert_eq!(second.record_count(), 3);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, FEED_V1).unwrap();

        let cache = FeedCache::new(FeedOptions::default());
        let first = cache.get_or_load(&path).await.unwrap();
        cache.invalidate();
        assert!(cache.cached().is_none());

        let second = cache.get_or_load(&path).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let cache = FeedCache::new(FeedOptions::default());
        let err = cache.get_or_load("/nonexistent/feed.csv").await.unwrap_err();
        assert!(matches!(err, FeedError::Missing { .. }));
    }
}
