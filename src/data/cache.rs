use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::LoadError;
use super::loader::load_datasets;
use super::model::Datasets;

// ---------------------------------------------------------------------------
// Dataset cache
// ---------------------------------------------------------------------------

/// Owns the two loaded datasets. They are read once and shared as
/// `Arc<Datasets>`; a reload happens only when a file's mtime changes or on
/// an explicit [`DatasetCache::refresh`].
#[derive(Debug)]
pub struct DatasetCache {
    regular_path: PathBuf,
    playoffs_path: PathBuf,
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    datasets: Arc<Datasets>,
    stamps: [Option<SystemTime>; 2],
}

impl DatasetCache {
    pub fn new(regular_path: impl Into<PathBuf>, playoffs_path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            regular_path: regular_path.into(),
            playoffs_path: playoffs_path.into(),
            entry: None,
        }
    }

    pub fn regular_path(&self) -> &Path {
        &self.regular_path
    }

    pub fn playoffs_path(&self) -> &Path {
        &self.playoffs_path
    }

    /// Point the cache at other files. The current data is dropped.
    pub fn set_paths(&mut self, regular_path: PathBuf, playoffs_path: PathBuf) {
        self.regular_path = regular_path;
        self.playoffs_path = playoffs_path;
        self.clear();
    }

    /// Cached datasets, reloading first if a file changed on disk.
    pub fn get(&mut self) -> Result<Arc<Datasets>, LoadError> {
        let stamps = self.stamps();
        if let Some(entry) = &self.entry {
            if entry.stamps == stamps {
                log::debug!("Dataset cache hit");
                return Ok(Arc::clone(&entry.datasets));
            }
            log::info!("Data files changed on disk, reloading");
        }
        self.load(stamps)
    }

    /// Reload unconditionally.
    pub fn refresh(&mut self) -> Result<Arc<Datasets>, LoadError> {
        let stamps = self.stamps();
        self.load(stamps)
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.entry.is_some()
    }

    fn load(&mut self, stamps: [Option<SystemTime>; 2]) -> Result<Arc<Datasets>, LoadError> {
        let datasets = Arc::new(load_datasets(&self.regular_path, &self.playoffs_path)?);
        self.entry = Some(CacheEntry {
            datasets: Arc::clone(&datasets),
            stamps,
        });
        Ok(datasets)
    }

    fn stamps(&self) -> [Option<SystemTime>; 2] {
        let mtime = |p: &Path| std::fs::metadata(p).and_then(|m| m.modified()).ok();
        [mtime(&self.regular_path), mtime(&self.playoffs_path)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::time::Duration;

    fn tmp(name: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("courtview_cache_{}_{name}", std::process::id()));
        std::fs::write(&p, contents).unwrap();
        p
    }

    #[test]
    fn second_get_shares_the_same_data() {
        let r = tmp("r.csv", "Player,PTS\nA,10\n");
        let p = tmp("p.csv", "Player,PTS\nA,12\n");
        let mut cache = DatasetCache::new(&r, &p);
        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn refresh_reloads() {
        let r = tmp("rr.csv", "Player,PTS\nA,10\n");
        let p = tmp("rp.csv", "Player,PTS\nA,12\n");
        let mut cache = DatasetCache::new(&r, &p);
        let first = cache.get().unwrap();
        std::fs::write(&r, "Player,PTS\nA,10\nB,4\n").unwrap();
        let second = cache.refresh().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.regular.len(), 2);
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let p = tmp("only_p.csv", "Player\nA\n");
        let mut cache = DatasetCache::new("/nope/regular.csv", &p);
        assert!(cache.get().is_err());
        assert!(!cache.is_loaded());
    }

    #[test]
    fn changed_mtime_reloads_on_get() {
        let r = tmp("mt_r.csv", "Player,PTS\nA,10\n");
        let p = tmp("mt_p.csv", "Player,PTS\nA,12\n");
        let mut cache = DatasetCache::new(&r, &p);
        let first = cache.get().unwrap();

        std::fs::write(&r, "Player,PTS\nA,10\nB,4\nC,8\n").unwrap();
        let later = SystemTime::now() + Duration::from_secs(60);
        OpenOptions::new()
            .write(true)
            .open(&r)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let second = cache.get().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.regular.len(), 3);
        assert!(Arc::ptr_eq(&second, &cache.get().unwrap()));
    }

    #[test]
    fn same_paths_hit_after_switching_back() {
        let r = tmp("sw_r.csv", "Player,PTS\nA,10\n");
        let p = tmp("sw_p.csv", "Player,PTS\nA,12\n");
        let other = tmp("sw_o.csv", "Player,PTS\nZ,1\n");
        let mut cache = DatasetCache::new(&r, &p);
        let first = cache.get().unwrap();

        cache.set_paths(other.clone(), other);
        assert!(!cache.is_loaded());
        cache.set_paths(r.clone(), p.clone());

        let reloaded = cache.get().unwrap();
        assert_eq!(*reloaded, *first);
        assert!(Arc::ptr_eq(&reloaded, &cache.get().unwrap()));
    }
}
