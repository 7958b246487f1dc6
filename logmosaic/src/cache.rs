//! Fragment cache decorator.
//!
//! Wraps any [`TileSource`] with a directory of PNG files keyed by the
//! full fragment request, so repeated composites over the same area skip
//! the network. File names are deterministic and human-readable, which
//! keeps the cache inspectable and hand-prunable.
//!
//! The cache never fails a fetch: read and write errors are logged and
//! the inner source is used instead, because caching is purely an
//! optimization, not a requirement.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::provider::{FetchError, FragmentRequest, TileSource};

/// Caching decorator around a [`TileSource`].
pub struct CachingSource<S: TileSource> {
    inner: S,
    dir: PathBuf,
}

impl<S: TileSource> CachingSource<S> {
    /// Wraps `inner` with a cache under `dir`, creating the directory if
    /// needed.
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { inner, dir })
    }

    /// The cache directory in use.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn cache_path(&self, request: &FragmentRequest) -> PathBuf {
        let (width, height) = request.size();
        self.dir.join(format!(
            "{:.6}_{:.6}_z{}_{}x{}_{}_x{}.png",
            request.latitude(),
            request.longitude(),
            request.zoom(),
            width,
            height,
            request.style(),
            request.scale(),
        ))
    }
}

impl<S: TileSource> TileSource for CachingSource<S> {
    fn fetch(&self, request: &FragmentRequest) -> Result<RgbaImage, FetchError> {
        let path = self.cache_path(request);

        if path.exists() {
            match image::open(&path) {
                Ok(cached) => {
                    debug!(path = %path.display(), "fragment cache hit");
                    return Ok(cached.to_rgba8());
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "fragment cache read failed");
                }
            }
        }

        let fragment = self.inner.fetch(request)?;
        if let Err(e) = fragment.save(&path) {
            warn!(error = %e, path = %path.display(), "fragment cache write failed");
        }
        Ok(fragment)
    }
}

/// Default fragment cache location under the platform cache directory.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("logmosaic")
}

/// Summary of a cache directory's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cached fragment files.
    pub files: u64,
    /// Total size of cached fragment files in bytes.
    pub bytes: u64,
}

/// Counts cached fragments and their total size.
///
/// A missing directory reads as an empty cache.
pub fn cache_stats(dir: &Path) -> io::Result<CacheStats> {
    let mut stats = CacheStats::default();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(stats),
        Err(e) => return Err(e),
    };

    for entry in entries {
        let entry = entry?;
        let meta = entry.metadata()?;
        if meta.is_file() && entry.path().extension().is_some_and(|ext| ext == "png") {
            stats.files += 1;
            stats.bytes += meta.len();
        }
    }
    Ok(stats)
}

/// Deletes all cached fragment files under `dir`. Returns the number
/// removed; a missing directory removes nothing.
pub fn clear_cache(dir: &Path) -> io::Result<u64> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "png") {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Inner source that counts how often the network would be hit.
    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl TileSource for CountingSource {
        fn fetch(&self, request: &FragmentRequest) -> Result<RgbaImage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (w, h) = request.size();
            Ok(RgbaImage::from_pixel(w, h, Rgba([7, 8, 9, 255])))
        }
    }

    struct FailingSource;

    impl TileSource for FailingSource {
        fn fetch(&self, _request: &FragmentRequest) -> Result<RgbaImage, FetchError> {
            Err(FetchError::Http("unreachable".to_string()))
        }
    }

    fn counting_cache(dir: &Path) -> (CachingSource<CountingSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
        };
        (CachingSource::new(source, dir).unwrap(), calls)
    }

    #[test]
    fn test_repeat_fetch_hits_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let (cache, calls) = counting_cache(tmp.path());
        let request = FragmentRequest::new(59.93778, 30.494908, 10, (16, 16));

        let first = cache.fetch(&request).unwrap();
        let second = cache.fetch(&request).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_file_name_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let (cache, _) = counting_cache(tmp.path());
        let request = FragmentRequest::new(59.93778, 30.494908, 10, (16, 16));

        cache.fetch(&request).unwrap();

        let expected = tmp
            .path()
            .join("59.937780_30.494908_z10_16x16_satellite_x1.png");
        assert!(expected.is_file());
    }

    #[test]
    fn test_distinct_requests_get_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let (cache, calls) = counting_cache(tmp.path());

        cache
            .fetch(&FragmentRequest::new(1.0, 2.0, 3, (16, 16)))
            .unwrap();
        cache
            .fetch(&FragmentRequest::new(1.0, 2.0, 4, (16, 16)))
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache_stats(tmp.path()).unwrap().files, 2);
    }

    #[test]
    fn test_corrupt_cache_entry_degrades_to_fetch() {
        let tmp = tempfile::tempdir().unwrap();
        let (cache, calls) = counting_cache(tmp.path());
        let request = FragmentRequest::new(1.0, 2.0, 3, (16, 16));

        fs::write(
            tmp.path().join("1.000000_2.000000_z3_16x16_satellite_x1.png"),
            b"not a png",
        )
        .unwrap();

        let fragment = cache.fetch(&request).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fragment.get_pixel(0, 0).0, [7, 8, 9, 255]);

        // The rewrite repaired the entry
        cache.fetch(&request).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_inner_error_propagates_and_caches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = CachingSource::new(FailingSource, tmp.path()).unwrap();
        let request = FragmentRequest::new(1.0, 2.0, 3, (16, 16));

        assert!(matches!(cache.fetch(&request), Err(FetchError::Http(_))));
        assert_eq!(cache_stats(tmp.path()).unwrap().files, 0);
    }

    #[test]
    fn test_stats_and_clear() {
        let tmp = tempfile::tempdir().unwrap();
        let (cache, _) = counting_cache(tmp.path());

        cache
            .fetch(&FragmentRequest::new(1.0, 2.0, 3, (16, 16)))
            .unwrap();
        cache
            .fetch(&FragmentRequest::new(5.0, 6.0, 7, (16, 16)))
            .unwrap();

        let stats = cache_stats(tmp.path()).unwrap();
        assert_eq!(stats.files, 2);
        assert!(stats.bytes > 0);

        assert_eq!(clear_cache(tmp.path()).unwrap(), 2);
        assert_eq!(cache_stats(tmp.path()).unwrap(), CacheStats::default());
    }

    #[test]
    fn test_missing_dir_reads_empty() {
        let missing = Path::new("/nonexistent/logmosaic-test-cache");
        assert_eq!(cache_stats(missing).unwrap(), CacheStats::default());
        assert_eq!(clear_cache(missing).unwrap(), 0);
    }

    #[test]
    fn test_new_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("cache");
        let calls = Arc::new(AtomicUsize::new(0));
        let _cache = CachingSource::new(CountingSource { calls }, &dir).unwrap();
        assert!(dir.is_dir());
    }
}
