use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use super::loader::{load_file, LoadError};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Process-wide dataset cache
// ---------------------------------------------------------------------------

/// One entry per source path. The loader is the only writer; every consumer
/// shares the same `Arc<Dataset>` and treats it as read-only.
static CACHE: Lazy<RwLock<HashMap<PathBuf, Arc<Dataset>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Load a dataset through the cache. The first call for a path reads and
/// parses the source; later calls return the same in-memory table without
/// touching the filesystem, until [`invalidate`] or a process restart.
pub fn load_cached(path: &Path) -> Result<Arc<Dataset>, LoadError> {
    if let Some(ds) = CACHE
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(path)
    {
        return Ok(Arc::clone(ds));
    }

    // Parse outside the lock; a racing duplicate parse is harmless and the
    // second writer simply replaces an identical entry.
    let dataset = Arc::new(load_file(path)?);
    CACHE
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(path.to_path_buf(), Arc::clone(&dataset));
    log::info!(
        "cached dataset {} ({} rows, {} postcodes)",
        path.display(),
        dataset.len(),
        dataset.postcodes.len()
    );
    Ok(dataset)
}

/// Drop the cached table for one path so the next load re-reads the source.
/// Outstanding `Arc` handles stay valid; they just stop being shared with
/// future loads.
pub fn invalidate(path: &Path) {
    CACHE
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .remove(path);
}

/// Drop every cached table.
pub fn invalidate_all() {
    CACHE.write().unwrap_or_else(|e| e.into_inner()).clear();
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn temp_csv(contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    const CSV: &str = "\
date,Model,Price Category,postcode,Value
2023-01-01,Actual,Flat,E2,10.0
";

    #[test]
    fn repeated_loads_share_one_table() {
        let path = temp_csv(CSV);
        let first = load_cached(&path).unwrap();
        let second = load_cached(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        invalidate(&path);
    }

    #[test]
    fn invalidate_forces_a_fresh_read() {
        let path = temp_csv(CSV);
        let first = load_cached(&path).unwrap();
        invalidate(&path);
        let second = load_cached(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), second.len());
        invalidate(&path);
    }

    #[test]
    fn cache_survives_source_deletion_until_invalidated() {
        let path = temp_csv(CSV);
        let loaded = load_cached(&path).unwrap();
        let kept: PathBuf = path.to_path_buf();
        path.close().unwrap();

        // Source is gone but the cached table still answers.
        let cached = load_cached(&kept).unwrap();
        assert!(Arc::ptr_eq(&loaded, &cached));

        invalidate(&kept);
        assert!(load_cached(&kept).is_err());
    }
}
