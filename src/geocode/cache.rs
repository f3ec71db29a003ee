use crate::error::{ProcessingError, Result};
use crate::models::PlaceKey;
use crate::utils::constants::{CACHE_COL_PLACE, COL_LATITUDE, COL_LONGITUDE};
use crate::utils::coordinates::parse_coordinate_pair;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// One cache slot: resolved coordinates, or a tombstone recording that a
/// lookup was attempted and yielded nothing usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheEntry {
    Found { latitude: f64, longitude: f64 },
    NotFound,
}

impl CacheEntry {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self {
            CacheEntry::Found {
                latitude,
                longitude,
            } => Some((*latitude, *longitude)),
            CacheEntry::NotFound => None,
        }
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, CacheEntry::NotFound)
    }
}

/// Persistent PlaceKey → coordinates store backed by a small CSV file
/// (`place,Latitude,Longitude`; tombstones have empty coordinate fields).
///
/// The file is loaded fully before any resolution pass; `save` rewrites it,
/// so the most recent write per key wins.
#[derive(Debug, Default)]
pub struct GeocodeCache {
    entries: HashMap<PlaceKey, CacheEntry>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cache file. A missing file is a normal first run and yields
    /// an empty cache; an unreadable or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| ProcessingError::CacheIo(format!("{}: {e}", path.display())))?;

        let mut entries = HashMap::new();
        for row_result in reader.records() {
            let row = row_result
                .map_err(|e| ProcessingError::CacheIo(format!("{}: {e}", path.display())))?;

            let Some(key) = row.get(0).and_then(PlaceKey::from_raw) else {
                continue;
            };

            // Unparseable coordinates are treated as an attempted lookup
            // with no result, the same as an explicit tombstone row.
            let entry = match parse_coordinate_pair(row.get(1).unwrap_or(""), row.get(2).unwrap_or(""))
            {
                Some((latitude, longitude)) => CacheEntry::Found {
                    latitude,
                    longitude,
                },
                None => CacheEntry::NotFound,
            };

            // Last write wins on duplicate keys
            entries.insert(key, entry);
        }

        Ok(Self { entries })
    }

    /// Load the cache, degrading to an empty in-memory cache with a logged
    /// warning when the file is unreadable. Resolution still proceeds; the
    /// degraded cache simply starts cold.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cache) => cache,
            Err(e) => {
                warn!("geocode cache unusable, starting empty: {e}");
                Self::new()
            }
        }
    }

    pub fn get(&self, key: &PlaceKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &PlaceKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: PlaceKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    /// Drop tombstones for the given keys so an explicit re-resolution pass
    /// can retry them. Entries with coordinates are untouched.
    pub fn clear_tombstones_for(&mut self, keys: &[PlaceKey]) -> usize {
        let mut cleared = 0;
        for key in keys {
            if self.entries.get(key).is_some_and(CacheEntry::is_tombstone) {
                self.entries.remove(key);
                cleared += 1;
            }
        }
        cleared
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tombstone_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_tombstone()).count()
    }

    /// Rewrite the cache file. Rows are sorted by key so successive saves of
    /// the same cache produce identical files.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| ProcessingError::CacheIo(format!("{}: {e}", path.display())))?;

        writer
            .write_record([CACHE_COL_PLACE, COL_LATITUDE, COL_LONGITUDE])
            .map_err(|e| ProcessingError::CacheIo(e.to_string()))?;

        let mut keys: Vec<&PlaceKey> = self.entries.keys().collect();
        keys.sort_by_key(|k| k.as_str());

        for key in keys {
            let row = match self.entries[key] {
                CacheEntry::Found {
                    latitude,
                    longitude,
                } => [key.as_str().to_string(), latitude.to_string(), longitude.to_string()],
                CacheEntry::NotFound => [key.as_str().to_string(), String::new(), String::new()],
            };
            writer
                .write_record(&row)
                .map_err(|e| ProcessingError::CacheIo(e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| ProcessingError::CacheIo(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(raw: &str) -> PlaceKey {
        PlaceKey::from_raw(raw).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_cache() {
        let dir = TempDir::new().unwrap();
        let cache = GeocodeCache::load(&dir.path().join("nope.csv")).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.csv");

        let mut cache = GeocodeCache::new();
        cache.insert(
            key("Accra, Ghana"),
            CacheEntry::Found {
                latitude: 5.6037,
                longitude: -0.1870,
            },
        );
        cache.insert(key("Nowhere, Nowhereland"), CacheEntry::NotFound);
        cache.save(&path).unwrap();

        let loaded = GeocodeCache::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get(&key("Accra, Ghana")).unwrap().coordinates(),
            Some((5.6037, -0.1870))
        );
        assert!(loaded.get(&key("Nowhere, Nowhereland")).unwrap().is_tombstone());
    }

    #[test]
    fn test_last_write_wins() {
        let mut cache = GeocodeCache::new();
        cache.insert(key("Accra, Ghana"), CacheEntry::NotFound);
        cache.insert(
            key("Accra, Ghana"),
            CacheEntry::Found {
                latitude: 5.6,
                longitude: -0.2,
            },
        );

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(&key("Accra, Ghana")).unwrap().coordinates(),
            Some((5.6, -0.2))
        );
    }

    #[test]
    fn test_clear_tombstones_for() {
        let mut cache = GeocodeCache::new();
        cache.insert(key("Nowhere, Nowhereland"), CacheEntry::NotFound);
        cache.insert(
            key("Accra, Ghana"),
            CacheEntry::Found {
                latitude: 5.6,
                longitude: -0.2,
            },
        );

        let cleared = cache.clear_tombstones_for(&[key("Nowhere, Nowhereland"), key("Accra, Ghana")]);
        assert_eq!(cleared, 1);
        assert!(!cache.contains(&key("Nowhere, Nowhereland")));
        assert!(cache.contains(&key("Accra, Ghana")));
    }

    #[test]
    fn test_unreadable_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.csv");
        std::fs::write(&path, b"\xff\xfe not a csv file \xff").unwrap();

        let cache = GeocodeCache::load_or_empty(&path);
        assert!(cache.is_empty());
    }
}
