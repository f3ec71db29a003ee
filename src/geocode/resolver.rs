use crate::error::Result;
use crate::geocode::cache::{CacheEntry, GeocodeCache};
use crate::models::{CompanyRecord, PlaceKey};
use crate::utils::constants::DEFAULT_RATE_LIMIT_MS;
use crate::utils::coordinates::{in_latitude_range, in_longitude_range};
use crate::utils::progress::ProgressReporter;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// External lookup capability consumed by the resolver. Implementations are
/// expected to honor the upstream service's usage policy; the resolver treats
/// any error as an empty result.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup(&self, place: &str) -> Result<Option<(f64, f64)>>;
}

#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    pub records_missing_coordinates: usize,
    pub unique_places: usize,
    pub cache_hits: usize,
    pub lookups_issued: usize,
    pub lookups_failed: usize,
    pub records_resolved: usize,
    pub tombstones_cleared: usize,
}

impl ResolutionReport {
    pub fn generate_summary(&self) -> String {
        format!(
            "Resolution pass: {} records without coordinates across {} places\n\
             \x20 {} cache hits, {} lookups issued ({} failed), {} tombstones cleared\n\
             \x20 {} records now have coordinates",
            self.records_missing_coordinates,
            self.unique_places,
            self.cache_hits,
            self.lookups_issued,
            self.lookups_failed,
            self.tombstones_cleared,
            self.records_resolved,
        )
    }
}

/// Fills missing record coordinates from the cache, falling back to one
/// rate-limited external lookup per distinct PlaceKey.
///
/// A cache hit, tombstone included, always short-circuits the external call,
/// so a key is looked up at most once over the cache's lifetime unless the
/// caller explicitly asks for tombstones to be retried.
pub struct GeocodeResolver<G: Geocoder> {
    geocoder: G,
    min_request_interval: Duration,
    retry_tombstones: bool,
}

impl<G: Geocoder> GeocodeResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            min_request_interval: Duration::from_millis(DEFAULT_RATE_LIMIT_MS),
            retry_tombstones: false,
        }
    }

    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    pub fn with_retry_tombstones(mut self, retry_tombstones: bool) -> Self {
        self.retry_tombstones = retry_tombstones;
        self
    }

    /// Run one resolution pass over the record set.
    ///
    /// The pass holds `&mut` access to both records and cache, so no two
    /// passes can interleave writes on the same key.
    pub async fn resolve(
        &self,
        records: &mut [CompanyRecord],
        cache: &mut GeocodeCache,
        progress: Option<&ProgressReporter>,
    ) -> Result<ResolutionReport> {
        let mut report = ResolutionReport::default();

        // Group unresolved records by PlaceKey, preserving first-seen order
        // so lookups happen in dataset order.
        let mut pending: Vec<PlaceKey> = Vec::new();
        let mut members: HashMap<PlaceKey, Vec<usize>> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            if record.has_coordinates() {
                continue;
            }
            report.records_missing_coordinates += 1;

            let Some(key) = record.place_key() else {
                continue;
            };
            let group = members.entry(key.clone()).or_default();
            if group.is_empty() {
                pending.push(key);
            }
            group.push(index);
        }
        report.unique_places = pending.len();

        if self.retry_tombstones {
            report.tombstones_cleared = cache.clear_tombstones_for(&pending);
        }

        let mut last_request: Option<Instant> = None;

        for key in pending {
            let entry = match cache.get(&key) {
                Some(entry) => {
                    report.cache_hits += 1;
                    *entry
                }
                None => {
                    self.wait_for_slot(&mut last_request).await;
                    report.lookups_issued += 1;

                    let entry = match self.geocoder.lookup(key.as_str()).await {
                        Ok(Some((latitude, longitude)))
                            if in_latitude_range(latitude) && in_longitude_range(longitude) =>
                        {
                            debug!("resolved '{key}' to ({latitude}, {longitude})");
                            CacheEntry::Found {
                                latitude,
                                longitude,
                            }
                        }
                        Ok(Some((latitude, longitude))) => {
                            warn!("discarding out-of-range result ({latitude}, {longitude}) for '{key}'");
                            report.lookups_failed += 1;
                            CacheEntry::NotFound
                        }
                        Ok(None) => {
                            debug!("no result for '{key}'");
                            report.lookups_failed += 1;
                            CacheEntry::NotFound
                        }
                        Err(e) => {
                            // A failed call is terminal for this key until an
                            // explicit retry pass; never a fatal error.
                            warn!("lookup failed for '{key}': {e}");
                            report.lookups_failed += 1;
                            CacheEntry::NotFound
                        }
                    };

                    cache.insert(key.clone(), entry);
                    entry
                }
            };

            // Write back to every record sharing this key, atomically per
            // record: both fields or neither.
            if let Some((latitude, longitude)) = entry.coordinates() {
                if let Some(group) = members.get(&key) {
                    for &index in group {
                        records[index].set_coordinates(latitude, longitude);
                        report.records_resolved += 1;
                    }
                }
            }

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        Ok(report)
    }

    /// Enforce the minimum spacing between successive external calls. The
    /// first call of a pass goes out immediately.
    async fn wait_for_slot(&self, last_request: &mut Option<Instant>) {
        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_request_interval {
                tokio::time::sleep(self.min_request_interval - elapsed).await;
            }
        }
        *last_request = Some(Instant::now());
    }
}
