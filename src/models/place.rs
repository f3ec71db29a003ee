use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized `"City, Country"` string used to deduplicate geocoding lookups.
///
/// Two records with the same PlaceKey always resolve to the same coordinates,
/// so the key doubles as the geocode cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceKey(String);

impl PlaceKey {
    /// Build a key from city and country cells. Components are trimmed and
    /// empty components omitted; returns `None` when both are empty.
    ///
    /// Cells can themselves carry stray commas (`"Accra,"`), so the key is
    /// normalized through the same splitting path as [`PlaceKey::from_raw`];
    /// the in-memory key and the reloaded cache key must always agree.
    pub fn new(city: &str, country: &str) -> Option<Self> {
        Self::from_raw(&format!("{city}, {country}"))
    }

    /// Re-normalize a free-text place string, collapsing comma artifacts
    /// (`"Accra,, Ghana"`, `", Ghana"`) left by hand-edited cache files.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(Self(parts.join(", ")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
