use crate::models::CompanyRecord;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Grouped volume summaries over the normalized record set.
///
/// Records with unknown volume contribute 0 to their group's total but still
/// make the group exist, so aggregates and option lists agree on which
/// groups there are.
pub struct VolumeAnalyzer;

impl VolumeAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Sum volume per group key, sorted descending by total with the key as
    /// tiebreak for deterministic output.
    pub fn group_sum<F>(&self, records: &[CompanyRecord], key_fn: F) -> Vec<(String, f64)>
    where
        F: Fn(&CompanyRecord) -> String,
    {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for record in records {
            *totals.entry(key_fn(record)).or_insert(0.0) += record.volume.unwrap_or(0.0);
        }

        let mut groups: Vec<(String, f64)> = totals.into_iter().collect();
        groups.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        groups
    }

    /// Total volume per role, largest first, truncated to `top_n`
    pub fn volume_by_role(&self, records: &[CompanyRecord], top_n: usize) -> Vec<(String, f64)> {
        let mut groups = self.group_sum(records, |r| r.role.clone());
        groups.truncate(top_n);
        groups
    }

    /// Total volume per country, all groups
    pub fn volume_by_country(&self, records: &[CompanyRecord]) -> Vec<(String, f64)> {
        self.group_sum(records, |r| r.country.clone())
    }

    /// The `n` records with the largest known volume. Records with unknown
    /// volume are not ranked.
    pub fn top_companies(&self, records: &[CompanyRecord], n: usize) -> Vec<CompanyRecord> {
        let mut ranked: Vec<CompanyRecord> = records
            .iter()
            .filter(|r| r.volume.is_some())
            .cloned()
            .collect();

        ranked.sort_by(|a, b| {
            b.volume
                .partial_cmp(&a.volume)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.company.cmp(&b.company))
        });
        ranked.truncate(n);
        ranked
    }
}

impl Default for VolumeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
