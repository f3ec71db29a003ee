use crate::models::{CompanyRecord, FilterCriteria};
use std::collections::{BTreeSet, HashSet};

/// Evaluate a filter snapshot over the record set.
///
/// Pure and stable: the input is never mutated and matches keep their
/// relative order.
pub fn apply(records: &[CompanyRecord], criteria: &FilterCriteria) -> Vec<CompanyRecord> {
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect()
}

pub fn matches(record: &CompanyRecord, criteria: &FilterCriteria) -> bool {
    selection_allows(&criteria.roles, &record.role)
        && selection_allows(&criteria.countries, &record.country)
        && selection_allows(&criteria.companies, &record.company)
        && volume_passes(record.volume, criteria.min_volume)
        && criteria.customer.matches(record.is_customer)
}

/// An empty selection is unrestricted
fn selection_allows(selection: &HashSet<String>, value: &str) -> bool {
    selection.is_empty() || selection.contains(value)
}

/// An absent volume never excludes a record: silence is not zero
fn volume_passes(volume: Option<f64>, min_volume: f64) -> bool {
    match volume {
        Some(volume) => volume >= min_volume,
        None => true,
    }
}

/// Distinct values of the categorical fields, sorted for presentation
/// widgets. Empty values are omitted.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub roles: Vec<String>,
    pub countries: Vec<String>,
    pub companies: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[CompanyRecord]) -> Self {
        let mut roles = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut companies = BTreeSet::new();

        for record in records {
            if !record.role.is_empty() {
                roles.insert(record.role.clone());
            }
            if !record.country.is_empty() {
                countries.insert(record.country.clone());
            }
            if !record.company.is_empty() {
                companies.insert(record.company.clone());
            }
        }

        Self {
            roles: roles.into_iter().collect(),
            countries: countries.into_iter().collect(),
            companies: companies.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomerFilter;

    fn record(company: &str, role: &str, country: &str, volume: Option<f64>) -> CompanyRecord {
        let mut record = CompanyRecord::new(
            company.to_string(),
            role.to_string(),
            country.to_string(),
            "City".to_string(),
        );
        record.volume = volume;
        record
    }

    fn sample() -> Vec<CompanyRecord> {
        vec![
            record("A", "Trader", "Ghana", Some(50000.0)),
            record("B", "Trader", "Ghana", None),
            record("C", "Processor", "Belgium", Some(800.0)),
            record("D", "Manufacturer", "Switzerland", Some(12000.0)),
        ]
    }

    #[test]
    fn test_unrestricted_criteria_pass_everything() {
        let records = sample();
        let filtered = apply(&records, &FilterCriteria::new());
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn test_empty_selection_equals_unrestricted() {
        let records = sample();
        let explicit = FilterCriteria::new().with_roles(
            records.iter().map(|r| r.role.clone()).collect::<Vec<_>>(),
        );
        let empty = FilterCriteria::new();

        let a: Vec<String> = apply(&records, &explicit).iter().map(|r| r.company.clone()).collect();
        let b: Vec<String> = apply(&records, &empty).iter().map(|r| r.company.clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_role_selection() {
        let records = sample();
        let criteria = FilterCriteria::new().with_roles(vec!["Trader".to_string()]);
        let filtered = apply(&records, &criteria);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.role == "Trader"));
    }

    #[test]
    fn test_volume_floor_keeps_absent_volume() {
        let records = sample();

        for threshold in [0.0, 10000.0, 1_000_000.0] {
            let criteria = FilterCriteria::new().with_min_volume(threshold);
            let filtered = apply(&records, &criteria);
            assert!(
                filtered.iter().any(|r| r.company == "B"),
                "absent volume excluded at threshold {threshold}"
            );
        }

        let criteria = FilterCriteria::new().with_min_volume(10000.0);
        let companies: Vec<String> = apply(&records, &criteria)
            .iter()
            .map(|r| r.company.clone())
            .collect();
        assert_eq!(companies, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_customer_filter() {
        let mut records = sample();
        records[0].is_customer = true;

        let yes = FilterCriteria::new().with_customer(CustomerFilter::Yes);
        assert_eq!(apply(&records, &yes).len(), 1);

        let no = FilterCriteria::new().with_customer(CustomerFilter::No);
        assert_eq!(apply(&records, &no).len(), 3);
    }

    #[test]
    fn test_filter_is_stable() {
        let records = sample();
        let criteria = FilterCriteria::new().with_countries(vec![
            "Ghana".to_string(),
            "Switzerland".to_string(),
        ]);

        let companies: Vec<String> = apply(&records, &criteria)
            .iter()
            .map(|r| r.company.clone())
            .collect();
        assert_eq!(companies, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_filter_options() {
        let options = FilterOptions::from_records(&sample());
        assert_eq!(options.roles, vec!["Manufacturer", "Processor", "Trader"]);
        assert_eq!(options.countries, vec!["Belgium", "Ghana", "Switzerland"]);
        assert_eq!(options.companies, vec!["A", "B", "C", "D"]);
    }
}
