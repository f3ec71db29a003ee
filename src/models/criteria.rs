use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Customer-flag restriction for filter queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum CustomerFilter {
    #[default]
    Any,
    Yes,
    No,
}

impl CustomerFilter {
    pub fn matches(&self, is_customer: bool) -> bool {
        match self {
            CustomerFilter::Any => true,
            CustomerFilter::Yes => is_customer,
            CustomerFilter::No => !is_customer,
        }
    }
}

/// A filter snapshot evaluated against the normalized record set.
///
/// Empty selection sets mean unrestricted: selecting zero concrete options is
/// equivalent to selecting all of them, so a cleared multi-select never
/// produces an empty result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub roles: HashSet<String>,
    pub countries: HashSet<String>,
    pub companies: HashSet<String>,

    /// Records with unknown volume are never excluded by this floor
    pub min_volume: f64,

    pub customer: CustomerFilter,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles<I: IntoIterator<Item = String>>(mut self, roles: I) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    pub fn with_countries<I: IntoIterator<Item = String>>(mut self, countries: I) -> Self {
        self.countries = countries.into_iter().collect();
        self
    }

    pub fn with_companies<I: IntoIterator<Item = String>>(mut self, companies: I) -> Self {
        self.companies = companies.into_iter().collect();
        self
    }

    pub fn with_min_volume(mut self, min_volume: f64) -> Self {
        self.min_volume = min_volume;
        self
    }

    pub fn with_customer(mut self, customer: CustomerFilter) -> Self {
        self.customer = customer;
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.roles.is_empty()
            && self.countries.is_empty()
            && self.companies.is_empty()
            && self.min_volume <= 0.0
            && self.customer == CustomerFilter::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_filter_matches() {
        assert!(CustomerFilter::Any.matches(true));
        assert!(CustomerFilter::Any.matches(false));
        assert!(CustomerFilter::Yes.matches(true));
        assert!(!CustomerFilter::Yes.matches(false));
        assert!(CustomerFilter::No.matches(false));
        assert!(!CustomerFilter::No.matches(true));
    }

    #[test]
    fn test_default_is_unrestricted() {
        assert!(FilterCriteria::new().is_unrestricted());
    }

    #[test]
    fn test_builder() {
        let criteria = FilterCriteria::new()
            .with_roles(vec!["Trader".to_string()])
            .with_min_volume(1000.0)
            .with_customer(CustomerFilter::Yes);

        assert!(criteria.roles.contains("Trader"));
        assert_eq!(criteria.min_volume, 1000.0);
        assert!(!criteria.is_unrestricted());
    }
}
