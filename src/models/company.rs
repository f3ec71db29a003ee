use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::PlaceKey;

/// One normalized row of the supply-chain dataset.
///
/// Volume and coordinates are optional because the source data is partially
/// dirty; absent means "unknown", never zero. Coordinates are only ever set
/// as a pair.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanyRecord {
    pub company: String,

    /// Supply-chain role (open categorical set), never empty
    pub role: String,

    pub country: String,

    pub city: String,

    /// Tons per year
    #[validate(range(min = 0.0))]
    pub volume: Option<f64>,

    pub is_customer: bool,

    pub contact_email: Option<String>,

    pub notes: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl CompanyRecord {
    pub fn new(company: String, role: String, country: String, city: String) -> Self {
        Self {
            company,
            role,
            country,
            city,
            volume: None,
            is_customer: false,
            contact_email: None,
            notes: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Set both coordinate fields at once; the pair invariant has no
    /// half-set state.
    pub fn set_coordinates(&mut self, latitude: f64, longitude: f64) {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
    }

    /// Cache key for this record's location, `None` when both city and
    /// country are empty.
    pub fn place_key(&self) -> Option<PlaceKey> {
        PlaceKey::new(&self.city, &self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CompanyRecord {
        CompanyRecord::new(
            "Cocoa Traders Ltd".to_string(),
            "Trader".to_string(),
            "Ghana".to_string(),
            "Accra".to_string(),
        )
    }

    #[test]
    fn test_new_record_has_no_optionals() {
        let record = record();
        assert_eq!(record.volume, None);
        assert!(!record.is_customer);
        assert!(!record.has_coordinates());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_coordinates_set_as_pair() {
        let mut record = record();
        assert_eq!(record.coordinates(), None);

        record.set_coordinates(5.6037, -0.1870);
        assert!(record.has_coordinates());
        assert_eq!(record.coordinates(), Some((5.6037, -0.1870)));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates_fail_validation() {
        let mut record = record();
        record.set_coordinates(91.0, -0.1870);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_negative_volume_fails_validation() {
        let mut record = record();
        record.volume = Some(-5.0);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_place_key() {
        assert_eq!(record().place_key().unwrap().as_str(), "Accra, Ghana");

        let mut blank = record();
        blank.city = String::new();
        blank.country = "  ".to_string();
        assert_eq!(blank.place_key(), None);
    }
}
