use crate::utils::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// Parse a decimal coordinate cell, treating empty or malformed text as absent
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn in_latitude_range(latitude: f64) -> bool {
    (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude)
}

pub fn in_longitude_range(longitude: f64) -> bool {
    (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
}

/// Parse a latitude/longitude cell pair.
///
/// Coordinates are only usable as a pair: if either side is missing,
/// non-numeric, or out of range, the whole pair is absent.
pub fn parse_coordinate_pair(lat_raw: &str, lon_raw: &str) -> Option<(f64, f64)> {
    let latitude = parse_decimal(lat_raw)?;
    let longitude = parse_decimal(lon_raw)?;

    if in_latitude_range(latitude) && in_longitude_range(longitude) {
        Some((latitude, longitude))
    } else {
        None
    }
}
