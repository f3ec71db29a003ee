/// Source column names
pub const COL_COMPANY: &str = "Company";
pub const COL_ROLE: &str = "Role";
pub const COL_COUNTRY: &str = "Country";
pub const COL_CITY: &str = "City";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_VOLUME: &str = "Volume (tons/year)";
pub const COL_CONTACT_EMAIL: &str = "Contact Email";
pub const COL_NOTES: &str = "Notes";
pub const COL_CUSTOMER: &str = "Customer (Y/N)";

/// Columns that must exist in the source schema for a load to proceed
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_COMPANY, COL_ROLE, COL_COUNTRY, COL_CITY];

/// Sentinel role for rows with a missing or empty role cell
pub const UNKNOWN_ROLE: &str = "Unknown";

/// Geocode cache file layout
pub const DEFAULT_CACHE_FILE: &str = "geocode_cache.csv";
pub const CACHE_COL_PLACE: &str = "place";

/// Minimum spacing between successive external geocoding calls
pub const DEFAULT_RATE_LIMIT_MS: u64 = 1000;

/// Coordinate bounds
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Report defaults
pub const DEFAULT_TOP_ROLES: usize = 5;
pub const DEFAULT_TOP_COMPANIES: usize = 10;
