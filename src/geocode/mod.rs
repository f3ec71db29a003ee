pub mod cache;
pub mod nominatim;
pub mod resolver;

pub use cache::{CacheEntry, GeocodeCache};
pub use nominatim::NominatimClient;
pub use resolver::{GeocodeResolver, Geocoder, ResolutionReport};
