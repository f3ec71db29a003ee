use crate::error::{ProcessingError, Result};
use crate::geocode::resolver::Geocoder;
use async_trait::async_trait;
use serde::Deserialize;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = concat!("cocoa-atlas/", env!("CARGO_PKG_VERSION"));

/// Nominatim returns coordinates as JSON strings
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

/// Nominatim-backed geocoder. Rate limiting lives in the resolver; this
/// client only issues the search request and decodes the first candidate.
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(SEARCH_URL)
    }

    /// Point the client at a different search endpoint (self-hosted
    /// Nominatim, test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn parse_response(body: &str) -> Result<Option<(f64, f64)>> {
        let results: Vec<SearchResult> = serde_json::from_str(body)
            .map_err(|e| ProcessingError::Lookup(format!("malformed search response: {e}")))?;

        Ok(results.first().and_then(|result| {
            let latitude = result.lat.parse::<f64>().ok()?;
            let longitude = result.lon.parse::<f64>().ok()?;
            Some((latitude, longitude))
        }))
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn lookup(&self, place: &str) -> Result<Option<(f64, f64)>> {
        let body = self
            .client
            .get(&self.base_url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_candidate() {
        let body = r#"[
            {"lat": "5.5571096", "lon": "-0.2012376", "display_name": "Accra, Ghana"},
            {"lat": "32.9", "lon": "-86.6", "display_name": "Accra, Alabama"}
        ]"#;

        let result = NominatimClient::parse_response(body).unwrap();
        assert_eq!(result, Some((5.5571096, -0.2012376)));
    }

    #[test]
    fn test_parse_empty_result_set() {
        assert_eq!(NominatimClient::parse_response("[]").unwrap(), None);
    }

    #[test]
    fn test_parse_unparseable_coordinates() {
        let body = r#"[{"lat": "north-ish", "lon": "-0.2"}]"#;
        assert_eq!(NominatimClient::parse_response(body).unwrap(), None);
    }

    #[test]
    fn test_parse_malformed_body_is_error() {
        assert!(NominatimClient::parse_response("<html>rate limited</html>").is_err());
    }
}
