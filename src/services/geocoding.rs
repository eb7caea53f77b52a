use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Place names resolved for a coordinate pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    /// City, town or village; empty when the geocoder knows none
    pub city: String,
    /// State; empty when unknown
    pub state: String,
}

/// Errors that can occur during reverse geocoding
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    #[error("Geocoder request failed: {0}")]
    NetworkError(String),

    #[error("Geocoder returned status: {0}")]
    ApiError(String),

    #[error("Geocoder response could not be parsed: {0}")]
    InvalidResponse(String),
}

/// Coordinate to place-name lookup
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// `Ok(None)` when the service answered without an address
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Address>, GeocodingError>;
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

impl From<NominatimAddress> for Address {
    fn from(address: NominatimAddress) -> Self {
        let city = [address.city, address.town, address.village]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or_default();

        Self {
            city,
            state: address.state.unwrap_or_default(),
        }
    }
}

/// OpenStreetMap Nominatim client
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// # Arguments
    /// * `base_url` - Service root without trailing slash, e.g. `https://nominatim.openstreetmap.org`
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeocodingError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("VersoForms/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GeocodingError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url)
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Address>, GeocodingError> {
        let response = self
            .client
            .get(self.reverse_url())
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodingError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodingError::ApiError(response.status().to_string()));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::InvalidResponse(e.to_string()))?;

        Ok(body.address.map(Address::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<Address> {
        serde_json::from_str::<NominatimResponse>(json)
            .unwrap()
            .address
            .map(Address::from)
    }

    #[test]
    fn test_city_preferred_over_town_and_village() {
        let address = parse(r#"{"address":{"city":"Austin","town":"Pflugerville","state":"Texas"}}"#).unwrap();

        assert_eq!(address, Address { city: "Austin".into(), state: "Texas".into() });
    }

    #[test]
    fn test_falls_back_to_town_then_village() {
        let town = parse(r#"{"address":{"town":"Marfa","state":"Texas"}}"#).unwrap();
        let village = parse(r#"{"address":{"village":"Luckenbach"}}"#).unwrap();

        assert_eq!(town.city, "Marfa");
        assert_eq!(village.city, "Luckenbach");
        assert_eq!(village.state, "");
    }

    #[test]
    fn test_missing_address_is_none() {
        assert_eq!(parse(r#"{"error":"Unable to geocode"}"#), None);
    }

    #[test]
    fn test_reverse_url_uses_base() {
        let geocoder = NominatimGeocoder::new("http://geocoder.internal").unwrap();

        assert_eq!(geocoder.reverse_url(), "http://geocoder.internal/reverse");
    }
}
