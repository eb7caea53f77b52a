// Services layer - stateless domain logic
pub mod crypto;
pub mod geocoding;
pub mod geolocation;
pub mod search;
pub mod submission_validator;
pub mod token_service;

pub use geocoding::{Address, GeocodingError, NominatimGeocoder, ReverseGeocoder};
pub use geolocation::{Geolocation, GeolocationError};
pub use token_service::TokenService;
