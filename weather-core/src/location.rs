//! Validation and normalization of the (country code, city) pair.

use crate::error::WeatherError;
use crate::model::ResolvedLocation;

/// Normalize a raw country code + city into the identifier the provider's
/// geocoding accepts, e.g. `("ru", " Moscow ")` -> `"Moscow,RU"`.
///
/// The country code must be exactly two ASCII letters (ISO 3166-1 alpha-2
/// shape). Unknown-but-well-formed codes pass through; rejecting them is the
/// provider's call.
pub fn resolve(country_code: &str, city: &str) -> Result<ResolvedLocation, WeatherError> {
    let code = country_code.trim();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(WeatherError::InvalidLocation(format!(
            "country code '{country_code}' must be exactly two letters"
        )));
    }

    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::InvalidLocation(
            "city must not be empty".to_string(),
        ));
    }

    Ok(ResolvedLocation {
        display_name: format!("{city},{}", code.to_ascii_uppercase()),
    })
}
