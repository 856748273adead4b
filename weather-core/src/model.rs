use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Typed extraction of the raw lookup parameters.
///
/// Construction only checks presence; the shape of each field is validated
/// by the resolver/converter gates that run immediately after, so a query
/// never reaches the provider partially valid.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub country_code: String,
    pub city: String,
    pub date: String,
}

impl WeatherQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, WeatherError> {
        Ok(Self {
            country_code: require(params, "country_code")?,
            city: require(params, "city")?,
            date: require(params, "date")?,
        })
    }
}

fn require(params: &HashMap<String, String>, name: &'static str) -> Result<String, WeatherError> {
    params
        .get(name)
        .cloned()
        .ok_or(WeatherError::MissingParameter(name))
}

/// Location identifier in the `"{city},{CC}"` form the provider's lookup expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub display_name: String,
}

/// Absolute point in time obtained by applying the configured reference
/// zone to the user-supplied local date/time. Stored in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedInstant(DateTime<Utc>);

impl NormalizedInstant {
    pub fn new(utc: DateTime<Utc>) -> Self {
        Self(utc)
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Weather fields returned by the provider for the requested moment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub observation_time: DateTime<Utc>,
}

/// Final result of a lookup: the provider's report plus the echoed
/// location/time context it was fetched for.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherResult {
    pub location: String,
    pub instant: DateTime<Utc>,
    pub weather: WeatherReport,
}
