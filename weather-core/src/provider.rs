use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::WeatherError;
use crate::model::{NormalizedInstant, ResolvedLocation, WeatherReport};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Requested instants within this window of "now" are served from the
/// current-conditions endpoint instead of forecast/history data.
const CURRENT_WINDOW_MINUTES: i64 = 15;

/// Narrow seam over the external weather service.
///
/// Exactly one outbound network call per `fetch` invocation, no retries.
/// Tests substitute a stub implementation, so the handler never needs
/// network access.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(
        &self,
        location: &ResolvedLocation,
        instant: NormalizedInstant,
        api_key: &str,
    ) -> Result<WeatherReport, WeatherError>;
}

/// Which of the provider's data sets a requested instant falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRequest {
    Current,
    Past(DateTime<Utc>),
    Future(DateTime<Utc>),
}

/// Classify `when` relative to `now`, with a small tolerance window so that
/// "weather right now" requests hit the current-conditions endpoint.
pub fn classify_date(now: DateTime<Utc>, when: DateTime<Utc>) -> DateRequest {
    let delta = when - now;
    if delta.abs() <= Duration::minutes(CURRENT_WINDOW_MINUTES) {
        DateRequest::Current
    } else if when > now {
        DateRequest::Future(when)
    } else {
        DateRequest::Past(when)
    }
}
