use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::WeatherError;
use crate::model::{NormalizedInstant, ResolvedLocation, WeatherReport};
use crate::provider::{DateRequest, WeatherProvider, classify_date};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Outbound calls are bounded so a stalled provider cannot hold a request
/// open past the framework's own limits.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Forecast entries arrive in 3-hour steps; a requested instant further than
/// this from every entry lies outside the provider's horizon.
const FORECAST_SLACK_SECS: i64 = 3 * 3600;

/// Client for api.openweathermap.org.
///
/// Endpoint selection follows the requested instant: current conditions near
/// "now", the 5-day forecast for future instants, the hourly history archive
/// for past ones. Each lookup is a single outbound call.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl Default for OpenWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenWeatherProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host. Tests use this to target a
    /// local mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(
        &self,
        location: &ResolvedLocation,
        api_key: &str,
    ) -> Result<WeatherReport, WeatherError> {
        let entry: OwEntry = self
            .get_json(
                "/data/2.5/weather",
                &[
                    ("q", location.display_name.as_str()),
                    ("appid", api_key),
                    ("units", "metric"),
                ],
            )
            .await?;

        Ok(report_from_entry(&entry))
    }

    async fn fetch_forecast(
        &self,
        location: &ResolvedLocation,
        when: DateTime<Utc>,
        api_key: &str,
    ) -> Result<WeatherReport, WeatherError> {
        let parsed: OwList = self
            .get_json(
                "/data/2.5/forecast",
                &[
                    ("q", location.display_name.as_str()),
                    ("appid", api_key),
                    ("units", "metric"),
                ],
            )
            .await?;

        closest_entry(&parsed.list, when.timestamp()).map(report_from_entry)
    }

    async fn fetch_history(
        &self,
        location: &ResolvedLocation,
        when: DateTime<Utc>,
        api_key: &str,
    ) -> Result<WeatherReport, WeatherError> {
        let start = when.timestamp().to_string();
        let parsed: OwList = self
            .get_json(
                "/data/2.5/history/city",
                &[
                    ("q", location.display_name.as_str()),
                    ("type", "hour"),
                    ("start", start.as_str()),
                    ("cnt", "1"),
                    ("appid", api_key),
                    ("units", "metric"),
                ],
            )
            .await?;

        closest_entry(&parsed.list, when.timestamp()).map(report_from_entry)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "requesting weather data");

        let res = self
            .http
            .get(&url)
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::UpstreamRejected {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(
        &self,
        location: &ResolvedLocation,
        instant: NormalizedInstant,
        api_key: &str,
    ) -> Result<WeatherReport, WeatherError> {
        match classify_date(Utc::now(), instant.utc()) {
            DateRequest::Current => self.fetch_current(location, api_key).await,
            DateRequest::Future(when) => self.fetch_forecast(location, when, api_key).await,
            DateRequest::Past(when) => self.fetch_history(location, when, api_key).await,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

/// One timed data point. The current-conditions body and every forecast or
/// history list element all share this shape.
#[derive(Debug, Deserialize)]
struct OwEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwList {
    list: Vec<OwEntry>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

fn report_from_entry(entry: &OwEntry) -> WeatherReport {
    let condition = entry
        .weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    WeatherReport {
        temperature_c: entry.main.temp,
        feels_like_c: entry.main.feels_like,
        condition,
        humidity_pct: entry.main.humidity,
        wind_speed_mps: entry.wind.speed,
        observation_time: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
    }
}

/// Pick the entry closest to the requested instant. The provider only covers
/// a bounded range, so a large gap means the moment is out of reach rather
/// than a parsing problem.
fn closest_entry(list: &[OwEntry], target: i64) -> Result<&OwEntry, WeatherError> {
    let entry = list
        .iter()
        .min_by_key(|e| (e.dt - target).abs())
        .ok_or_else(|| {
            WeatherError::UpstreamResponseInvalid("response contained no data points".to_string())
        })?;

    if (entry.dt - target).abs() > FORECAST_SLACK_SECS {
        return Err(WeatherError::UpstreamRejected {
            status: 404,
            message: "weather is only available for the last and next five days".to_string(),
        });
    }

    Ok(entry)
}

/// OpenWeather error bodies look like `{"cod":"404","message":"city not found"}`.
fn provider_message(body: &str) -> String {
    match serde_json::from_str::<OwErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}
