//! Orchestration of a single weather lookup.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::WeatherError;
use crate::location;
use crate::model::{WeatherQuery, WeatherResult};
use crate::provider::WeatherProvider;
use crate::time::TimeConverter;

/// Validates raw request parameters and drives the lookup pipeline.
///
/// Built once at startup and shared across requests; holds only read-only
/// state (the converter, the provider handle, the credential).
#[derive(Debug)]
pub struct QueryHandler {
    converter: TimeConverter,
    provider: Arc<dyn WeatherProvider>,
    api_key: String,
}

impl QueryHandler {
    pub fn new(config: &Config, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            converter: TimeConverter::new(config.time_zone),
            provider,
            api_key: config.api_key.clone(),
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Each gate short-circuits on first failure and its error kind is
    /// forwarded unchanged; the provider is never contacted when validation
    /// fails. Either a complete result or a single error, nothing partial.
    pub async fn handle(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<WeatherResult, WeatherError> {
        let query = WeatherQuery::from_params(params)?;
        let location = location::resolve(&query.country_code, &query.city)?;
        let instant = self.converter.convert(&query.date)?;

        let report = self
            .provider
            .fetch(&location, instant, &self.api_key)
            .await?;

        info!(location = %location.display_name, instant = %instant.utc(), "weather lookup succeeded");

        Ok(WeatherResult {
            location: location.display_name,
            instant: instant.utc(),
            weather: report,
        })
    }
}
