//! HTTP surface: the `/weather` route and the error -> status mapping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::timeout::TimeoutLayer;
use tracing::warn;

use weather_core::{QueryHandler, WeatherError, WeatherResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn router(handler: Arc<QueryHandler>) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(handler)
}

/// `GET /weather?country_code={CC}&city={City}&date={DD.MM.YYYY}T{HH:MM}`
async fn get_weather(
    State(handler): State<Arc<QueryHandler>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<WeatherResult>, ApiError> {
    let result = handler.handle(&params).await?;
    Ok(Json(result))
}

/// Wrapper so core errors pick up a status code only here, at the boundary.
struct ApiError(WeatherError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            WeatherError::MissingParameter(_)
            | WeatherError::InvalidLocation(_)
            | WeatherError::MalformedTimestamp(_) => StatusCode::BAD_REQUEST,
            WeatherError::UpstreamRejected { .. } => StatusCode::NOT_FOUND,
            WeatherError::UpstreamUnavailable(_) | WeatherError::UpstreamResponseInvalid(_) => {
                StatusCode::BAD_GATEWAY
            }
        };

        if status.is_server_error() {
            warn!(error = %self.0, "weather lookup failed upstream");
        }

        let body = Json(json!({
            "code": status.as_u16().to_string(),
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
