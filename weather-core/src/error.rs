use thiserror::Error;

/// Everything that can go wrong while serving a single lookup.
///
/// Each stage of the pipeline signals its own kind; the handler forwards
/// kinds unchanged so the HTTP boundary can pick the right status code.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// A required query parameter was absent from the request.
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    /// Country code or city failed the shape check.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// The date string did not match the expected pattern or a field was out of range.
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// The provider answered with a non-success status.
    #[error("weather provider rejected the request (status {status}): {message}")]
    UpstreamRejected { status: u16, message: String },

    /// The request never produced a provider answer (connect, timeout, body read).
    #[error("weather provider unreachable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// The provider answered 200 with a body we could not make sense of.
    #[error("unexpected response from weather provider: {0}")]
    UpstreamResponseInvalid(String),
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::UpstreamResponseInvalid(err.to_string())
    }
}
