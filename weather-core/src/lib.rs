//! Core library for the weather lookup service.
//!
//! This crate defines:
//! - Configuration handling (credential + reference time zone)
//! - Request validation and normalization (location, timestamp)
//! - Abstraction over the external weather provider
//! - The query handler orchestrating a single lookup
//!
//! It is used by `weather-api`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod handler;
pub mod location;
pub mod model;
pub mod provider;
pub mod time;

pub use config::Config;
pub use error::WeatherError;
pub use handler::QueryHandler;
pub use model::{NormalizedInstant, ResolvedLocation, WeatherQuery, WeatherReport, WeatherResult};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use time::TimeConverter;
