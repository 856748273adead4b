use anyhow::{Result, anyhow};
use chrono_tz::Tz;

/// Reference zone used when `TIME_ZONE` is not set.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::UTC;

/// Process-wide configuration, read once at startup and never mutated.
///
/// Business logic receives this by reference; nothing below the binary's
/// `main` reads the environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the external weather provider.
    pub api_key: String,

    /// Reference time zone applied to every incoming local date/time.
    pub time_zone: Tz,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Tests pass a closure over a map instead of mutating the real
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "API_KEY is not set.\n\
                     Hint: export API_KEY=<your openweathermap.org key> or put it in a .env file."
                )
            })?;

        let time_zone = match lookup("TIME_ZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| anyhow!("TIME_ZONE '{name}' is not a known IANA zone name"))?,
            None => DEFAULT_TIME_ZONE,
        };

        Ok(Self { api_key, time_zone })
    }
}
