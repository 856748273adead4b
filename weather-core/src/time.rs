//! Conversion of user-supplied local date/times into provider instants.

use chrono::offset::LocalResult;
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::WeatherError;
use crate::model::NormalizedInstant;

/// Pattern every incoming date/time must match, e.g. `08.02.2022T12:00`.
pub const DATE_FORMAT: &str = "%d.%m.%YT%H:%M";

/// Interprets local date/time strings in the configured reference zone.
///
/// Exactly one offset application per input: the literal fields are parsed,
/// anchored in the reference zone, and converted to UTC. Same input, same
/// zone, same instant.
#[derive(Debug, Clone, Copy)]
pub struct TimeConverter {
    zone: Tz,
}

impl TimeConverter {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Parse `raw` against [`DATE_FORMAT`] and anchor it in the reference zone.
    ///
    /// Out-of-range fields (Feb 30, hour 25, month 13) are rejected, never
    /// clamped. An ambiguous wall-clock time (clocks rolled back) resolves to
    /// its earliest mapping; a nonexistent one (clocks rolled forward) is an
    /// error.
    pub fn convert(&self, raw: &str) -> Result<NormalizedInstant, WeatherError> {
        let naive = NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            WeatherError::MalformedTimestamp(format!(
                "'{raw}' does not match the expected DD.MM.YYYYTHH:MM format"
            ))
        })?;

        let local = match self.zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                return Err(WeatherError::MalformedTimestamp(format!(
                    "'{raw}' does not exist in time zone {}",
                    self.zone
                )));
            }
        };

        Ok(NormalizedInstant::new(local.with_timezone(&Utc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn moscow() -> TimeConverter {
        TimeConverter::new(chrono_tz::Europe::Moscow)
    }

    #[test]
    fn applies_the_reference_zone_offset() {
        let instant = moscow().convert("08.02.2022T12:00").expect("valid input");

        let expected: DateTime<Utc> = "2022-02-08T09:00:00Z".parse().unwrap();
        assert_eq!(instant.utc(), expected);
    }

    #[test]
    fn conversion_is_deterministic() {
        let converter = moscow();
        let first = converter.convert("08.02.2022T12:00").unwrap();
        let second = converter.convert("08.02.2022T12:00").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let converter = moscow();
        let trimmed = converter.convert("08.02.2022T12:00").unwrap();
        let padded = converter.convert("  08.02.2022T12:00 ").unwrap();
        assert_eq!(trimmed, padded);
    }

    #[test]
    fn rejects_day_invalid_for_month() {
        let err = moscow().convert("30.02.2022T12:00").unwrap_err();
        assert!(matches!(err, WeatherError::MalformedTimestamp(_)));
    }

    #[test]
    fn rejects_month_out_of_range() {
        assert!(matches!(
            moscow().convert("08.13.2022T12:00").unwrap_err(),
            WeatherError::MalformedTimestamp(_)
        ));
    }

    #[test]
    fn rejects_hour_out_of_range() {
        assert!(matches!(
            moscow().convert("08.02.2022T25:00").unwrap_err(),
            WeatherError::MalformedTimestamp(_)
        ));
    }

    #[test]
    fn rejects_minute_out_of_range() {
        assert!(matches!(
            moscow().convert("08.02.2022T12:61").unwrap_err(),
            WeatherError::MalformedTimestamp(_)
        ));
    }

    #[test]
    fn rejects_foreign_patterns() {
        for raw in ["2022-02-08 12:00", "08/02/2022T12:00", "08.02.2022 12:00", "not a date"] {
            assert!(
                matches!(
                    moscow().convert(raw).unwrap_err(),
                    WeatherError::MalformedTimestamp(_)
                ),
                "'{raw}' should be rejected"
            );
        }
    }

    #[test]
    fn nonexistent_wall_clock_time_is_rejected() {
        // Europe/Berlin skipped 02:30 on 27.03.2022 when DST began.
        let converter = TimeConverter::new(chrono_tz::Europe::Berlin);
        let err = converter.convert("27.03.2022T02:30").unwrap_err();
        assert!(matches!(err, WeatherError::MalformedTimestamp(_)));
    }

    #[test]
    fn ambiguous_wall_clock_time_resolves_to_earliest() {
        // Europe/Berlin saw 02:30 twice on 30.10.2022 when DST ended; the
        // earliest mapping is still on the +02:00 offset.
        let converter = TimeConverter::new(chrono_tz::Europe::Berlin);
        let instant = converter.convert("30.10.2022T02:30").expect("ambiguous, not invalid");

        let expected: DateTime<Utc> = "2022-10-30T00:30:00Z".parse().unwrap();
        assert_eq!(instant.utc(), expected);
    }
}
