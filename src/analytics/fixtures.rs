//! Test fixtures shared by the analytics test modules

use super::types::SymptomObservation;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Monday, January 1st 2024 at 09:00 UTC
pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

/// Observation `day` days after [`base_time`]
pub(crate) fn obs(name: &str, severity: u8, day: i64) -> SymptomObservation {
    SymptomObservation::new(name, severity, base_time() + Duration::days(day)).unwrap()
}

/// Observation with context factors
pub(crate) fn obs_with(name: &str, severity: u8, day: i64, factors: &[&str]) -> SymptomObservation {
    obs(name, severity, day).factors(factors.iter().copied())
}

/// One observation per day starting at [`base_time`]
pub(crate) fn daily_series(name: &str, severities: &[u8]) -> Vec<SymptomObservation> {
    severities
        .iter()
        .enumerate()
        .map(|(day, &severity)| obs(name, severity, day as i64))
        .collect()
}
