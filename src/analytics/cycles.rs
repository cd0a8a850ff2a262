//! Cyclical Pattern Detection
//!
//! Looks for weekly and monthly recurrence by bucketing severities by
//! calendar position and measuring how far the bucket means spread
//! around their grand mean. All calendar positions are taken in UTC.

use super::stats::{mean, population_variance};
use super::types::{CyclicalPattern, SymptomObservation};
use chrono::Datelike;

/// Observations needed before any cycle is looked for
pub const MIN_OBSERVATIONS_WEEKLY: usize = 14;

/// Observations needed before the monthly cycle is looked for
pub const MIN_OBSERVATIONS_MONTHLY: usize = 60;

/// Bucket-mean variance that maps to a weekly strength of 1.0
const WEEKLY_VARIANCE_SCALE: f64 = 10.0;

/// Bucket-mean variance that maps to a monthly strength of 1.0
const MONTHLY_VARIANCE_SCALE: f64 = 8.0;

/// Strength a cycle must exceed to be reported
const MIN_PATTERN_STRENGTH: f64 = 0.1;

/// Detect weekly and monthly severity cycles
///
/// Returns at most two findings, weekly first. Fewer than 14 observations
/// yields nothing; the monthly cycle additionally needs 60.
pub fn detect_cyclical_patterns(observations: &[SymptomObservation]) -> Vec<CyclicalPattern> {
    let mut patterns = Vec::new();

    if observations.len() < MIN_OBSERVATIONS_WEEKLY {
        tracing::debug!(
            observations = observations.len(),
            required = MIN_OBSERVATIONS_WEEKLY,
            "Not enough observations for cycle detection"
        );
        return patterns;
    }

    let weekly = weekly_strength(observations);
    if weekly > MIN_PATTERN_STRENGTH {
        patterns.push(CyclicalPattern {
            period_days: 7,
            confidence_percent: (weekly * 100.0).round(),
            description: "weekly pattern detected".to_string(),
        });
    }

    if observations.len() >= MIN_OBSERVATIONS_MONTHLY {
        let monthly = monthly_strength(observations);
        if monthly > MIN_PATTERN_STRENGTH {
            patterns.push(CyclicalPattern {
                period_days: 28,
                confidence_percent: (monthly * 100.0).round(),
                description: "monthly pattern detected".to_string(),
            });
        }
    }

    patterns
}

/// Spread of day-of-week means (Sunday = bucket 0), scaled to [0, 1]
fn weekly_strength(observations: &[SymptomObservation]) -> f64 {
    let mut buckets: [Vec<f64>; 7] = Default::default();

    for obs in observations {
        let day = obs.observed_at.weekday().num_days_from_sunday() as usize;
        buckets[day].push(obs.severity_value());
    }

    bucket_strength(&buckets, WEEKLY_VARIANCE_SCALE)
}

/// Spread of week-of-month means, scaled to [0, 1]
///
/// Days 1-7 fall in bucket 0 through days 22-28 in bucket 3; days 29-31
/// are left out so every bucket covers exactly seven days.
fn monthly_strength(observations: &[SymptomObservation]) -> f64 {
    let mut buckets: [Vec<f64>; 4] = Default::default();

    for obs in observations {
        let day_of_month = obs.observed_at.day() as usize;
        if day_of_month > 28 {
            continue;
        }
        buckets[(day_of_month - 1) / 7].push(obs.severity_value());
    }

    bucket_strength(&buckets, MONTHLY_VARIANCE_SCALE)
}

/// Population variance of the non-empty bucket means, divided by `scale`
/// and clamped to [0, 1]
fn bucket_strength(buckets: &[Vec<f64>], scale: f64) -> f64 {
    let means: Vec<f64> = buckets
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| mean(b))
        .collect();

    (population_variance(&means) / scale).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{daily_series, obs};

    /// `days` daily observations starting on a Monday, spiking every Monday
    fn monday_spikes(days: usize) -> Vec<SymptomObservation> {
        let severities: Vec<u8> = (0..days).map(|d| if d % 7 == 0 { 9 } else { 2 }).collect();
        daily_series("bloating", &severities)
    }

    #[test]
    fn test_thirteen_observations_is_not_enough() {
        let observations = monday_spikes(13);
        assert!(detect_cyclical_patterns(&observations).is_empty());
    }

    #[test]
    fn test_weekly_pattern_detected() {
        let observations = monday_spikes(14);
        let patterns = detect_cyclical_patterns(&observations);

        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].period_days, 7);
        assert!(patterns[0].confidence_percent > 10.0);
        assert_eq!(patterns[0].description, "weekly pattern detected");
        // Bucket means: one 9 and six 2s → variance 6 → strength 0.6
        assert_eq!(patterns[0].confidence_percent, 60.0);
    }

    #[test]
    fn test_uniform_severity_has_no_pattern() {
        let observations = daily_series("bloating", &[5; 30]);
        assert!(detect_cyclical_patterns(&observations).is_empty());
    }

    #[test]
    fn test_strength_is_clamped() {
        // Sun/Tue/Thu/Sat at 10, the rest at 1: variance of means ≈ 19.8
        let severities: Vec<u8> = (0..14)
            .map(|d| if (d + 1) % 7 % 2 == 0 { 10 } else { 1 })
            .collect();
        let observations = daily_series("bloating", &severities);
        let patterns = detect_cyclical_patterns(&observations);

        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].confidence_percent, 100.0);
    }

    #[test]
    fn test_unlogged_weekdays_are_ignored() {
        // Only Mondays (7) and Tuesdays (3): variance of [7, 3] is 4 → 40%.
        // Counting the five empty weekdays as zero would give 62%.
        let observations: Vec<SymptomObservation> = (0..7)
            .flat_map(|week| [obs("fatigue", 7, week * 7), obs("fatigue", 3, week * 7 + 1)])
            .collect();
        assert_eq!(observations.len(), 14);

        let patterns = detect_cyclical_patterns(&observations);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].period_days, 7);
        assert_eq!(patterns[0].confidence_percent, 40.0);
    }

    #[test]
    fn test_monthly_needs_sixty_observations() {
        // First week of each month is severe; 59 observations skip the monthly check
        let spiky_month = |count: usize| -> Vec<SymptomObservation> {
            (0..count as i64)
                .map(|d| {
                    let o = obs("cramps", 1, d);
                    let sev = if o.observed_at.day() <= 7 { 10 } else { 1 };
                    obs("cramps", sev, d)
                })
                .collect()
        };

        let short = detect_cyclical_patterns(&spiky_month(59));
        assert!(short.iter().all(|p| p.period_days != 28));

        let long = detect_cyclical_patterns(&spiky_month(90));
        let monthly = long.iter().find(|p| p.period_days == 28).unwrap();
        assert_eq!(monthly.description, "monthly pattern detected");
        assert!(monthly.confidence_percent > 10.0);
        assert_eq!(long.last().unwrap().period_days, 28);
    }

    #[test]
    fn test_days_after_28_excluded_from_monthly_buckets() {
        // Only days 29-31 are severe, so the four monthly buckets stay flat
        let observations: Vec<SymptomObservation> = (0..120)
            .map(|d| {
                let o = obs("cramps", 1, d);
                let sev = if o.observed_at.day() > 28 { 10 } else { 3 };
                obs("cramps", sev, d)
            })
            .collect();

        let patterns = detect_cyclical_patterns(&observations);
        assert!(patterns.iter().all(|p| p.period_days != 28));
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_cyclical_patterns(&[]).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let observations = monday_spikes(21);
        assert_eq!(
            detect_cyclical_patterns(&observations),
            detect_cyclical_patterns(&observations)
        );
    }
}
