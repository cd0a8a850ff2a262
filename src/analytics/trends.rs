//! Trend Detection
//!
//! Smooths severities with a trailing moving average and fits a
//! least-squares line through the smoothed series.

use super::stats::{moving_average, regression_slope};
use super::types::{SymptomObservation, TrendDirection, TrendResult};

/// Observations needed before a trend is estimated
pub const MIN_OBSERVATIONS: usize = 7;

/// Largest moving-average window
const MAX_WINDOW: usize = 7;

/// Smoothed points needed for a regression
const MIN_SMOOTHED_POINTS: usize = 3;

/// Detect the overall severity trend
///
/// Returns zero or one result. Input order does not matter: observations
/// are stable-sorted by time before smoothing.
pub fn detect_trends(observations: &[SymptomObservation]) -> Vec<TrendResult> {
    if observations.len() < MIN_OBSERVATIONS {
        tracing::debug!(
            observations = observations.len(),
            required = MIN_OBSERVATIONS,
            "Not enough observations for trend detection"
        );
        return Vec::new();
    }

    let mut sorted: Vec<&SymptomObservation> = observations.iter().collect();
    sorted.sort_by_key(|obs| obs.observed_at);
    let severities: Vec<f64> = sorted.iter().map(|obs| obs.severity_value()).collect();

    let window = MAX_WINDOW.min(severities.len() / 3);
    let smoothed = moving_average(&severities, window);
    if smoothed.len() < MIN_SMOOTHED_POINTS {
        return Vec::new();
    }

    let slope = regression_slope(&smoothed);
    let direction = TrendDirection::from_slope(slope);

    vec![TrendResult {
        direction,
        confidence_percent: (slope.abs() * 20.0).min(100.0),
        slope_per_window: slope,
        description: describe(direction, slope),
    }]
}

fn describe(direction: TrendDirection, slope: f64) -> String {
    let magnitude = slope.abs();
    match direction {
        TrendDirection::Improving => format!(
            "Symptoms are improving with an average decrease of {:.2} severity points per week",
            magnitude
        ),
        TrendDirection::Worsening => format!(
            "Symptoms are worsening with an average increase of {:.2} severity points per week",
            magnitude
        ),
        TrendDirection::Stable => format!(
            "Symptom severity has remained stable (change of {:.2} points per week)",
            magnitude
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::daily_series;

    #[test]
    fn test_decreasing_series_is_improving() {
        let observations = daily_series("bloating", &[9, 8, 7, 6, 5, 4, 3]);
        let trends = detect_trends(&observations);

        assert_eq!(trends.len(), 1);
        let trend = &trends[0];
        assert_eq!(trend.direction, TrendDirection::Improving);
        assert!(trend.slope_per_window < 0.0);
        // Window 2 over a slope of -1 per day keeps the slope at -1
        assert!((trend.slope_per_window + 1.0).abs() < 1e-9);
        assert!((trend.confidence_percent - 20.0).abs() < 1e-9);
        assert!(trend.description.contains("decrease of 1.00"));
    }

    #[test]
    fn test_increasing_series_is_worsening() {
        let observations = daily_series("bloating", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let trends = detect_trends(&observations);

        assert_eq!(trends[0].direction, TrendDirection::Worsening);
        assert!(trends[0].slope_per_window > 0.0);
        assert!(trends[0].description.contains("increase"));
    }

    #[test]
    fn test_flat_series_is_stable() {
        let observations = daily_series("bloating", &[5; 12]);
        let trends = detect_trends(&observations);

        assert_eq!(trends[0].direction, TrendDirection::Stable);
        assert_eq!(trends[0].confidence_percent, 0.0);
        assert!(trends[0].description.contains("stable"));
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let mut observations = daily_series("bloating", &[9, 8, 7, 6, 5, 4, 3]);
        observations.reverse();
        let trends = detect_trends(&observations);
        assert_eq!(trends[0].direction, TrendDirection::Improving);
    }

    #[test]
    fn test_too_few_observations() {
        let observations = daily_series("bloating", &[9, 8, 7, 6, 5, 4]);
        assert!(detect_trends(&observations).is_empty());
        assert!(detect_trends(&[]).is_empty());
    }

    #[test]
    fn test_step_change_confidence_in_range() {
        let mut severities = vec![1u8; 9];
        severities.extend([10u8; 12]);
        let observations = daily_series("bloating", &severities);
        let trends = detect_trends(&observations);

        assert_eq!(trends[0].direction, TrendDirection::Worsening);
        assert!((0.0..=100.0).contains(&trends[0].confidence_percent));
    }

    #[test]
    fn test_deterministic() {
        let observations = daily_series("bloating", &[3, 5, 4, 6, 5, 7, 6, 8]);
        assert_eq!(detect_trends(&observations), detect_trends(&observations));
    }
}
