//! Symptom Correlation
//!
//! Calculates Pearson correlation between two symptom series after
//! aligning their observations in time, and between every pair of
//! symptoms found in a single log.

use super::stats::pearson_correlation;
use super::types::{CorrelationResult, SymptomCorrelation, SymptomObservation};
use std::collections::HashMap;

/// Observations further apart than this are never paired
pub const ALIGNMENT_WINDOW_MS: i64 = 24 * 3600 * 1000;

/// Minimum points each series needs before alignment is attempted
const MIN_SERIES_POINTS: usize = 2;

/// Minimum aligned pairs needed for a coefficient
const MIN_ALIGNED_PAIRS: usize = 3;

/// Correlate the severities of two symptom series
///
/// Each point of `series_a` is paired with the *first* point of `series_b`
/// (in input order) lying strictly within 24 hours of it. This is a
/// first-match rule, not nearest-in-time matching, so the result depends
/// on the order of `series_b`.
///
/// Returns 0 when either series has fewer than 2 points, fewer than 3
/// pairs line up, or either side has zero variance.
pub fn compute_correlation(series_a: &[SymptomObservation], series_b: &[SymptomObservation]) -> f64 {
    if series_a.len() < MIN_SERIES_POINTS || series_b.len() < MIN_SERIES_POINTS {
        return 0.0;
    }

    let (aligned_a, aligned_b) = align_within_window(series_a, series_b);

    if aligned_a.len() < MIN_ALIGNED_PAIRS {
        tracing::debug!(
            pairs = aligned_a.len(),
            "Not enough time-aligned pairs for correlation"
        );
        return 0.0;
    }

    pearson_correlation(&aligned_a, &aligned_b)
}

impl CorrelationResult {
    /// Correlate two symptom series; see [`compute_correlation`]
    pub fn between(series_a: &[SymptomObservation], series_b: &[SymptomObservation]) -> Self {
        Self {
            coefficient: compute_correlation(series_a, series_b),
        }
    }
}

/// Count how many points of `series_a` found a partner in `series_b`
pub fn aligned_pair_count(series_a: &[SymptomObservation], series_b: &[SymptomObservation]) -> usize {
    align_within_window(series_a, series_b).0.len()
}

/// Pair severities whose timestamps fall within [`ALIGNMENT_WINDOW_MS`]
fn align_within_window(
    series_a: &[SymptomObservation],
    series_b: &[SymptomObservation],
) -> (Vec<f64>, Vec<f64>) {
    let mut aligned_a = Vec::new();
    let mut aligned_b = Vec::new();

    for a in series_a {
        let ts = a.timestamp_millis();
        let partner = series_b
            .iter()
            .find(|b| (b.timestamp_millis() - ts).abs() < ALIGNMENT_WINDOW_MS);

        if let Some(b) = partner {
            aligned_a.push(a.severity_value());
            aligned_b.push(b.severity_value());
        }
    }

    (aligned_a, aligned_b)
}

/// Correlate every pair of symptoms recorded in one log
///
/// Symptoms are taken in first-seen order; pairs with a zero coefficient
/// are dropped. Results are sorted by absolute coefficient, strongest
/// first, keeping first-seen order for ties.
pub fn correlate_symptoms(observations: &[SymptomObservation]) -> Vec<SymptomCorrelation> {
    let series = group_by_symptom(observations);
    let mut correlations = Vec::new();

    for i in 0..series.len() {
        for j in (i + 1)..series.len() {
            let (name_a, a) = &series[i];
            let (name_b, b) = &series[j];

            let r = compute_correlation(a, b);
            if r != 0.0 {
                correlations.push(SymptomCorrelation::new(*name_a, *name_b, r));
            }
        }
    }

    correlations.sort_by(|a, b| {
        b.coefficient
            .abs()
            .partial_cmp(&a.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    correlations
}

/// Split a log into per-symptom series, preserving first-seen order
pub fn group_by_symptom(observations: &[SymptomObservation]) -> Vec<(&str, Vec<SymptomObservation>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<SymptomObservation>)> = Vec::new();

    for obs in observations {
        let name = obs.symptom_name.as_str();
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push((name, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(obs.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{daily_series, obs};

    #[test]
    fn test_perfect_positive_correlation() {
        let a = daily_series("bloating", &[1, 2, 3, 4, 5]);
        let b = daily_series("cramps", &[2, 4, 6, 8, 10]);
        let r = compute_correlation(&a, &b);
        assert!((r - 1.0).abs() < 1e-9, "expected 1.0, got {}", r);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let a = daily_series("bloating", &[1, 2, 3, 4, 5]);
        let b = daily_series("energy", &[10, 8, 6, 4, 2]);
        let r = compute_correlation(&a, &b);
        assert!((r + 1.0).abs() < 1e-9, "expected -1.0, got {}", r);
    }

    #[test]
    fn test_too_few_points_returns_zero() {
        let a = daily_series("bloating", &[5]);
        let b = daily_series("cramps", &[2, 4, 6]);
        assert_eq!(compute_correlation(&a, &b), 0.0);
        assert_eq!(compute_correlation(&b, &a), 0.0);
        assert_eq!(compute_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn test_fewer_than_three_aligned_pairs_returns_zero() {
        // Only days 0 and 1 overlap
        let a = vec![obs("a", 2, 0), obs("a", 5, 1), obs("a", 9, 10)];
        let b = vec![obs("b", 3, 0), obs("b", 6, 1), obs("b", 1, 20)];
        assert_eq!(aligned_pair_count(&a, &b), 2);
        assert_eq!(compute_correlation(&a, &b), 0.0);
    }

    #[test]
    fn test_zero_variance_returns_zero() {
        let a = daily_series("a", &[5, 5, 5, 5]);
        let b = daily_series("b", &[1, 4, 2, 8]);
        assert_eq!(compute_correlation(&a, &b), 0.0);
    }

    #[test]
    fn test_first_match_within_window() {
        // b has two candidates within 24h of a's first point; the first listed wins
        let a = vec![obs("a", 1, 0), obs("a", 2, 2), obs("a", 3, 4)];
        let b_first = vec![obs("b", 9, 0), obs("b", 1, 0), obs("b", 2, 2), obs("b", 3, 4)];
        let b_second = vec![obs("b", 1, 0), obs("b", 9, 0), obs("b", 2, 2), obs("b", 3, 4)];

        let r_first = compute_correlation(&a, &b_first);
        let r_second = compute_correlation(&a, &b_second);

        assert!((r_second - 1.0).abs() < 1e-9);
        assert!(r_first < 0.0);
    }

    #[test]
    fn test_exactly_24_hours_apart_does_not_align() {
        let a = daily_series("a", &[1, 2, 3, 4]);
        let b: Vec<_> = (0..4).map(|d| obs("b", 5, d + 100)).collect();
        assert_eq!(aligned_pair_count(&a, &b), 0);

        let shifted: Vec<_> = (1..5).map(|d| obs("b", 5, d)).collect();
        // Day 0 of `a` sits exactly 24h before the first `b` point and stays unpaired
        assert_eq!(aligned_pair_count(&a, &shifted), 3);
    }

    #[test]
    fn test_correlation_always_in_range() {
        let a = daily_series("a", &[1, 10, 1, 10, 1, 10, 3]);
        let b = daily_series("b", &[10, 1, 10, 1, 10, 1, 7]);
        let r = compute_correlation(&a, &b);
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn test_correlation_result_between() {
        let a = daily_series("a", &[1, 2, 3, 4]);
        let b = daily_series("b", &[2, 3, 4, 5]);
        let result = CorrelationResult::between(&a, &b);
        assert!((result.coefficient - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlate_symptoms_pairs_and_order() {
        let mut log = daily_series("bloating", &[1, 2, 3, 4, 5]);
        log.extend(daily_series("cramps", &[2, 4, 6, 8, 10]));
        log.extend(daily_series("fatigue", &[5, 3, 5, 3, 6]));

        let correlations = correlate_symptoms(&log);
        assert!(!correlations.is_empty());
        assert_eq!(correlations[0].symptom_a, "bloating");
        assert_eq!(correlations[0].symptom_b, "cramps");
        assert!((correlations[0].coefficient - 1.0).abs() < 1e-9);

        for pair in correlations.windows(2) {
            assert!(pair[0].coefficient.abs() >= pair[1].coefficient.abs());
        }
    }

    #[test]
    fn test_group_by_symptom_preserves_first_seen_order() {
        let log = vec![obs("cramps", 3, 0), obs("bloating", 4, 0), obs("cramps", 5, 1)];
        let groups = group_by_symptom(&log);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "cramps");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "bloating");
    }
}
