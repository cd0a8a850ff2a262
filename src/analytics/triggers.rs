//! Trigger Identification
//!
//! Compares the mean severity of observations carrying each context
//! factor against the mean severity of the whole log.

use super::stats::mean;
use super::types::{SymptomObservation, TriggerFinding};
use std::collections::HashMap;

/// Times a factor must be recorded before it is considered
const MIN_OCCURRENCES: usize = 2;

/// Severity offset that maps to a score of 1.0 (the width of the scale)
const SEVERITY_NORMALIZER: f64 = 10.0;

/// Scores at or below this magnitude are treated as noise
const MIN_SCORE: f64 = 0.05;

/// Identify context factors associated with shifted severity
///
/// The `correlation` reported for each factor is
/// `(mean severity with factor - mean severity of all observations) / 10`.
/// It is a normalized mean offset, not a statistical correlation
/// coefficient, and downstream thresholds are tuned to this exact formula.
///
/// Factors recorded fewer than twice, or with a score magnitude of 0.05
/// or less, are left out. Results are ordered by score magnitude, strongest
/// first; factors with equal magnitude keep first-seen order.
pub fn identify_triggers(observations: &[SymptomObservation]) -> Vec<TriggerFinding> {
    if observations.is_empty() {
        return Vec::new();
    }

    let baseline = mean(
        &observations
            .iter()
            .map(SymptomObservation::severity_value)
            .collect::<Vec<_>>(),
    );

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut factors: Vec<(&str, Vec<f64>)> = Vec::new();

    for obs in observations {
        for factor in &obs.context_factors {
            let slot = *index.entry(factor.as_str()).or_insert_with(|| {
                factors.push((factor.as_str(), Vec::new()));
                factors.len() - 1
            });
            factors[slot].1.push(obs.severity_value());
        }
    }

    let mut findings: Vec<TriggerFinding> = factors
        .into_iter()
        .filter(|(_, severities)| severities.len() >= MIN_OCCURRENCES)
        .filter_map(|(factor, severities)| {
            let score = ((mean(&severities) - baseline) / SEVERITY_NORMALIZER).clamp(-1.0, 1.0);
            if score.abs() <= MIN_SCORE {
                return None;
            }
            Some(TriggerFinding {
                trigger: factor.to_string(),
                correlation: score,
                occurrences: severities.len(),
                description: describe(factor, score),
            })
        })
        .collect();

    // sort_by is stable, so ties keep first-seen order
    findings.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    findings
}

fn describe(factor: &str, score: f64) -> String {
    let percent = (score.abs() * 100.0).round();
    if score > 0.0 {
        format!("{} appears to worsen symptoms ({}% increase)", factor, percent)
    } else {
        format!("{} appears to improve symptoms ({}% decrease)", factor, percent)
    }
}
