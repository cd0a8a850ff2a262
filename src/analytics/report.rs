//! Pattern Report
//!
//! Runs every analysis over one observation log and bundles the results
//! for the dashboard and the AI companion.

use super::correlation::{correlate_symptoms, group_by_symptom};
use super::cycles::detect_cyclical_patterns;
use super::insights::{generate_pattern_insights_with, InsightThresholds};
use super::stats::mean;
use super::trends::detect_trends;
use super::triggers::identify_triggers;
use super::types::{
    CyclicalPattern, SymptomCorrelation, SymptomObservation, TrendResult, TriggerFinding,
};
use serde::{Deserialize, Serialize};

/// Findings for a single symptom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomSummary {
    pub symptom_name: String,
    pub observation_count: usize,
    /// Mean severity, rounded to one decimal
    pub mean_severity: f64,
    pub patterns: Vec<CyclicalPattern>,
    pub trend: Option<TrendResult>,
}

/// Everything the analytics found in one log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub observation_count: usize,
    /// Per-symptom breakdown in first-seen order
    pub symptoms: Vec<SymptomSummary>,
    /// Cycles across the whole log
    pub patterns: Vec<CyclicalPattern>,
    /// Trend across the whole log
    pub trends: Vec<TrendResult>,
    pub triggers: Vec<TriggerFinding>,
    /// Pairwise symptom correlations, strongest first
    pub correlations: Vec<SymptomCorrelation>,
    pub insights: Vec<String>,
}

/// Symptom analytics facade
///
/// Holds only the insight thresholds; every call is a pure function of its
/// input, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct SymptomAnalytics {
    thresholds: InsightThresholds,
}

impl SymptomAnalytics {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Analyze a full observation log
    pub fn analyze(&self, observations: &[SymptomObservation]) -> PatternReport {
        let patterns = detect_cyclical_patterns(observations);
        let trends = detect_trends(observations);
        let triggers = identify_triggers(observations);
        let correlations = correlate_symptoms(observations);

        let symptoms: Vec<SymptomSummary> = group_by_symptom(observations)
            .into_iter()
            .map(|(name, series)| summarize(name, &series))
            .collect();

        let insights = self.insights(&patterns, &trends, &triggers, &correlations);

        tracing::debug!(
            observations = observations.len(),
            symptoms = symptoms.len(),
            patterns = patterns.len(),
            trends = trends.len(),
            triggers = triggers.len(),
            correlations = correlations.len(),
            insights = insights.len(),
            "Pattern report generated"
        );

        PatternReport {
            observation_count: observations.len(),
            symptoms,
            patterns,
            trends,
            triggers,
            correlations,
            insights,
        }
    }

    /// Generate insight sentences with this instance's thresholds
    pub fn insights(
        &self,
        patterns: &[CyclicalPattern],
        trends: &[TrendResult],
        triggers: &[TriggerFinding],
        correlations: &[SymptomCorrelation],
    ) -> Vec<String> {
        generate_pattern_insights_with(patterns, trends, triggers, correlations, &self.thresholds)
    }
}

fn summarize(name: &str, series: &[SymptomObservation]) -> SymptomSummary {
    let severities: Vec<f64> = series.iter().map(SymptomObservation::severity_value).collect();

    SymptomSummary {
        symptom_name: name.to_string(),
        observation_count: series.len(),
        mean_severity: (mean(&severities) * 10.0).round() / 10.0,
        patterns: detect_cyclical_patterns(series),
        trend: detect_trends(series).into_iter().next(),
    }
}

/// Restrict a log to one symptom (case-insensitive)
pub fn filter_symptom(observations: &[SymptomObservation], symptom: &str) -> Vec<SymptomObservation> {
    observations
        .iter()
        .filter(|obs| obs.symptom_name.eq_ignore_ascii_case(symptom))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{daily_series, obs_with};
    use crate::analytics::types::TrendDirection;

    fn sample_log() -> Vec<SymptomObservation> {
        let mut log = daily_series("bloating", &[9, 8, 8, 7, 6, 6, 5, 4, 4, 3, 3, 2, 2, 1]);
        log.extend(daily_series("cramps", &[8, 7, 7, 6, 5, 5, 4, 3, 3, 2, 2, 1, 1, 1]));
        log.push(obs_with("bloating", 9, 20, &["dairy"]));
        log.push(obs_with("bloating", 10, 21, &["dairy"]));
        log
    }

    #[test]
    fn test_analyze_full_report() {
        let analytics = SymptomAnalytics::default();
        let log = sample_log();
        let report = analytics.analyze(&log);

        assert_eq!(report.observation_count, 30);
        assert_eq!(report.symptoms.len(), 2);
        assert_eq!(report.symptoms[0].symptom_name, "bloating");
        assert_eq!(report.symptoms[0].observation_count, 16);
        assert_eq!(
            report.symptoms[1].trend.as_ref().map(|t| t.direction),
            Some(TrendDirection::Improving)
        );

        assert_eq!(report.triggers.len(), 1);
        assert_eq!(report.triggers[0].trigger, "dairy");

        assert!(!report.correlations.is_empty());
        assert!(report.correlations[0].coefficient > 0.9);
        assert!(report
            .insights
            .iter()
            .any(|i| i.contains("bloating and cramps tend to flare up together")));
    }

    #[test]
    fn test_analyze_empty_log() {
        let report = SymptomAnalytics::default().analyze(&[]);
        assert_eq!(report.observation_count, 0);
        assert!(report.symptoms.is_empty());
        assert!(report.patterns.is_empty());
        assert!(report.trends.is_empty());
        assert!(report.triggers.is_empty());
        assert!(report.correlations.is_empty());
        assert!(report.insights.is_empty());
    }

    #[test]
    fn test_report_is_deterministic() {
        let analytics = SymptomAnalytics::default();
        let log = sample_log();
        assert_eq!(analytics.analyze(&log), analytics.analyze(&log));
    }

    #[test]
    fn test_filter_symptom() {
        let log = sample_log();
        assert_eq!(filter_symptom(&log, "CRAMPS").len(), 14);
        assert!(filter_symptom(&log, "nausea").is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let report = SymptomAnalytics::default().analyze(&sample_log());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["observation_count"], 30);
        assert_eq!(json["symptoms"][1]["trend"]["direction"], "improving");
    }
}
