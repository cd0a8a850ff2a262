//! Insight Generation
//!
//! Turns structured findings into short sentences for the dashboard and
//! for the AI companion's prompt context. Rule-based and deterministic:
//! the same findings always produce the same sentences in the same order.

use super::types::{CyclicalPattern, SymptomCorrelation, TrendResult, TriggerFinding};
use serde::{Deserialize, Serialize};

/// Significance cutoffs applied before a finding becomes a sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightThresholds {
    /// Patterns must exceed this confidence (percent)
    #[serde(default = "default_pattern_confidence")]
    pub pattern_confidence: f64,

    /// Trends must exceed this confidence (percent)
    #[serde(default = "default_trend_confidence")]
    pub trend_confidence: f64,

    /// Only this many of the strongest triggers are mentioned
    #[serde(default = "default_max_triggers")]
    pub max_triggers: usize,

    /// Pairwise correlations must exceed this absolute coefficient
    #[serde(default = "default_correlation_strength")]
    pub correlation_strength: f64,
}

fn default_pattern_confidence() -> f64 {
    70.0
}

fn default_trend_confidence() -> f64 {
    60.0
}

fn default_max_triggers() -> usize {
    3
}

fn default_correlation_strength() -> f64 {
    0.5
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            pattern_confidence: default_pattern_confidence(),
            trend_confidence: default_trend_confidence(),
            max_triggers: default_max_triggers(),
            correlation_strength: default_correlation_strength(),
        }
    }
}

/// Generate insight sentences using the default thresholds
///
/// Order: patterns, trends, triggers (strongest first, at most three),
/// pairwise correlations.
pub fn generate_pattern_insights(
    patterns: &[CyclicalPattern],
    trends: &[TrendResult],
    triggers: &[TriggerFinding],
    correlations: &[SymptomCorrelation],
) -> Vec<String> {
    generate_pattern_insights_with(
        patterns,
        trends,
        triggers,
        correlations,
        &InsightThresholds::default(),
    )
}

/// Generate insight sentences with custom thresholds
pub fn generate_pattern_insights_with(
    patterns: &[CyclicalPattern],
    trends: &[TrendResult],
    triggers: &[TriggerFinding],
    correlations: &[SymptomCorrelation],
    thresholds: &InsightThresholds,
) -> Vec<String> {
    let mut insights = Vec::new();

    insights.extend(
        patterns
            .iter()
            .filter(|p| p.confidence_percent > thresholds.pattern_confidence)
            .map(pattern_sentence),
    );

    insights.extend(
        trends
            .iter()
            .filter(|t| t.confidence_percent > thresholds.trend_confidence)
            .map(|t| format!("{} ({:.0}% confidence).", t.description, t.confidence_percent)),
    );

    // Strongest by magnitude; sort_by is stable so ties keep input order
    let mut strongest: Vec<&TriggerFinding> = triggers.iter().collect();
    strongest.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    insights.extend(
        strongest
            .into_iter()
            .take(thresholds.max_triggers)
            .map(|t| format!("Possible trigger: {}.", t.description)),
    );

    insights.extend(
        correlations
            .iter()
            .filter(|c| c.coefficient.abs() > thresholds.correlation_strength)
            .map(correlation_sentence),
    );

    insights
}

fn pattern_sentence(pattern: &CyclicalPattern) -> String {
    match pattern.period_days {
        7 => format!(
            "Your symptoms follow a weekly pattern ({:.0}% confidence); some days of the week tend to be harder than others.",
            pattern.confidence_percent
        ),
        28 => format!(
            "Your symptoms follow a monthly pattern ({:.0}% confidence), recurring around the same point each month.",
            pattern.confidence_percent
        ),
        days => format!(
            "Your symptoms repeat roughly every {} days ({:.0}% confidence).",
            days, pattern.confidence_percent
        ),
    }
}

fn correlation_sentence(corr: &SymptomCorrelation) -> String {
    if corr.coefficient > 0.0 {
        format!(
            "{} and {} tend to flare up together ({} correlation, r = {:.2}).",
            corr.symptom_a,
            corr.symptom_b,
            corr.strength.as_str(),
            corr.coefficient
        )
    } else {
        format!(
            "When {} is worse, {} tends to be milder ({} correlation, r = {:.2}).",
            corr.symptom_a,
            corr.symptom_b,
            corr.strength.as_str(),
            corr.coefficient
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::types::TrendDirection;

    fn pattern(period_days: u32, confidence_percent: f64) -> CyclicalPattern {
        CyclicalPattern {
            period_days,
            confidence_percent,
            description: "pattern".to_string(),
        }
    }

    fn trend(confidence_percent: f64) -> TrendResult {
        TrendResult {
            direction: TrendDirection::Improving,
            confidence_percent,
            slope_per_window: -4.0,
            description: "Symptoms are improving with an average decrease of 4.00 severity points per week"
                .to_string(),
        }
    }

    fn trigger(name: &str, correlation: f64) -> TriggerFinding {
        TriggerFinding {
            trigger: name.to_string(),
            correlation,
            occurrences: 2,
            description: format!("{} appears to worsen symptoms", name),
        }
    }

    #[test]
    fn test_thresholds_filter_findings() {
        let patterns = vec![pattern(7, 85.0), pattern(28, 70.0)];
        let trends = vec![trend(60.0)];
        let correlations = vec![SymptomCorrelation::new("bloating", "cramps", 0.5)];

        let insights = generate_pattern_insights(&patterns, &trends, &[], &correlations);

        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("weekly pattern (85% confidence)"));
    }

    #[test]
    fn test_order_and_trigger_limit() {
        let patterns = vec![pattern(28, 90.0)];
        let trends = vec![trend(80.0)];
        let triggers = vec![
            trigger("dairy", 0.4),
            trigger("stress", 0.3),
            trigger("gluten", 0.2),
            trigger("coffee", 0.1),
        ];
        let correlations = vec![
            SymptomCorrelation::new("bloating", "cramps", 0.8),
            SymptomCorrelation::new("bloating", "energy", -0.6),
        ];

        let insights = generate_pattern_insights(&patterns, &trends, &triggers, &correlations);

        assert_eq!(insights.len(), 7);
        assert!(insights[0].contains("monthly pattern"));
        assert!(insights[1].starts_with("Symptoms are improving"));
        assert!(insights[1].ends_with("(80% confidence)."));
        assert_eq!(insights[2], "Possible trigger: dairy appears to worsen symptoms.");
        assert!(insights[4].contains("gluten"));
        assert!(!insights.iter().any(|i| i.contains("coffee")));
        assert_eq!(
            insights[5],
            "bloating and cramps tend to flare up together (strong correlation, r = 0.80)."
        );
        assert_eq!(
            insights[6],
            "When bloating is worse, energy tends to be milder (moderate correlation, r = -0.60)."
        );
    }

    #[test]
    fn test_unsorted_triggers_keep_strongest() {
        let triggers = vec![
            trigger("a", 0.06),
            trigger("b", 0.07),
            trigger("c", 0.08),
            trigger("strongest", 0.9),
            trigger("relief", -0.5),
        ];

        let insights = generate_pattern_insights(&[], &[], &triggers, &[]);

        assert_eq!(
            insights,
            vec![
                "Possible trigger: strongest appears to worsen symptoms.",
                "Possible trigger: relief appears to worsen symptoms.",
                "Possible trigger: c appears to worsen symptoms.",
            ]
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = InsightThresholds {
            pattern_confidence: 10.0,
            max_triggers: 1,
            ..Default::default()
        };
        let patterns = vec![pattern(7, 20.0)];
        let triggers = vec![trigger("dairy", 0.4), trigger("stress", 0.3)];

        let insights = generate_pattern_insights_with(&patterns, &[], &triggers, &[], &thresholds);
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn test_empty_findings() {
        assert!(generate_pattern_insights(&[], &[], &[], &[]).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let patterns = vec![pattern(7, 90.0)];
        let triggers = vec![trigger("dairy", 0.4)];
        let a = generate_pattern_insights(&patterns, &[], &triggers, &[]);
        let b = generate_pattern_insights(&patterns, &[], &triggers, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_thresholds_deserialize_with_defaults() {
        let thresholds: InsightThresholds = toml::from_str("trend_confidence = 40.0").unwrap();
        assert_eq!(thresholds.trend_confidence, 40.0);
        assert_eq!(thresholds.pattern_confidence, 70.0);
        assert_eq!(thresholds.max_triggers, 3);
    }
}
