//! Core analytics data structures
//!
//! - [`SymptomObservation`]: one validated, timestamped severity rating
//! - [`ObservationRecord`]: the raw shape observations arrive in
//! - Result value objects produced by each analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{ObservationError, ObservationResult};

/// Lowest severity on the rating scale
pub const SEVERITY_MIN: u8 = 1;

/// Highest severity on the rating scale
pub const SEVERITY_MAX: u8 = 10;

/// A single symptom rating recorded by the user
///
/// Always constructed through validation, so the analytics can rely on a
/// non-empty name and a severity within [`SEVERITY_MIN`]..=[`SEVERITY_MAX`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObservationRecord")]
pub struct SymptomObservation {
    /// Symptom label, e.g. "bloating"
    pub symptom_name: String,
    /// Intensity on the 1-10 scale
    pub severity: u8,
    /// When the rating was recorded
    pub observed_at: DateTime<Utc>,
    /// Candidate trigger tags recorded alongside the rating
    pub context_factors: Vec<String>,
}

impl SymptomObservation {
    /// Create a validated observation with no context factors
    pub fn new(
        symptom_name: impl Into<String>,
        severity: u8,
        observed_at: DateTime<Utc>,
    ) -> ObservationResult<Self> {
        let symptom_name = symptom_name.into().trim().to_string();
        if symptom_name.is_empty() {
            return Err(ObservationError::EmptySymptomName);
        }
        if !(SEVERITY_MIN..=SEVERITY_MAX).contains(&severity) {
            return Err(ObservationError::SeverityOutOfRange(f64::from(severity)));
        }

        Ok(Self {
            symptom_name,
            severity,
            observed_at,
            context_factors: Vec::new(),
        })
    }

    /// Add a context factor (builder pattern)
    ///
    /// Blank factors are ignored.
    pub fn factor(mut self, factor: impl Into<String>) -> Self {
        let factor = factor.into().trim().to_string();
        if !factor.is_empty() {
            self.context_factors.push(factor);
        }
        self
    }

    /// Add several context factors (builder pattern)
    pub fn factors<I, S>(self, factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        factors.into_iter().fold(self, |obs, f| obs.factor(f))
    }

    /// Severity as a float for statistics
    pub fn severity_value(&self) -> f64 {
        f64::from(self.severity)
    }

    /// Timestamp in milliseconds since epoch
    pub fn timestamp_millis(&self) -> i64 {
        self.observed_at.timestamp_millis()
    }
}

/// Raw, unvalidated observation as found in files and request bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub symptom_name: String,
    pub severity: f64,
    pub observed_at: DateTime<Utc>,
    #[serde(default)]
    pub context_factors: Option<Vec<String>>,
}

impl TryFrom<ObservationRecord> for SymptomObservation {
    type Error = ObservationError;

    fn try_from(record: ObservationRecord) -> Result<Self, Self::Error> {
        let severity = record.severity;
        if !severity.is_finite()
            || severity < f64::from(SEVERITY_MIN)
            || severity > f64::from(SEVERITY_MAX)
        {
            return Err(ObservationError::SeverityOutOfRange(severity));
        }
        if severity.fract() != 0.0 {
            return Err(ObservationError::FractionalSeverity(severity));
        }

        let observation =
            SymptomObservation::new(record.symptom_name, severity as u8, record.observed_at)?;
        Ok(observation.factors(record.context_factors.unwrap_or_default()))
    }
}

impl From<&SymptomObservation> for ObservationRecord {
    fn from(obs: &SymptomObservation) -> Self {
        Self {
            symptom_name: obs.symptom_name.clone(),
            severity: obs.severity_value(),
            observed_at: obs.observed_at,
            context_factors: if obs.context_factors.is_empty() {
                None
            } else {
                Some(obs.context_factors.clone())
            },
        }
    }
}

/// Pearson coefficient between two symptom series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Coefficient in [-1, 1]; 0 when there is not enough aligned data
    pub coefficient: f64,
}

/// A recurring severity cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclicalPattern {
    /// Cycle length: 7 (weekly) or 28 (monthly)
    pub period_days: u32,
    /// Pattern strength as a percentage (0-100)
    pub confidence_percent: f64,
    pub description: String,
}

/// Direction of a severity trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Severity is decreasing
    Improving,
    /// Severity is increasing
    Worsening,
    /// No meaningful change
    Stable,
}

impl TrendDirection {
    /// Classify a regression slope
    pub fn from_slope(slope: f64) -> Self {
        if slope < -0.1 {
            TrendDirection::Improving
        } else if slope > 0.1 {
            TrendDirection::Worsening
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Worsening => "worsening",
            TrendDirection::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Smoothed severity trend over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// min(|slope| * 20, 100)
    pub confidence_percent: f64,
    /// Signed regression slope; negative means decreasing severity
    pub slope_per_window: f64,
    pub description: String,
}

/// A context factor associated with shifted severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerFinding {
    /// The context factor label
    pub trigger: String,
    /// Normalized mean offset from baseline, in [-1, 1]
    pub correlation: f64,
    /// How many times the factor was recorded
    pub occurrences: usize,
    pub description: String,
}

/// Human-readable strength of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    Negligible,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        let abs_r = r.abs();
        if abs_r > 0.7 {
            CorrelationStrength::Strong
        } else if abs_r > 0.5 {
            CorrelationStrength::Moderate
        } else if abs_r > 0.3 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::Negligible
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::Negligible => "negligible",
        }
    }
}

/// Sign of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
    None,
}

impl CorrelationDirection {
    pub fn from_coefficient(r: f64) -> Self {
        if r > 0.0 {
            CorrelationDirection::Positive
        } else if r < 0.0 {
            CorrelationDirection::Negative
        } else {
            CorrelationDirection::None
        }
    }
}

/// Correlation between two named symptoms from the same log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomCorrelation {
    pub symptom_a: String,
    pub symptom_b: String,
    /// Pearson coefficient (-1 to 1)
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

impl SymptomCorrelation {
    pub fn new(symptom_a: impl Into<String>, symptom_b: impl Into<String>, coefficient: f64) -> Self {
        Self {
            symptom_a: symptom_a.into(),
            symptom_b: symptom_b.into(),
            coefficient,
            strength: CorrelationStrength::from_coefficient(coefficient),
            direction: CorrelationDirection::from_coefficient(coefficient),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_observation_validation() {
        let obs = SymptomObservation::new("  bloating ", 6, ts()).unwrap();
        assert_eq!(obs.symptom_name, "bloating");
        assert_eq!(obs.severity_value(), 6.0);

        assert_eq!(
            SymptomObservation::new("   ", 5, ts()),
            Err(ObservationError::EmptySymptomName)
        );
        assert_eq!(
            SymptomObservation::new("cramps", 0, ts()),
            Err(ObservationError::SeverityOutOfRange(0.0))
        );
        assert!(SymptomObservation::new("cramps", 11, ts()).is_err());
    }

    #[test]
    fn test_factor_builder_drops_blank_tags() {
        let obs = SymptomObservation::new("bloating", 4, ts())
            .unwrap()
            .factor(" dairy ")
            .factor("")
            .factors(["stress", "  "]);
        assert_eq!(obs.context_factors, vec!["dairy", "stress"]);
    }

    #[test]
    fn test_record_conversion() {
        let record = ObservationRecord {
            symptom_name: "fatigue".to_string(),
            severity: 7.0,
            observed_at: ts(),
            context_factors: Some(vec!["poor sleep".to_string()]),
        };
        let obs = SymptomObservation::try_from(record).unwrap();
        assert_eq!(obs.severity, 7);
        assert_eq!(obs.context_factors, vec!["poor sleep"]);

        let fractional = ObservationRecord {
            symptom_name: "fatigue".to_string(),
            severity: 6.5,
            observed_at: ts(),
            context_factors: None,
        };
        assert_eq!(
            SymptomObservation::try_from(fractional),
            Err(ObservationError::FractionalSeverity(6.5))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"{"symptom_name":"nausea","severity":3,"observed_at":"2024-01-15T10:30:00Z"}"#;
        let obs: SymptomObservation = serde_json::from_str(ok).unwrap();
        assert_eq!(obs.severity, 3);
        assert!(obs.context_factors.is_empty());

        let bad = r#"{"symptom_name":"nausea","severity":42,"observed_at":"2024-01-15T10:30:00Z"}"#;
        assert!(serde_json::from_str::<SymptomObservation>(bad).is_err());
    }

    #[test]
    fn test_trend_direction_from_slope() {
        assert_eq!(TrendDirection::from_slope(-0.5), TrendDirection::Improving);
        assert_eq!(TrendDirection::from_slope(0.5), TrendDirection::Worsening);
        assert_eq!(TrendDirection::from_slope(0.1), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_slope(-0.1), TrendDirection::Stable);
        assert_eq!(TrendDirection::Improving.to_string(), "improving");
    }

    #[test]
    fn test_correlation_strength() {
        assert_eq!(CorrelationStrength::from_coefficient(0.8), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(-0.75), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.6), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(-0.35), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::from_coefficient(0.2), CorrelationStrength::Negligible);
    }

    #[test]
    fn test_symptom_correlation_serializes() {
        let corr = SymptomCorrelation::new("bloating", "fatigue", 0.72);
        let json = serde_json::to_string(&corr).unwrap();
        assert!(json.contains("\"coefficient\":0.72"));
        assert!(json.contains("\"strength\":\"strong\""));
        assert!(json.contains("\"direction\":\"positive\""));
    }
}
