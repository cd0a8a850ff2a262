//! Statistics helpers
//!
//! Small numeric building blocks shared by the analyses. Every function
//! returns 0 (or an empty vector) for degenerate input instead of NaN.

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance around the mean, 0 for an empty slice
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Calculate Pearson correlation coefficient
///
/// Returns a value between -1 and 1:
/// - 1: perfect positive correlation
/// - 0: no correlation, mismatched lengths, or zero variance
/// - -1: perfect negative correlation
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let variance_product = (n * sum_x2 - sum_x.powi(2)) * (n * sum_y2 - sum_y.powi(2));

    // Rounding can push a zero-variance product slightly negative
    if variance_product <= 0.0 {
        return 0.0;
    }

    let r = numerator / variance_product.sqrt();
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Ordinary least-squares slope of `values` against their index (0, 1, 2, ...)
pub fn regression_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, v)| i as f64 * v).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();

    let denominator = n * sum_x2 - sum_x.powi(2);
    if denominator == 0.0 {
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Trailing simple moving average
///
/// Produces `values.len() - window + 1` points, or none when the window is
/// zero or longer than the input.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return Vec::new();
    }
    values.windows(window).map(mean).collect()
}
