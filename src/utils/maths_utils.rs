use statrs::statistics::Statistics;

/// Arithmetic mean, or `None` for an empty slice (statrs would hand back NaN).
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.mean())
}

/// Population standard deviation (divides by n, not n - 1).
/// Empty input yields 0.0 rather than NaN.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.population_std_dev()
}

/// Fractional change from `from` to `to`. A zero (or non-finite) base has no
/// meaningful change, so it maps to 0.0 instead of Infinity/NaN.
pub fn fractional_change(from: f64, to: f64) -> f64 {
    if from == 0.0 || !from.is_finite() || !to.is_finite() {
        return 0.0;
    }
    (to - from) / from
}

/// Round to a fixed number of decimal places. Monotonic, so ordering between
/// prices (and therefore the OHLC invariant) is preserved.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
