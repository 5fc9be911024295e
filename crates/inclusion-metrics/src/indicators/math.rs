//! Numeric primitives shared by every indicator formula.

/// Rounds to two decimal places, the reporting precision for all indicator
/// output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Division primitive used by every ratio in the catalogue.
///
/// Returns `0.0` when the denominator is zero or when the quotient is not a
/// finite number, otherwise the quotient rounded to two decimals. Raw report
/// counters are not validated here, so negative inputs produce negative
/// ratios.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let quotient = numerator / denominator;
    if !quotient.is_finite() {
        return 0.0;
    }
    round2(quotient)
}
