//! Derived ship rating.

use crate::validate::MAX_PROD_YEAR;

/// Round a value to two decimal places, half-up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive the ship rating from its stored attributes.
///
/// `rating = round2(80 * speed * k / (3019 - prod_year + 1))` where `k` is
/// `0.5` for a used ship and `1.0` otherwise. The denominator is at least 1
/// for any valid production year, so the computation never fails.
pub fn compute_rating(speed: f64, is_used: bool, prod_year: i32) -> f64 {
    let coefficient = if is_used { 0.5 } else { 1.0 };
    let age_span = f64::from(MAX_PROD_YEAR - prod_year + 1);
    round2(80.0 * speed * coefficient / age_span)
}
