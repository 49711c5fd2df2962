//! Small numeric and geometric helpers shared across the core modules.

pub mod geometry;

/// Clamps a normalized progress value into `[0, 1]`.
///
/// NaN maps to `0.0` so that a corrupted input degrades to the reactant geometry instead of
/// propagating through every derived quantity.
#[inline]
pub fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Clamps a value into `[min, max]`, mapping NaN to `min`.
#[inline]
pub fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
