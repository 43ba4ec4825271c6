//! Float comparison and validation helpers.

use crate::BrewError;

/// Absolute plus relative comparison tolerances.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Loose absolute-only tolerance for display decisions, where values
    /// have been through unit conversions and a strict comparison would
    /// print "25.0g" instead of "25g".
    pub const DISPLAY: Tolerances = Tolerances { abs: 1e-6, rel: 0.0 };
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Whether a value rounds cleanly to an integer at display tolerance.
pub fn is_whole(v: f64) -> bool {
    nearly_equal(v, v.round(), Tolerances::DISPLAY)
}

/// Reject NaN and infinities from untrusted numeric input.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, BrewError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(BrewError::NonFinite { what, value: v })
    }
}
