use crate::CoreError;

/// Floating point type used throughout the system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-6,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Division that falls back instead of emitting Inf/NaN when the
/// denominator is effectively zero.
pub fn safe_div(num: Real, den: Real, fallback: Real) -> Real {
    if den.abs() < 1e-12 {
        fallback
    } else {
        num / den
    }
}

/// Square root with the argument clamped non-negative first.
pub fn safe_sqrt(v: Real) -> Real {
    v.max(0.0).sqrt()
}

/// Natural log of a volume/pressure ratio for expansion work terms.
/// Ratios at or below 1 would flip the sign of the work integral, so the
/// ratio is clamped slightly above unity before taking the log.
pub fn expansion_ln(ratio: Real) -> Real {
    ratio.max(1.0 + 1e-9).ln()
}

/// Clamp to the unit interval.
pub fn clamp_unit(v: Real) -> Real {
    v.clamp(0.0, 1.0)
}
