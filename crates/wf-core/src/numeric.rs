//! Floating-point conventions shared by the wellflow crates.

/// Scalar type of every rate, pressure and connection factor.
pub type Real = f64;

/// Absolute/relative tolerance pair for comparing computed rates and
/// pressures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerance {
    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }

    /// `|a - b| <= max(abs, rel * max(|a|, |b|))`
    pub fn accepts(&self, a: Real, b: Real) -> bool {
        let scale = a.abs().max(b.abs());
        (a - b).abs() <= self.abs.max(self.rel * scale)
    }
}

impl Default for Tolerance {
    /// Rates in m³/s are O(1e-3), so the absolute floor sits well below them.
    fn default() -> Self {
        Self::new(1e-15, 1e-9)
    }
}

/// Finite and strictly positive.
pub fn is_positive_finite(v: Real) -> bool {
    v.is_finite() && v > 0.0
}

/// Keep an optional override only when it is finite and strictly positive.
pub fn usable_override(v: Option<Real>) -> Option<Real> {
    v.filter(|&x| is_positive_finite(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_scales_with_magnitude() {
        let tol = Tolerance::default();
        assert!(tol.accepts(2.0e7, 2.0e7 * (1.0 + 1e-12)));
        assert!(tol.accepts(0.0, 1e-16));
        assert!(!tol.accepts(1.0e-3, 1.001e-3));
        assert!(!tol.accepts(0.0, Real::NAN));
    }

    #[test]
    fn overrides_must_be_positive_and_finite() {
        assert_eq!(usable_override(Some(2.5e-12)), Some(2.5e-12));
        assert_eq!(usable_override(Some(0.0)), None);
        assert_eq!(usable_override(Some(-3.0)), None);
        assert_eq!(usable_override(Some(Real::NAN)), None);
        assert_eq!(usable_override(Some(Real::INFINITY)), None);
        assert_eq!(usable_override(None), None);
    }
}
