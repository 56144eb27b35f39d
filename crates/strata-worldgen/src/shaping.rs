//! Scalar shaping functions applied to raw noise samples, computed via `libm`
//! so results do not depend on the platform libc.

/// Raise a signed value to a fractional exponent, preserving its sign.
///
/// `safe_pow(-0.5, 1.2) == -(0.5f64.powf(1.2))`. Plain `powf` on a negative
/// base with a fractional exponent yields NaN.
#[inline]
pub fn safe_pow(value: f64, exponent: f64) -> f64 {
    let magnitude = libm::pow(libm::fabs(value), exponent);
    if value < 0.0 { -magnitude } else { magnitude }
}

/// Two-argument distance blend used by the edge falloff.
///
/// The mean of the Chebyshev and Euclidean norms of `(a, b)`: square-ish near
/// the axes, rounded at the corners. Both arguments are normalized axis
/// offsets in `[0, 1]`.
#[inline]
pub fn falloff_norm(a: f64, b: f64) -> f64 {
    let a = libm::fabs(a);
    let b = libm::fabs(b);
    0.5 * a.max(b) + 0.5 * libm::sqrt(a * a + b * b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_safe_pow_preserves_sign() {
        let expected = 0.5f64.powf(1.2);
        let neg = safe_pow(-0.5, 1.2);
        let pos = safe_pow(0.5, 1.2);
        assert!(neg < 0.0, "safe_pow(-0.5, 1.2) must be negative, got {neg}");
        assert!(pos > 0.0, "safe_pow(0.5, 1.2) must be positive, got {pos}");
        assert!((neg.abs() - expected).abs() < EPSILON);
        assert!((pos - expected).abs() < EPSILON);
    }

    #[test]
    fn test_safe_pow_never_nan() {
        for i in -100..=100 {
            let v = i as f64 / 100.0;
            for e in [1.1, 1.2, 1.3, 0.5] {
                assert!(!safe_pow(v, e).is_nan(), "safe_pow({v}, {e}) is NaN");
            }
        }
        assert_eq!(safe_pow(0.0, 1.3), 0.0);
    }

    #[test]
    fn test_safe_pow_shrinks_unit_range() {
        // Exponents > 1 pull values in (-1, 1) towards zero.
        for v in [-0.9, -0.3, 0.3, 0.9] {
            assert!(safe_pow(v, 1.2).abs() < f64::abs(v));
        }
    }

    #[test]
    fn test_falloff_norm_axes_and_corners() {
        assert!((falloff_norm(0.0, 0.0)).abs() < EPSILON);
        assert!((falloff_norm(1.0, 0.0) - 1.0).abs() < EPSILON);
        assert!((falloff_norm(0.0, 1.0) - 1.0).abs() < EPSILON);
        let corner = falloff_norm(1.0, 1.0);
        assert!((corner - (0.5 + 0.5 * 2f64.sqrt())).abs() < EPSILON);
    }

    #[test]
    fn test_falloff_norm_is_symmetric_and_between_norms() {
        for (a, b) in [(0.2, 0.7), (0.5, 0.5), (0.9, 0.1)] {
            let n = falloff_norm(a, b);
            assert!((n - falloff_norm(b, a)).abs() < EPSILON);
            assert!(n >= f64::max(a, b) - EPSILON);
            assert!(n <= (a * a + b * b).sqrt() + EPSILON);
        }
    }
}
