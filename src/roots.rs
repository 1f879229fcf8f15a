//! Bounded scalar root finding.
//!
//! Newton steps safeguarded by bisection: a Newton step that leaves the
//! current bracket, or a flat derivative, falls back to halving the bracket.
//! The iteration count is capped so "no root" is a defined outcome.

/// Maximum iterations before giving up
pub const MAX_ROOT_ITERATIONS: u32 = 64;

/// Absolute residual accepted as a root (meters for geometric residuals)
pub const ROOT_TOLERANCE: f64 = 1e-9;

/// A converged root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    pub residual: f64,
    pub iterations: u32,
}

/// Why no root was returned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootFailure {
    /// The function has the same sign at both ends of the interval
    NotBracketed { f_lo: f64, f_hi: f64 },
    /// The iteration cap was reached before the residual dropped below tolerance
    NotConverged { best: f64, residual: f64 },
}

/// Find `x` in `[lo, hi]` with `|f(x)| <= tolerance`.
///
/// `f` returns the value and its derivative at `x`.
pub fn find_root<F>(
    f: F,
    lo: f64,
    hi: f64,
    tolerance: f64,
    max_iterations: u32,
) -> Result<Root, RootFailure>
where
    F: Fn(f64) -> (f64, f64),
{
    let (f_lo, _) = f(lo);
    let (f_hi, _) = f(hi);

    if f_lo.abs() <= tolerance {
        return Ok(Root {
            x: lo,
            residual: f_lo,
            iterations: 0,
        });
    }
    if f_hi.abs() <= tolerance {
        return Ok(Root {
            x: hi,
            residual: f_hi,
            iterations: 0,
        });
    }
    if !(f_lo.is_finite() && f_hi.is_finite()) || f_lo.signum() == f_hi.signum() {
        return Err(RootFailure::NotBracketed { f_lo, f_hi });
    }

    // Orient so f(neg) < 0 < f(pos)
    let (mut neg, mut pos) = if f_lo < 0.0 { (lo, hi) } else { (hi, lo) };
    let mut x = 0.5 * (lo + hi);
    let mut best = (x, f64::INFINITY);

    for iteration in 1..=max_iterations {
        let (fx, dfx) = f(x);
        if fx.abs() < best.1.abs() {
            best = (x, fx);
        }
        if fx.abs() <= tolerance {
            return Ok(Root {
                x,
                residual: fx,
                iterations: iteration,
            });
        }

        if fx < 0.0 {
            neg = x;
        } else {
            pos = x;
        }

        let (low, high) = if neg < pos { (neg, pos) } else { (pos, neg) };
        let newton = x - fx / dfx;
        x = if dfx != 0.0 && newton.is_finite() && newton > low && newton < high {
            newton
        } else {
            0.5 * (low + high)
        };
    }

    Err(RootFailure::NotConverged {
        best: best.0,
        residual: best.1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_finds_cosine_root() {
        let root = find_root(
            |x| (x.cos(), -x.sin()),
            0.0,
            3.0,
            ROOT_TOLERANCE,
            MAX_ROOT_ITERATIONS,
        )
        .unwrap();
        assert!((root.x - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!(root.iterations < 10);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_not_bracketed() {
        let result = find_root(|x| (x * x + 1.0, 2.0 * x), -1.0, 1.0, 1e-9, 64);
        assert!(matches!(result, Err(RootFailure::NotBracketed { .. })));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_zero_derivative_falls_back_to_bisection() {
        // Derivative reported as zero everywhere
        let root = find_root(|x| (x - 0.3, 0.0), 0.0, 1.0, 1e-10, 64).unwrap();
        assert!((root.x - 0.3).abs() < 1e-10);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_iteration_cap() {
        let result = find_root(|x| (x - 0.123456, 0.0), 0.0, 1.0, 1e-15, 3);
        match result {
            Err(RootFailure::NotConverged { best, .. }) => assert!((0.0..=1.0).contains(&best)),
            other => panic!("expected NotConverged, got {:?}", other),
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_endpoint_root() {
        let root = find_root(|x| (x, 1.0), 0.0, 1.0, 1e-12, 64).unwrap();
        assert_eq!(root.x, 0.0);
        assert_eq!(root.iterations, 0);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_deterministic() {
        let f = |x: f64| (x.powi(3) - 2.0 * x - 5.0, 3.0 * x * x - 2.0);
        let a = find_root(f, 2.0, 3.0, 1e-12, 64).unwrap();
        let b = find_root(f, 2.0, 3.0, 1e-12, 64).unwrap();
        assert_eq!(a.x.to_bits(), b.x.to_bits());
    }
}
