//! Piecewise-linear and bilinear interpolation primitives.
//!
//! Every physical relation in the table set is stored as breakpoints and
//! evaluated by linear interpolation, clamped at the domain edges so that
//! out-of-range queries return the boundary value instead of extrapolating.
//! Curves are immutable once constructed.

use crate::error::{SteamError, SteamResult};
use fp_core::Real;

/// One-dimensional piecewise-linear curve over strictly increasing abscissae.
#[derive(Clone, Debug)]
pub struct Curve {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl Curve {
    /// Build a curve from (x, y) breakpoints.
    ///
    /// Requires at least two points, strictly increasing x, and finite data.
    pub fn new(points: &[(Real, Real)]) -> SteamResult<Self> {
        if points.len() < 2 {
            return Err(SteamError::TooFewPoints {
                what: "curve breakpoints",
            });
        }
        for window in points.windows(2) {
            if window[1].0 <= window[0].0 {
                return Err(SteamError::NonMonotonic {
                    what: "curve breakpoints",
                });
            }
        }
        for &(x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                return Err(SteamError::NonFinite {
                    what: "curve breakpoints",
                });
            }
        }
        Ok(Self {
            xs: points.iter().map(|p| p.0).collect(),
            ys: points.iter().map(|p| p.1).collect(),
        })
    }

    /// Evaluate at `x`, clamped to the breakpoint domain.
    pub fn eval(&self, x: Real) -> Real {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        // partition_point finds the first breakpoint strictly above x
        let hi = self.xs.partition_point(|&bx| bx <= x);
        let lo = hi - 1;
        let t = (x - self.xs[lo]) / (self.xs[hi] - self.xs[lo]);
        self.ys[lo] + t * (self.ys[hi] - self.ys[lo])
    }

    /// Swap axes, producing the inverse relation.
    ///
    /// The ordinates must be strictly monotone; a decreasing curve is
    /// reversed so the result is ascending in its new abscissa.
    pub fn inverted(&self) -> SteamResult<Curve> {
        let increasing = self.ys.windows(2).all(|w| w[1] > w[0]);
        let decreasing = self.ys.windows(2).all(|w| w[1] < w[0]);
        if !increasing && !decreasing {
            return Err(SteamError::NotInvertible {
                what: "ordinates are not strictly monotone",
            });
        }
        let mut points: Vec<(Real, Real)> = self
            .ys
            .iter()
            .zip(self.xs.iter())
            .map(|(&y, &x)| (y, x))
            .collect();
        if decreasing {
            points.reverse();
        }
        Curve::new(&points)
    }

    pub fn min_x(&self) -> Real {
        self.xs[0]
    }

    pub fn max_x(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }
}

/// Rectangular-grid bilinear surface, clamped at the grid edges.
///
/// `zs[i][j]` holds the value at `(xs[i], ys[j])`.
#[derive(Clone, Debug)]
pub struct Curve2 {
    xs: Vec<Real>,
    ys: Vec<Real>,
    zs: Vec<Vec<Real>>,
}

impl Curve2 {
    pub fn new(xs: Vec<Real>, ys: Vec<Real>, zs: Vec<Vec<Real>>) -> SteamResult<Self> {
        if xs.len() < 2 || ys.len() < 2 {
            return Err(SteamError::TooFewPoints {
                what: "grid axes",
            });
        }
        if !xs.windows(2).all(|w| w[1] > w[0]) || !ys.windows(2).all(|w| w[1] > w[0]) {
            return Err(SteamError::NonMonotonic { what: "grid axes" });
        }
        if zs.len() != xs.len() || zs.iter().any(|row| row.len() != ys.len()) {
            return Err(SteamError::GridShape {
                what: "zs must be xs.len() rows of ys.len() values",
            });
        }
        for row in &zs {
            for &z in row {
                if !z.is_finite() {
                    return Err(SteamError::NonFinite { what: "grid values" });
                }
            }
        }
        for &v in xs.iter().chain(ys.iter()) {
            if !v.is_finite() {
                return Err(SteamError::NonFinite { what: "grid axes" });
            }
        }
        Ok(Self { xs, ys, zs })
    }

    /// Bilinear interpolation at `(x, y)`, clamped to the grid.
    pub fn eval(&self, x: Real, y: Real) -> Real {
        let (i0, i1, tx) = Self::bracket(&self.xs, x);
        let (j0, j1, ty) = Self::bracket(&self.ys, y);

        let z00 = self.zs[i0][j0];
        let z01 = self.zs[i0][j1];
        let z10 = self.zs[i1][j0];
        let z11 = self.zs[i1][j1];

        let z0 = z00 + ty * (z01 - z00);
        let z1 = z10 + ty * (z11 - z10);
        z0 + tx * (z1 - z0)
    }

    fn bracket(axis: &[Real], v: Real) -> (usize, usize, Real) {
        let n = axis.len();
        if v <= axis[0] {
            return (0, 0, 0.0);
        }
        if v >= axis[n - 1] {
            return (n - 1, n - 1, 0.0);
        }
        let hi = axis.partition_point(|&a| a <= v);
        let lo = hi - 1;
        let t = (v - axis[lo]) / (axis[hi] - axis[lo]);
        (lo, hi, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp() -> Curve {
        Curve::new(&[(0.0, 0.0), (1.0, 10.0), (2.0, 40.0)]).unwrap()
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Curve::new(&[(0.0, 1.0)]).is_err());
        assert!(Curve::new(&[(0.0, 1.0), (0.0, 2.0)]).is_err());
        assert!(Curve::new(&[(1.0, 1.0), (0.5, 2.0)]).is_err());
        assert!(Curve::new(&[(0.0, f64::NAN), (1.0, 2.0)]).is_err());
    }

    #[test]
    fn interpolates_between_breakpoints() {
        let c = ramp();
        assert_eq!(c.eval(0.5), 5.0);
        assert_eq!(c.eval(1.5), 25.0);
    }

    #[test]
    fn clamps_at_edges() {
        let c = ramp();
        assert_eq!(c.eval(-100.0), 0.0);
        assert_eq!(c.eval(100.0), 40.0);
    }

    #[test]
    fn exact_breakpoints() {
        let c = ramp();
        assert_eq!(c.eval(0.0), 0.0);
        assert_eq!(c.eval(1.0), 10.0);
        assert_eq!(c.eval(2.0), 40.0);
    }

    #[test]
    fn inversion_roundtrip() {
        let c = ramp();
        let inv = c.inverted().unwrap();
        assert!((inv.eval(10.0) - 1.0).abs() < 1e-12);
        assert!((inv.eval(c.eval(1.3)) - 1.3).abs() < 1e-9);
    }

    #[test]
    fn inversion_of_decreasing_curve() {
        let c = Curve::new(&[(0.0, 100.0), (1.0, 50.0), (2.0, 10.0)]).unwrap();
        let inv = c.inverted().unwrap();
        assert!((inv.eval(50.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inversion_rejects_non_monotone() {
        let c = Curve::new(&[(0.0, 0.0), (1.0, 5.0), (2.0, 3.0)]).unwrap();
        assert!(c.inverted().is_err());
    }

    #[test]
    fn surface_bilinear() {
        let grid = Curve2::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 1.0], vec![2.0, 3.0]],
        )
        .unwrap();
        assert_eq!(grid.eval(0.0, 0.0), 0.0);
        assert_eq!(grid.eval(1.0, 1.0), 3.0);
        assert_eq!(grid.eval(0.5, 0.5), 1.5);
        // clamped corners
        assert_eq!(grid.eval(-5.0, -5.0), 0.0);
        assert_eq!(grid.eval(5.0, 5.0), 3.0);
    }

    #[test]
    fn surface_rejects_ragged_grid() {
        assert!(Curve2::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 1.0], vec![2.0]],
        )
        .is_err());
    }

    proptest! {
        // Repeated evaluation is pure: same input, same output.
        #[test]
        fn eval_is_idempotent(x in -10.0f64..10.0) {
            let c = ramp();
            prop_assert_eq!(c.eval(x), c.eval(x));
        }

        // Output of a monotone curve is monotone in its input.
        #[test]
        fn eval_preserves_monotonicity(a in -5.0f64..5.0, b in -5.0f64..5.0) {
            let c = ramp();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(c.eval(lo) <= c.eval(hi));
        }

        // Output never escapes the ordinate hull.
        #[test]
        fn eval_bounded_by_breakpoints(x in -100.0f64..100.0) {
            let c = ramp();
            let y = c.eval(x);
            prop_assert!((0.0..=40.0).contains(&y));
        }
    }
}
