//! Cubic interpolating spline with not-a-knot end conditions.
//!
//! The not-a-knot condition asks for a continuous third derivative at the
//! second and second-to-last knots, so the first two and the last two
//! intervals are each covered by a single cubic. With exactly four knots the
//! spline is the unique cubic through them.
//!
//! The spline is stored by its knot values and second derivatives `m`. On
//! the interval `[x_j, x_{j+1}]` with width `h`:
//!
//! ```text
//! S(t) = m_j (x_{j+1} - t)^3 / 6h + m_{j+1} (t - x_j)^3 / 6h
//!      + (y_j / h - m_j h / 6) (x_{j+1} - t)
//!      + (y_{j+1} / h - m_{j+1} h / 6) (t - x_j)
//! ```

use csg_cocorahs::NumericError;

/// Fewest knots a cubic (degree 3) interpolating spline accepts.
pub const MIN_KNOTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit the not-a-knot interpolant through `(x[i], y[i])`.
    ///
    /// `x` must be strictly increasing, finite, and at least `MIN_KNOTS` long.
    pub fn not_a_knot(x: &[f64], y: &[f64]) -> Result<CubicSpline, NumericError> {
        validate_knots(x, y)?;
        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let slopes: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        // Unknowns m_1..m_{n-2}. Every row is strictly diagonally dominant,
        // so elimination without pivoting is stable.
        let rows = n - 2;
        let mut sub = vec![0.0; rows];
        let mut diag = vec![0.0; rows];
        let mut sup = vec![0.0; rows];
        let mut rhs = vec![0.0; rows];
        for r in 0..rows {
            let i = r + 1;
            sub[r] = h[i - 1];
            diag[r] = 2.0 * (h[i - 1] + h[i]);
            sup[r] = h[i];
            rhs[r] = 6.0 * (slopes[i] - slopes[i - 1]);
        }

        // m_0 eliminated through the not-a-knot condition at x_1
        let (h0, h1) = (h[0], h[1]);
        diag[0] = h0 + 2.0 * h1;
        sup[0] = h1 - h0;
        rhs[0] *= h1 / (h0 + h1);

        // m_{n-1} eliminated through the not-a-knot condition at x_{n-2}
        let (a, b) = (h[n - 3], h[n - 2]);
        let last = rows - 1;
        sub[last] = a - b;
        diag[last] = 2.0 * a + b;
        rhs[last] = 6.0 * (slopes[n - 2] - slopes[n - 3]) * a / (a + b);

        let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs);

        let mut m = Vec::with_capacity(n);
        m.push(interior[0] * (1.0 + h0 / h1) - interior[1] * h0 / h1);
        m.extend_from_slice(&interior);
        m.push(interior[last] * (1.0 + b / a) - interior[last - 1] * b / a);

        Ok(CubicSpline {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// Evaluate the spline at `t`. Points outside the knot range use the
    /// end polynomials.
    pub fn evaluate(&self, t: f64) -> f64 {
        let j = self.interval(t);
        let (x0, x1) = (self.x[j], self.x[j + 1]);
        let (y0, y1) = (self.y[j], self.y[j + 1]);
        let (m0, m1) = (self.m[j], self.m[j + 1]);
        let h = x1 - x0;
        let left = x1 - t;
        let right = t - x0;
        m0 * left.powi(3) / (6.0 * h)
            + m1 * right.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * left
            + (y1 / h - m1 * h / 6.0) * right
    }

    /// Evaluate the spline at every point of `ts`.
    pub fn evaluate_many(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|t| self.evaluate(*t)).collect()
    }

    /// Second derivative at each knot.
    pub fn second_derivatives(&self) -> &[f64] {
        &self.m
    }

    /// Index j of the interval [x_j, x_{j+1}] used for `t`.
    fn interval(&self, t: f64) -> usize {
        let last_interval = self.x.len() - 2;
        // First knot strictly greater than t, minus one
        let upper = self.x.partition_point(|&knot| knot <= t);
        upper.saturating_sub(1).min(last_interval)
    }
}

fn validate_knots(x: &[f64], y: &[f64]) -> Result<(), NumericError> {
    if x.len() != y.len() {
        return Err(NumericError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < MIN_KNOTS {
        return Err(NumericError::TooFewKnots {
            needed: MIN_KNOTS,
            found: x.len(),
        });
    }
    if let Some(index) = x
        .iter()
        .zip(y)
        .position(|(a, b)| !a.is_finite() || !b.is_finite())
    {
        return Err(NumericError::NonFinite { index });
    }
    if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
        return Err(NumericError::NonIncreasingAbscissa { index: index + 1 });
    }
    Ok(())
}

/// Thomas algorithm for a tridiagonal system. `sub[0]` and the last entry
/// of `sup` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];
    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - sub[i] * c[i - 1];
        c[i] = sup[i] / denom;
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / denom;
    }
    let mut solution = vec![0.0; n];
    solution[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        solution[i] = d[i] - c[i] * solution[i + 1];
    }
    solution
}
