//! Plane-period lattice math.
//!
//! A [`PeriodMatrix`] `[a, b, c, d]` stands for the 2×2 matrix
//! `[[a, b], [c, d]]`. Its columns `(a, c)` and `(b, d)` are the two
//! lattice translation vectors: the period `(px, py)` moves the plane by
//! `px·(a, c) + py·(b, d)`.

use crate::error::ConfigError;
use crate::geom::Point;
use crate::id::Period;

/// A validated, invertible period matrix with its cached inverse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodMatrix {
    m: [f64; 4],
    inv: [f64; 4],
}

impl PeriodMatrix {
    /// Validate `m` and precompute its inverse.
    ///
    /// Returns `Err(ConfigError::NonFinitePeriodMatrix)` if any entry is
    /// NaN or infinite, or `Err(ConfigError::SingularPeriodMatrix)` if the
    /// determinant is zero or the inverse overflows.
    pub fn new(m: [f64; 4]) -> Result<Self, ConfigError> {
        if m.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::NonFinitePeriodMatrix { matrix: m });
        }
        let [a, b, c, d] = m;
        let det = a * d - b * c;
        if det == 0.0 || !det.is_finite() {
            return Err(ConfigError::SingularPeriodMatrix { matrix: m });
        }
        let inv = [d / det, -b / det, -c / det, a / det];
        if inv.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::SingularPeriodMatrix { matrix: m });
        }
        Ok(Self { m, inv })
    }

    /// The first lattice vector `(a, c)`.
    pub fn first_vector(&self) -> Point {
        Point::new(self.m[0], self.m[2])
    }

    /// The second lattice vector `(b, d)`.
    pub fn second_vector(&self) -> Point {
        Point::new(self.m[1], self.m[3])
    }

    /// The plane displacement of `period`.
    pub fn offset(&self, period: Period) -> Point {
        let [a, b, c, d] = self.m;
        let px = f64::from(period.dx);
        let py = f64::from(period.dy);
        Point::new(a * px + b * py, c * px + d * py)
    }

    /// `M⁻¹·p`, the lattice coordinates of a plane displacement.
    pub fn to_lattice(&self, p: Point) -> Point {
        let [a, b, c, d] = self.inv;
        Point::new(a * p.x + b * p.y, c * p.x + d * p.y)
    }

    /// Size `(|a| + |b|, |c| + |d|)` of a rectangle that contains a whole
    /// fundamental domain of the lattice.
    pub fn base_rect_size(&self) -> (f64, f64) {
        let [a, b, c, d] = self.m;
        (a.abs() + b.abs(), c.abs() + d.abs())
    }

    /// Decompose `p` into a lattice period and a representative.
    ///
    /// Returns `(q, t)` with `p = t + offset(q)` and `t` inside the
    /// `[0, w] × [0, h]` rectangle of [`base_rect_size`](Self::base_rect_size).
    /// Returns `None` if `p` is not finite or `q` does not fit in `i32`.
    pub fn reduce_point(&self, p: Point) -> Option<(Period, Point)> {
        if !p.is_finite() {
            return None;
        }
        let (w, h) = self.base_rect_size();
        let lattice = self.to_lattice(p);
        let center = self.to_lattice(Point::new(w / 2.0, h / 2.0));
        let dx = to_period_component(lattice.x - center.x)?;
        let dy = to_period_component(lattice.y - center.y)?;
        let period = Period::new(dx, dy);
        Some((period, p - self.offset(period)))
    }

    /// [`reduce_point`](Self::reduce_point) relative to a base rectangle
    /// whose lower corner is `origin` instead of the plane origin.
    ///
    /// The representative lands in `[origin, origin + (w, h)]`.
    pub fn reduce_point_from(&self, p: Point, origin: Point) -> Option<(Period, Point)> {
        let (period, t) = self.reduce_point(p - origin)?;
        Some((period, t + origin))
    }
}

fn to_period_component(v: f64) -> Option<i32> {
    let r = v.round();
    if r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX) {
        Some(r as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn matrix(m: [f64; 4]) -> PeriodMatrix {
        PeriodMatrix::new(m).unwrap()
    }

    fn in_base_rect(pm: &PeriodMatrix, t: Point, origin: Point) -> bool {
        let (w, h) = pm.base_rect_size();
        let tol = 1e-7 * (1.0 + w + h);
        t.x >= origin.x - tol
            && t.x <= origin.x + w + tol
            && t.y >= origin.y - tol
            && t.y <= origin.y + h + tol
    }

    // ── Validation ─────────────────────────────────────────────

    #[test]
    fn singular_matrix_rejected() {
        assert!(matches!(
            PeriodMatrix::new([1.0, 2.0, 2.0, 4.0]),
            Err(ConfigError::SingularPeriodMatrix { .. })
        ));
        assert!(matches!(
            PeriodMatrix::new([0.0, 0.0, 0.0, 0.0]),
            Err(ConfigError::SingularPeriodMatrix { .. })
        ));
    }

    #[test]
    fn non_finite_matrix_rejected() {
        assert!(matches!(
            PeriodMatrix::new([1.0, f64::NAN, 0.0, 1.0]),
            Err(ConfigError::NonFinitePeriodMatrix { .. })
        ));
        assert!(matches!(
            PeriodMatrix::new([f64::INFINITY, 0.0, 0.0, 1.0]),
            Err(ConfigError::NonFinitePeriodMatrix { .. })
        ));
    }

    // ── Offsets ────────────────────────────────────────────────

    #[test]
    fn offset_uses_columns() {
        let pm = matrix([4.0, 2.0, 0.0, 3.0]);
        assert_eq!(pm.offset(Period::new(2, 4)), Point::new(16.0, 12.0));
        assert_eq!(pm.first_vector(), Point::new(4.0, 0.0));
        assert_eq!(pm.second_vector(), Point::new(2.0, 3.0));
    }

    #[test]
    fn base_rect_size_sums_absolute_entries() {
        assert_eq!(matrix([50.0, 30.0, 30.0, 20.0]).base_rect_size(), (80.0, 50.0));
        assert_eq!(matrix([-2.0, 1.0, 1.0, -3.0]).base_rect_size(), (3.0, 4.0));
    }

    #[test]
    fn to_lattice_inverts_offset() {
        let pm = matrix([50.0, 30.0, 30.0, 20.0]);
        let l = pm.to_lattice(pm.offset(Period::new(-3, 7)));
        assert_abs_diff_eq!(l.x, -3.0, epsilon = EPS);
        assert_abs_diff_eq!(l.y, 7.0, epsilon = EPS);
    }

    // ── Reduction ──────────────────────────────────────────────

    #[test]
    fn reduce_unit_square() {
        let pm = matrix([1.0, 0.0, 0.0, 1.0]);
        let (q, t) = pm.reduce_point(Point::new(3.25, -1.75)).unwrap();
        assert_eq!(q, Period::new(3, -2));
        assert_abs_diff_eq!(t.x, 0.25, epsilon = EPS);
        assert_abs_diff_eq!(t.y, 0.25, epsilon = EPS);
    }

    #[test]
    fn reduce_rejects_non_finite_and_overflow() {
        let pm = matrix([1.0, 0.0, 0.0, 1.0]);
        assert!(pm.reduce_point(Point::new(f64::NAN, 0.0)).is_none());
        assert!(pm.reduce_point(Point::new(0.0, f64::INFINITY)).is_none());
        assert!(pm.reduce_point(Point::new(1e12, 0.0)).is_none());
    }

    #[test]
    fn reduce_reaches_the_last_representable_period() {
        let pm = matrix([1.0, 0.0, 0.0, 1.0]);
        let edge = f64::from(i32::MAX);
        let (q, t) = pm.reduce_point(Point::new(edge, 0.5)).unwrap();
        assert_eq!(q, Period::new(i32::MAX, 0));
        assert_abs_diff_eq!(t.x, 0.0, epsilon = EPS);
        assert_eq!(q.checked_add(Period::new(1, 0)), None);
        assert!(pm.reduce_point(Point::new(edge + 1.0, 0.0)).is_none());
    }

    #[test]
    fn reduce_from_shifted_origin() {
        let pm = matrix([1.0, 0.0, 0.0, 1.0]);
        let origin = Point::new(-0.5, -0.5);
        let (q, t) = pm.reduce_point_from(Point::new(1.5, 1.5), origin).unwrap();
        assert_eq!(q, Period::new(2, 2));
        assert_abs_diff_eq!(t.x, -0.5, epsilon = EPS);
        assert_abs_diff_eq!(t.y, -0.5, epsilon = EPS);
    }

    proptest! {
        #[test]
        fn reduction_decomposes_point(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            m in prop::sample::select(vec![
                [1.0, 0.0, 0.0, 1.0],
                [2.0, 1.0, 1.0, 2.0],
                [4.0, 2.0, 0.0, 3.0],
                [50.0, 30.0, 30.0, 20.0],
                [-3.0, 1.0, 2.0, 5.0],
            ]),
        ) {
            let pm = matrix(m);
            let p = Point::new(x, y);
            let (q, t) = pm.reduce_point(p).unwrap();
            let back = t + pm.offset(q);
            prop_assert!((back.x - p.x).abs() < 1e-6);
            prop_assert!((back.y - p.y).abs() < 1e-6);
            prop_assert!(in_base_rect(&pm, t, Point::new(0.0, 0.0)));
        }

        #[test]
        fn reduction_from_origin_stays_in_base_rect(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            ox in -10.0f64..10.0,
            oy in -10.0f64..10.0,
        ) {
            let pm = matrix([4.0, 2.0, 0.0, 3.0]);
            let origin = Point::new(ox, oy);
            let (q, t) = pm.reduce_point_from(Point::new(x, y), origin).unwrap();
            prop_assert!(in_base_rect(&pm, t, origin));
            let back = t + pm.offset(q);
            prop_assert!((back.x - x).abs() < 1e-6 && (back.y - y).abs() < 1e-6);
        }
    }
}
