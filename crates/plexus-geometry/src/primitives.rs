//! Exact planar primitives over ℚ(i).
//!
//! Every predicate here is decided by exact rational arithmetic:
//! distances are compared through squared moduli, angular order
//! through quadrant classes and cross products. There is no epsilon
//! anywhere in this module.

use plexus_integers::Rational;
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::Ring;

/// The dot product of two points read as plane vectors.
#[must_use]
pub fn dot(u: &GaussianRational, v: &GaussianRational) -> Rational {
    &(u.re() * v.re()) + &(u.im() * v.im())
}

/// The cross product (signed parallelogram area) of two vectors.
#[must_use]
pub fn cross(u: &GaussianRational, v: &GaussianRational) -> Rational {
    &(u.re() * v.im()) - &(u.im() * v.re())
}

/// The squared Euclidean distance from `z` to the closed segment
/// `[a, b]`.
#[must_use]
pub fn dist_seg_sq(z: &GaussianRational, a: &GaussianRational, b: &GaussianRational) -> Rational {
    let d = b - a;
    let dd = d.norm_sq();
    if Ring::is_zero(&dd) {
        return z.dist_sq(a);
    }

    let t = &dot(&(z - a), &d) / &dd;
    let t = if t.is_negative() {
        Rational::zero()
    } else if t > Rational::one() {
        Rational::one()
    } else {
        t
    };

    let foot = a.clone() + d.scale(&t);
    z.dist_sq(&foot)
}

/// The two endpoints of the perpendicular bisector of `[x, y]`,
/// at distance `|x − y|` on each side of the midpoint. The direction
/// is the quarter-turn rotation of `y − x`, so no square root is
/// needed.
///
/// # Panics
///
/// Panics if `x == y`.
#[must_use]
pub fn mediatrix(
    x: &GaussianRational,
    y: &GaussianRational,
) -> (GaussianRational, GaussianRational) {
    assert!(x != y, "mediatrix of a degenerate pair");
    let half = Rational::from_i64(1, 2);
    let mid = (x + y).scale(&half);
    let perp = (y - x).mul_i();
    (mid.clone() + perp.clone(), mid - perp)
}

/// The intersection point of the lines `(x1 x2)` and `(y1 y2)`, or
/// `None` when the lines are parallel or an endpoint pair coincides.
///
/// Exact rational arithmetic has no vertical-line degeneracy: the
/// 2×2 system is solved through cross products directly.
#[must_use]
pub fn crossing(
    x1: &GaussianRational,
    x2: &GaussianRational,
    y1: &GaussianRational,
    y2: &GaussianRational,
) -> Option<GaussianRational> {
    if x1 == x2 || y1 == y2 {
        return None;
    }

    let d1 = x2 - x1;
    let d2 = y2 - y1;
    let det = cross(&d1, &d2);
    if Ring::is_zero(&det) {
        return None;
    }

    let t = &cross(&(y1 - x1), &d2) / &det;
    Some(x1.clone() + d1.scale(&t))
}

/// Angular class of a non-zero vector for the cyclic order starting
/// just below the negative imaginary axis and running
/// counter-clockwise. Lower class comes first; within a class the
/// cross product decides.
fn angular_class(u: &GaussianRational) -> u8 {
    // Rotate by i: the start direction −i maps to the positive real
    // axis, so the order becomes the standard (0, 2π] order of i·u.
    let v = u.mul_i();
    if v.im().signum() > 0 {
        0
    } else if v.im().signum() == 0 && v.re().signum() < 0 {
        1
    } else if v.im().signum() < 0 {
        2
    } else {
        3
    }
}

/// Sorts `points` trigonometrically around `c`, starting from the
/// direction just below `−i` and turning counter-clockwise. Points
/// that share a direction are ordered nearest first; `c` itself must
/// not be in the list.
///
/// # Panics
///
/// Panics if a point equals the centre.
#[must_use]
pub fn cycorder(points: &[GaussianRational], c: &GaussianRational) -> Vec<GaussianRational> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|p, q| {
        let u = p - c;
        let v = q - c;
        assert!(
            !Ring::is_zero(&u) && !Ring::is_zero(&v),
            "cyclic order around a member point"
        );

        let cu = angular_class(&u);
        let cv = angular_class(&v);
        cu.cmp(&cv).then_with(|| {
            let x = cross(&u, &v);
            // Positive cross: u strictly before v in ccw order.
            match x.signum() {
                1 => std::cmp::Ordering::Less,
                -1 => std::cmp::Ordering::Greater,
                _ => u.norm_sq().cmp(&v.norm_sq()),
            }
        })
    });
    sorted
}

/// Returns the points `y` of `list` such that no other `z` of the
/// list lies in the closed disk of diameter `[c, y]` (the Gabriel
/// neighbours of `c`). This graph contains the Euclidean minimum
/// spanning tree of the configuration, which is what keeps the
/// honeycomb connected.
#[must_use]
pub fn neighbours(list: &[GaussianRational], c: &GaussianRational) -> Vec<GaussianRational> {
    list.iter()
        .filter(|y| *y != c)
        .filter(|y| {
            !list.iter().any(|z| {
                if z == c || z == *y {
                    return false;
                }
                // z lies in the closed disk of diameter [c, y] iff
                // the angle at z is at least a right angle.
                dot(&(c - z), &(*y - z)).signum() <= 0
            })
        })
        .cloned()
        .collect()
}

/// For a Voronoi polygon `c` with per-edge witnesses `w` around the
/// site `y`, marks the edges crossed by the mediatrix of `(y, z)`:
/// edge `i` runs from `c[i]` to `c[(i+1) % n]` and is crossed when
/// exactly one endpoint is strictly closer to the candidate witness
/// `z` than to `y`. Edges already witnessed by `z` are skipped.
#[must_use]
pub fn detects_left_crossing(
    c: &[GaussianRational],
    w: &[Option<GaussianRational>],
    y: &GaussianRational,
    z: &GaussianRational,
) -> Vec<bool> {
    let n = c.len();
    let closer_to_z = |v: &GaussianRational| v.dist_sq(z) < v.dist_sq(y);

    (0..n)
        .map(|i| {
            if w[i].as_ref() == Some(z) {
                return false;
            }
            closer_to_z(&c[i]) != closer_to_z(&c[(i + 1) % n])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(re: i64, im: i64) -> GaussianRational {
        GaussianRational::from_i64(re, im)
    }

    #[test]
    fn test_dist_seg_endpoints_and_interior() {
        // Distance from i to the segment [0, 2] is 1 (foot at 0).
        assert_eq!(dist_seg_sq(&g(0, 1), &g(0, 0), &g(2, 0)), Rational::from(1));
        // Distance from -1 to [0, 2] is 1 (clamped to the endpoint).
        assert_eq!(dist_seg_sq(&g(-1, 0), &g(0, 0), &g(2, 0)), Rational::from(1));
        // Distance from 3+4i to the degenerate segment [0, 0].
        assert_eq!(dist_seg_sq(&g(3, 4), &g(0, 0), &g(0, 0)), Rational::from(25));
    }

    #[test]
    fn test_mediatrix_is_perpendicular() {
        let (p, q) = mediatrix(&g(0, 0), &g(2, 0));
        // Midpoint 1, offsets ±2i.
        assert_eq!(p, g(1, 2));
        assert_eq!(q, g(1, -2));
        // Both endpoints are equidistant from the generating pair.
        assert_eq!(p.dist_sq(&g(0, 0)), p.dist_sq(&g(2, 0)));
        assert_eq!(q.dist_sq(&g(0, 0)), q.dist_sq(&g(2, 0)));
    }

    #[test]
    fn test_crossing_basic() {
        // The diagonals of the unit square cross at the centre.
        let p = crossing(&g(0, 0), &g(1, 1), &g(1, 0), &g(0, 1)).unwrap();
        assert_eq!(
            p,
            GaussianRational::new(Rational::from_i64(1, 2), Rational::from_i64(1, 2))
        );
    }

    #[test]
    fn test_crossing_vertical_lines() {
        // A vertical line is no special case in exact arithmetic.
        let p = crossing(&g(1, -5), &g(1, 7), &g(0, 0), &g(2, 2)).unwrap();
        assert_eq!(p, g(1, 1));
        // Two parallel verticals do not cross.
        assert!(crossing(&g(0, 0), &g(0, 1), &g(1, 0), &g(1, 1)).is_none());
    }

    #[test]
    fn test_crossing_degenerate_endpoints() {
        assert!(crossing(&g(1, 1), &g(1, 1), &g(0, 0), &g(1, 0)).is_none());
    }

    #[test]
    fn test_cycorder_starts_below_negative_imaginary() {
        let c = g(0, 0);
        let pts = vec![g(1, 0), g(0, 1), g(-1, 0), g(0, -1)];
        let sorted = cycorder(&pts, &c);
        // Just below −i going ccw: −i is last in (−π/2, 3π/2]; the
        // first direction after the start is the positive real axis.
        assert_eq!(sorted, vec![g(1, 0), g(0, 1), g(-1, 0), g(0, -1)]);
    }

    #[test]
    fn test_cycorder_ties_by_distance() {
        let sorted = cycorder(&[g(2, 2), g(1, 1)], &g(0, 0));
        assert_eq!(sorted, vec![g(1, 1), g(2, 2)]);
    }

    #[test]
    fn test_neighbours_square() {
        // On a square with centre, the centre blocks the diagonal.
        let pts = vec![g(2, 0), g(0, 2), g(-2, 0), g(0, -2), g(2, 2)];
        let nb = neighbours(&pts, &g(0, 0));
        assert!(nb.contains(&g(2, 0)));
        assert!(nb.contains(&g(0, 2)));
        // The corner 2+2i has both 2 and 2i inside its diameter disk.
        assert!(!nb.contains(&g(2, 2)));
    }

    #[test]
    fn test_detects_left_crossing_square_cell() {
        // Square cell around 0; candidate witness at 3 cuts the right
        // edge region (mediatrix Re = 3/2 crosses top and bottom? no:
        // the square has corners at ±1±i, entirely left of Re = 3/2).
        let cell = vec![g(1, -1), g(1, 1), g(-1, 1), g(-1, -1)];
        let wit = vec![None, None, None, None];
        let marks = detects_left_crossing(&cell, &wit, &g(0, 0), &g(3, 0));
        assert_eq!(marks, vec![false, false, false, false]);

        // A witness at 3/2 puts the two right corners past Re = 3/4;
        // the top and bottom edges cross the mediatrix.
        let close = GaussianRational::new(Rational::from_i64(3, 2), Rational::zero());
        let marks = detects_left_crossing(&cell, &wit, &g(0, 0), &close);
        assert_eq!(marks, vec![false, true, false, true]);
    }
}
