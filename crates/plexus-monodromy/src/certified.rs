//! The Sturm-certified monodromy follower.
//!
//! Each tracked root is protected by a disk centred at its current
//! position whose radius is half the distance to the nearest other
//! strand, so the disks are pairwise disjoint. The disk keeps
//! isolating its root for every parameter `t` at which
//! `R·|∂P/∂x|² − n²·|P|² > 0` at the centre: a polynomial of degree
//! n has a root within `n·|P/∂P/∂x|` of any point, so positivity
//! pins exactly one root per disk. Positivity over a parameter
//! prefix is decided exactly by a Sturm sequence, the strands are
//! then advanced to the smallest certified parameter, and the braid
//! piece between the old and new centres is reconstructed from the
//! straight-line homotopy, which the disjoint disks certify to be
//! isotopic to the true root motion.

use plexus_integers::{dyadic_between, Rational};
use plexus_poly::{positive_prefix, BiPoly, DensePoly};
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::Ring;
use plexus_roots::{newton_step, rational_sqrt_upper};
use tracing::debug;

use plexus_braid::BraidWord;

use crate::fit::fit;
use crate::lbraid::lbraid_to_word;
use crate::MonodromyError;

/// Initial dyadic acceleration hint per strand.
const INITIAL_ADAPT: u32 = 2;

/// Truncated Newton refinements per advance.
const REFINE_STEPS: u32 = 3;

/// Follows the fibre of `curve` along the straight segment from `a`
/// to `b` with certified root protection, composing the braid of
/// each certified advance.
///
/// # Errors
///
/// [`MonodromyError::NonSeparable`] when the Sturm certificate cannot
/// advance or a refined root escapes its protection disk;
/// fit/singularity errors as in the heuristic follower.
pub fn follow_segment_certified(
    curve: &BiPoly,
    a: &GaussianRational,
    b: &GaussianRational,
    start_fibre: &[GaussianRational],
    end_fibre: &[GaussianRational],
) -> Result<BraidWord, MonodromyError> {
    let n = start_fibre.len();
    if n < 2 {
        return Ok(BraidWord::identity(n.max(1)));
    }

    let direction = b - a;
    let n_sq = Rational::from(i64::try_from(n * n).expect("strand count fits in i64"));
    let curve_dx = curve.derivative_x();

    let mut tm = Rational::zero();
    let mut v: Vec<GaussianRational> = start_fibre.to_vec();
    let mut adapt: Vec<u32> = vec![INITIAL_ADAPT; n];
    let mut res = BraidWord::identity(n);

    while tm < Rational::one() {
        // Protection radii (squared): a quarter of the squared
        // distance to the nearest other strand, so disks of radius
        // √R are pairwise disjoint.
        let radius_sq: Vec<Rational> = (0..n)
            .map(|k| {
                let min_sq = (0..n)
                    .filter(|&l| l != k)
                    .map(|l| v[k].dist_sq(&v[l]))
                    .min()
                    .expect("at least two strands");
                &min_sq / &Rational::from(4)
            })
            .collect();

        // Certify a positivity prefix per strand.
        let mut protected: Vec<Rational> = Vec::with_capacity(n);
        for k in 0..n {
            let cond = protection_polynomial(
                curve,
                &curve_dx,
                &v[k],
                a,
                &direction,
                &radius_sq[k],
                &n_sq,
            );
            let Some(s) = positive_prefix(&cond, &tm, adapt[k]) else {
                return Err(MonodromyError::NonSeparable);
            };
            // Stay strictly inside the certified range unless the
            // whole remaining interval is covered; picking a dyadic
            // in the upper half keeps the advance within a factor
            // two of the certificate.
            let p = if s == Rational::one() {
                s
            } else {
                let mid = &(&tm + &s) / &Rational::from(2);
                dyadic_between(&mid, &s)
            };
            adapt[k] = adapt_hint(&tm, &p);
            protected.push(p);
        }

        let next_tm = protected
            .iter()
            .min()
            .expect("at least one strand")
            .clone();
        debug_assert!(next_tm > tm, "certified parameter must advance");

        // Refine each root at the advanced parameter, staying inside
        // its protection disk.
        let y_next = a.clone() + direction.scale(&next_tm);
        let fibre_poly = curve.eval_y(&y_next);
        let fibre_dx = fibre_poly.derivative();

        let mut w = Vec::with_capacity(n);
        for k in 0..n {
            let prec = &rational_sqrt_upper(&radius_sq[k]) / &Rational::from(64);
            let mut z = v[k].clone();
            for _ in 0..REFINE_STEPS {
                z = newton_step(&fibre_poly, &fibre_dx, &z, &prec);
            }
            if z.dist_sq(&v[k]) > radius_sq[k] {
                return Err(MonodromyError::NonSeparable);
            }
            w.push(z);
        }

        res = res.compose(&lbraid_to_word(&v, &w)?);
        debug!(tm = %next_tm, "certified follower advanced");

        v = w;
        tm = next_tm;
    }

    // Land exactly on the stored fibre.
    let fitted = fit(&v, end_fibre)?;
    res = res.compose(&lbraid_to_word(&v, &fitted)?);
    Ok(res)
}

/// The positivity certificate polynomial
/// `R·|∂P/∂x(v, y(t))|² − n²·|P(v, y(t))|²` with `y(t) = a + t·d`,
/// as an exact real polynomial in `t`.
fn protection_polynomial(
    curve: &BiPoly,
    curve_dx: &BiPoly,
    v: &GaussianRational,
    a: &GaussianRational,
    direction: &GaussianRational,
    radius_sq: &Rational,
    n_sq: &Rational,
) -> DensePoly<Rational> {
    let p_of_t = curve.eval_x(v).compose_linear(a, direction);
    let dp_of_t = curve_dx.eval_x(v).compose_linear(a, direction);

    let p_norm = norm_sq_poly(&p_of_t);
    let dp_norm = norm_sq_poly(&dp_of_t);

    dp_norm.scale(radius_sq).sub(&p_norm.scale(n_sq))
}

/// |q(t)|² for real t, as the exact real polynomial re(q)² + im(q)².
fn norm_sq_poly(q: &DensePoly<GaussianRational>) -> DensePoly<Rational> {
    let re = DensePoly::new(q.coeffs().iter().map(|c| c.re().clone()).collect());
    let im = DensePoly::new(q.coeffs().iter().map(|c| c.im().clone()).collect());
    re.mul(&re).add(&im.mul(&im))
}

/// Number of halvings of the remaining interval that reproduces the
/// achieved advance; the next certificate starts its search there.
fn adapt_hint(tm: &Rational, achieved: &Rational) -> u32 {
    let gap = &Rational::one() - tm;
    let got = achieved - tm;
    if got.signum() <= 0 {
        return 60;
    }

    let mut j = 0u32;
    let mut step = gap;
    while step > got && j < 60 {
        step = &step / &Rational::from(2);
        j += 1;
    }
    j.max(1)
}
