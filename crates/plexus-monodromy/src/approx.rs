//! The adaptive heuristic monodromy follower.
//!
//! Steps along a segment with a dyadic step size, re-separating the
//! fibre at each accepted waypoint and rejecting steps that move any
//! strand a large fraction of its distance to the nearest other
//! strand. The accept/reject thresholds are heuristic: this follower
//! is *uncertified* and must be opted into; the certified follower is
//! the default everywhere.

use plexus_integers::Rational;
use plexus_poly::BiPoly;
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::Ring;
use plexus_roots::separate_roots_initial_guess;
use tracing::debug;

use plexus_braid::BraidWord;

use crate::fit::fit;
use crate::lbraid::lbraid_to_word;
use crate::MonodromyError;

/// Default denominator of the movement threshold: a step is rejected
/// when a strand moves farther than its inter-root distance divided
/// by this factor.
pub const ADAPTIVITY_FACTOR: u32 = 10;

/// Safety factor handed to the root separator at every waypoint.
const SEPARATION_SAFETY: u32 = 100;

/// Smallest dyadic step before the follower gives up.
const MIN_STEP_EXPONENT: u32 = 60;

/// Follows the fibre of `curve` along the straight segment from `a`
/// to `b` with adaptive steps, composing the braid of each accepted
/// step. `start_fibre` and `end_fibre` are the stored configurations
/// at the endpoints.
///
/// # Errors
///
/// Propagates separation failures once the step size underflows, and
/// the fit/singularity errors of the reconstruction.
pub fn follow_segment_approx(
    curve: &BiPoly,
    a: &GaussianRational,
    b: &GaussianRational,
    start_fibre: &[GaussianRational],
    end_fibre: &[GaussianRational],
    adaptivity_factor: u32,
    newton_limit: u32,
) -> Result<BraidWord, MonodromyError> {
    let n = start_fibre.len();
    if n < 2 {
        return Ok(BraidWord::identity(n.max(1)));
    }

    let direction = b - a;
    let factor_sq = Rational::from(i64::from(adaptivity_factor) * i64::from(adaptivity_factor));
    let four_factor_sq = &factor_sq * &Rational::from(4);

    let mut total = Rational::zero();
    let mut step = Rational::one();
    let mut prevzeros: Vec<GaussianRational> = start_fibre.to_vec();
    let mut res = BraidWord::identity(n);

    // Diagnostics carried across the walk.
    let mut min_step = Rational::one();
    let mut min_dist_sq: Option<Rational> = None;

    while total < Rational::one() {
        let next_t = &total + &step;
        let next_point = a.clone() + direction.scale(&next_t);
        let fibre_poly = curve.eval_y(&next_point);

        let accepted = separate_roots_initial_guess(
            &fibre_poly,
            &prevzeros,
            SEPARATION_SAFETY,
            newton_limit,
        )
        .ok()
        .and_then(|nextzeros| {
            // Per-strand movement against inter-root distance.
            let dm_sq: Vec<Rational> = (0..n)
                .map(|i| {
                    (0..n)
                        .filter(|&j| j != i)
                        .map(|j| prevzeros[i].dist_sq(&prevzeros[j]))
                        .min()
                        .expect("at least two strands")
                })
                .collect();
            let dn_sq: Vec<Rational> = (0..n)
                .map(|i| prevzeros[i].dist_sq(&nextzeros[i]))
                .collect();

            let too_fast = (0..n).any(|i| &dn_sq[i] * &factor_sq > dm_sq[i]);
            if too_fast {
                None
            } else {
                let calm = (0..n).all(|i| &dn_sq[i] * &four_factor_sq < dm_sq[i]);
                Some((nextzeros, dm_sq, calm))
            }
        });

        match accepted {
            None => {
                step = &step / &Rational::from(2);
                if step < half_pow(MIN_STEP_EXPONENT) {
                    // The heuristic cannot make progress; report the
                    // separation failure at the blocked waypoint.
                    return Err(MonodromyError::StepUnderflow);
                }
            }
            Some((nextzeros, dm_sq, calm)) => {
                res = res.compose(&lbraid_to_word(&prevzeros, &nextzeros)?);
                prevzeros = nextzeros;
                total = next_t;

                if step < min_step {
                    min_step = step.clone();
                }
                for d in dm_sq {
                    if min_dist_sq.as_ref().map_or(true, |m| &d < m) {
                        min_dist_sq = Some(d);
                    }
                }

                if calm {
                    step = &step * &Rational::from(2);
                }
                let remaining = &Rational::one() - &total;
                if step > remaining && remaining.signum() > 0 {
                    step = remaining;
                }
            }
        }
    }

    debug!(
        min_step = %min_step,
        min_dist_sq = %min_dist_sq.map_or_else(|| "-".to_string(), |d| d.to_string()),
        "adaptive follower finished walking"
    );

    // Land exactly on the stored fibre.
    let fitted = fit(&prevzeros, end_fibre)?;
    res = res.compose(&lbraid_to_word(&prevzeros, &fitted)?);
    Ok(res)
}

fn half_pow(e: u32) -> Rational {
    Rational::from_i64(1, 2).pow(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_poly::YPoly;
    use plexus_roots::separate_roots;

    fn g(re: i64, im: i64) -> GaussianRational {
        GaussianRational::from_i64(re, im)
    }

    fn ypoly(cs: &[i64]) -> YPoly {
        YPoly::new(cs.iter().map(|&c| g(c, 0)).collect())
    }

    /// x² − y: fibres are the two square roots of y.
    fn parabola() -> BiPoly {
        BiPoly::new(vec![ypoly(&[0, -1]), ypoly(&[0]), ypoly(&[1])])
    }

    fn sorted_fibre(curve: &BiPoly, y: &GaussianRational) -> Vec<GaussianRational> {
        let mut roots = separate_roots(&curve.eval_y(y), 100, 800).unwrap();
        roots.sort_by(|p, q| p.re().cmp(q.re()).then_with(|| p.im().cmp(q.im())));
        roots
    }

    #[test]
    fn test_constant_fibre_segment_is_trivial() {
        // Away from the critical value the two roots of x² − y never
        // exchange along a real segment on the positive axis.
        let curve = parabola();
        let a = g(1, 0);
        let b = g(4, 0);
        let fa = sorted_fibre(&curve, &a);
        let fb = sorted_fibre(&curve, &b);
        let braid = follow_segment_approx(
            &curve,
            &a,
            &b,
            &fa,
            &fb,
            ADAPTIVITY_FACTOR,
            800,
        )
        .unwrap();
        assert!(braid.is_equivalent(&BraidWord::identity(2)));
    }

    #[test]
    fn test_half_circle_swaps_square_roots() {
        // Along y: 1 → i → −1 the square roots rotate a quarter turn
        // each; over the two quarter arcs (approximated by chords)
        // the strands exchange exactly once.
        let curve = parabola();
        let p1 = g(1, 0);
        let p2 = g(0, 1);
        let p3 = g(-1, 0);
        let f1 = sorted_fibre(&curve, &p1);
        let f2 = sorted_fibre(&curve, &p2);
        let f3 = sorted_fibre(&curve, &p3);

        let b1 = follow_segment_approx(&curve, &p1, &p2, &f1, &f2, ADAPTIVITY_FACTOR, 800)
            .unwrap();
        let b2 = follow_segment_approx(&curve, &p2, &p3, &f2, &f3, ADAPTIVITY_FACTOR, 800)
            .unwrap();
        let around = b1.compose(&b2);
        assert_eq!(around.permutation(), vec![1, 0]);
        assert_eq!(around.exponent_sum().abs(), 1);
    }
}
