//! Certified root separation.
//!
//! `separate_roots_initial_guess` turns a list of per-root guesses
//! into refined roots with pairwise-disjoint isolating disks;
//! `separate_roots` bootstraps the guesses from nothing by peeling
//! one root at a time off rotated seeds.

use plexus_integers::Rational;
use plexus_poly::DensePoly;
use plexus_rings::cyclotomic::unit_root;
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::Ring;

use crate::newton::newton_root;
use crate::RootError;

/// Returns the minimum pairwise squared distance of a configuration
/// (the square of its dispersal).
///
/// # Panics
///
/// Panics if fewer than two points are given.
#[must_use]
pub fn nearest_pair_sq(points: &[GaussianRational]) -> Rational {
    assert!(points.len() >= 2, "need at least two points");

    let mut best: Option<Rational> = None;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = a.dist_sq(b);
            if best.as_ref().map_or(true, |m| &d < m) {
                best = Some(d);
            }
        }
    }
    best.expect("at least one pair")
}

/// Refines one guess per root and certifies separation.
///
/// Each guess is refined with tolerance `nearest_pair(v)/(2·safety)`.
/// The call succeeds when every refinement converges and the disks of
/// radius `dist_min(result)/(2·safety)` around the results are
/// pairwise disjoint with one root each (certified through the
/// squared error bounds of [`newton_root`]).
///
/// # Errors
///
/// [`RootError::NewtonNonConvergent`] if a refinement fails;
/// [`RootError::RootsNotSeparated`] if the separation certificate
/// does not hold.
///
/// # Panics
///
/// Panics if the number of guesses differs from the degree of `p`.
pub fn separate_roots_initial_guess(
    p: &DensePoly<GaussianRational>,
    v: &[GaussianRational],
    safety: u32,
    newton_limit: u32,
) -> Result<Vec<GaussianRational>, RootError> {
    assert_eq!(v.len(), p.degree(), "one guess per root is required");
    assert!(safety >= 1, "safety factor must be at least 1");

    if v.len() == 1 {
        // A single root needs no separation; refine at fixed precision.
        let eps = Rational::from_i64(1, 1024);
        let (z, _) = newton_root(p, &v[0], &eps, newton_limit)?;
        return Ok(vec![z]);
    }

    // Squared tolerance (nearest_pair / (2·safety))².
    let spread_sq = nearest_pair_sq(v);
    let four_safety_sq = Rational::from(4 * i64::from(safety) * i64::from(safety));
    let eps_sq = &spread_sq / &four_safety_sq;
    let eps = rational_sqrt_upper(&eps_sq);

    let mut refined = Vec::with_capacity(v.len());
    let mut max_err_sq = Rational::zero();
    for guess in v {
        let (z, err_sq) = newton_root(p, guess, &eps, newton_limit)?;
        if err_sq > max_err_sq {
            max_err_sq = err_sq.clone();
        }
        refined.push(z);
    }

    // Certificate: the disk radius dist_min/(2·safety) must exceed
    // every error bound, compared in squared form.
    let refined_spread_sq = nearest_pair_sq(&refined);
    let radius_sq = &refined_spread_sq / &four_safety_sq;
    if radius_sq > max_err_sq {
        Ok(refined)
    } else {
        Err(RootError::RootsNotSeparated)
    }
}

/// Computes all roots of a squarefree polynomial with certified
/// separation, bootstrapping from rotated seeds.
///
/// # Errors
///
/// [`RootError::RootsNotSeparated`] when the certificate cannot be
/// established (in particular when `p` has multiple roots);
/// [`RootError::NewtonNonConvergent`] when no seed converges.
pub fn separate_roots(
    p: &DensePoly<GaussianRational>,
    safety: u32,
    newton_limit: u32,
) -> Result<Vec<GaussianRational>, RootError> {
    let n = p.degree();
    if n == 0 {
        return Ok(Vec::new());
    }

    // The bootstrap tolerance is refined on retry: a first pass that
    // merged two nearby roots fails certification, not silently.
    let mut boot_eps = Rational::from_i64(1, 1024);
    let mut last_err = RootError::RootsNotSeparated;
    for _ in 0..3 {
        match bootstrap(p, &boot_eps, newton_limit)
            .and_then(|guesses| separate_roots_initial_guess(p, &guesses, safety, newton_limit))
        {
            Ok(roots) => return Ok(roots),
            Err(e) => last_err = e,
        }
        boot_eps = &boot_eps / &Rational::from(64);
    }
    Err(last_err)
}

/// Finds one root per deflation stage from seeds
/// `5/4 · E(2·(deg p + 1))^k`, removing each found root by synthetic
/// division. The accumulated guesses are only trusted after the
/// final certification pass.
fn bootstrap(
    p: &DensePoly<GaussianRational>,
    eps: &Rational,
    newton_limit: u32,
) -> Result<Vec<GaussianRational>, RootError> {
    let mut current = p.clone();
    let mut guesses = Vec::with_capacity(p.degree());
    let seed_order = u32::try_from(2 * (p.degree() + 1)).expect("degree fits in u32");
    let seed_prec = Rational::from_i64(1, 100);
    let radius = Rational::from_i64(5, 4);

    while current.degree() >= 1 {
        let mut found = None;
        for k in 0..i64::from(seed_order) {
            let seed = unit_root(seed_order, k, &seed_prec).scale(&radius);
            // The deflated polynomial is searched, so seeds cannot be
            // recaptured by roots already found.
            if let Ok((z, _)) = newton_root(&current, &seed, eps, newton_limit) {
                found = Some(z);
                break;
            }
        }

        let Some(z) = found else {
            return Err(RootError::NewtonNonConvergent {
                iterations: newton_limit,
            });
        };
        current = deflate(&current, &z);
        guesses.push(z);
    }

    Ok(guesses)
}

/// Synthetic division by (x − z), dropping the remainder. The
/// quotient is only approximate when `z` is; the subsequent
/// certification pass absorbs that error.
fn deflate(p: &DensePoly<GaussianRational>, z: &GaussianRational) -> DensePoly<GaussianRational> {
    let coeffs = p.coeffs();
    let n = coeffs.len();
    let mut quotient = vec![GaussianRational::zero(); n - 1];

    let mut carry = GaussianRational::zero();
    for i in (1..n).rev() {
        carry = coeffs[i].clone() + carry * z.clone();
        quotient[i - 1] = carry.clone();
    }

    DensePoly::new(quotient)
}

/// A rational upper bound for the square root of a non-negative
/// rational, from a few Newton-from-above steps. Used to turn
/// certified squared radii back into length tolerances.
#[must_use]
pub fn rational_sqrt_upper(q: &Rational) -> Rational {
    if Ring::is_zero(q) {
        return Rational::zero();
    }

    // (q + 1)/2 ≥ √q for every q ≥ 0, and the Newton map
    // u ← (u + q/u)/2 preserves the upper bound.
    let half = Rational::from_i64(1, 2);
    let mut u = (q + &Rational::one()) * half.clone();
    for _ in 0..8 {
        u = (&u + &(q / &u)) * half.clone();
        // Keep the denominators small; rounding up preserves the bound.
        let slack = &u / &Rational::from(1000);
        u = plexus_integers::simp(&(&u + &slack), &slack);
    }
    u
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(re: i64, im: i64) -> GaussianRational {
        GaussianRational::from_i64(re, im)
    }

    fn real_poly(cs: &[i64]) -> DensePoly<GaussianRational> {
        DensePoly::new(cs.iter().map(|&c| g(c, 0)).collect())
    }

    fn close(a: &GaussianRational, b: &GaussianRational) -> bool {
        a.dist_sq(b) < Rational::from_i64(1, 2500)
    }

    #[test]
    fn test_sqrt_upper_bound() {
        for n in [2i64, 3, 10, 1000] {
            let q = Rational::from(n);
            let u = rational_sqrt_upper(&q);
            assert!(&u * &u >= q);
        }
    }

    #[test]
    fn test_nearest_pair() {
        let pts = vec![g(0, 0), g(3, 0), g(0, 1)];
        assert_eq!(nearest_pair_sq(&pts), Rational::from(1));
    }

    #[test]
    fn test_separate_three_real_roots() {
        // (x − 1)(x + 1)(x − 3) = x³ − 3x² − x + 3
        let p = real_poly(&[3, -1, -3, 1]);
        let roots = separate_roots(&p, 100, 800).unwrap();
        assert_eq!(roots.len(), 3);
        for expected in [g(1, 0), g(-1, 0), g(3, 0)] {
            assert!(
                roots.iter().any(|r| close(r, &expected)),
                "missing root near {expected:?}"
            );
        }
    }

    #[test]
    fn test_separate_complex_pair() {
        // x² + 1 has roots ±i.
        let p = real_poly(&[1, 0, 1]);
        let roots = separate_roots(&p, 100, 800).unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().any(|r| close(r, &g(0, 1))));
        assert!(roots.iter().any(|r| close(r, &g(0, -1))));
    }

    #[test]
    fn test_multiple_root_rejected() {
        // (x − 1)² cannot be separated.
        let p = real_poly(&[1, -2, 1]);
        assert!(separate_roots(&p, 100, 800).is_err());
    }

    #[test]
    fn test_initial_guess_certificate() {
        // Guesses close to the roots of (x−2)(x+2).
        let p = real_poly(&[-4, 0, 1]);
        let guesses = vec![
            GaussianRational::new(Rational::from_i64(21, 10), Rational::zero()),
            GaussianRational::new(Rational::from_i64(-19, 10), Rational::zero()),
        ];
        let refined = separate_roots_initial_guess(&p, &guesses, 100, 800).unwrap();
        assert!(refined.iter().any(|r| close(r, &g(2, 0))));
        assert!(refined.iter().any(|r| close(r, &g(-2, 0))));
    }
}
