//! Matching a computed fibre against the stored one.
//!
//! At the end of a segment the follower holds a computed
//! configuration that should coincide, up to small certified error,
//! with the fibre stored during preparation. `fit` pairs the two by
//! the closest-point map and fails loudly when the pairing is not a
//! clean bijection.

use plexus_integers::Rational;
use plexus_rings::gaussian::GaussianRational;
use plexus_roots::nearest_pair_sq;

use crate::MonodromyError;

/// Re-indexes `stored` so that entry `i` is the stored point closest
/// to `computed[i]`.
///
/// # Errors
///
/// [`MonodromyError::FitAmbiguous`] when the closest-point map is not
/// a bijection, or some displacement exceeds one tenth of the minimum
/// pairwise distance of `stored`.
///
/// # Panics
///
/// Panics if the two configurations have different sizes.
pub fn fit(
    computed: &[GaussianRational],
    stored: &[GaussianRational],
) -> Result<Vec<GaussianRational>, MonodromyError> {
    assert_eq!(computed.len(), stored.len(), "fibre sizes must agree");
    let n = computed.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n == 1 {
        return Ok(vec![stored[0].clone()]);
    }

    // Displacement tolerance: (dispersal / 10)², exactly.
    let tolerance = &nearest_pair_sq(stored) / &Rational::from(100);

    let mut taken = vec![false; n];
    let mut fitted = Vec::with_capacity(n);
    for c in computed {
        let mut best: Option<(usize, Rational)> = None;
        for (j, s) in stored.iter().enumerate() {
            let d = c.dist_sq(s);
            if best.as_ref().map_or(true, |(_, bd)| &d < bd) {
                best = Some((j, d));
            }
        }
        let (j, d) = best.expect("stored configuration is non-empty");
        if taken[j] || d > tolerance {
            return Err(MonodromyError::FitAmbiguous);
        }
        taken[j] = true;
        fitted.push(stored[j].clone());
    }

    Ok(fitted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(re: i64, im: i64) -> GaussianRational {
        GaussianRational::from_i64(re, im)
    }

    fn gq(re_n: i64, re_d: i64, im: i64) -> GaussianRational {
        GaussianRational::new(Rational::from_i64(re_n, re_d), Rational::from(im))
    }

    #[test]
    fn test_fit_matches_nearby() {
        let stored = vec![g(0, 0), g(10, 0)];
        let computed = vec![gq(1, 10, 0), gq(99, 10, 0)];
        let fitted = fit(&computed, &stored).unwrap();
        assert_eq!(fitted, vec![g(0, 0), g(10, 0)]);
    }

    #[test]
    fn test_fit_reorders() {
        let stored = vec![g(10, 0), g(0, 0)];
        let computed = vec![gq(1, 10, 0), gq(99, 10, 0)];
        let fitted = fit(&computed, &stored).unwrap();
        assert_eq!(fitted, vec![g(0, 0), g(10, 0)]);
    }

    #[test]
    fn test_fit_rejects_collapse() {
        // Both computed points nearest to the same stored point.
        let stored = vec![g(0, 0), g(10, 0)];
        let computed = vec![gq(1, 10, 0), gq(-1, 10, 0)];
        assert!(matches!(
            fit(&computed, &stored),
            Err(MonodromyError::FitAmbiguous)
        ));
    }

    #[test]
    fn test_fit_rejects_large_displacement() {
        // Displacement 2 exceeds dispersal/10 = 1.
        let stored = vec![g(0, 0), g(10, 0)];
        let computed = vec![g(2, 0), g(10, 0)];
        assert!(matches!(
            fit(&computed, &stored),
            Err(MonodromyError::FitAmbiguous)
        ));
    }
}
