//! Sturm sequences over ℚ[t].
//!
//! The certified monodromy follower protects each tracked root with a
//! disk whose validity along the segment reduces to the positivity of
//! a real polynomial in the segment parameter. Positivity on an
//! interval is decided exactly here: a Sturm chain counts the real
//! roots, and [`positive_prefix`] finds the largest dyadic prefix of
//! the parameter interval on which the polynomial stays positive.

use plexus_integers::Rational;
use plexus_rings::traits::Ring;
use smallvec::SmallVec;

use crate::algorithms::gcd::poly_div_rem;
use crate::dense::DensePoly;

/// A Sturm chain f₀ = p, f₁ = p′, f_{i+1} = −rem(f_{i−1}, f_i).
#[derive(Clone, Debug)]
pub struct SturmSequence {
    chain: Vec<DensePoly<Rational>>,
}

impl SturmSequence {
    /// Builds the Sturm chain of a polynomial.
    #[must_use]
    pub fn new(p: &DensePoly<Rational>) -> Self {
        let mut chain = vec![p.clone()];
        let dp = p.derivative();
        if dp.is_zero() {
            return Self { chain };
        }
        chain.push(dp);

        loop {
            let prev = &chain[chain.len() - 2];
            let curr = &chain[chain.len() - 1];
            let (_, r) = poly_div_rem(prev, curr);
            if r.is_zero() {
                break;
            }
            chain.push(r.neg());
        }

        Self { chain }
    }

    /// Counts sign variations of the chain evaluated at `x`.
    #[must_use]
    pub fn variations_at(&self, x: &Rational) -> usize {
        let mut signs: SmallVec<[i8; 8]> = SmallVec::new();
        for f in &self.chain {
            let s = f.eval(x).signum();
            if s != 0 {
                signs.push(s);
            }
        }

        signs.windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Counts the distinct real roots of the polynomial in the
    /// half-open interval `(a, b]`. The left endpoint must not be a
    /// root.
    ///
    /// # Panics
    ///
    /// Panics if `a > b`.
    #[must_use]
    pub fn count_roots(&self, a: &Rational, b: &Rational) -> usize {
        assert!(a <= b, "interval endpoints out of order");
        self.variations_at(a) - self.variations_at(b)
    }
}

/// Returns the largest dyadic `s ∈ (tm, 1]` of the searched family
/// such that `q > 0` throughout `[tm, s]`, or `None` when no progress
/// can be certified. `adapt` is an acceleration hint: the search
/// starts at step `(1 − tm)/2^adapt` and widens while it keeps
/// succeeding.
///
/// # Panics
///
/// Panics if `tm` is not in `[0, 1)`.
#[must_use]
pub fn positive_prefix(
    q: &DensePoly<Rational>,
    tm: &Rational,
    adapt: u32,
) -> Option<Rational> {
    let one = Rational::one();
    assert!(
        !tm.is_negative() && *tm < one,
        "parameter must lie in [0, 1)"
    );

    if q.eval(tm).signum() <= 0 {
        return None;
    }

    let seq = SturmSequence::new(q);
    let gap = &one - tm;
    let half = Rational::from_i64(1, 2);

    // No root anywhere ahead: the whole remaining interval is safe.
    if seq.count_roots(tm, &one) == 0 {
        return Some(one);
    }

    let mut j = adapt.clamp(1, 60);
    let mut step = gap.clone() * half.pow(j);

    // Shrink until the prefix is root-free.
    loop {
        let s = tm + &step;
        if seq.count_roots(tm, &s) == 0 {
            break;
        }
        j += 1;
        if j > 64 {
            return None;
        }
        step = &step * &half;
    }

    // Widen while the larger prefix stays root-free.
    while j > 1 {
        let wider = &step + &step;
        if seq.count_roots(tm, &(tm + &wider)) != 0 {
            break;
        }
        step = wider;
        j -= 1;
    }

    Some(tm + &step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(cs: &[i64]) -> DensePoly<Rational> {
        DensePoly::new(cs.iter().map(|&c| Rational::from(c)).collect())
    }

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    #[test]
    fn test_count_roots() {
        // (x-1)(x-2)(x-3) = x³ - 6x² + 11x - 6
        let p = poly(&[-6, 11, -6, 1]);
        let seq = SturmSequence::new(&p);
        assert_eq!(seq.count_roots(&q(0, 1), &q(4, 1)), 3);
        assert_eq!(seq.count_roots(&q(0, 1), &q(5, 2)), 2);
        assert_eq!(seq.count_roots(&q(7, 2), &q(10, 1)), 0);
        // Half-open: the root at 1 is counted from the left.
        assert_eq!(seq.count_roots(&q(1, 2), &q(1, 1)), 1);
    }

    #[test]
    fn test_repeated_roots_counted_once() {
        // (x-1)² has one distinct root.
        let p = poly(&[1, -2, 1]);
        let seq = SturmSequence::new(&p);
        assert_eq!(seq.count_roots(&q(0, 1), &q(2, 1)), 1);
    }

    #[test]
    fn test_positive_prefix_whole_interval() {
        // 2 - t is positive on all of [0, 1].
        let p = poly(&[2, -1]);
        assert_eq!(positive_prefix(&p, &q(0, 1), 1), Some(Rational::one()));
    }

    #[test]
    fn test_positive_prefix_stops_before_root() {
        // 1/2 - t changes sign at 1/2.
        let p = DensePoly::new(vec![q(1, 2), q(-1, 1)]);
        let s = positive_prefix(&p, &q(0, 1), 1).unwrap();
        assert!(s > q(0, 1) && s < q(1, 2));
        // The certified prefix is positive at its right end.
        assert!(p.eval(&s).signum() > 0);
    }

    #[test]
    fn test_positive_prefix_rejects_nonpositive_start() {
        let p = poly(&[-1]);
        assert!(positive_prefix(&p, &q(0, 1), 1).is_none());
    }

    #[test]
    fn test_positive_prefix_advances_from_interior() {
        // (t - 3/4)² + small positive: positive everywhere.
        // p = t² - 3/2 t + 5/8  (roots complex)
        let p = DensePoly::new(vec![q(5, 8), q(-3, 2), q(1, 1)]);
        assert_eq!(positive_prefix(&p, &q(1, 4), 3), Some(Rational::one()));
    }
}
