//! Certified enclosures of roots of unity.
//!
//! The engine needs `E(n, k) = e^{2πik/n}` in two places: rotated
//! Newton seeds and the rotation trick in the crossing helper. Both
//! tolerate an enclosure, so roots of unity are produced as exact
//! Gaussian rationals when the angle is a multiple of a quarter turn
//! and as certified rational approximations otherwise.
//!
//! All series are evaluated in exact rational arithmetic with
//! alternating-series remainder bounds; π comes from Machin's
//! formula. Nothing here is a floating-point shortcut.

use plexus_integers::Rational;

use crate::gaussian::GaussianRational;
use crate::traits::Ring;

/// Computes arctan(1/m) within `budget` by the alternating series
/// Σ (-1)^j / ((2j+1) m^(2j+1)).
fn arctan_recip(m: i64, budget: &Rational) -> Rational {
    let msq = Rational::from(m * m);
    let mut term = Rational::from(m).recip();
    let mut sum = Rational::zero();
    let mut j = 0u32;

    // Terms are strictly decreasing, so the remainder after stopping
    // is bounded by the first omitted term.
    loop {
        let signed = if j % 2 == 0 { term.clone() } else { -&term };
        sum = &sum + &signed;
        j += 1;
        let odd = Rational::from(i64::from(2 * j + 1));
        term = &(&term * &msq.recip()) * &(odd.recip() * Rational::from(i64::from(2 * j - 1)));
        if &term <= budget {
            break;
        }
    }
    sum
}

/// Returns a rational p with |p - π| <= budget, via
/// π = 16·arctan(1/5) - 4·arctan(1/239).
///
/// # Panics
///
/// Panics if `budget` is not positive.
#[must_use]
pub fn pi_approx(budget: &Rational) -> Rational {
    assert!(budget.signum() > 0, "budget must be positive");
    let b5 = budget / &Rational::from(32);
    let b239 = budget / &Rational::from(8);
    let a5 = arctan_recip(5, &b5);
    let a239 = arctan_recip(239, &b239);
    &(&a5 * &Rational::from(16)) - &(&a239 * &Rational::from(4))
}

/// Computes (cos x, sin x) with each component within `budget`, by
/// the Taylor series with alternating-remainder bounds. Requires
/// |x| <= 4, which covers every folded angle the crate produces.
///
/// # Panics
///
/// Panics if `budget` is not positive or |x| > 4.
#[must_use]
pub fn cos_sin(x: &Rational, budget: &Rational) -> (Rational, Rational) {
    assert!(budget.signum() > 0, "budget must be positive");
    assert!(x.abs() <= Rational::from(4), "angle must be folded first");

    let xsq = x * x;
    let mut cos_term = Rational::one();
    let mut sin_term = x.clone();
    let mut cos = Rational::zero();
    let mut sin = Rational::zero();
    let mut j: i64 = 0;

    loop {
        if j % 2 == 0 {
            cos = &cos + &cos_term;
            sin = &sin + &sin_term;
        } else {
            cos = &cos - &cos_term;
            sin = &sin - &sin_term;
        }

        // cos term ratio: x² / ((2j+1)(2j+2)); sin: x² / ((2j+2)(2j+3)).
        let c_div = Rational::from((2 * j + 1) * (2 * j + 2));
        let s_div = Rational::from((2 * j + 2) * (2 * j + 3));
        cos_term = &(&cos_term * &xsq) / &c_div;
        sin_term = &(&sin_term * &xsq) / &s_div;
        j += 1;

        // Once the next ratio is below one, the series alternate with
        // decreasing terms and the remainder is the first omitted term.
        let decreasing = xsq <= Rational::from((2 * j + 1) * (2 * j + 2));
        if decreasing && &cos_term <= budget && &sin_term.abs() <= budget {
            break;
        }
    }

    (cos, sin)
}

/// Returns a certified enclosure of the root of unity
/// `E(n, k) = e^{2πik/n}`: exact when the angle is a multiple of a
/// quarter turn, otherwise a Gaussian rational within `prec` in
/// modulus of the true value.
///
/// # Panics
///
/// Panics if `n` is zero or `prec` is not positive.
#[must_use]
pub fn unit_root(n: u32, k: i64, prec: &Rational) -> GaussianRational {
    assert!(n > 0, "order must be positive");
    assert!(prec.signum() > 0, "precision must be positive");

    let n_i = i64::from(n);
    let kk = k.rem_euclid(n_i);

    if (4 * kk) % n_i == 0 {
        return match (4 * kk) / n_i {
            0 => GaussianRational::one(),
            1 => GaussianRational::i(),
            2 => -GaussianRational::one(),
            _ => -GaussianRational::i(),
        };
    }

    // Fold the angle to (-π, π].
    let kk = if 2 * kk > n_i { kk - n_i } else { kk };
    let ratio = Rational::from_i64(2 * kk, n_i);

    let pi_budget = prec / &Rational::from(8);
    let trig_budget = prec / &Rational::from(4);
    let x = &ratio * &pi_approx(&pi_budget);
    let (c, s) = cos_sin(&x, &trig_budget);
    GaussianRational::new(c, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milli() -> Rational {
        Rational::from_i64(1, 1000)
    }

    #[test]
    fn test_quarter_turns_exact() {
        let p = milli();
        assert_eq!(unit_root(1, 0, &p), GaussianRational::one());
        assert_eq!(unit_root(2, 1, &p), -GaussianRational::one());
        assert_eq!(unit_root(4, 1, &p), GaussianRational::i());
        assert_eq!(unit_root(4, 3, &p), -GaussianRational::i());
        assert_eq!(unit_root(8, 2, &p), GaussianRational::i());
        assert_eq!(unit_root(4, -1, &p), -GaussianRational::i());
    }

    #[test]
    fn test_pi_brackets() {
        let p = pi_approx(&Rational::from_i64(1, 1_000_000));
        assert!(p > Rational::from_i64(314_159, 100_000));
        assert!(p < Rational::from_i64(314_160, 100_000));
    }

    #[test]
    fn test_cos_sin_zero() {
        let (c, s) = cos_sin(&Rational::zero(), &milli());
        assert_eq!(c, Rational::one());
        assert_eq!(s, Rational::zero());
    }

    #[test]
    fn test_third_root() {
        // E(3, 1) = -1/2 + (√3/2)i.
        let p = milli();
        let z = unit_root(3, 1, &p);
        assert!((z.re() + &Rational::from_i64(1, 2)).abs() <= p);
        assert!(z.im().signum() > 0);
    }

    #[test]
    fn test_modulus_near_one() {
        let p = milli();
        for (n, k) in [(3u32, 1i64), (5, 2), (6, 1), (7, 3), (12, 5)] {
            let z = unit_root(n, k, &p);
            let lo = (Rational::one() - p.clone()).pow(2);
            let hi = (Rational::one() + p.clone()).pow(2);
            let nsq = z.norm_sq();
            assert!(nsq >= lo && nsq <= hi, "E({n},{k}) modulus drifted");
        }
    }
}
