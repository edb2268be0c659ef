//! Property-based tests for exact arithmetic and the interval utilities.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::rational::{dyadic_between, simp};
    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn small_rational() -> impl Strategy<Value = Rational> {
        (small_int(), 1i64..1000i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn small_prec() -> impl Strategy<Value = Rational> {
        (1i64..1000i64, 1i64..100_000i64)
            .prop_filter("proper fraction", |(n, d)| n < d)
            .prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    proptest! {
        #[test]
        fn integer_gcd_divides(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);
            if !g.is_zero() {
                prop_assert!((a % g.clone()).is_zero());
                prop_assert!((b % g).is_zero());
            }
        }

        #[test]
        fn rational_field_inverse(r in small_rational()) {
            prop_assume!(!r.is_zero());
            let prod = r.clone() * r.recip();
            prop_assert_eq!(prod, Rational::from(1));
        }

        #[test]
        fn floor_bracket(r in small_rational()) {
            let fl = Rational::from_integer(r.floor());
            prop_assert!(fl <= r.clone());
            prop_assert!(r < fl + Rational::from(1));
        }

        // The simp contract: within prec, and no simpler than the input.
        #[test]
        fn simp_within_precision(t in small_rational(), prec in small_prec()) {
            let s = simp(&t, &prec);
            prop_assert!((&s - &t).abs() <= prec);
            prop_assert!(s.denominator() <= t.denominator());
        }

        #[test]
        fn simp_exact_at_zero_precision(t in small_rational()) {
            prop_assert_eq!(simp(&t, &Rational::zero()), t);
        }

        #[test]
        fn dyadic_between_is_inside(a in small_rational(), b in small_rational()) {
            prop_assume!(a != b);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let d = dyadic_between(&lo, &hi);
            prop_assert!(lo < d && d < hi);
        }
    }
}
