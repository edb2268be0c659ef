//! Property-based tests for the scalar fields.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::cyclotomic::unit_root;
    use crate::gaussian::GaussianRational;
    use crate::traits::{Field, Ring};
    use plexus_integers::Rational;

    fn small_rational() -> impl Strategy<Value = Rational> {
        (-100i64..100i64, 1i64..100i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn gaussian() -> impl Strategy<Value = GaussianRational> {
        (small_rational(), small_rational()).prop_map(|(re, im)| GaussianRational::new(re, im))
    }

    proptest! {
        #[test]
        fn gaussian_mul_commutative(a in gaussian(), b in gaussian()) {
            prop_assert_eq!(a.clone() * b.clone(), b * a);
        }

        #[test]
        fn gaussian_distributive(a in gaussian(), b in gaussian(), c in gaussian()) {
            let left = a.clone() * (b.clone() + c.clone());
            let right = a.clone() * b + a * c;
            prop_assert_eq!(left, right);
        }

        #[test]
        fn gaussian_inverse(a in gaussian()) {
            prop_assume!(!Ring::is_zero(&a));
            let inv = Field::inv(&a).unwrap();
            prop_assert!(Ring::is_one(&(a * inv)));
        }

        #[test]
        fn gaussian_norm_multiplicative(a in gaussian(), b in gaussian()) {
            let prod = a.clone() * b.clone();
            prop_assert_eq!(prod.norm_sq(), &a.norm_sq() * &b.norm_sq());
        }

        #[test]
        fn conjugation_fixes_norm(a in gaussian()) {
            prop_assert_eq!(a.conj().norm_sq(), a.norm_sq());
        }

        // Group law of the folded exact roots: E(4,a)·E(4,b) = E(4,a+b).
        #[test]
        fn quarter_roots_multiply(a in 0i64..8, b in 0i64..8) {
            let p = Rational::from_i64(1, 1000);
            let lhs = unit_root(4, a, &p) * unit_root(4, b, &p);
            prop_assert_eq!(lhs, unit_root(4, a + b, &p));
        }
    }
}
