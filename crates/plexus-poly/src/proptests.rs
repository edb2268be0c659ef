//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::algorithms::gcd::{poly_div_rem, poly_gcd};
    use crate::algorithms::squarefree::squarefree_part;
    use crate::dense::DensePoly;
    use crate::sturm::SturmSequence;
    use plexus_integers::Rational;

    fn small_coeff() -> impl Strategy<Value = Rational> {
        (-50i64..50i64).prop_map(Rational::from)
    }

    fn small_poly() -> impl Strategy<Value = DensePoly<Rational>> {
        proptest::collection::vec(small_coeff(), 1..=6).prop_map(DensePoly::new)
    }

    fn nonzero_poly() -> impl Strategy<Value = DensePoly<Rational>> {
        small_poly().prop_filter("must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
        }

        #[test]
        fn division_identity(a in small_poly(), b in nonzero_poly()) {
            let (q, r) = poly_div_rem(&a, &b);
            prop_assert_eq!(b.mul(&q).add(&r), a.clone());
            if !r.is_zero() {
                prop_assert!(r.degree() < b.degree());
            }
        }

        #[test]
        fn gcd_divides_both(a in nonzero_poly(), b in nonzero_poly()) {
            let g = poly_gcd(&a, &b);
            let (_, ra) = poly_div_rem(&a, &g);
            let (_, rb) = poly_div_rem(&b, &g);
            prop_assert!(ra.is_zero());
            prop_assert!(rb.is_zero());
        }

        #[test]
        fn squarefree_part_is_squarefree(a in nonzero_poly()) {
            let s = squarefree_part(&a);
            prop_assert!(crate::algorithms::squarefree::is_squarefree(&s));
        }

        // A squared factor never survives the squarefree part.
        #[test]
        fn squarefree_part_drops_squares(a in nonzero_poly()) {
            prop_assume!(a.degree() >= 1);
            let sq = a.mul(&a);
            let s = squarefree_part(&sq);
            prop_assert_eq!(s, squarefree_part(&a));
        }

        // Sturm counts never exceed the degree.
        #[test]
        fn sturm_count_bounded(p in nonzero_poly()) {
            prop_assume!(p.degree() >= 1);
            let seq = SturmSequence::new(&p);
            prop_assume!(p.eval(&Rational::from(-1000)).signum() != 0);
            let count = seq.count_roots(&Rational::from(-1000), &Rational::from(1000));
            prop_assert!(count <= p.degree());
        }

        // Horner evaluation is a ring homomorphism.
        #[test]
        fn eval_is_homomorphism(a in small_poly(), b in small_poly(), x in small_coeff()) {
            let lhs = a.mul(&b).eval(&x);
            let rhs = a.eval(&x) * b.eval(&x);
            prop_assert_eq!(lhs, rhs);
        }
    }
}
