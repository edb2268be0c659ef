//! Property-based tests for braid words and the Hurwitz action.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::free::FreeWord;
    use crate::hurwitz::hurwitz_action;
    use crate::word::BraidWord;

    const STRANDS: usize = 4;

    fn gen_letter() -> impl Strategy<Value = i32> {
        let top = STRANDS as i32;
        prop_oneof![1..top, (1 - top)..0]
    }

    fn braid() -> impl Strategy<Value = BraidWord> {
        proptest::collection::vec(gen_letter(), 0..12)
            .prop_map(|gens| BraidWord::from_gens(STRANDS, gens))
    }

    fn basis() -> Vec<FreeWord> {
        (1..=STRANDS as i32).map(FreeWord::generator).collect()
    }

    proptest! {
        #[test]
        fn inverse_cancels(b in braid()) {
            prop_assert!(b.compose(&b.inverse()).is_identity_word());
        }

        #[test]
        fn action_is_a_group_action(a in braid(), b in braid()) {
            // Acting by a·b equals acting by a then by b.
            let t = basis();
            let seq = hurwitz_action(&b, &hurwitz_action(&a, &t));
            let joint = hurwitz_action(&a.compose(&b), &t);
            prop_assert_eq!(seq, joint);
        }

        #[test]
        fn action_preserves_total_product(b in braid()) {
            let t = basis();
            let image = hurwitz_action(&b, &t);
            let prod = |v: &[FreeWord]| {
                v.iter().fold(FreeWord::identity(), |acc, w| acc.concat(w))
            };
            prop_assert_eq!(prod(&image), prod(&t));
        }

        #[test]
        fn permutation_matches_exponents(b in braid()) {
            // The permutation is a braid-group invariant of the word.
            let perm = b.permutation();
            let mut sorted = perm.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..STRANDS).collect::<Vec<_>>());
        }

        #[test]
        fn shrink_preserves_conjugacy_class_exponent(b in braid()) {
            prop_assert_eq!(b.shrink().exponent_sum(), b.exponent_sum());
        }

        #[test]
        fn equivalence_is_reflexive_under_relation(b in braid()) {
            prop_assert!(b.is_equivalent(&b));
        }
    }
}
