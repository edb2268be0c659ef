//! Property-based tests for the geometric layer.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::loops::{build_loops, shrink, winding_number};
    use crate::primitives::{cycorder, dist_seg_sq, neighbours};
    use plexus_integers::Rational;
    use plexus_rings::gaussian::GaussianRational;

    fn point() -> impl Strategy<Value = GaussianRational> {
        ((-8i64..8), (-8i64..8)).prop_map(|(re, im)| GaussianRational::from_i64(re, im))
    }

    fn distinct_points(max: usize) -> impl Strategy<Value = Vec<GaussianRational>> {
        proptest::collection::vec(point(), 1..=max).prop_map(|mut v| {
            v.sort_by(|a, b| {
                a.re().cmp(b.re()).then_with(|| a.im().cmp(b.im()))
            });
            v.dedup();
            v
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn shrink_is_idempotent(seq in proptest::collection::vec(
            (1i64..6).prop_flat_map(|s| prop_oneof![Just(s), Just(-s)]), 0..24)) {
            let once = shrink(&seq);
            prop_assert_eq!(shrink(&once), once);
        }

        #[test]
        fn dist_seg_between_endpoint_distances(z in point(), a in point(), b in point()) {
            let d = dist_seg_sq(&z, &a, &b);
            prop_assert!(d <= z.dist_sq(&a));
            prop_assert!(d <= z.dist_sq(&b));
            prop_assert!(!d.is_negative());
        }

        #[test]
        fn cycorder_is_permutation(pts in distinct_points(6), c in point()) {
            prop_assume!(!pts.contains(&c));
            let sorted = cycorder(&pts, &c);
            prop_assert_eq!(sorted.len(), pts.len());
            for p in &pts {
                prop_assert!(sorted.contains(p));
            }
        }

        #[test]
        fn neighbours_subset_and_nonempty(pts in distinct_points(6)) {
            prop_assume!(pts.len() >= 2);
            let c = &pts[0];
            let nb = neighbours(&pts, c);
            prop_assert!(!nb.is_empty(), "the nearest point is always a neighbour");
            for y in &nb {
                prop_assert!(pts.contains(y));
                prop_assert!(y != c);
            }
        }

        #[test]
        fn loops_encircle_their_root_once(pts in distinct_points(4)) {
            let graph = build_loops(&pts).unwrap();
            prop_assert_eq!(graph.loops.len(), pts.len());

            for (l, centre) in graph.loops.iter().zip(&graph.centres) {
                // Rebuild the vertex path.
                let mut path = Vec::new();
                for (k, &s) in l.iter().enumerate() {
                    let idx = usize::try_from(s.unsigned_abs()).unwrap() - 1;
                    let (a, b) = graph.segments[idx];
                    let (from, to) = if s > 0 { (a, b) } else { (b, a) };
                    if k == 0 {
                        path.push(graph.points[from].clone());
                    }
                    path.push(graph.points[to].clone());
                }
                prop_assert_eq!(winding_number(&path, centre), 1);
                for other in &graph.centres {
                    if other != centre {
                        prop_assert_eq!(winding_number(&path, other), 0);
                    }
                }
            }
        }

        #[test]
        fn no_segment_meets_a_root(pts in distinct_points(4)) {
            let graph = build_loops(&pts).unwrap();
            for &(a, b) in &graph.segments {
                for r in &pts {
                    let d = dist_seg_sq(r, &graph.points[a], &graph.points[b]);
                    prop_assert!(d > Rational::from(0));
                }
            }
        }
    }
}
