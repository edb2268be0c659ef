//! Reconstruction of the braid of a straight-line homotopy.
//!
//! Two configurations of n distinct points, paired by index, define
//! the homotopy `t ↦ (1−t)·v₁ + t·v₂`. Its braid is read off the
//! real-part projection: the parameters where two strands exchange
//! real-part order are enumerated exactly, simultaneous exchanges
//! form blocks contributing star braids, and the passing order is
//! decided by the imaginary parts. Strand positions are the
//! lexicographic (Re, Im) order of the configuration, which is what
//! makes braids of consecutive subsegments composable.

use plexus_integers::Rational;
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::Ring;
use smallvec::SmallVec;
use std::collections::BTreeSet;

use plexus_braid::BraidWord;

use crate::MonodromyError;

/// One strand's projected motion: `re(t) = re0 + t·dre`, and the
/// matching imaginary line.
#[derive(Clone, Debug)]
struct StrandLine {
    re0: Rational,
    dre: Rational,
    im0: Rational,
    dim: Rational,
}

impl StrandLine {
    fn re_at(&self, t: &Rational) -> Rational {
        &self.re0 + &(&self.dre * t)
    }

    fn im_at(&self, t: &Rational) -> Rational {
        &self.im0 + &(&self.dim * t)
    }
}

/// Computes the braid generated by the straight-line homotopy from
/// `v1` to `v2` (strands paired by index), as an element of `Bₙ`
/// whose strand positions follow the lexicographic (Re, Im) order.
///
/// # Errors
///
/// [`MonodromyError::SingularMonodromy`] when two strands collide or
/// a simultaneous exchange has no coherent passing order even after
/// lexicographic desingularisation.
///
/// # Panics
///
/// Panics if the configurations have different sizes.
pub fn lbraid_to_word(
    v1: &[GaussianRational],
    v2: &[GaussianRational],
) -> Result<BraidWord, MonodromyError> {
    assert_eq!(v1.len(), v2.len(), "configurations must pair up");
    let n = v1.len();
    if n < 2 {
        return Ok(BraidWord::identity(n.max(1)));
    }

    // Lexicographic desingularisation: shear Re ← Re + λ·Im with λ
    // small enough to keep every distinct-Re pair in order. Any
    // positive λ below the bound separates equal-Re pairs, and the
    // induced strand order is the lexicographic (Re, Im) order.
    let mut lambda = desingularising_shear(v1, v2);
    for _ in 0..8 {
        match braid_of_sheared(v1, v2, &lambda) {
            Err(MonodromyError::SingularMonodromy) => {
                lambda = &lambda / &Rational::from(2);
            }
            other => return other,
        }
    }
    Err(MonodromyError::SingularMonodromy)
}

/// The largest shear that provably preserves the relative order of
/// every pair with distinct real parts, in both configurations.
fn desingularising_shear(v1: &[GaussianRational], v2: &[GaussianRational]) -> Rational {
    let mut min_gap: Option<Rational> = None;
    let mut max_dim = Rational::one();

    for config in [v1, v2] {
        for (i, a) in config.iter().enumerate() {
            for b in &config[i + 1..] {
                let dre = (a.re() - b.re()).abs();
                let dim = (a.im() - b.im()).abs();
                if dim > max_dim {
                    max_dim = dim;
                }
                if dre.signum() > 0 && min_gap.as_ref().map_or(true, |g| &dre < g) {
                    min_gap = Some(dre);
                }
            }
        }
    }

    match min_gap {
        Some(g) => &g / &(&max_dim * &Rational::from(2)),
        None => Rational::one(),
    }
}

fn sheared_lines(
    v1: &[GaussianRational],
    v2: &[GaussianRational],
    lambda: &Rational,
) -> Vec<StrandLine> {
    v1.iter()
        .zip(v2)
        .map(|(a, b)| {
            let re0 = a.re() + &(lambda * a.im());
            let re1 = b.re() + &(lambda * b.im());
            let im0 = a.im() - &(lambda * a.re());
            let im1 = b.im() - &(lambda * b.re());
            StrandLine {
                dre: &re1 - &re0,
                dim: &im1 - &im0,
                re0,
                im0,
            }
        })
        .collect()
}

fn braid_of_sheared(
    v1: &[GaussianRational],
    v2: &[GaussianRational],
    lambda: &Rational,
) -> Result<BraidWord, MonodromyError> {
    let n = v1.len();
    let lines = sheared_lines(v1, v2, lambda);

    // The shear must leave all starts and all ends distinct.
    for t in [Rational::zero(), Rational::one()] {
        let mut res: Vec<Rational> = lines.iter().map(|l| l.re_at(&t)).collect();
        res.sort();
        if res.windows(2).any(|w| w[0] == w[1]) {
            return Err(MonodromyError::SingularMonodromy);
        }
    }

    // Exchange parameters: t with re_i(t) = re_j(t), kept when the
    // order genuinely swaps, i.e. the sign of the difference differs
    // at the two ends.
    let mut events: BTreeSet<Rational> = BTreeSet::new();
    for i in 0..n {
        for j in i + 1..n {
            let d0 = &lines[i].re0 - &lines[j].re0;
            let d1 = &(&lines[i].re0 + &lines[i].dre) - &(&lines[j].re0 + &lines[j].dre);
            if d0.signum() * d1.signum() >= 0 {
                continue;
            }
            events.insert(&d0 / &(&d0 - &d1));
        }
    }

    // Strand order at the start.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| lines[i].re0.cmp(&lines[j].re0));

    let mut braid = BraidWord::identity(n);
    for t in &events {
        let xs: Vec<Rational> = order.iter().map(|&s| lines[s].re_at(t)).collect();

        // Blocks of equal projected position exchange completely.
        let mut start = 0;
        while start < n {
            let mut end = start + 1;
            while end < n && xs[end] == xs[start] {
                end += 1;
            }
            let size = end - start;
            if size >= 2 {
                let ims: SmallVec<[Rational; 4]> = order[start..end]
                    .iter()
                    .map(|&s| lines[s].im_at(t))
                    .collect();

                // A coherent passing order means strictly monotone
                // imaginary parts across the block; a tie is a true
                // collision of strands.
                let increasing = ims.windows(2).all(|w| w[0] < w[1]);
                let decreasing = ims.windows(2).all(|w| w[0] > w[1]);
                if !increasing && !decreasing {
                    return Err(MonodromyError::SingularMonodromy);
                }

                braid = braid.compose(&BraidWord::half_twist(n, start, size, increasing));
                order[start..end].reverse();
            }
            start = end;
        }
    }

    Ok(braid)
}
