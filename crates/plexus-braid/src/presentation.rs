//! Finitely presented groups and Tietze-style simplification.
//!
//! The pipeline delivers its result as a `Presentation`; the
//! simplifier removes redundant relators and eliminates generators
//! that some relator defines in terms of the others. Abelianisation
//! invariants come from an integer Smith normal form and back the
//! Betti-number checks of the test suite.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::free::FreeWord;

/// A finite presentation ⟨ x_1,…,x_n | r_1,…,r_m ⟩.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Presentation {
    /// Number of generators.
    pub generators: usize,
    /// Relators, freely and cyclically reduced.
    pub relators: Vec<FreeWord>,
}

/// Invariants of the abelianisation ℤ^rank ⊕ ⊕ᵢ ℤ/tᵢ.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AbelianInvariants {
    /// Rank of the free part (the first Betti number).
    pub rank: usize,
    /// Non-trivial torsion coefficients, each dividing the next.
    pub torsion: Vec<u64>,
}

impl Presentation {
    /// Creates a presentation, normalising the relator list (cyclic
    /// reduction, removal of trivial and duplicate relators).
    #[must_use]
    pub fn new(generators: usize, relators: Vec<FreeWord>) -> Self {
        let mut p = Self {
            generators,
            relators,
        };
        p.normalise();
        p
    }

    /// The free group of the given rank.
    #[must_use]
    pub fn free(generators: usize) -> Self {
        Self {
            generators,
            relators: Vec::new(),
        }
    }

    fn normalise(&mut self) {
        let mut seen: FxHashSet<Vec<i32>> = FxHashSet::default();
        let mut kept = Vec::with_capacity(self.relators.len());

        for r in &self.relators {
            let r = r.cyclic_reduce();
            if r.is_identity() {
                continue;
            }
            if seen.insert(cyclic_canonical(&r)) {
                kept.push(r);
            }
        }

        self.relators = kept;
    }

    /// Runs Tietze simplification: repeatedly drops redundant
    /// relators and eliminates generators that occur exactly once in
    /// some relator (substituting their definition elsewhere).
    #[must_use]
    pub fn simplified(&self) -> Self {
        let mut p = self.clone();
        loop {
            p.normalise();
            match eliminate_one(&p) {
                Some(next) => p = next,
                None => break,
            }
        }
        p
    }

    /// Computes the abelianisation invariants via Smith normal form
    /// of the relation matrix.
    #[must_use]
    pub fn abelian_invariants(&self) -> AbelianInvariants {
        let rows: Vec<Vec<i64>> = self
            .relators
            .iter()
            .map(|r| r.exponent_vector(self.generators))
            .collect();

        let diag = smith_diagonal(rows, self.generators);
        let nonzero = diag.iter().filter(|&&d| d != 0).count();
        let torsion = diag
            .iter()
            .filter(|&&d| d > 1)
            .map(|&d| u64::try_from(d).expect("diagonal entries are normalised non-negative"))
            .collect();

        AbelianInvariants {
            rank: self.generators - nonzero,
            torsion,
        }
    }
}

/// Canonical representative of a cyclic word up to rotation and
/// inversion, for duplicate detection.
fn cyclic_canonical(w: &FreeWord) -> Vec<i32> {
    let letters = w.letters();
    if letters.is_empty() {
        return Vec::new();
    }

    let mut best: Option<Vec<i32>> = None;
    for word in [w.clone(), w.inverse()] {
        let ls = word.letters().to_vec();
        for shift in 0..ls.len() {
            let mut rotated = ls[shift..].to_vec();
            rotated.extend_from_slice(&ls[..shift]);
            if best.as_ref().map_or(true, |b| &rotated < b) {
                best = Some(rotated);
            }
        }
    }
    best.expect("word is non-empty")
}

/// Elimination length cap: a generator is only eliminated when its
/// definition stays short, so substitution cannot blow the
/// presentation up.
const MAX_REPLACEMENT_LEN: usize = 100;

fn eliminate_one(p: &Presentation) -> Option<Presentation> {
    for (ri, r) in p.relators.iter().enumerate() {
        let letters = r.letters();

        let mut counts = vec![0usize; p.generators];
        for &l in letters {
            counts[l.unsigned_abs() as usize - 1] += 1;
        }

        for (g0, &count) in counts.iter().enumerate() {
            if count != 1 || letters.len() - 1 > MAX_REPLACEMENT_LEN {
                continue;
            }
            let g = i32::try_from(g0 + 1).expect("generator index fits in i32");

            let pos = letters
                .iter()
                .position(|&l| l.unsigned_abs() as usize == g0 + 1)
                .expect("counted generator occurs");

            // Rotate the cyclic relator to start with ±g: r = (±g)·w.
            let mut w: Vec<i32> = letters[pos + 1..].to_vec();
            w.extend_from_slice(&letters[..pos]);
            let w = FreeWord::from_letters(w);

            // (g)·w = 1 gives g = w⁻¹; (g⁻¹)·w = 1 gives g = w.
            let replacement = if letters[pos] > 0 { w.inverse() } else { w };

            let images: Vec<FreeWord> = (1..=p.generators)
                .map(|k| {
                    if k == g0 + 1 {
                        replacement.clone()
                    } else {
                        FreeWord::generator(i32::try_from(k).expect("index fits in i32"))
                    }
                })
                .collect();

            let relators: Vec<FreeWord> = p
                .relators
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != ri)
                .map(|(_, rel)| renumber_without(&rel.substitute(&images), g))
                .collect();

            return Some(Presentation::new(p.generators - 1, relators));
        }
    }
    None
}

/// Shifts generator indices above the removed one down by one.
fn renumber_without(w: &FreeWord, removed: i32) -> FreeWord {
    FreeWord::from_letters(w.letters().iter().map(|&l| {
        debug_assert!(l.unsigned_abs() != removed.unsigned_abs(), "eliminated generator survived");
        if l.abs() > removed {
            l - l.signum()
        } else {
            l
        }
    }))
}

/// Diagonal of the Smith normal form of an integer matrix with
/// `cols` columns; entries are returned non-negative with each
/// dividing the next.
fn smith_diagonal(mut m: Vec<Vec<i64>>, cols: usize) -> Vec<i64> {
    let rows = m.len();
    let dims = rows.min(cols);
    let mut diag = Vec::with_capacity(dims);

    let mut k = 0;
    while k < dims {
        // Pick the non-zero entry of smallest magnitude as pivot.
        let mut pivot: Option<(usize, usize)> = None;
        for i in k..rows {
            for j in k..cols {
                if m[i][j] != 0
                    && pivot.map_or(true, |(pi, pj)| m[i][j].abs() < m[pi][pj].abs())
                {
                    pivot = Some((i, j));
                }
            }
        }
        let Some((pi, pj)) = pivot else {
            break;
        };
        m.swap(k, pi);
        for row in &mut m {
            row.swap(k, pj);
        }

        // Clear row and column k; restart when a remainder survives.
        let mut dirty = false;
        for i in k + 1..rows {
            let q = m[i][k] / m[k][k];
            if q != 0 {
                for j in k..cols {
                    m[i][j] -= q * m[k][j];
                }
            }
            if m[i][k] != 0 {
                dirty = true;
            }
        }
        for j in k + 1..cols {
            let q = m[k][j] / m[k][k];
            if q != 0 {
                for row in m.iter_mut().take(rows).skip(k) {
                    row[j] -= q * row[k];
                }
            }
            if m[k][j] != 0 {
                dirty = true;
            }
        }
        if dirty {
            continue;
        }

        // Divisibility fix-up: fold a non-divisible entry into row k.
        let pivot_val = m[k][k];
        let mut fixed = true;
        'outer: for i in k + 1..rows {
            for j in k + 1..cols {
                if m[i][j] % pivot_val != 0 {
                    for col in k..cols {
                        let add = m[i][col];
                        m[k][col] += add;
                    }
                    fixed = false;
                    break 'outer;
                }
            }
        }
        if !fixed {
            continue;
        }

        diag.push(pivot_val.abs());
        k += 1;
    }

    diag
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gens: Vec<String> = (1..=self.generators).map(|i| format!("x{i}")).collect();
        let rels: Vec<String> = self.relators.iter().map(ToString::to_string).collect();
        write!(f, "< {} | {} >", gens.join(", "), rels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(ls: &[i32]) -> FreeWord {
        FreeWord::from_letters(ls.iter().copied())
    }

    #[test]
    fn test_normalise_drops_duplicates() {
        // A relator, a rotation of it and its inverse collapse to one.
        let p = Presentation::new(2, vec![w(&[1, 2, -1]), w(&[2, -1, 1]), w(&[1, -2, -1])]);
        assert_eq!(p.relators.len(), 1);
    }

    #[test]
    fn test_simplify_eliminates_defined_generator() {
        // ⟨a, b | b·a⁻²⟩: b = a², the group is ℤ.
        let p = Presentation::new(2, vec![w(&[2, -1, -1])]);
        let s = p.simplified();
        assert_eq!(s.generators, 1);
        assert!(s.relators.is_empty());
        let ab = s.abelian_invariants();
        assert_eq!(ab.rank, 1);
        assert!(ab.torsion.is_empty());
    }

    #[test]
    fn test_free_group_invariants() {
        let p = Presentation::free(3);
        let ab = p.abelian_invariants();
        assert_eq!(ab.rank, 3);
        assert!(ab.torsion.is_empty());
    }

    #[test]
    fn test_torsion_detected() {
        // ⟨a | a³⟩ = ℤ/3.
        let p = Presentation::new(1, vec![w(&[1, 1, 1])]);
        let ab = p.abelian_invariants();
        assert_eq!(ab.rank, 0);
        assert_eq!(ab.torsion, vec![3]);
    }

    #[test]
    fn test_commuting_pair() {
        // ⟨a, b | [a, b]⟩ = ℤ².
        let p = Presentation::new(2, vec![w(&[1, 2, -1, -2])]);
        let ab = p.abelian_invariants();
        assert_eq!(ab.rank, 2);
        assert!(ab.torsion.is_empty());
    }

    #[test]
    fn test_braid_relator_rank() {
        // ⟨a, b | aba·(bab)⁻¹⟩ abelianises to ℤ.
        let relator = w(&[1, 2, 1, -2, -1, -2]);
        let p = Presentation::new(2, vec![relator]);
        let ab = p.abelian_invariants();
        assert_eq!(ab.rank, 1);
        assert!(ab.torsion.is_empty());
    }

    #[test]
    fn test_smith_diagonal_divisibility() {
        // diag(2, 4) relation matrix: invariants 2 | 4... the matrix
        // [[2, 0], [0, 4]] already is in Smith form.
        let d = smith_diagonal(vec![vec![2, 0], vec![0, 4]], 2);
        assert_eq!(d, vec![2, 4]);
        // [[2, 1], [0, 2]] has determinant 4 and invariants (1, 4).
        let d = smith_diagonal(vec![vec![2, 1], vec![0, 2]], 2);
        assert_eq!(d, vec![1, 4]);
    }
}
