//! Braid words in the Artin generators.
//!
//! A `BraidWord` is a freely reduced word in the generators
//! `σ₁ … σ_{n−1}` of the braid group on `n` strands: letter `k`
//! stands for `σ_k`, letter `-k` for its inverse. Structural equality
//! is equality of reduced words; equality as braid-group elements is
//! decided through the faithful Artin action on the free group
//! ([`BraidWord::is_equivalent`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::free::FreeWord;
use crate::hurwitz::hurwitz_action;

/// A braid in `Bₙ`, as a freely reduced generator word.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BraidWord {
    strands: usize,
    gens: Vec<i32>,
}

impl BraidWord {
    /// The identity braid on `n` strands.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn identity(strands: usize) -> Self {
        assert!(strands >= 1, "a braid group needs at least one strand");
        Self {
            strands,
            gens: Vec::new(),
        }
    }

    /// The generator `σ_i` (or `σ_{|i|}⁻¹` for negative `i`).
    ///
    /// # Panics
    ///
    /// Panics if `i` is zero or `|i| ≥ strands`.
    #[must_use]
    pub fn generator(strands: usize, i: i32) -> Self {
        assert!(i != 0, "generator indices are non-zero");
        assert!(
            (i.unsigned_abs() as usize) < strands,
            "generator index out of range"
        );
        Self {
            strands,
            gens: vec![i],
        }
    }

    /// Builds a braid from a generator word, freely reducing.
    ///
    /// # Panics
    ///
    /// Panics on a zero or out-of-range generator index.
    #[must_use]
    pub fn from_gens(strands: usize, gens: impl IntoIterator<Item = i32>) -> Self {
        let mut reduced: Vec<i32> = Vec::new();
        for g in gens {
            assert!(g != 0, "generator indices are non-zero");
            assert!(
                (g.unsigned_abs() as usize) < strands,
                "generator index out of range"
            );
            if reduced.last() == Some(&-g) {
                reduced.pop();
            } else {
                reduced.push(g);
            }
        }
        Self {
            strands,
            gens: reduced,
        }
    }

    /// Returns the number of strands.
    #[must_use]
    pub fn strands(&self) -> usize {
        self.strands
    }

    /// Returns the reduced generator word.
    #[must_use]
    pub fn gens(&self) -> &[i32] {
        &self.gens
    }

    /// Returns true if the reduced word is empty.
    #[must_use]
    pub fn is_identity_word(&self) -> bool {
        self.gens.is_empty()
    }

    /// Composes two braids (left factor first).
    ///
    /// # Panics
    ///
    /// Panics if the strand counts differ.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        assert_eq!(self.strands, other.strands, "strand counts must agree");
        Self::from_gens(
            self.strands,
            self.gens.iter().chain(other.gens.iter()).copied(),
        )
    }

    /// Returns the inverse braid.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            strands: self.strands,
            gens: self.gens.iter().rev().map(|g| -g).collect(),
        }
    }

    /// The half twist `Δ` on the block of `size` strands starting at
    /// strand position `start` (0-based): the star braid contributed
    /// by a block collision. `positive = false` gives the inverse
    /// twist.
    ///
    /// # Panics
    ///
    /// Panics if the block leaves the strand range or `size < 2`.
    #[must_use]
    pub fn half_twist(strands: usize, start: usize, size: usize, positive: bool) -> Self {
        assert!(size >= 2, "a twist needs at least two strands");
        assert!(start + size <= strands, "block out of range");

        // Δ_k = (σ1)(σ2 σ1)…(σ_{k−1}…σ1), shifted to the block.
        let mut gens = Vec::with_capacity(size * (size - 1) / 2);
        for outer in 1..size {
            for inner in (0..outer).rev() {
                let idx = i32::try_from(start + inner + 1).expect("index fits in i32");
                gens.push(idx);
            }
        }
        if !positive {
            gens.reverse();
            for g in &mut gens {
                *g = -*g;
            }
        }
        Self::from_gens(strands, gens)
    }

    /// Returns the underlying permutation: entry `p` is the strand
    /// (0-based start position) that ends at position `p`.
    #[must_use]
    pub fn permutation(&self) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..self.strands).collect();
        for &g in &self.gens {
            let i = g.unsigned_abs() as usize - 1;
            perm.swap(i, i + 1);
        }
        perm
    }

    /// Returns the exponent sum (the abelianisation of `Bₙ` is ℤ).
    /// Used as the integrity checksum in the persistence layer.
    #[must_use]
    pub fn exponent_sum(&self) -> i64 {
        self.gens.iter().map(|&g| i64::from(g.signum())).sum()
    }

    /// Applies free and cyclic cancellation to shorten very long
    /// monodromy words before the Hurwitz action. This changes the
    /// braid at most by conjugation, which the Van Kampen quotient
    /// does not see.
    #[must_use]
    pub fn shrink(&self) -> Self {
        let mut gens = self.gens.clone();
        while gens.len() >= 2 && gens.first() == gens.last().map(|g| -g).as_ref() {
            gens.pop();
            gens.remove(0);
        }
        Self {
            strands: self.strands,
            gens,
        }
    }

    /// Decides equality in the braid group via the faithful Artin
    /// action on the free group.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        if self.strands != other.strands {
            return false;
        }
        let basis: Vec<FreeWord> = (1..=self.strands)
            .map(|i| FreeWord::generator(i32::try_from(i).expect("index fits in i32")))
            .collect();
        hurwitz_action(self, &basis) == hurwitz_action(other, &basis)
    }
}

impl fmt::Debug for BraidWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BraidWord[{}]({self})", self.strands)
    }
}

impl fmt::Display for BraidWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gens.is_empty() {
            return write!(f, "e");
        }
        let parts: Vec<String> = self
            .gens
            .iter()
            .map(|&g| {
                if g > 0 {
                    format!("s{g}")
                } else {
                    format!("s{}^-1", -g)
                }
            })
            .collect();
        write!(f, "{}", parts.join("*"))
    }
}
