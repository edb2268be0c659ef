//! Reduced words in a finitely generated free group.
//!
//! Letters are non-zero integers: `k` is the k-th generator
//! (1-based), `-k` its inverse. Words are kept freely reduced at all
//! times, so structural equality is equality in the free group.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A freely reduced word in a free group.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FreeWord {
    letters: Vec<i32>,
}

impl FreeWord {
    /// The empty word.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// The word consisting of a single generator.
    ///
    /// # Panics
    ///
    /// Panics if `gen` is zero.
    #[must_use]
    pub fn generator(gen: i32) -> Self {
        assert!(gen != 0, "generator indices are non-zero");
        Self { letters: vec![gen] }
    }

    /// Builds a word from letters, freely reducing.
    #[must_use]
    pub fn from_letters(letters: impl IntoIterator<Item = i32>) -> Self {
        let mut reduced: Vec<i32> = Vec::new();
        for l in letters {
            assert!(l != 0, "generator indices are non-zero");
            if reduced.last() == Some(&-l) {
                reduced.pop();
            } else {
                reduced.push(l);
            }
        }
        Self { letters: reduced }
    }

    /// Returns the letters of the reduced word.
    #[must_use]
    pub fn letters(&self) -> &[i32] {
        &self.letters
    }

    /// Returns true for the empty word.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the word length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns true if the word is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Concatenates two words (with reduction at the seam).
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_letters(self.letters.iter().chain(other.letters.iter()).copied())
    }

    /// Returns the inverse word.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            letters: self.letters.iter().rev().map(|l| -l).collect(),
        }
    }

    /// Returns `self · other · self⁻¹`.
    #[must_use]
    pub fn conjugate(&self, other: &Self) -> Self {
        self.concat(other).concat(&self.inverse())
    }

    /// Cyclically reduces the word (removes matching first/last
    /// letters), returning the reduced core.
    #[must_use]
    pub fn cyclic_reduce(&self) -> Self {
        let mut letters = self.letters.clone();
        while letters.len() >= 2 && letters.first() == letters.last().map(|l| -l).as_ref() {
            letters.pop();
            letters.remove(0);
        }
        Self { letters }
    }

    /// Applies the homomorphism sending generator `k` to `images[k-1]`.
    ///
    /// # Panics
    ///
    /// Panics if a letter refers past the image table.
    #[must_use]
    pub fn substitute(&self, images: &[FreeWord]) -> Self {
        let mut result = Self::identity();
        for &l in &self.letters {
            let idx = usize::try_from(l.unsigned_abs()).expect("index fits in usize") - 1;
            let image = &images[idx];
            if l > 0 {
                result = result.concat(image);
            } else {
                result = result.concat(&image.inverse());
            }
        }
        result
    }

    /// Returns the exponent vector (image in ℤⁿ).
    #[must_use]
    pub fn exponent_vector(&self, n: usize) -> Vec<i64> {
        let mut v = vec![0i64; n];
        for &l in &self.letters {
            let idx = usize::try_from(l.unsigned_abs()).expect("index fits in usize") - 1;
            if idx < n {
                v[idx] += i64::from(l.signum());
            }
        }
        v
    }

    /// Returns the largest generator index mentioned (0 for the
    /// identity).
    #[must_use]
    pub fn max_generator(&self) -> usize {
        self.letters
            .iter()
            .map(|l| usize::try_from(l.unsigned_abs()).expect("index fits in usize"))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Debug for FreeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FreeWord({self})")
    }
}

impl fmt::Display for FreeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.letters.is_empty() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self
            .letters
            .iter()
            .map(|&l| {
                if l > 0 {
                    format!("x{l}")
                } else {
                    format!("x{}^-1", -l)
                }
            })
            .collect();
        write!(f, "{}", parts.join("*"))
    }
}
