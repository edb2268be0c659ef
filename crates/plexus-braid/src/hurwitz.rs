//! The Hurwitz action and the Van Kampen quotients.
//!
//! The braid group acts on tuples of free-group elements by
//! `σ_i · (…, f_i, f_{i+1}, …) = (…, f_i f_{i+1} f_i⁻¹, f_i, …)`.
//! Applied to the meridian basis, this is the Artin representation;
//! quotienting the free group by the relations "monodromy fixes the
//! meridians" yields the fundamental group of the curve complement.

use crate::free::FreeWord;
use crate::presentation::Presentation;
use crate::word::BraidWord;

/// Applies the Hurwitz action of a braid word to a tuple, reading
/// the generator word left to right.
///
/// # Panics
///
/// Panics if the tuple length differs from the strand count.
#[must_use]
pub fn hurwitz_action(braid: &BraidWord, tuple: &[FreeWord]) -> Vec<FreeWord> {
    assert_eq!(
        tuple.len(),
        braid.strands(),
        "tuple length must match the strand count"
    );

    let mut t = tuple.to_vec();
    for &g in braid.gens() {
        let i = g.unsigned_abs() as usize - 1;
        if g > 0 {
            // (a, b) ↦ (a b a⁻¹, a)
            let conj = t[i].conjugate(&t[i + 1]);
            t[i + 1] = t[i].clone();
            t[i] = conj;
        } else {
            // (a, b) ↦ (b, b⁻¹ a b)
            let conj = t[i + 1].inverse().concat(&t[i]).concat(&t[i + 1]);
            t[i] = t[i + 1].clone();
            t[i + 1] = conj;
        }
    }
    t
}

/// The Van Kampen quotient for a monic curve: the group
/// `⟨ f_1,…,f_n | φ_i(f_j)·f_j⁻¹ ⟩` where `φ_i` is the Hurwitz
/// action of the i-th monodromy braid.
///
/// # Panics
///
/// Panics if a braid has a different strand count than `n`.
#[must_use]
pub fn vk_quotient(braids: &[BraidWord], n: usize) -> Presentation {
    let basis: Vec<FreeWord> = meridian_basis(n);

    let mut relators = Vec::new();
    for braid in braids {
        let image = hurwitz_action(braid, &basis);
        for (j, fj_image) in image.iter().enumerate() {
            let relator = fj_image.concat(&basis[j].inverse());
            if !relator.is_identity() {
                relators.push(relator);
            }
        }
    }

    Presentation::new(n, relators)
}

/// The Van Kampen quotient for a curve made proper by an added
/// trivialising line. The braids act on `strands` meridians
/// `f_1,…,f_N`; each braid `β_i` receives an auxiliary generator
/// `g_i`, with relators `φ_i(f_j)·g_i·f_j⁻¹·g_i⁻¹`; the meridian of
/// the added line (`line_strand`, 0-based at the basepoint fibre) is
/// killed to recover the complement of the original curve.
///
/// # Panics
///
/// Panics if `line_strand` is out of range or a braid has a different
/// strand count.
#[must_use]
pub fn dbvk_quotient(braids: &[BraidWord], strands: usize, line_strand: usize) -> Presentation {
    assert!(line_strand < strands, "line strand out of range");

    let basis = meridian_basis(strands);
    let total_generators = strands + braids.len();

    let mut relators = Vec::new();
    for (i, braid) in braids.iter().enumerate() {
        let gi = FreeWord::generator(
            i32::try_from(strands + i + 1).expect("generator index fits in i32"),
        );
        let image = hurwitz_action(braid, &basis);
        for (j, fj_image) in image.iter().enumerate() {
            // φ_i(f_j) · g_i · f_j⁻¹ · g_i⁻¹
            let relator = fj_image
                .concat(&gi)
                .concat(&basis[j].inverse())
                .concat(&gi.inverse());
            if !relator.is_identity() {
                relators.push(relator);
            }
        }
    }

    // Quotient out the added line.
    relators.push(basis[line_strand].clone());

    Presentation::new(total_generators, relators)
}

fn meridian_basis(n: usize) -> Vec<FreeWord> {
    (1..=n)
        .map(|i| FreeWord::generator(i32::try_from(i).expect("generator index fits in i32")))
        .collect()
}
