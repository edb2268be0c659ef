//! Squarefree reduction.
//!
//! A polynomial is squarefree when it shares no factor with its
//! derivative. The engine only ever needs the squarefree part (the
//! product of the distinct irreducible factors), which is the first
//! step of Yun's decomposition: p / gcd(p, p').

use plexus_rings::traits::Field;

use crate::algorithms::gcd::{exact_div, make_monic, poly_gcd};
use crate::dense::DensePoly;

/// Returns true if the polynomial has no repeated roots.
pub fn is_squarefree<F: Field>(p: &DensePoly<F>) -> bool {
    if p.degree() == 0 {
        return true;
    }
    poly_gcd(p, &p.derivative()).degree() == 0
}

/// Computes the monic squarefree part p / gcd(p, p').
///
/// # Panics
///
/// Panics if `p` is the zero polynomial.
pub fn squarefree_part<F: Field>(p: &DensePoly<F>) -> DensePoly<F> {
    assert!(!p.is_zero(), "zero polynomial has no squarefree part");

    if p.degree() == 0 {
        return DensePoly::one();
    }

    let g = poly_gcd(p, &p.derivative());
    if g.degree() == 0 {
        return make_monic(p);
    }

    let part = exact_div(p, &g).expect("gcd divides the polynomial");
    make_monic(&part)
}
