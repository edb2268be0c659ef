//! # plexus-poly
//!
//! Polynomial arithmetic for the Van Kampen pipeline:
//! - Dense univariate polynomials over any field, with Euclidean gcd,
//!   exact division and squarefree reduction
//! - Resultants and discriminants by fraction-free elimination,
//!   generic enough to take polynomial entries
//! - Sturm sequences over ℚ[t] with the dyadic positivity-prefix
//!   query used by the certified monodromy follower
//! - A dense bivariate layer over ℚ(i) for the curve itself

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use thiserror::Error;

pub mod algorithms;
pub mod bivariate;
pub mod dense;
pub mod sturm;

#[cfg(test)]
mod proptests;

pub use bivariate::{exact_div_x, gcd_x, BiPoly, YPoly};
pub use dense::DensePoly;
pub use sturm::{positive_prefix, SturmSequence};

/// Errors of the polynomial layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PolyError {
    /// A division expected to be exact left a remainder.
    #[error("inexact polynomial division")]
    InexactDivision,
}
