//! # plexus-rings
//!
//! Algebraic structure traits and the scalar fields of plexus:
//! - Trait hierarchy `Ring` → `EuclideanDomain` → `Field`
//! - ℚ as a field (traits attached to `plexus_integers::Rational`)
//! - ℚ(i), the Gaussian rationals (`GaussianRational`) — the complex
//!   scalar type used for coefficients, roots and loop vertices
//! - Certified enclosures of roots of unity `E(n, k)`
//!
//! All comparisons in the engine go through exact quantities (squared
//! moduli, cross products); this crate is where that discipline is
//! anchored.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cyclotomic;
pub mod gaussian;
pub mod rationals;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use cyclotomic::{cos_sin, pi_approx, unit_root};
pub use gaussian::GaussianRational;
pub use traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};
