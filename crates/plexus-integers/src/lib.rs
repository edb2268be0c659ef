//! # plexus-integers
//!
//! Arbitrary precision integer and rational arithmetic for plexus.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`)
//! - Interval utilities for certified computation: the
//!   continued-fraction rationaliser [`simp`] and dyadic parameter
//!   selection [`dyadic_between`]
//!
//! Everything here is exact; no operation rounds silently.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::{dyadic_between, simp, simplest_in_interval, Rational};
