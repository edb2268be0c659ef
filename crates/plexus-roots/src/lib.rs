//! # plexus-roots
//!
//! Certified complex root finding for the Van Kampen pipeline.
//!
//! The three entry points mirror how the monodromy layer consumes
//! them: [`newton_root`] refines one root and certifies a squared
//! error bound, [`separate_roots_initial_guess`] upgrades one guess
//! per root into a separated configuration, and [`separate_roots`]
//! bootstraps the guesses from rotated seeds. Nothing downstream of
//! the certificates depends on heuristics: a braid is only produced
//! from configurations whose isolating disks are proven disjoint.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use thiserror::Error;

pub mod newton;
pub mod separate;

pub use newton::{newton_root, newton_step};
pub use separate::{
    nearest_pair_sq, rational_sqrt_upper, separate_roots, separate_roots_initial_guess,
};

/// Default bound on Newton iterations per refinement.
pub const DEFAULT_NEWTON_LIMIT: u32 = 800;

/// Errors of the root finder.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RootError {
    /// Newton iteration did not converge within its budget.
    #[error("Newton iteration did not converge within {iterations} steps")]
    NewtonNonConvergent {
        /// The iteration budget that was exhausted.
        iterations: u32,
    },

    /// Disjoint attraction basins could not be certified; the
    /// polynomial may have multiple roots or the precision is too low.
    #[error("roots could not be certifiably separated")]
    RootsNotSeparated,
}
