//! # plexus-geometry
//!
//! Exact planar geometry for the loop layout stage: primitive
//! predicates (segment distance, mediatrix, line crossing, cyclic
//! order, Gabriel neighbours) and the Voronoi honeycomb that turns
//! the roots of the discriminant into a based system of
//! counter-clockwise loops, one per root.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use thiserror::Error;

pub mod loops;
pub mod primitives;

#[cfg(test)]
mod proptests;

pub use loops::{build_loops, shrink, winding_number, LoopGraph};
pub use primitives::{
    crossing, cycorder, detects_left_crossing, dist_seg_sq, mediatrix, neighbours,
};

/// Errors of the loop constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Two critical values coincide; the input was not squarefree.
    #[error("duplicate critical values")]
    DuplicateRoots,

    /// Adjacent Voronoi cells did not expose a common edge.
    #[error("voronoi cells do not share the expected edge")]
    MissingSharedEdge,
}
