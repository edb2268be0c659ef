//! # plexus
//!
//! Certified computation of fundamental groups of plane algebraic
//! curve complements by the Zariski–Van Kampen method.
//!
//! The pipeline takes a squarefree bivariate polynomial over ℚ or
//! ℚ(i), locates the critical values of the projection
//! `(x, y) ↦ y`, lays out a based system of loops around them,
//! follows the fibre along every loop segment with certified exact
//! arithmetic, and quotients the resulting braid monodromy through
//! the Hurwitz action into a finite presentation of
//! `π₁(ℂ² − C)`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use plexus::prelude::*;
//!
//! let result = fundamental_group("x^2 - y^3", &Config::default())?;
//! println!("{}", result.presentation);
//! ```
//!
//! The heavy stages can also be split for parallel runs: see
//! [`persist::prepare`], [`persist::segments`] and
//! [`persist::finish`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use thiserror::Error as ThisError;

pub mod curve;
pub mod parser;
pub mod persist;
pub mod pipeline;

pub use curve::Curve;
pub use pipeline::{
    finish_from, fundamental_group, prepare_curve, segment_braid, FundamentalGroupResult, Prepared,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::curve::Curve;
    pub use crate::pipeline::{fundamental_group, FundamentalGroupResult};
    pub use crate::Config;
    pub use plexus_braid::{BraidWord, Presentation};
    pub use plexus_integers::{Integer, Rational};
    pub use plexus_poly::{BiPoly, DensePoly};
    pub use plexus_rings::GaussianRational;
}

/// Pipeline configuration. All options are orthogonal; the defaults
/// are the certified path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Use the adaptive heuristic follower instead of the certified
    /// one. Uncertified; off by default and never a silent fallback.
    pub monodromy_approx: bool,
    /// Maximum Newton iterations per refinement.
    pub newton_limit: u32,
    /// Step-size heuristic denominator of the adaptive follower.
    pub adaptivity_factor: u32,
    /// Shorten monodromy words by free and cyclic cancellation
    /// before the Hurwitz action.
    pub shrink_braid: bool,
    /// 0 = silent, 1 = per-segment progress, 2 = per-step
    /// diagnostics. Affects traces only, never results.
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monodromy_approx: false,
            newton_limit: plexus_roots::DEFAULT_NEWTON_LIMIT,
            adaptivity_factor: plexus_monodromy::ADAPTIVITY_FACTOR,
            shrink_braid: false,
            verbosity: 0,
        }
    }
}

/// Top-level errors of the pipeline.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Malformed textual input, or a degenerate polynomial.
    #[error("cannot read curve: {0}")]
    Parse(String),

    /// Coefficients outside ℚ(i), or an unsupported operation in the
    /// input expression.
    #[error("only rational and Gaussian-rational coefficients are supported")]
    CoefficientUnsupported,

    /// Root finding failed.
    #[error(transparent)]
    Root(#[from] plexus_roots::RootError),

    /// Loop layout failed.
    #[error(transparent)]
    Geometry(#[from] plexus_geometry::GeometryError),

    /// A monodromy follower failed.
    #[error(transparent)]
    Monodromy(#[from] plexus_monodromy::MonodromyError),

    /// Polynomial arithmetic failed (inexact division).
    #[error(transparent)]
    Poly(#[from] plexus_poly::PolyError),

    /// A loop vertex produced fewer fibre roots than strands.
    #[error("fibre is degenerate at a loop vertex")]
    DegenerateFibre,

    /// No tried height for the trivialising line produced a
    /// non-degenerate layout.
    #[error("no suitable height for the trivialising line; the input is degenerate")]
    TrivialisingLineExhausted,

    /// `finish` found segments whose braids were never computed.
    #[error("missing segment braids: {0:?}")]
    MissingSegments(Vec<usize>),

    /// Persistence I/O failure.
    #[error("persistence I/O: {0}")]
    Io(#[from] std::io::Error),

    /// Persistence encoding failure.
    #[error("persistence encoding: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored segment braid failed its checksum on reload.
    #[error("segment file {0} failed its checksum")]
    Corrupt(usize),
}
