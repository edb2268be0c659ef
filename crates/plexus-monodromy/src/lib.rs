//! # plexus-monodromy
//!
//! Braid monodromy along segments: the linear-braid reconstructor
//! ([`lbraid_to_word`]), the certified Sturm-protected follower
//! ([`follow_segment_certified`], the default), the adaptive
//! heuristic follower ([`follow_segment_approx`], opt-in and
//! uncertified), and the endpoint [`fit`] against the stored fibres.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use thiserror::Error;

pub mod approx;
pub mod certified;
pub mod fit;
pub mod lbraid;

pub use approx::{follow_segment_approx, ADAPTIVITY_FACTOR};
pub use certified::follow_segment_certified;
pub use fit::fit;
pub use lbraid::lbraid_to_word;

/// Errors of the monodromy layer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MonodromyError {
    /// Root refinement or separation failed along the segment.
    #[error(transparent)]
    Root(#[from] plexus_roots::RootError),

    /// The linear-braid reconstructor saw strands collide, or a
    /// simultaneous exchange without a coherent passing order.
    #[error("singular straight-line monodromy")]
    SingularMonodromy,

    /// The closest-point match between computed and stored fibres is
    /// not a clean bijection.
    #[error("ambiguous fit between computed and stored fibres")]
    FitAmbiguous,

    /// The Sturm certificate could not advance the protected
    /// parameter.
    #[error("cannot certify root separation along the segment")]
    NonSeparable,

    /// The heuristic follower halved its step below the useful range.
    #[error("adaptive step size underflow")]
    StepUnderflow,
}
