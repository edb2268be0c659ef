//! Polynomial algorithms: division, gcd, squarefree reduction and
//! resultants.

pub mod gcd;
pub mod resultant;
pub mod squarefree;

pub use gcd::{exact_div, make_monic, poly_div_rem, poly_gcd};
pub use resultant::{discriminant, resultant};
pub use squarefree::{is_squarefree, squarefree_part};
