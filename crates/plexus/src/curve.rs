//! Curve normalisation.
//!
//! Input polynomials are brought into the shape the pipeline wants:
//! the content in `y` (purely horizontal components, whose fibres are
//! whole lines) is split off, and the remaining part is made
//! squarefree with respect to `x`. A non-squarefree input is reduced
//! with a warning rather than rejected, as the complement only sees
//! the reduced curve.

use plexus_poly::algorithms::squarefree::squarefree_part;
use plexus_poly::{exact_div_x, gcd_x, BiPoly, YPoly};
use tracing::warn;

use crate::parser::parse_curve;
use crate::Error;

/// A squarefree curve split for the projection `(x, y) ↦ y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    /// The squarefree part that actually meets the generic fibre.
    poly: BiPoly,
    /// Monic product of the distinct horizontal components `y = c`.
    vertical: YPoly,
}

impl Curve {
    /// Parses and normalises a textual curve expression.
    ///
    /// # Errors
    ///
    /// Parser errors, plus [`Error::Parse`] for the zero polynomial.
    pub fn parse(input: &str) -> Result<Self, Error> {
        Self::from_poly(parse_curve(input)?)
    }

    /// Normalises a dense bivariate polynomial.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] when the polynomial is zero.
    pub fn from_poly(poly: BiPoly) -> Result<Self, Error> {
        if poly.is_zero() {
            return Err(Error::Parse("the zero polynomial is not a curve".to_string()));
        }

        // Split off the content in y (horizontal line components).
        let content = poly.content_y();
        let mut main = poly
            .exact_div_content(&content)
            .expect("content divides the coefficients");
        let vertical = if content.degree() > 0 {
            let reduced = squarefree_part(&content);
            if reduced.degree() < content.degree() {
                warn!("horizontal components with multiplicity were reduced");
            }
            reduced
        } else {
            YPoly::one()
        };

        // Squarefree reduction with respect to x.
        if main.degree_x() > 0 {
            let g = gcd_x(&main, &main.derivative_x());
            if g.degree_x() > 0 {
                warn!("curve is not squarefree; dividing by the repeated part");
                main = exact_div_x(&main, &g)?;
            }
        }

        Ok(Self {
            poly: main,
            vertical,
        })
    }

    /// Reassembles a curve from parts already normalised by
    /// [`Curve::from_poly`] (used when reloading a snapshot).
    #[must_use]
    pub fn from_parts(poly: BiPoly, vertical: YPoly) -> Self {
        Self { poly, vertical }
    }

    /// The squarefree non-horizontal part.
    #[must_use]
    pub fn poly(&self) -> &BiPoly {
        &self.poly
    }

    /// The product of the distinct horizontal components (constant 1
    /// when there are none).
    #[must_use]
    pub fn vertical(&self) -> &YPoly {
        &self.vertical
    }

    /// Degree of the generic fibre.
    #[must_use]
    pub fn fibre_degree(&self) -> usize {
        self.poly.degree_x()
    }

    /// Returns true when the projection is proper (constant leading
    /// coefficient in `x`).
    #[must_use]
    pub fn is_monic(&self) -> bool {
        self.poly.is_monic_in_x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_rings::gaussian::GaussianRational;

    #[test]
    fn test_squarefree_reduction() {
        // (x − y)²·(x + y) reduces to (x − y)(x + y).
        let c = Curve::parse("(x-y)^2 (x+y)").unwrap();
        assert_eq!(c.fibre_degree(), 2);
        // The reduced curve vanishes on both lines.
        assert_eq!(
            c.poly()
                .eval(&GaussianRational::from(5), &GaussianRational::from(5)),
            GaussianRational::from(0)
        );
        assert_eq!(
            c.poly()
                .eval(&GaussianRational::from(-5), &GaussianRational::from(5)),
            GaussianRational::from(0)
        );
    }

    #[test]
    fn test_vertical_split() {
        // (y − 1)·(x² − y): one horizontal line plus a parabola.
        let c = Curve::parse("(y-1)(x^2-y)").unwrap();
        assert_eq!(c.fibre_degree(), 2);
        assert_eq!(c.vertical().degree(), 1);
        assert!(c.is_monic());
    }

    #[test]
    fn test_non_monic_detected() {
        let c = Curve::parse("x*y - 1").unwrap();
        assert!(!c.is_monic());
        assert_eq!(c.fibre_degree(), 1);
    }

    #[test]
    fn test_zero_rejected() {
        assert!(Curve::parse("x - x").is_err());
    }
}
