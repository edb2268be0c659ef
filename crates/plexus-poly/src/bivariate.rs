//! Dense bivariate polynomials over ℚ(i).
//!
//! A curve P(x, y) is stored as a polynomial in `x` whose
//! coefficients are dense polynomials in `y`. This is the shape the
//! pipeline consumes: the fibre polynomial over a base point is the
//! evaluation of the `y`-coefficients, the discriminant with respect
//! to `x` is a resultant with polynomial entries, and the vertical
//! part is the content of the coefficient list.

use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::{Field, Ring};

use crate::algorithms::gcd::{exact_div, make_monic, poly_gcd};
use crate::algorithms::resultant::resultant;
use crate::dense::DensePoly;
use crate::PolyError;

/// A polynomial in `y`, used as a coefficient of a power of `x`.
pub type YPoly = DensePoly<GaussianRational>;

/// A dense bivariate polynomial in `x` and `y` over the Gaussian
/// rationals.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BiPoly {
    /// `coeffs[i]` is the coefficient of x^i, a polynomial in y.
    coeffs: Vec<YPoly>,
}

impl BiPoly {
    /// Creates a bivariate polynomial from x-coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<YPoly>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(DensePoly::is_zero) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(YPoly::zero());
        }
        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![YPoly::zero()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: GaussianRational) -> Self {
        Self::new(vec![YPoly::constant(c)])
    }

    /// The polynomial `x`.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![YPoly::zero(), YPoly::one()])
    }

    /// The polynomial `y`.
    #[must_use]
    pub fn y() -> Self {
        Self::new(vec![YPoly::x()])
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns the degree in `x` (0 for the zero polynomial).
    #[must_use]
    pub fn degree_x(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns the degree in `y`.
    #[must_use]
    pub fn degree_y(&self) -> usize {
        self.coeffs.iter().map(DensePoly::degree).max().unwrap_or(0)
    }

    /// Returns the coefficients of the powers of `x`.
    #[must_use]
    pub fn x_coefficients(&self) -> &[YPoly] {
        &self.coeffs
    }

    /// Returns the leading coefficient in `x`, a polynomial in `y`.
    #[must_use]
    pub fn leading_coeff_x(&self) -> &YPoly {
        self.coeffs.last().expect("coefficient list is never empty")
    }

    /// Returns true when the leading `x`-coefficient is a non-zero
    /// constant, i.e. the projection `(x, y) ↦ y` is proper.
    #[must_use]
    pub fn is_monic_in_x(&self) -> bool {
        self.leading_coeff_x().degree() == 0 && !self.leading_coeff_x().is_zero()
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);
        for i in 0..len {
            let a = self.coeffs.get(i).cloned().unwrap_or_else(YPoly::zero);
            let b = other.coeffs.get(i).cloned().unwrap_or_else(YPoly::zero);
            result.push(a.add(&b));
        }
        Self::new(result)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(DensePoly::neg).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook over the x-degrees).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![YPoly::zero(); n + m - 1];
        for i in 0..n {
            for j in 0..m {
                result[i + j] = result[i + j].add(&self.coeffs[i].mul(&other.coeffs[j]));
            }
        }
        Self::new(result)
    }

    /// Multiplies by the linear factor `x − h`.
    #[must_use]
    pub fn mul_x_minus(&self, h: &GaussianRational) -> Self {
        let factor = Self::new(vec![YPoly::constant(-h.clone()), YPoly::one()]);
        self.mul(&factor)
    }

    /// Computes the partial derivative with respect to `x`.
    #[must_use]
    pub fn derivative_x(&self) -> Self {
        if self.degree_x() == 0 {
            return Self::zero();
        }
        let mut result = Vec::with_capacity(self.coeffs.len() - 1);
        for (i, c) in self.coeffs.iter().skip(1).enumerate() {
            result.push(c.mul_by_scalar(i64::try_from(i + 1).expect("degree fits in i64")));
        }
        Self::new(result)
    }

    /// Computes the partial derivative with respect to `y`.
    #[must_use]
    pub fn derivative_y(&self) -> Self {
        Self::new(self.coeffs.iter().map(DensePoly::derivative).collect())
    }

    /// Evaluates at `y = p`, returning the fibre polynomial in `x`.
    #[must_use]
    pub fn eval_y(&self, p: &GaussianRational) -> DensePoly<GaussianRational> {
        DensePoly::new(self.coeffs.iter().map(|c| c.eval(p)).collect())
    }

    /// Evaluates at `x = v`, returning a polynomial in `y`.
    #[must_use]
    pub fn eval_x(&self, v: &GaussianRational) -> YPoly {
        let mut result = YPoly::zero();
        for c in self.coeffs.iter().rev() {
            result = result.scale(v).add(c);
        }
        result
    }

    /// Evaluates at a point.
    #[must_use]
    pub fn eval(&self, x: &GaussianRational, y: &GaussianRational) -> GaussianRational {
        self.eval_x(x).eval(y)
    }

    /// Computes the content in `y`: the monic gcd of the
    /// x-coefficients. For a curve this is the product of the purely
    /// horizontal components (the "vertical part" of the
    /// discriminant).
    #[must_use]
    pub fn content_y(&self) -> YPoly {
        let mut g = YPoly::zero();
        for c in &self.coeffs {
            g = poly_gcd(&g, c);
            if g.degree() == 0 && !g.is_zero() {
                break;
            }
        }
        make_monic(&g)
    }

    /// Divides every x-coefficient exactly by a polynomial in `y`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InexactDivision`] if any division leaves a
    /// remainder.
    pub fn exact_div_content(&self, q: &YPoly) -> Result<Self, PolyError> {
        let mut coeffs = Vec::with_capacity(self.coeffs.len());
        for c in &self.coeffs {
            coeffs.push(exact_div(c, q)?);
        }
        Ok(Self::new(coeffs))
    }

    /// Computes the resultant of `self` and `other` with respect to
    /// `x`: a polynomial in `y`.
    #[must_use]
    pub fn resultant_x(&self, other: &Self) -> YPoly {
        resultant(&self.coeffs, &other.coeffs)
    }

    /// Computes `Res_x(P, ∂P/∂x) / lead_x(P)`, the discriminant of the
    /// projection `(x, y) ↦ y` up to sign conventions.
    #[must_use]
    pub fn discriminant_x(&self) -> YPoly {
        let res = self.resultant_x(&self.derivative_x());
        if res.is_zero() {
            return res;
        }
        let (q, r) = crate::algorithms::gcd::poly_div_rem(&res, self.leading_coeff_x());
        debug_assert!(r.is_zero(), "leading coefficient divides the resultant");
        q
    }
}

/// Computes a gcd of two bivariate polynomials with respect to `x`,
/// by a primitive pseudo-remainder sequence: contents in ℚ(i)[y] are
/// split off (where the ordinary Euclidean gcd applies) and the
/// primitive parts are reduced by pseudo-division.
#[must_use]
pub fn gcd_x(f: &BiPoly, g: &BiPoly) -> BiPoly {
    if f.is_zero() {
        return normalise(g);
    }
    if g.is_zero() {
        return normalise(f);
    }

    let content_f = f.content_y();
    let content_g = g.content_y();
    let content = poly_gcd(&content_f, &content_g);

    let mut a = f
        .exact_div_content(&content_f)
        .expect("content divides the coefficients");
    let mut b = g
        .exact_div_content(&content_g)
        .expect("content divides the coefficients");

    if a.degree_x() < b.degree_x() {
        std::mem::swap(&mut a, &mut b);
    }

    while !b.is_zero() {
        let r = pseudo_rem(&a, &b);
        a = b;
        b = if r.is_zero() {
            r
        } else {
            let c = r.content_y();
            r.exact_div_content(&c)
                .expect("content divides the coefficients")
        };
    }

    // Reattach the coefficient content and normalise.
    let mut coeffs: Vec<YPoly> = a.coeffs.iter().map(|c| c.mul(&content)).collect();
    let lead_lead = coeffs
        .last()
        .expect("coefficient list is never empty")
        .leading_coeff()
        .clone();
    let scale = lead_lead
        .inv()
        .expect("leading coefficient of a non-zero polynomial is invertible");
    for c in &mut coeffs {
        *c = c.scale(&scale);
    }
    BiPoly::new(coeffs)
}

/// Pseudo-remainder of `a` by `b` in `x`: eliminates the leading term
/// with cross-multiplication, so no coefficient division is needed.
/// The leading terms cancel exactly, so the x-degree strictly drops
/// each round.
fn pseudo_rem(a: &BiPoly, b: &BiPoly) -> BiPoly {
    let mut r = a.clone();
    let lead_b = b.leading_coeff_x().clone();

    while !r.is_zero() && r.degree_x() >= b.degree_x() {
        let prev_degree = r.degree_x();
        let shift = r.degree_x() - b.degree_x();
        let lead_r = r.leading_coeff_x().clone();

        // r ← lead(b)·r − lead(r)·x^shift·b
        let scaled_r = BiPoly::new(r.coeffs.iter().map(|c| c.mul(&lead_b)).collect());
        let mut shifted: Vec<YPoly> = vec![YPoly::zero(); shift];
        shifted.extend(b.coeffs.iter().map(|c| c.mul(&lead_r)));
        r = scaled_r.sub(&BiPoly::new(shifted));

        if prev_degree == 0 {
            break;
        }
    }

    r
}

/// Divides `f` by `g` exactly with respect to `x` (coefficients may
/// require exact division in ℚ(i)[y]).
///
/// # Errors
///
/// Returns [`PolyError::InexactDivision`] when `g` does not divide `f`.
pub fn exact_div_x(f: &BiPoly, g: &BiPoly) -> Result<BiPoly, PolyError> {
    if g.is_zero() {
        return Err(PolyError::InexactDivision);
    }
    if f.is_zero() {
        return Ok(BiPoly::zero());
    }
    if f.degree_x() < g.degree_x() {
        return Err(PolyError::InexactDivision);
    }

    let mut rem = f.clone();
    let mut quotient = vec![YPoly::zero(); f.degree_x() - g.degree_x() + 1];

    // The leading term cancels exactly each round, so the x-degree
    // strictly drops until the remainder falls below the divisor.
    while !rem.is_zero() && rem.degree_x() >= g.degree_x() {
        let prev_degree = rem.degree_x();
        let shift = rem.degree_x() - g.degree_x();
        let c = exact_div(rem.leading_coeff_x(), g.leading_coeff_x())?;
        quotient[shift] = c.clone();

        let mut shifted: Vec<YPoly> = vec![YPoly::zero(); shift];
        shifted.extend(g.coeffs.iter().map(|gc| gc.mul(&c)));
        rem = rem.sub(&BiPoly::new(shifted));

        if prev_degree == 0 {
            break;
        }
    }

    if rem.is_zero() {
        Ok(BiPoly::new(quotient))
    } else {
        Err(PolyError::InexactDivision)
    }
}

fn normalise(p: &BiPoly) -> BiPoly {
    if p.is_zero() {
        return p.clone();
    }
    let lead = p.leading_coeff_x().leading_coeff().clone();
    let scale = lead
        .inv()
        .expect("leading coefficient of a non-zero polynomial is invertible");
    BiPoly::new(p.coeffs.iter().map(|c| c.scale(&scale)).collect())
}

impl std::fmt::Display for BiPoly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        // The coefficient polynomials print in the variable x; rename.
        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let inner = format!("{c}").replace('x', "y");
            let term = match i {
                0 => format!("({inner})"),
                1 => format!("({inner})*x"),
                _ => format!("({inner})*x^{i}"),
            };
            terms.push(term);
        }
        write!(f, "{}", terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_integers::Rational;

    fn g(n: i64) -> GaussianRational {
        GaussianRational::from(n)
    }

    fn ypoly(cs: &[i64]) -> YPoly {
        YPoly::new(cs.iter().map(|&c| g(c)).collect())
    }

    /// x² − y³ (the cuspidal cubic).
    fn cusp() -> BiPoly {
        BiPoly::new(vec![ypoly(&[0, 0, 0, -1]), ypoly(&[0]), ypoly(&[1])])
    }

    #[test]
    fn test_degrees() {
        let p = cusp();
        assert_eq!(p.degree_x(), 2);
        assert_eq!(p.degree_y(), 3);
        assert!(p.is_monic_in_x());
    }

    #[test]
    fn test_eval_y_fibre() {
        // At y = 1 the cusp fibre is x² − 1.
        let fibre = cusp().eval_y(&g(1));
        assert_eq!(fibre, ypoly(&[-1, 0, 1]));
    }

    #[test]
    fn test_derivative_x() {
        // ∂(x² − y³)/∂x = 2x
        let d = cusp().derivative_x();
        assert_eq!(d.degree_x(), 1);
        assert_eq!(d.x_coefficients()[1], YPoly::constant(g(2)));
    }

    #[test]
    fn test_discriminant_cusp() {
        // Res_x(x² − y³, 2x) = −4y³; the roots are {0}.
        let disc = cusp().discriminant_x();
        assert_eq!(disc.degree(), 3);
        assert!(disc.coeff(0).is_zero());
        assert!(disc.coeff(3) == g(-4) || disc.coeff(3) == g(4));
    }

    #[test]
    fn test_content_vertical_part() {
        // (y − 1)·(x² + x) has content y − 1.
        let p = BiPoly::new(vec![ypoly(&[0]), ypoly(&[-1, 1]), ypoly(&[-1, 1])]);
        assert_eq!(p.content_y(), ypoly(&[-1, 1]));
        let stripped = p.exact_div_content(&p.content_y()).unwrap();
        assert_eq!(stripped, BiPoly::new(vec![ypoly(&[0]), ypoly(&[1]), ypoly(&[1])]));
    }

    #[test]
    fn test_gcd_x() {
        // (x − y)·(x + y) and (x − y)·(x + 1) share x − y.
        let a = BiPoly::new(vec![ypoly(&[0, 0, -1]), ypoly(&[0]), ypoly(&[1])]);
        let xm = BiPoly::new(vec![ypoly(&[0, -1]), ypoly(&[1])]); // x − y
        let xp1 = BiPoly::new(vec![ypoly(&[1]), ypoly(&[1])]); // x + 1
        let b = xm.mul(&xp1);
        let g = gcd_x(&a, &b);
        assert_eq!(g.degree_x(), 1);
        assert_eq!(g, xm);
    }

    #[test]
    fn test_exact_div_x() {
        let xm = BiPoly::new(vec![ypoly(&[0, -1]), ypoly(&[1])]); // x − y
        let xp = BiPoly::new(vec![ypoly(&[0, 1]), ypoly(&[1])]); // x + y
        let prod = xm.mul(&xp);
        assert_eq!(exact_div_x(&prod, &xm).unwrap(), xp);
        let xp1 = BiPoly::new(vec![ypoly(&[1]), ypoly(&[1])]);
        assert!(exact_div_x(&prod, &xp1).is_err());
    }

    #[test]
    fn test_mul_x_minus() {
        // (x − 2)·x = x² − 2x
        let p = BiPoly::x().mul_x_minus(&g(2));
        assert_eq!(p.degree_x(), 2);
        assert_eq!(p.eval(&g(2), &g(5)), g(0));
        assert_eq!(p.eval(&g(3), &g(5)), g(3));
    }
}
