//! Dense univariate polynomials.
//!
//! Coefficients are stored in ascending degree order over any `Ring`.
//! Multiplication switches between schoolbook and Karatsuba by
//! degree. When the coefficients form a `Field`, the polynomial ring
//! itself is a Euclidean domain, which is what lets the resultant
//! routine run fraction-free elimination with polynomial entries.

use plexus_rings::traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};
use std::ops::{Add, Mul, Neg, Sub};

use crate::algorithms::gcd::{make_monic, poly_div_rem, poly_gcd};

/// A dense univariate polynomial.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DensePoly<R: Ring> {
    /// Coefficients in ascending degree order; normalised so the top
    /// coefficient is non-zero (the zero polynomial is `[0]`).
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a new polynomial from coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(Ring::is_zero) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }

        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Creates the monomial c·x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Returns the degree (the zero polynomial has degree 0).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        self.coeffs.last().expect("coefficient list is never empty")
    }

    /// Returns the coefficient of x^i (zero beyond the degree).
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Evaluates the polynomial at a point by Horner's method.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            let a = self.coeffs.get(i).cloned().unwrap_or_else(R::zero);
            let b = other.coeffs.get(i).cloned().unwrap_or_else(R::zero);
            result.push(a + b);
        }

        Self::new(result)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials, selecting the algorithm by degree.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        if self.degree().max(other.degree()) < 32 {
            self.mul_schoolbook(other)
        } else {
            self.mul_karatsuba(other)
        }
    }

    /// Schoolbook multiplication: O(n²).
    fn mul_schoolbook(&self, other: &Self) -> Self {
        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![R::zero(); n + m - 1];

        for i in 0..n {
            for j in 0..m {
                result[i + j] =
                    result[i + j].clone() + self.coeffs[i].clone() * other.coeffs[j].clone();
            }
        }

        Self::new(result)
    }

    /// Karatsuba multiplication: O(n^1.58).
    fn mul_karatsuba(&self, other: &Self) -> Self {
        let n = self.coeffs.len();
        let m = other.coeffs.len();

        if n < 32 || m < 32 {
            return self.mul_schoolbook(other);
        }

        let size = n.max(m).next_power_of_two();
        let half = size / 2;

        let mut a_coeffs = self.coeffs.clone();
        let mut b_coeffs = other.coeffs.clone();
        a_coeffs.resize(size, R::zero());
        b_coeffs.resize(size, R::zero());

        // a = a0 + a1·x^half, b = b0 + b1·x^half
        let a0 = Self::new(a_coeffs[..half].to_vec());
        let a1 = Self::new(a_coeffs[half..].to_vec());
        let b0 = Self::new(b_coeffs[..half].to_vec());
        let b1 = Self::new(b_coeffs[half..].to_vec());

        // a·b = z2·x^(2·half) + z1·x^half + z0
        let z0 = a0.mul_karatsuba(&b0);
        let z2 = a1.mul_karatsuba(&b1);
        let z1 = a0.add(&a1).mul_karatsuba(&b0.add(&b1)).sub(&z0).sub(&z2);

        let mut result = vec![R::zero(); 2 * size - 1];
        for (i, c) in z0.coeffs.iter().enumerate() {
            result[i] = c.clone();
        }
        for (i, c) in z1.coeffs.iter().enumerate() {
            result[i + half] = result[i + half].clone() + c.clone();
        }
        for (i, c) in z2.coeffs.iter().enumerate() {
            result[i + 2 * half] = result[i + 2 * half].clone() + c.clone();
        }

        Self::new(result)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return Self::zero();
        }

        let mut result = Vec::with_capacity(self.coeffs.len() - 1);
        for (i, c) in self.coeffs.iter().skip(1).enumerate() {
            result.push(c.mul_by_scalar(i64::try_from(i + 1).expect("degree fits in i64")));
        }

        Self::new(result)
    }

    /// Multiplies by x^n.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }

        let mut coeffs = vec![R::zero(); n];
        coeffs.extend(self.coeffs.clone());
        Self::new(coeffs)
    }

    /// Substitutes x ← a + d·x, returning the composed polynomial.
    ///
    /// This is the reparametrisation used when a fibre polynomial is
    /// restricted to a segment `t ↦ (1−t)·a + t·b` (with `d = b − a`).
    #[must_use]
    pub fn compose_linear(&self, a: &R, d: &R) -> Self {
        let line = Self::new(vec![a.clone(), d.clone()]);
        let mut result = Self::zero();
        for c in self.coeffs.iter().rev() {
            result = result.mul(&line).add(&Self::constant(c.clone()));
        }
        result
    }
}

// With field coefficients the polynomial ring is itself a Euclidean
// domain; this is what the Sylvester/Bareiss resultant instantiates
// when its entries are polynomials in the other variable.

impl<F: Field> Add for DensePoly<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        DensePoly::add(&self, &rhs)
    }
}

impl<F: Field> Sub for DensePoly<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        DensePoly::sub(&self, &rhs)
    }
}

impl<F: Field> Mul for DensePoly<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        DensePoly::mul(&self, &rhs)
    }
}

impl<F: Field> Neg for DensePoly<F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        DensePoly::neg(&self)
    }
}

impl<F: Field> Ring for DensePoly<F> {
    fn zero() -> Self {
        DensePoly::zero()
    }

    fn one() -> Self {
        DensePoly::one()
    }

    fn is_zero(&self) -> bool {
        DensePoly::is_zero(self)
    }

    fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        self.scale(&F::one().mul_by_scalar(n))
    }
}

impl<F: Field> CommutativeRing for DensePoly<F> {}
impl<F: Field> IntegralDomain for DensePoly<F> {}

impl<F: Field> EuclideanDomain for DensePoly<F> {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        poly_div_rem(self, other)
    }

    fn gcd(&self, other: &Self) -> Self {
        make_monic(&poly_gcd(self, other))
    }
}

impl<R: Ring> std::fmt::Display for DensePoly<R>
where
    R: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }

            let term = match i {
                0 => format!("{c}"),
                1 => format!("({c})*x"),
                _ => format!("({c})*x^{i}"),
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

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }

    fn poly(cs: &[i64]) -> DensePoly<Rational> {
        DensePoly::new(cs.iter().map(|&c| q(c)).collect())
    }

    #[test]
    fn test_normalisation() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), 1);
        assert!(poly(&[0]).is_zero());
    }

    #[test]
    fn test_mul() {
        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x²
        let prod = poly(&[1, 2]).mul(poly(&[3, 4]));
        assert_eq!(prod, poly(&[3, 10, 8]));
    }

    #[test]
    fn test_eval() {
        // p(x) = 1 + 2x + 3x², p(2) = 17
        assert_eq!(poly(&[1, 2, 3]).eval(&q(2)), q(17));
    }

    #[test]
    fn test_derivative() {
        // (1 + 2x + 3x²)' = 2 + 6x
        assert_eq!(poly(&[1, 2, 3]).derivative(), poly(&[2, 6]));
    }

    #[test]
    fn test_compose_linear() {
        // p(x) = x², p(1 + 2x) = 1 + 4x + 4x²
        let p = poly(&[0, 0, 1]);
        assert_eq!(p.compose_linear(&q(1), &q(2)), poly(&[1, 4, 4]));
    }
}
