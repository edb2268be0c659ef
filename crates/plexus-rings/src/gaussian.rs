//! The field of Gaussian rationals ℚ(i).
//!
//! `GaussianRational` is the single complex scalar type of the
//! engine: curve coefficients, fibre roots, loop vertices and
//! follower positions are all values of this type. Distances are
//! compared through the exact squared modulus `norm_sq`, so no
//! square roots (and no floating point) are ever taken.

use plexus_integers::{simp, Rational};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};

/// A Gaussian rational a + b·i with exact rational components.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct GaussianRational {
    re: Rational,
    im: Rational,
}

impl GaussianRational {
    /// Creates a Gaussian rational from real and imaginary parts.
    #[must_use]
    pub fn new(re: Rational, im: Rational) -> Self {
        Self { re, im }
    }

    /// Embeds a rational as a real Gaussian rational.
    #[must_use]
    pub fn from_rational(re: Rational) -> Self {
        Self {
            re,
            im: Rational::zero(),
        }
    }

    /// Creates a Gaussian rational from integer real and imaginary parts.
    #[must_use]
    pub fn from_i64(re: i64, im: i64) -> Self {
        Self {
            re: Rational::from(re),
            im: Rational::from(im),
        }
    }

    /// The imaginary unit.
    #[must_use]
    pub fn i() -> Self {
        Self {
            re: Rational::zero(),
            im: Rational::one(),
        }
    }

    /// Returns the real part.
    #[must_use]
    pub fn re(&self) -> &Rational {
        &self.re
    }

    /// Returns the imaginary part.
    #[must_use]
    pub fn im(&self) -> &Rational {
        &self.im
    }

    /// Returns true if the imaginary part vanishes.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Returns the complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: -&self.im,
        }
    }

    /// Returns the squared modulus |z|² = re² + im², exactly.
    #[must_use]
    pub fn norm_sq(&self) -> Rational {
        &(&self.re * &self.re) + &(&self.im * &self.im)
    }

    /// Returns the squared distance to another point.
    #[must_use]
    pub fn dist_sq(&self, other: &Self) -> Rational {
        (self.clone() - other.clone()).norm_sq()
    }

    /// Multiplies by the imaginary unit (rotation by a quarter turn).
    #[must_use]
    pub fn mul_i(&self) -> Self {
        Self {
            re: -&self.im,
            im: self.re.clone(),
        }
    }

    /// Multiplies by a rational scalar.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        Self {
            re: &self.re * c,
            im: &self.im * c,
        }
    }

    /// Rationalises both components to the given precision with the
    /// continued-fraction convergent, so that the result is within
    /// `prec·√2` of `self` in modulus and within `prec` per component.
    #[must_use]
    pub fn simplify(&self, prec: &Rational) -> Self {
        Self {
            re: simp(&self.re, prec),
            im: simp(&self.im, prec),
        }
    }
}

impl Ring for GaussianRational {
    fn zero() -> Self {
        Self {
            re: Rational::zero(),
            im: Rational::zero(),
        }
    }

    fn one() -> Self {
        Self {
            re: Rational::one(),
            im: Rational::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        self.scale(&Rational::from(n))
    }
}

impl CommutativeRing for GaussianRational {}
impl IntegralDomain for GaussianRational {}

impl EuclideanDomain for GaussianRational {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        (self.field_div(other), Ring::zero())
    }

    fn gcd(&self, other: &Self) -> Self {
        if Ring::is_zero(self) && Ring::is_zero(other) {
            Ring::zero()
        } else {
            Ring::one()
        }
    }
}

impl Field for GaussianRational {
    fn inv(&self) -> Option<Self> {
        let n = self.norm_sq();
        if n.is_zero() {
            return None;
        }
        let n_inv = n.recip();
        Some(self.conj().scale(&n_inv))
    }
}

impl Add for GaussianRational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for GaussianRational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for GaussianRational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
        let re = &(&self.re * &rhs.re) - &(&self.im * &rhs.im);
        let im = &(&self.re * &rhs.im) + &(&self.im * &rhs.re);
        Self { re, im }
    }
}

impl Neg for GaussianRational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl Add for &GaussianRational {
    type Output = GaussianRational;

    fn add(self, rhs: Self) -> Self::Output {
        self.clone() + rhs.clone()
    }
}

impl Sub for &GaussianRational {
    type Output = GaussianRational;

    fn sub(self, rhs: Self) -> Self::Output {
        self.clone() - rhs.clone()
    }
}

impl Mul for &GaussianRational {
    type Output = GaussianRational;

    fn mul(self, rhs: Self) -> Self::Output {
        self.clone() * rhs.clone()
    }
}

impl From<Rational> for GaussianRational {
    fn from(re: Rational) -> Self {
        Self::from_rational(re)
    }
}

impl From<i64> for GaussianRational {
    fn from(re: i64) -> Self {
        Self::from_rational(Rational::from(re))
    }
}

impl fmt::Debug for GaussianRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} + {}i)", self.re, self.im)
    }
}

impl fmt::Display for GaussianRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_zero() {
            return write!(f, "{}", self.re);
        }
        if self.re.is_zero() {
            return write!(f, "{}*I", self.im);
        }
        if self.im.is_negative() {
            write!(f, "{} - {}*I", self.re, self.im.abs())
        } else {
            write!(f, "{} + {}*I", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(re: i64, im: i64) -> GaussianRational {
        GaussianRational::from_i64(re, im)
    }

    #[test]
    fn test_mul() {
        // (1 + 2i)(3 + 4i) = 3 + 4i + 6i - 8 = -5 + 10i
        assert_eq!(g(1, 2) * g(3, 4), g(-5, 10));
    }

    #[test]
    fn test_inverse() {
        let z = g(3, 4);
        let w = Field::inv(&z).unwrap();
        assert!(Ring::is_one(&(z * w)));
        assert!(Field::inv(&g(0, 0)).is_none());
    }

    #[test]
    fn test_norm_sq() {
        assert_eq!(g(3, 4).norm_sq(), Rational::from(25));
        assert_eq!(g(0, 0).norm_sq(), Rational::zero());
    }

    #[test]
    fn test_mul_i() {
        assert_eq!(g(2, 3).mul_i(), g(-3, 2));
        assert_eq!(g(1, 0).mul_i().mul_i(), g(-1, 0));
    }

    #[test]
    fn test_conj_norm() {
        let z = g(5, -7);
        let p = z.clone() * z.conj();
        assert_eq!(*p.re(), z.norm_sq());
        assert!(p.im().is_zero());
    }
}
