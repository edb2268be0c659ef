//! The field structure of the rational numbers.
//!
//! `plexus_integers::Rational` is the scalar type itself; this module
//! attaches the algebraic traits to it so the polynomial layer can be
//! generic over the base field.

use num_traits::{One, Zero};
use plexus_integers::Rational;

use crate::traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};

impl Ring for Rational {
    fn zero() -> Self {
        <Rational as Zero>::zero()
    }

    fn one() -> Self {
        <Rational as One>::one()
    }

    fn is_zero(&self) -> bool {
        <Rational as Zero>::is_zero(self)
    }

    fn is_one(&self) -> bool {
        <Rational as One>::is_one(self)
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        self * &Rational::from(n)
    }
}

impl CommutativeRing for Rational {}
impl IntegralDomain for Rational {}

impl EuclideanDomain for Rational {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        // Division in a field is exact.
        (self / other, <Rational as Zero>::zero())
    }

    fn gcd(&self, other: &Self) -> Self {
        if Ring::is_zero(self) && Ring::is_zero(other) {
            <Rational as Zero>::zero()
        } else {
            <Rational as One>::one()
        }
    }
}

impl Field for Rational {
    fn inv(&self) -> Option<Self> {
        if Ring::is_zero(self) {
            None
        } else {
            Some(self.recip())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_laws() {
        let a = Rational::from_i64(2, 3);
        let b = Rational::from_i64(3, 4);

        assert_eq!(&a + &b, Rational::from_i64(17, 12));
        assert_eq!(&a * &b, Rational::from_i64(1, 2));
        assert_eq!(a.field_div(&b), Rational::from_i64(8, 9));
    }

    #[test]
    fn test_inverse() {
        let a = Rational::from_i64(3, 5);
        let inv = Field::inv(&a).unwrap();
        assert!(Ring::is_one(&(a * inv)));
        assert!(Field::inv(&<Rational as Ring>::zero()).is_none());
    }

    #[test]
    fn test_pow() {
        let a = Rational::from_i64(2, 3);
        assert_eq!(Ring::pow(&a, 3), Rational::from_i64(8, 27));
        assert!(Ring::is_one(&Ring::pow(&a, 0)));
    }
}
