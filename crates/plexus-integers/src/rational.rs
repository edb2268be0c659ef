//! Arbitrary precision rational numbers.
//!
//! Exact rational arithmetic, plus the two interval utilities the
//! certified pipeline is built on: `simplest_in_interval` (the
//! continued-fraction rationaliser behind `simp`) and
//! `dyadic_between` (dyadic parameter selection for step control).

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::Integer;

/// An arbitrary precision rational number.
///
/// Rationals are always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let r = RBig::from_parts(
            numerator.into_inner(),
            denominator.clone().into_inner().unsigned_abs(),
        );
        if denominator.is_negative() {
            Self(-r)
        } else {
            Self(r)
        }
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(dashu::integer::IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the largest integer not exceeding this rational.
    #[must_use]
    pub fn floor(&self) -> Integer {
        self.numerator().div_floor(&self.denominator())
    }

    /// Returns the smallest integer not below this rational.
    #[must_use]
    pub fn ceil(&self) -> Integer {
        -(-self).floor()
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Returns the inner `dashu::RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }
}

/// Returns the rational with smallest denominator in the closed
/// interval `[lo, hi]` (ties broken towards smallest numerator
/// magnitude). This is the continued-fraction walk: an integer wins if
/// one fits, otherwise recurse on the reciprocal fractional parts.
///
/// # Panics
///
/// Panics if `lo > hi`.
#[must_use]
pub fn simplest_in_interval(lo: &Rational, hi: &Rational) -> Rational {
    assert!(lo <= hi, "empty interval");

    let cl = lo.ceil();
    let fh = hi.floor();
    if cl <= fh {
        // An integer fits; pick the one of smallest magnitude.
        let int = if !cl.is_negative() {
            cl
        } else if fh.is_negative() {
            fh
        } else {
            Integer::zero()
        };
        return Rational::from_integer(int);
    }

    // lo and hi lie strictly between n and n+1.
    let n = Rational::from_integer(lo.floor());
    let inner = simplest_in_interval(&(hi - &n).recip(), &(lo - &n).recip());
    n + inner.recip()
}

/// Returns the continued-fraction convergent of `t` with smallest
/// denominator at distance at most `prec`, so that
/// `|simp(t, prec) - t| <= prec`.
///
/// # Panics
///
/// Panics if `prec` is negative.
#[must_use]
pub fn simp(t: &Rational, prec: &Rational) -> Rational {
    assert!(!prec.is_negative(), "precision must be non-negative");
    if prec.is_zero() {
        return t.clone();
    }
    simplest_in_interval(&(t - prec), &(t + prec))
}

/// Returns a dyadic rational (denominator a power of two) strictly
/// inside the open interval `(a, b)`.
///
/// # Panics
///
/// Panics if `a >= b`.
#[must_use]
pub fn dyadic_between(a: &Rational, b: &Rational) -> Rational {
    assert!(a < b, "empty interval");

    let gap = b - a;
    let mut scale = Rational::one();
    let two = Rational::from(2);
    // Smallest power of two with 1/2^k < (b - a)/2.
    while &two * &scale.recip() >= gap {
        scale = &scale * &two;
    }
    let m = (a * &scale).floor() + Integer::one();
    Rational::from_integer(m) * scale.recip()
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl FromStr for Rational {
    type Err = dashu::base::error::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((num, den)) => {
                let num: Integer = num.trim().parse()?;
                let den: Integer = den.trim().parse()?;
                Ok(Self::new(num, den))
            }
            None => s.trim().parse::<Integer>().map(Self::from_integer),
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div for &Rational {
    type Output = Rational;

    fn div(self, rhs: Self) -> Self::Output {
        Rational(&self.0 / &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}
