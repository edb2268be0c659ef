//! Euclidean division, gcd and exact division for polynomials over a
//! field.

use plexus_rings::traits::Field;

use crate::dense::DensePoly;
use crate::PolyError;

/// Divides polynomial a by b, returning (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
pub fn poly_div_rem<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> (DensePoly<F>, DensePoly<F>) {
    assert!(!b.is_zero(), "division by zero polynomial");

    if a.degree() < b.degree() {
        return (DensePoly::zero(), a.clone());
    }

    let b_lead_inv = b
        .leading_coeff()
        .inv()
        .expect("leading coefficient of a non-zero polynomial is invertible");
    let mut quotient = vec![F::zero(); a.degree() - b.degree() + 1];
    let mut remainder = a.coeffs().to_vec();

    while remainder.len() >= b.coeffs().len() {
        let deg_diff = remainder.len() - b.coeffs().len();
        let coeff = remainder
            .last()
            .expect("remainder is non-empty")
            .clone()
            * b_lead_inv.clone();

        quotient[deg_diff] = coeff.clone();

        for (i, bc) in b.coeffs().iter().enumerate() {
            remainder[deg_diff + i] = remainder[deg_diff + i].clone() - coeff.clone() * bc.clone();
        }

        while remainder.len() > 1 && remainder.last().is_some_and(|c| c.is_zero()) {
            remainder.pop();
        }

        if remainder.len() == 1 && remainder[0].is_zero() {
            break;
        }
    }

    (DensePoly::new(quotient), DensePoly::new(remainder))
}

/// Computes the monic gcd of two polynomials over a field.
pub fn poly_gcd<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> DensePoly<F> {
    if a.is_zero() {
        return make_monic(b);
    }
    if b.is_zero() {
        return make_monic(a);
    }

    let mut p = a.clone();
    let mut q = b.clone();

    while !q.is_zero() {
        let (_, r) = poly_div_rem(&p, &q);
        p = q;
        q = r;
    }

    make_monic(&p)
}

/// Makes a polynomial monic.
pub fn make_monic<F: Field>(p: &DensePoly<F>) -> DensePoly<F> {
    if p.is_zero() {
        return p.clone();
    }

    let lead_inv = p
        .leading_coeff()
        .inv()
        .expect("leading coefficient of a non-zero polynomial is invertible");
    p.scale(&lead_inv)
}

/// Divides `a` by `b` exactly.
///
/// # Errors
///
/// Returns [`PolyError::InexactDivision`] when `b` does not divide `a`.
pub fn exact_div<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> Result<DensePoly<F>, PolyError> {
    let (q, r) = poly_div_rem(a, b);
    if r.is_zero() {
        Ok(q)
    } else {
        Err(PolyError::InexactDivision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_integers::Rational;

    fn poly(cs: &[i64]) -> DensePoly<Rational> {
        DensePoly::new(cs.iter().map(|&c| Rational::from(c)).collect())
    }

    #[test]
    fn test_poly_div_rem() {
        // (x² + 2x + 1) / (x + 1) = (x + 1), remainder 0
        let (q, r) = poly_div_rem(&poly(&[1, 2, 1]), &poly(&[1, 1]));
        assert_eq!(q, poly(&[1, 1]));
        assert!(r.is_zero());
    }

    #[test]
    fn test_poly_div_rem_remainder() {
        // (x² + 1) = (x + 1)(x - 1) + 2
        let (q, r) = poly_div_rem(&poly(&[1, 0, 1]), &poly(&[1, 1]));
        assert_eq!(q, poly(&[-1, 1]));
        assert_eq!(r, poly(&[2]));
    }

    #[test]
    fn test_poly_gcd() {
        // gcd((x-1)(x+1), (x-1)²) = x - 1
        let g = poly_gcd(&poly(&[-1, 0, 1]), &poly(&[1, -2, 1]));
        assert_eq!(g, poly(&[-1, 1]));
    }

    #[test]
    fn test_exact_div() {
        let p = poly(&[-1, 0, 1]);
        let q = exact_div(&p, &poly(&[1, 1])).unwrap();
        assert_eq!(q, poly(&[-1, 1]));
        assert!(exact_div(&p, &poly(&[2, 1])).is_err());
    }
}
