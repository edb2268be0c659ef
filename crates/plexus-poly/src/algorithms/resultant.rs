//! Resultants and discriminants via the Sylvester matrix.
//!
//! The determinant is computed by the Bareiss fraction-free
//! elimination, which only needs exact division, so the routine is
//! generic over a Euclidean domain. In particular the entries may be
//! polynomials in another variable: that instantiation is how the
//! discriminant of a bivariate curve with respect to `x` is obtained.

use plexus_rings::traits::EuclideanDomain;

/// Computes the resultant of two polynomials given as coefficient
/// slices in ascending degree order.
pub fn resultant<R: EuclideanDomain>(f: &[R], g: &[R]) -> R {
    if f.is_empty() || g.is_empty() {
        return R::zero();
    }

    let deg_f = f.len() - 1;
    let deg_g = g.len() - 1;

    if deg_f == 0 {
        return f[0].pow(u32::try_from(deg_g).expect("degree fits in u32"));
    }
    if deg_g == 0 {
        return g[0].pow(u32::try_from(deg_f).expect("degree fits in u32"));
    }

    let size = deg_f + deg_g;
    let sylvester = build_sylvester(f, g, size);
    determinant(&sylvester)
}

/// Builds the Sylvester matrix of f and g.
fn build_sylvester<R: EuclideanDomain>(f: &[R], g: &[R], size: usize) -> Vec<Vec<R>> {
    let deg_f = f.len() - 1;
    let deg_g = g.len() - 1;

    let mut matrix = vec![vec![R::zero(); size]; size];

    // Rows of the Sylvester matrix carry descending coefficients.
    for i in 0..deg_g {
        for (j, coeff) in f.iter().rev().enumerate() {
            matrix[i][i + j] = coeff.clone();
        }
    }
    for i in 0..deg_f {
        for (j, coeff) in g.iter().rev().enumerate() {
            matrix[deg_g + i][i + j] = coeff.clone();
        }
    }

    matrix
}

/// Computes the determinant by the Bareiss algorithm (fraction-free
/// Gaussian elimination); divisions are exact in an integral domain.
fn determinant<R: EuclideanDomain>(matrix: &[Vec<R>]) -> R {
    let n = matrix.len();
    if n == 0 {
        return R::one();
    }
    if n == 1 {
        return matrix[0][0].clone();
    }
    if n == 2 {
        let ad = matrix[0][0].clone() * matrix[1][1].clone();
        let bc = matrix[0][1].clone() * matrix[1][0].clone();
        return ad - bc;
    }

    let mut m: Vec<Vec<R>> = matrix.to_vec();
    let mut sign_flips = 0usize;

    for k in 0..n - 1 {
        let pivot_row = (k..n).find(|&i| !m[i][k].is_zero());
        let Some(pivot_row) = pivot_row else {
            return R::zero();
        };

        if pivot_row != k {
            m.swap(k, pivot_row);
            sign_flips += 1;
        }

        let pivot = m[k][k].clone();
        let prev_pivot = if k > 0 {
            m[k - 1][k - 1].clone()
        } else {
            R::one()
        };

        for i in k + 1..n {
            for j in k + 1..n {
                // Bareiss update: (m[i][j]·pivot − m[i][k]·m[k][j]) / previous pivot.
                let numerator =
                    m[i][j].clone() * pivot.clone() - m[i][k].clone() * m[k][j].clone();
                m[i][j] = bareiss_div(&numerator, &prev_pivot);
            }
            m[i][k] = R::zero();
        }
    }

    let det = m[n - 1][n - 1].clone();
    if sign_flips % 2 == 0 {
        det
    } else {
        -det
    }
}

/// Exact division inside the Bareiss elimination.
fn bareiss_div<R: EuclideanDomain>(dividend: &R, divisor: &R) -> R {
    if divisor.is_one() {
        return dividend.clone();
    }

    let (quotient, remainder) = dividend.div_rem(divisor);
    debug_assert!(
        remainder.is_zero(),
        "Bareiss elimination divides exactly"
    );
    quotient
}

/// Computes the discriminant of a univariate polynomial:
/// `(-1)^(n(n-1)/2) · res(f, f') / lead(f)`.
///
/// The slice holds ascending coefficients; entries may themselves be
/// polynomials in another variable.
pub fn discriminant<R: EuclideanDomain>(f: &[R], f_prime: &[R]) -> R {
    if f.len() <= 1 {
        return R::zero();
    }

    let n = f.len() - 1;
    let res = resultant(f, f_prime);
    let lead = f.last().expect("non-empty slice").clone();

    let (quot, rem) = res.div_rem(&lead);
    debug_assert!(rem.is_zero(), "leading coefficient divides the resultant");

    if (n * (n - 1)) / 2 % 2 == 0 {
        quot
    } else {
        -quot
    }
}
