//! Certified Newton iteration over ℚ(i).
//!
//! The iterate is rationalised after every step with the
//! continued-fraction convergent, which keeps denominators small
//! without losing the certificate: the returned error bound comes
//! from the nearest-root inequality, not from the iteration history.

use plexus_integers::{simp, Rational};
use plexus_poly::DensePoly;
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::{Field, Ring};

use crate::RootError;

/// Refines `z0` towards a root of `p`.
///
/// On success returns `(z, err_sq)` where `err_sq` is a certified
/// upper bound on the *squared* distance from `z` to the nearest root
/// of `p`, with `err_sq ≤ eps²`. The bound is
/// `deg(p)² · |p(z)|² / |p'(z)|²`: a polynomial of degree n always
/// has a root within `n·|p/p'|` of any point.
///
/// The iteration succeeds when the Newton correction has modulus at
/// most `eps / (100·(deg p + 1))`, and gives up after `lim` steps.
///
/// # Errors
///
/// Returns [`RootError::NewtonNonConvergent`] when the iteration
/// exhausts its budget or hits a critical point of `p`.
pub fn newton_root(
    p: &DensePoly<GaussianRational>,
    z0: &GaussianRational,
    eps: &Rational,
    lim: u32,
) -> Result<(GaussianRational, Rational), RootError> {
    let degree = p.degree();
    assert!(degree >= 1, "cannot refine a root of a constant");

    let dp = p.derivative();
    let scale = Rational::from(i64::try_from(100 * (degree + 1)).expect("degree fits in i64"));
    let step_prec = eps / &scale;
    let step_prec_sq = &step_prec * &step_prec;

    let mut z = z0.clone();
    for _ in 0..lim {
        let pv = p.eval(&z);
        let dv = dp.eval(&z);
        let Some(dv_inv) = Field::inv(&dv) else {
            return Err(RootError::NewtonNonConvergent { iterations: lim });
        };

        let correction = pv * dv_inv;
        let converged = correction.norm_sq() <= step_prec_sq;
        z = (z - correction).simplify(&step_prec);

        if converged {
            // Certify at the final (rationalised) point; if the
            // rationalisation pushed the bound past eps, keep going.
            let pv = p.eval(&z);
            if Ring::is_zero(&pv) {
                return Ok((z, Rational::zero()));
            }
            let dv = dp.eval(&z);
            let Some(dv_inv) = Field::inv(&dv) else {
                return Err(RootError::NewtonNonConvergent { iterations: lim });
            };
            let c = pv * dv_inv;
            let deg_sq = Rational::from(i64::try_from(degree * degree).expect("fits in i64"));
            let err_sq = &deg_sq * &c.norm_sq();
            if err_sq <= eps * eps {
                return Ok((z, err_sq));
            }
        }
    }

    Err(RootError::NewtonNonConvergent { iterations: lim })
}

/// One truncated Newton step followed by rationalisation, used by the
/// certified follower once a root is already protected by an
/// isolating disk.
#[must_use]
pub fn newton_step(
    p: &DensePoly<GaussianRational>,
    dp: &DensePoly<GaussianRational>,
    z: &GaussianRational,
    prec: &Rational,
) -> GaussianRational {
    let pv = p.eval(z);
    let dv = dp.eval(z);
    match Field::inv(&dv) {
        Some(dv_inv) => (z.clone() - pv * dv_inv).simplify(prec),
        None => z.clone(),
    }
}
