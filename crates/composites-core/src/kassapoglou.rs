//! Closed-form buckling and post-buckling estimates.
//!
//! Kassapoglou, C., *Design and Analysis of Composite Structures*, 2nd ed.,
//! John Wiley & Sons, 2013.

use crate::error::{CompositesError, Result};
use crate::laminate::Laminate;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Largest number of half-waves tried when searching for the critical mode.
pub const MAX_HALF_WAVES: u32 = 10;

/// Bending stiffness terms used by the buckling formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BendingStiffness {
    pub d11: f64,
    pub d12: f64,
    pub d16: f64,
    pub d22: f64,
    pub d26: f64,
    pub d66: f64,
}

impl From<&Laminate> for BendingStiffness {
    fn from(lam: &Laminate) -> Self {
        Self {
            d11: lam.d[0][0],
            d12: lam.d[0][1],
            d16: lam.d[0][2],
            d22: lam.d[1][1],
            d26: lam.d[1][2],
            d66: lam.d[2][2],
        }
    }
}

/// Tolerances of the Newton-Raphson scheme in [`calc_nxy_crit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonOptions {
    pub rtol: f64,
    pub atol: f64,
    pub max_iter: usize,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-6,
            max_iter: 50,
        }
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CompositesError::InvalidInput(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// Uniaxial compression buckling load, Eq. 6.6 (section 6.2).
///
/// `a` and `b` are the plate length and width. When `m` or `n` is `None`
/// the critical number of half-waves in that direction is searched up to
/// [`MAX_HALF_WAVES`]; both cannot be `None`.
pub fn calc_nxx_crit(
    a: f64,
    b: f64,
    m: Option<u32>,
    n: Option<u32>,
    d: &BendingStiffness,
) -> Result<f64> {
    check_positive("a", a)?;
    check_positive("b", b)?;
    let candidates = |value: Option<u32>| match value {
        Some(v) => v..=v,
        None => 1..=MAX_HALF_WAVES,
    };
    if m.is_none() && n.is_none() {
        return Err(CompositesError::InvalidInput(
            "only m or n can be None, not both".to_string(),
        ));
    }
    if m == Some(0) || n == Some(0) {
        return Err(CompositesError::InvalidInput(
            "the number of half-waves must be at least 1".to_string(),
        ));
    }

    let ar = a / b;
    let mut nxx_crit = f64::INFINITY;
    for m in candidates(m) {
        for n in candidates(n) {
            let (m, n) = (m as f64, n as f64);
            let value = PI.powi(2)
                * (d.d11 * m.powi(4)
                    + 2.0 * (d.d12 + 2.0 * d.d66) * m.powi(2) * n.powi(2) * ar.powi(2)
                    + d.d22 * n.powi(4) * ar.powi(4))
                / (a.powi(2) * m.powi(2));
            nxx_crit = nxx_crit.min(value);
        }
    }
    Ok(nxx_crit)
}

/// Shear buckling load, Eq. 6.28 (section 6.4).
///
/// The aspect ratio `AR` and the angle `alpha` solve Eqs. 6.29 and 6.30,
/// found with a Newton-Raphson scheme starting at `alpha = pi/6`. The
/// residual of Eq. 6.30 is converged to `atol + rtol * scale`, where `scale`
/// is the magnitude of its stiffness term.
pub fn calc_nxy_crit(a: f64, d: &BendingStiffness, options: &NewtonOptions) -> Result<f64> {
    check_positive("a", a)?;
    let (d11, d12, d22, d66) = (d.d11, d.d12, d.d22, d.d66);
    let d3 = d12 + 2.0 * d66;

    let mut alpha = PI / 6.0;
    let mut converged = None;
    for iteration in 0..options.max_iter {
        let t = alpha.tan();
        let ar = (d11 / (d11 * t.powi(4) + 2.0 * d3 * t.powi(2) + d22)).powf(0.25);
        let scale = d11 + 2.0 * d3 * ar.powi(2) + d22 * ar.powi(4);
        let expr = 3.0 * d11 * ar.powi(4) * t.powi(4)
            + (6.0 * d11 * ar.powi(2) + 2.0 * d3 * ar.powi(4)) * t.powi(2)
            - scale;
        if !expr.is_finite() {
            break;
        }
        if expr.abs() <= options.atol + options.rtol * scale.abs() {
            tracing::debug!(iteration, alpha, "shear buckling Newton-Raphson converged");
            converged = Some((alpha, ar));
            break;
        }
        let dexpr_dalpha = 3.0 * ar.powi(4) * d11 * (4.0 * t.powi(2) + 4.0) * t.powi(3)
            + (ar.powi(4) * (2.0 * d12 + 4.0 * d66) + 6.0 * ar.powi(2) * d11)
                * (2.0 * t.powi(2) + 2.0)
                * t;
        alpha -= expr / dexpr_dalpha;
    }
    let (alpha, ar) = converged.ok_or(CompositesError::NotConverged(options.max_iter))?;

    let t = alpha.tan();
    Ok(PI.powi(2) / (2.0 * ar.powi(2) * a.powi(2) * t)
        * (d11 * (1.0 + 6.0 * t.powi(2) * ar.powi(2) + t.powi(4) * ar.powi(4))
            + 2.0 * d3 * (ar.powi(2) + ar.powi(4) * t.powi(2))
            + d22 * ar.powi(4)))
}

/// Effective width of a post-buckled plate, Eq. 7.15 (section 7.1).
///
/// Defined by `∫ Nxx dy = 2 Nx_max b_eff` for an applied compressive force
/// `px` above the critical force `pcr`.
pub fn calc_beff(b: f64, px: f64, pcr: f64, a11: f64, a12: f64, a22: f64) -> f64 {
    b / (2.0 * (1.0 + 2.0 * (1.0 + a12 / a11) * (1.0 - pcr / px) * a11 / (a11 + 3.0 * a22)))
}

/// Critical `Nxx` under combined compression and shear, Eq. 6.34.
///
/// The shear load is proportional to the compression, `Nxy = k Nxx`.
pub fn calc_nxx_crit_combined_shear(k: f64, a: f64, b: f64, d: &BendingStiffness) -> f64 {
    let ratio = a.powi(2) * k.powi(2) / (b.powi(2) * PI.powi(4));
    let den = 2.0 - 8192.0 / 81.0 * ratio;
    let root = (9.0 + 65536.0 / 81.0 * ratio).sqrt();
    let base = PI.powi(2) / a.powi(2)
        * (d.d11 + 2.0 * (d.d12 + 2.0 * d.d66) * a.powi(2) / b.powi(2)
            + d.d22 * a.powi(4) / b.powi(4))
        / den;
    let nxx_crit1 = base * (5.0 + root);
    let nxx_crit2 = base * (5.0 - root);
    nxx_crit1.abs().min(nxx_crit2.abs())
}

/// Critical `Nxx` under combined compression and shear keeping the `D16`
/// and `D26` terms that Eq. 6.34 neglects.
pub fn calc_nxx_crit_combined_shear_full(k: f64, a: f64, b: f64, d: &BendingStiffness) -> f64 {
    let BendingStiffness {
        d11,
        d12,
        d16,
        d22,
        d26,
        d66,
    } = *d;
    let pi4 = PI.powi(4);

    let linear = -405.0 * pi4 * d11 * b.powi(5) - 810.0 * pi4 * d12 * a.powi(2) * b.powi(3)
        + 20480.0 * d16 * a.powi(2) * b.powi(3) * k
        - 405.0 * pi4 * d22 * a.powi(4) * b
        + 20480.0 * d26 * a.powi(4) * b * k
        - 1620.0 * pi4 * d66 * a.powi(2) * b.powi(3);

    let discriminant = 16384.0 * d11.powi(2) * a.powi(2) * b.powi(8) * k.powi(2)
        + 729.0 * pi4 * d11.powi(2) * b.powi(10)
        + 65536.0 * d11 * d12 * a.powi(4) * b.powi(6) * k.powi(2)
        + 2916.0 * pi4 * d11 * d12 * a.powi(2) * b.powi(8)
        - 204800.0 * d11 * d16 * a.powi(2) * b.powi(8) * k
        + 32768.0 * d11 * d22 * a.powi(6) * b.powi(4) * k.powi(2)
        + 1458.0 * pi4 * d11 * d22 * a.powi(4) * b.powi(6)
        - 204800.0 * d11 * d26 * a.powi(4) * b.powi(6) * k
        + 131072.0 * d11 * d66 * a.powi(4) * b.powi(6) * k.powi(2)
        + 5832.0 * pi4 * d11 * d66 * a.powi(2) * b.powi(8)
        + 65536.0 * d12.powi(2) * a.powi(6) * b.powi(4) * k.powi(2)
        + 2916.0 * pi4 * d12.powi(2) * a.powi(4) * b.powi(6)
        - 409600.0 * d12 * d16 * a.powi(4) * b.powi(6) * k
        + 65536.0 * d12 * d22 * a.powi(8) * b.powi(2) * k.powi(2)
        + 2916.0 * pi4 * d12 * d22 * a.powi(6) * b.powi(4)
        - 409600.0 * d12 * d26 * a.powi(6) * b.powi(4) * k
        + 262144.0 * d12 * d66 * a.powi(6) * b.powi(4) * k.powi(2)
        + 11664.0 * pi4 * d12 * d66 * a.powi(4) * b.powi(6)
        + 409600.0 * d16.powi(2) * a.powi(2) * b.powi(8)
        - 204800.0 * d16 * d22 * a.powi(6) * b.powi(4) * k
        + 819200.0 * d16 * d26 * a.powi(4) * b.powi(6)
        - 819200.0 * d16 * d66 * a.powi(4) * b.powi(6) * k
        + 16384.0 * d22.powi(2) * a.powi(10) * k.powi(2)
        + 729.0 * pi4 * d22.powi(2) * a.powi(8) * b.powi(2)
        - 204800.0 * d22 * d26 * a.powi(8) * b.powi(2) * k
        + 131072.0 * d22 * d66 * a.powi(8) * b.powi(2) * k.powi(2)
        + 5832.0 * pi4 * d22 * d66 * a.powi(6) * b.powi(4)
        + 409600.0 * d26.powi(2) * a.powi(6) * b.powi(4)
        - 819200.0 * d26 * d66 * a.powi(6) * b.powi(4) * k
        + 262144.0 * d66.powi(2) * a.powi(6) * b.powi(4) * k.powi(2)
        + 11664.0 * pi4 * d66.powi(2) * a.powi(4) * b.powi(6);
    let root = 9.0 * PI.powi(2) * discriminant.sqrt();

    let den = 2.0 * a.powi(2) * b.powi(3) * (1024.0 * a.powi(2) * k.powi(2) - 81.0 * pi4 * b.powi(2));
    let nxx_crit1 = PI.powi(2) * (linear - root) / den;
    let nxx_crit2 = PI.powi(2) * (linear + root) / den;
    nxx_crit1.abs().min(nxx_crit2.abs())
}
