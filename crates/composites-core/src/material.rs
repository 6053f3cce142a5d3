//! Orthotropic material lamina.
//!
//! A [`MatLamina`] holds the engineering constants of one material together
//! with the derived reduced stiffnesses `q_ij` and the stiffness invariants
//! `u1 .. u7` used by lamination-parameter based formulations.
//!
//! References:
//!
//! - Reddy, J. N., *Mechanics of Laminated Composite Plates and Shells*,
//!   2nd ed., CRC Press, 2004.
//! - Jones, R. M., *Mechanics of Composite Materials*, 2nd ed., 1999. The
//!   invariants are extended with the transverse shear terms `u6` and `u7`.
//! - Melo, Bi and Tsai, "A novel invariant-based design approach to carbon
//!   fiber reinforced laminates", Compos. Struct. 159, 2017 (trace).

use crate::error::{CompositesError, Result};
use crate::matrix::Mat6;
use serde::{Deserialize, Serialize};

/// Relative tolerance used to decide whether two materials are the same.
const SAME_MATERIAL_RTOL: f64 = 1e-9;

/// Orthotropic material lamina.
///
/// | field           | description                                    |
/// |-----------------|------------------------------------------------|
/// | `e1, e2, e3`    | Young moduli                                   |
/// | `g12, g13, g23` | shear moduli                                   |
/// | `nu12 .. nu32`  | Poisson ratios, `nu_ji / e_j = nu_ij / e_i`    |
/// | `rho`           | specific mass                                  |
/// | `q11 .. q66`    | reduced stiffnesses (Reddy's Voigt order)      |
/// | `u1 .. u7`      | stiffness invariants                           |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatLamina {
    pub e1: f64,
    pub e2: f64,
    pub e3: f64,
    pub g12: f64,
    pub g13: f64,
    pub g23: f64,
    pub nu12: f64,
    pub nu13: f64,
    pub nu21: f64,
    pub nu23: f64,
    pub nu31: f64,
    pub nu32: f64,
    pub rho: f64,

    pub q11: f64,
    pub q12: f64,
    pub q13: f64,
    pub q21: f64,
    pub q22: f64,
    pub q23: f64,
    pub q31: f64,
    pub q32: f64,
    pub q33: f64,
    pub q44: f64,
    pub q55: f64,
    pub q66: f64,

    pub u1: f64,
    pub u2: f64,
    pub u3: f64,
    pub u4: f64,
    pub u5: f64,
    pub u6: f64,
    pub u7: f64,
}

/// Returns a [`MatLamina`] from a `laminaprop` tuple.
///
/// Accepted layouts:
///
/// ```text
/// (e, nu)                                           isotropic, in-plane stress
/// (e1, e2, nu12)                                    isotropic, legacy layout
/// (e1, e2, nu12, g12, g13, g23)                     orthotropic, in-plane stress
/// (e1, e2, nu12, g12, g13, g23, e3, nu13, nu23)     tri-axial
/// ```
///
/// For the isotropic layouts `g = e / (2 (1 + nu))`.
pub fn read_laminaprop(laminaprop: &[f64], rho: f64) -> Result<MatLamina> {
    let full: [f64; 9] = match *laminaprop {
        [e, nu] | [e, _, nu] => {
            let g = e / (2.0 * (1.0 + nu));
            [e, e, nu, g, g, g, 0.0, 0.0, 0.0]
        }
        [e1, e2, nu12, g12, g13, g23] => [e1, e2, nu12, g12, g13, g23, 0.0, 0.0, 0.0],
        [e1, e2, nu12, g12, g13, g23, e3, nu13, nu23] => {
            [e1, e2, nu12, g12, g13, g23, e3, nu13, nu23]
        }
        _ => return Err(CompositesError::InvalidLaminaprop(laminaprop.len())),
    };
    let [e1, e2, nu12, g12, g13, g23, e3, nu13, nu23] = full;
    if !(e1 > 0.0 && e1.is_finite() && e2 > 0.0 && e2.is_finite()) {
        return Err(CompositesError::InvalidInput(format!(
            "Young moduli must be positive and finite, got e1={e1}, e2={e2}"
        )));
    }

    let mut matlamina = MatLamina {
        e1,
        e2,
        e3,
        g12,
        g13,
        g23,
        nu12,
        nu13,
        nu23,
        nu21: nu12 * e2 / e1,
        nu31: nu13 * e3 / e1,
        nu32: nu23 * e3 / e2,
        rho,
        ..MatLamina::default()
    };
    matlamina.rebuild();
    Ok(matlamina)
}

impl MatLamina {
    /// Recompute the reduced stiffnesses and the invariants from the
    /// engineering constants.
    pub fn rebuild(&mut self) {
        let (e1, e2, e3) = (self.e1, self.e2, self.e3);
        let (nu12, nu13, nu21) = (self.nu12, self.nu13, self.nu21);
        let (nu23, nu31, nu32) = (self.nu23, self.nu31, self.nu32);

        let den = 1.0
            - nu12 * nu21
            - nu13 * nu31
            - nu23 * nu32
            - nu12 * nu23 * nu31
            - nu13 * nu21 * nu32;
        self.q11 = e1 * (1.0 - nu23 * nu32) / den;
        self.q12 = e1 * (nu21 + nu23 * nu31) / den;
        self.q13 = e1 * (nu31 + nu21 * nu32) / den;
        self.q21 = e2 * (nu12 + nu13 * nu32) / den;
        self.q22 = e2 * (1.0 - nu13 * nu31) / den;
        self.q23 = e2 * (nu32 + nu12 * nu31) / den;
        self.q31 = e3 * (nu13 + nu12 * nu32) / den;
        self.q32 = e3 * (nu23 + nu13 * nu21) / den;
        self.q33 = e3 * (1.0 - nu12 * nu21) / den;
        self.q44 = self.g23;
        self.q55 = self.g13;
        self.q66 = self.g12;

        self.calc_invariants();
    }

    fn calc_invariants(&mut self) {
        let (q11, q12, q22) = (self.q11, self.q12, self.q22);
        let (q44, q55, q66) = (self.q44, self.q55, self.q66);
        self.u1 = (3.0 * q11 + 3.0 * q22 + 2.0 * q12 + 4.0 * q66) / 8.0;
        self.u2 = (q11 - q22) / 2.0;
        self.u3 = (q11 + q22 - 2.0 * q12 - 4.0 * q66) / 8.0;
        self.u4 = (q11 + q22 + 6.0 * q12 - 4.0 * q66) / 8.0;
        self.u5 = (self.u1 - self.u4) / 2.0;
        self.u6 = (q44 + q55) / 2.0;
        self.u7 = (q44 - q55) / 2.0;
    }

    /// Constitutive matrix in Voigt order `(1, 2, 3, 23, 13, 12)`.
    pub fn get_constitutive_matrix(&self) -> Mat6 {
        [
            [self.q11, self.q12, self.q13, 0.0, 0.0, 0.0],
            [self.q21, self.q22, self.q23, 0.0, 0.0, 0.0],
            [self.q31, self.q32, self.q33, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, self.q44, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, self.q55, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, self.q66],
        ]
    }

    /// Invariant matrix.
    ///
    /// Rows give `[Q11, Q22, Q12, Q66, Q16, Q26, Q44, Q55, Q45]` of a ply
    /// rotated by `t` when multiplied by `[1, cos2t, sin2t, cos4t, sin4t]`.
    pub fn get_invariant_matrix(&self) -> [[f64; 5]; 9] {
        let (u1, u2, u3, u4, u5, u6, u7) =
            (self.u1, self.u2, self.u3, self.u4, self.u5, self.u6, self.u7);
        [
            [u1, u2, 0.0, u3, 0.0],
            [u1, -u2, 0.0, u3, 0.0],
            [u4, 0.0, 0.0, -u3, 0.0],
            [u5, 0.0, 0.0, -u3, 0.0],
            [0.0, 0.0, u2 / 2.0, 0.0, u3],
            [0.0, 0.0, u2 / 2.0, 0.0, -u3],
            [u6, u7, 0.0, 0.0, 0.0],
            [u6, -u7, 0.0, 0.0, 0.0],
            [0.0, 0.0, -u7, 0.0, 0.0],
        ]
    }

    /// Tsai's trace of the plane-stress stiffness, `q11 + q22 + 2 q66`.
    pub fn trace(&self) -> f64 {
        self.q11 + self.q22 + 2.0 * self.q66
    }

    /// Divide the plane-stress and transverse shear stiffnesses by the trace
    /// and recompute the invariants.
    pub fn trace_normalize_plane_stress(&mut self) {
        let tr = self.trace();
        self.q11 /= tr;
        self.q12 /= tr;
        self.q22 /= tr;
        self.q44 /= tr;
        self.q55 /= tr;
        self.q66 /= tr;
        self.calc_invariants();
    }

    /// Whether both materials share the same invariants.
    pub fn same_material(&self, other: &MatLamina) -> bool {
        let lhs = [self.u1, self.u2, self.u3, self.u4, self.u5, self.u6, self.u7];
        let rhs = [
            other.u1, other.u2, other.u3, other.u4, other.u5, other.u6, other.u7,
        ];
        let scale = lhs
            .iter()
            .chain(rhs.iter())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        lhs.iter()
            .zip(rhs.iter())
            .all(|(a, b)| (a - b).abs() <= SAME_MATERIAL_RTOL * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, rtol: f64) -> bool {
        (a - b).abs() <= rtol * b.abs().max(a.abs())
    }

    #[test]
    fn isotropic_layouts_agree() {
        let new = read_laminaprop(&[71e9, 0.33], 0.0).unwrap();
        let legacy = read_laminaprop(&[71e9, 71e9, 0.33], 0.0).unwrap();
        assert_eq!(new, legacy);
        assert!(close(new.g12, 71e9 / 2.66, 1e-12));
        assert_eq!(new.e3, 0.0);
    }

    #[test]
    fn plane_stress_reduced_stiffness() {
        let m = read_laminaprop(&[71e9, 7e9, 0.28, 7e9, 7e9, 7e9], 1600.0).unwrap();
        let nu21 = 0.28 * 7e9 / 71e9;
        assert!(close(m.q11, 71e9 / (1.0 - 0.28 * nu21), 1e-12));
        assert!(close(m.q12, 71e9 * nu21 / (1.0 - 0.28 * nu21), 1e-12));
        assert_eq!(m.q13, 0.0);
        assert_eq!(m.rho, 1600.0);
    }

    #[test]
    fn tri_axial_isotropic_stiffness() {
        let e = 71e9;
        let nu = 0.33;
        let g = e / (2.0 * (1.0 + nu));
        let m = read_laminaprop(&[e, e, nu, g, g, g, e, nu, nu], 0.0).unwrap();
        let lame = e / ((1.0 + nu) * (1.0 - 2.0 * nu));
        assert!(close(m.q11, lame * (1.0 - nu), 1e-12));
        assert!(close(m.q12, lame * nu, 1e-12));
        assert!(close(m.q33, m.q11, 1e-12));
        assert!(close(m.u1, 1.05196816e11, 1e-8));
    }

    #[test]
    fn invalid_laminaprop_length() {
        let err = read_laminaprop(&[1.0, 2.0, 3.0, 4.0], 0.0).unwrap_err();
        assert!(matches!(err, CompositesError::InvalidLaminaprop(4)));
    }

    #[test]
    fn non_finite_moduli_are_rejected() {
        for laminaprop in [[f64::NAN, 0.33], [f64::INFINITY, 0.33], [-71e9, 0.33]] {
            assert!(matches!(
                read_laminaprop(&laminaprop, 0.0),
                Err(CompositesError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn trace_normalized_invariants() {
        // Melo, Bi and Tsai (2017), Table 1.
        let cases = [
            (203e9, 11.20e9, 0.32, 8.40e9, 232e9),
            (191e9, 9.94e9, 0.35, 7.79e9, 218e9),
            (142e9, 7.72e9, 0.34, 3.80e9, 158e9),
        ];
        for (ex, ey, vx, es, tr) in cases {
            let mut m = read_laminaprop(&[ex, ey, vx, es, es, es], 0.0).unwrap();
            assert!(close(m.trace(), tr, 0.01));

            let t = m.trace();
            let (q11, q12, q22, q66) = (m.q11 / t, m.q12 / t, m.q22 / t, m.q66 / t);
            let u1 = (3.0 * q11 + 3.0 * q22 + 2.0 * q12 + 4.0 * q66) / 8.0;
            let u3 = (q11 + q22 - 2.0 * q12 - 4.0 * q66) / 8.0;

            m.trace_normalize_plane_stress();
            assert!(close(m.u1, u1, 1e-12));
            assert!(close(m.u3, u3, 1e-12));
            assert!(close(m.trace(), 1.0, 1e-12));
        }
    }

    #[test]
    fn invariant_matrix_reproduces_rotated_stiffness() {
        let m = read_laminaprop(&[142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 3.0e9], 0.0).unwrap();
        let u = m.get_invariant_matrix();
        // At 0 deg the rotated stiffness equals the material stiffness.
        let at_zero: Vec<f64> = u.iter().map(|row| row[0] + row[1] + row[3]).collect();
        assert!(close(at_zero[0], m.q11, 1e-12));
        assert!(close(at_zero[1], m.q22, 1e-12));
        assert!(close(at_zero[2], m.q12, 1e-12));
        assert!(close(at_zero[3], m.q66, 1e-12));
        assert!(close(at_zero[6], m.q44, 1e-12));
        assert!(close(at_zero[7], m.q55, 1e-12));
    }

    #[test]
    fn same_material_uses_invariants() {
        let a = read_laminaprop(&[71e9, 7e9, 0.28, 7e9, 7e9, 7e9], 0.0).unwrap();
        let b = read_laminaprop(&[71e9, 7e9, 0.28, 7e9, 7e9, 7e9], 1600.0).unwrap();
        let c = read_laminaprop(&[71e9, 0.28], 0.0).unwrap();
        assert!(a.same_material(&b));
        assert!(!a.same_material(&c));
    }
}
