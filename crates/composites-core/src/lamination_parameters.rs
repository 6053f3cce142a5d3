//! Lamination parameters and laminates defined by them.
//!
//! For a laminate of thickness `h` with ply boundaries `z_k`:
//!
//! ```text
//! ξA = 1/h    Σ (z_k  - z_k-1 ) [cos2θ, sin2θ, cos4θ, sin4θ]
//! ξB = 2/h²   Σ (z_k² - z_k-1²) [cos2θ, sin2θ, cos4θ, sin4θ]
//! ξD = 4/h³   Σ (z_k³ - z_k-1³) [cos2θ, sin2θ, cos4θ, sin4θ]
//! ξE = 1/h    Σ (z_k  - z_k-1 ) [cos2θ, sin2θ]
//! ```
//!
//! Together with the material invariants they fully describe A, B, D and
//! Atrans of a single-material laminate.

use crate::error::{CompositesError, Result};
use crate::laminate::Laminate;
use crate::material::{MatLamina, read_laminaprop};
use crate::matrix::{Mat2, Mat3, ZERO3, scaled};
use serde::{Deserialize, Serialize};

/// The 14 lamination parameters, serialized as `xiA1 .. xiE2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LaminationParameters {
    pub xi_a1: f64,
    pub xi_a2: f64,
    pub xi_a3: f64,
    pub xi_a4: f64,
    pub xi_b1: f64,
    pub xi_b2: f64,
    pub xi_b3: f64,
    pub xi_b4: f64,
    pub xi_d1: f64,
    pub xi_d2: f64,
    pub xi_d3: f64,
    pub xi_d4: f64,
    pub xi_e1: f64,
    pub xi_e2: f64,
}

impl LaminationParameters {
    /// Named parameters, in declaration order.
    pub fn named(&self) -> [(&'static str, f64); 14] {
        [
            ("xiA1", self.xi_a1),
            ("xiA2", self.xi_a2),
            ("xiA3", self.xi_a3),
            ("xiA4", self.xi_a4),
            ("xiB1", self.xi_b1),
            ("xiB2", self.xi_b2),
            ("xiB3", self.xi_b3),
            ("xiB4", self.xi_b4),
            ("xiD1", self.xi_d1),
            ("xiD2", self.xi_d2),
            ("xiD3", self.xi_d3),
            ("xiD4", self.xi_d4),
            ("xiE1", self.xi_e1),
            ("xiE2", self.xi_e2),
        ]
    }

    /// Reject parameters outside `[-1, 1]`.
    ///
    /// This is a necessary condition for feasibility only.
    pub fn check_bounds(&self) -> Result<()> {
        match self
            .named()
            .into_iter()
            .find(|(_, value)| !(-1.0..=1.0).contains(value))
        {
            Some((name, value)) => {
                Err(CompositesError::LaminationParameterOutOfRange { name, value })
            }
            None => Ok(()),
        }
    }

    /// Balanced laminate: `ξA2 = ξA4 = ξE2 = 0`.
    pub fn make_balanced(&mut self) {
        self.xi_a2 = 0.0;
        self.xi_a4 = 0.0;
        self.xi_e2 = 0.0;
    }

    /// Orthotropic laminate: every sine term is zero.
    pub fn make_orthotropic(&mut self) {
        self.xi_a2 = 0.0;
        self.xi_a4 = 0.0;
        self.xi_b2 = 0.0;
        self.xi_b4 = 0.0;
        self.xi_d2 = 0.0;
        self.xi_d4 = 0.0;
        self.xi_e2 = 0.0;
    }

    /// Symmetric laminate: every `ξB` is zero.
    pub fn make_symmetric(&mut self) {
        self.xi_b1 = 0.0;
        self.xi_b2 = 0.0;
        self.xi_b3 = 0.0;
        self.xi_b4 = 0.0;
    }
}

/// Free-function form of [`LaminationParameters::make_balanced`].
pub fn make_balanced_lp(lp: &mut LaminationParameters) {
    lp.make_balanced();
}

/// Free-function form of [`LaminationParameters::make_orthotropic`].
pub fn make_orthotropic_lp(lp: &mut LaminationParameters) {
    lp.make_orthotropic();
}

/// Free-function form of [`LaminationParameters::make_symmetric`].
pub fn make_symmetric_lp(lp: &mut LaminationParameters) {
    lp.make_symmetric();
}

/// In-plane stiffness block for one set of parameters.
///
/// `constant` is 1 for the A and D sets and 0 for B, which has no
/// thickness-independent term about the mid-surface.
fn in_plane_block(m: &MatLamina, constant: f64, xi: [f64; 4]) -> Mat3 {
    let [x1, x2, x3, x4] = xi;
    let q11 = constant * m.u1 + m.u2 * x1 + m.u3 * x3;
    let q22 = constant * m.u1 - m.u2 * x1 + m.u3 * x3;
    let q12 = constant * m.u4 - m.u3 * x3;
    let q66 = constant * m.u5 - m.u3 * x3;
    let q16 = m.u2 / 2.0 * x2 + m.u3 * x4;
    let q26 = m.u2 / 2.0 * x2 - m.u3 * x4;
    [[q11, q12, q16], [q12, q22, q26], [q16, q26, q66]]
}

/// Transverse shear block `[[Q44, Q45], [Q45, Q55]]`.
fn transverse_block(m: &MatLamina, xi_e1: f64, xi_e2: f64) -> Mat2 {
    let q44 = m.u6 + m.u7 * xi_e1;
    let q55 = m.u6 - m.u7 * xi_e1;
    let q45 = -m.u7 * xi_e2;
    [[q44, q45], [q45, q55]]
}

/// Laminate from a [`LaminationParameters`] value.
///
/// `E`, `F` and `H` are not determined by the parameters and are left at
/// zero. `Dtrans` and `Ftrans` assume the transverse shear parameters are
/// uniform through the thickness.
pub fn laminate_from_lamination_parameters(
    thickness: f64,
    matlamina: &MatLamina,
    lp: &LaminationParameters,
) -> Laminate {
    let h = thickness;
    let a = in_plane_block(matlamina, 1.0, [lp.xi_a1, lp.xi_a2, lp.xi_a3, lp.xi_a4]);
    let b = in_plane_block(matlamina, 0.0, [lp.xi_b1, lp.xi_b2, lp.xi_b3, lp.xi_b4]);
    let d = in_plane_block(matlamina, 1.0, [lp.xi_d1, lp.xi_d2, lp.xi_d3, lp.xi_d4]);
    let qs = transverse_block(matlamina, lp.xi_e1, lp.xi_e2);

    Laminate {
        thickness: h,
        a: scaled(&a, h),
        b: scaled(&b, h.powi(2) / 4.0),
        d: scaled(&d, h.powi(3) / 12.0),
        e: ZERO3,
        f: ZERO3,
        h: ZERO3,
        atrans: scaled(&qs, h),
        dtrans: scaled(&qs, h.powi(3) / 12.0),
        ftrans: scaled(&qs, h.powi(5) / 80.0),
        intrho: matlamina.rho * h,
        intrhoz2: matlamina.rho * h.powi(3) / 12.0,
        ..Laminate::default()
    }
}

/// Laminate from the 14 lamination parameters given one by one.
#[allow(clippy::too_many_arguments)]
pub fn laminate_from_lamination_parameters_values(
    thickness: f64,
    matlamina: &MatLamina,
    xi_a1: f64,
    xi_a2: f64,
    xi_a3: f64,
    xi_a4: f64,
    xi_b1: f64,
    xi_b2: f64,
    xi_b3: f64,
    xi_b4: f64,
    xi_d1: f64,
    xi_d2: f64,
    xi_d3: f64,
    xi_d4: f64,
    xi_e1: f64,
    xi_e2: f64,
) -> Laminate {
    let lp = LaminationParameters {
        xi_a1,
        xi_a2,
        xi_a3,
        xi_a4,
        xi_b1,
        xi_b2,
        xi_b3,
        xi_b4,
        xi_d1,
        xi_d2,
        xi_d3,
        xi_d4,
        xi_e1,
        xi_e2,
    };
    laminate_from_lamination_parameters(thickness, matlamina, &lp)
}

/// Input for a laminate defined by lamination parameters.
///
/// ```toml
/// thickness = 0.001
/// laminaprop = [142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 3.0e9]
///
/// [lp]
/// xiA1 = 0.5
/// xiD1 = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaminationParametersInput {
    pub thickness: f64,
    pub laminaprop: Vec<f64>,
    #[serde(default)]
    pub rho: f64,
    #[serde(default)]
    pub lp: LaminationParameters,
}

impl LaminationParametersInput {
    /// Validate the parameters and build the laminate.
    pub fn build(&self) -> Result<Laminate> {
        if !(self.thickness > 0.0 && self.thickness.is_finite()) {
            return Err(CompositesError::InvalidInput(format!(
                "thickness must be positive and finite, got {}",
                self.thickness
            )));
        }
        self.lp.check_bounds()?;
        let matlamina = read_laminaprop(&self.laminaprop, self.rho)?;
        let lam = laminate_from_lamination_parameters(self.thickness, &matlamina, &self.lp);
        tracing::debug!(
            thickness = self.thickness,
            lp = ?self.lp,
            "laminate built from lamination parameters"
        );
        Ok(lam)
    }
}

/// Gradients of the stiffness terms with respect to the lamination
/// parameters.
///
/// Rows of `grad_aij`, `grad_bij` and `grad_dij` are
/// `[11, 12, 22, 16, 26, 66]`; columns are the four parameters of the
/// matching set. Rows of `grad_atransij` are `[44, 45, 55]`, columns
/// `[ξE1, ξE2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GradABD {
    pub grad_aij: [[f64; 4]; 6],
    pub grad_bij: [[f64; 4]; 6],
    pub grad_dij: [[f64; 4]; 6],
    pub grad_atransij: [[f64; 2]; 3],
}

impl GradABD {
    /// The stiffness is linear in the parameters; the gradient is the same
    /// for every `lp`.
    pub fn calc_lp_grad(
        &mut self,
        thickness: f64,
        matlamina: &MatLamina,
        _lp: &LaminationParameters,
    ) {
        let m = matlamina;
        let unit = [
            [m.u2, 0.0, m.u3, 0.0],
            [0.0, 0.0, -m.u3, 0.0],
            [-m.u2, 0.0, m.u3, 0.0],
            [0.0, m.u2 / 2.0, 0.0, m.u3],
            [0.0, m.u2 / 2.0, 0.0, -m.u3],
            [0.0, 0.0, -m.u3, 0.0],
        ];
        let h = thickness;
        let scale = |factor: f64| unit.map(|row| row.map(|v| v * factor));
        self.grad_aij = scale(h);
        self.grad_bij = scale(h.powi(2) / 4.0);
        self.grad_dij = scale(h.powi(3) / 12.0);
        self.grad_atransij = [[h * m.u7, 0.0], [0.0, -h * m.u7], [-h * m.u7, 0.0]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aluminium() -> MatLamina {
        read_laminaprop(&[71e9, 0.33], 0.0).unwrap()
    }

    fn sample_lp() -> LaminationParameters {
        LaminationParameters {
            xi_a1: 0.5,
            xi_a2: 0.4,
            xi_a3: -0.3,
            xi_a4: -0.6,
            xi_b1: 0.5,
            xi_b2: 0.4,
            xi_b3: -0.3,
            xi_b4: -0.6,
            xi_d1: 0.5,
            xi_d2: 0.4,
            xi_d3: -0.3,
            xi_d4: -0.6,
            xi_e1: 0.5,
            xi_e2: 0.4,
        }
    }

    #[test]
    fn isotropic_material_ignores_parameters() {
        let lam = laminate_from_lamination_parameters(1.0, &aluminium(), &sample_lp());
        assert!((lam.a[0][0] - 7.96768040e10).abs() / 7.96768040e10 < 1e-8);
        assert!((lam.a[0][1] - 2.62933453e10).abs() / 2.62933453e10 < 1e-8);
        assert!((lam.a[2][2] - 2.66917293e10).abs() / 2.66917293e10 < 1e-8);
        assert!((lam.d[0][0] - 6.63973366e9).abs() / 6.63973366e9 < 1e-8);
        assert!((lam.atrans[0][0] - 2.66917293e10).abs() / 2.66917293e10 < 1e-8);
        assert!(lam.a[0][2].abs() < 1e-3);
        assert!(lam.b[0][0].abs() < 1e-3);
    }

    #[test]
    fn values_form_matches_struct_form() {
        let m = read_laminaprop(&[142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 3.0e9], 0.0).unwrap();
        let lp = sample_lp();
        let lhs = laminate_from_lamination_parameters(2.0, &m, &lp);
        let rhs = laminate_from_lamination_parameters_values(
            2.0, &m, 0.5, 0.4, -0.3, -0.6, 0.5, 0.4, -0.3, -0.6, 0.5, 0.4, -0.3, -0.6, 0.5, 0.4,
        );
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn forcing_parameters() {
        let mut lp = sample_lp();
        lp.make_balanced();
        assert_eq!((lp.xi_a2, lp.xi_a4, lp.xi_e2), (0.0, 0.0, 0.0));
        assert_eq!(lp.xi_d2, 0.4);

        let mut lp = sample_lp();
        make_orthotropic_lp(&mut lp);
        assert_eq!([lp.xi_b2, lp.xi_b4, lp.xi_d2, lp.xi_d4], [0.0; 4]);
        assert_eq!(lp.xi_d1, 0.5);

        let mut lp = sample_lp();
        make_symmetric_lp(&mut lp);
        assert_eq!([lp.xi_b1, lp.xi_b2, lp.xi_b3, lp.xi_b4], [0.0; 4]);
        make_balanced_lp(&mut lp);
        assert_eq!(lp.xi_a2, 0.0);
    }

    #[test]
    fn bounds_check_names_offending_parameter() {
        assert!(sample_lp().check_bounds().is_ok());
        let lp = LaminationParameters {
            xi_d3: 1.5,
            ..sample_lp()
        };
        match lp.check_bounds() {
            Err(CompositesError::LaminationParameterOutOfRange { name, value }) => {
                assert_eq!(name, "xiD3");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn input_uses_glossary_names() {
        let input: LaminationParametersInput = toml::from_str(
            r#"
            thickness = 2.0
            laminaprop = [71e9, 0.33]

            [lp]
            xiA1 = 0.25
            xiE2 = -0.5
            "#,
        )
        .unwrap();
        assert_eq!(input.lp.xi_a1, 0.25);
        assert_eq!(input.lp.xi_e2, -0.5);
        assert_eq!(input.lp.xi_d1, 0.0);
        let lam = input.build().unwrap();
        assert_eq!(lam.thickness, 2.0);
    }

    #[test]
    fn input_rejects_misspelled_parameters() {
        for table in ["xia1 = 0.5", "xiA5 = 0.9"] {
            let text = format!("thickness = 1.0\nlaminaprop = [71e9, 0.33]\n[lp]\n{table}\n");
            let err = toml::from_str::<LaminationParametersInput>(&text).unwrap_err();
            assert!(err.to_string().contains("unknown field"), "{table}: {err}");
        }
    }

    #[test]
    fn input_rejects_infeasible_parameters() {
        let input = LaminationParametersInput {
            thickness: 1.0,
            laminaprop: vec![71e9, 0.33],
            rho: 0.0,
            lp: LaminationParameters {
                xi_a1: -1.2,
                ..LaminationParameters::default()
            },
        };
        assert!(matches!(
            input.build(),
            Err(CompositesError::LaminationParameterOutOfRange { name: "xiA1", .. })
        ));
        let input = LaminationParametersInput {
            thickness: 0.0,
            lp: LaminationParameters::default(),
            ..input
        };
        assert!(input.build().is_err());
        let input = LaminationParametersInput {
            thickness: f64::NAN,
            ..input
        };
        assert!(matches!(input.build(), Err(CompositesError::InvalidInput(_))));
    }

    fn shifted(
        lp: &LaminationParameters,
        set: usize,
        col: usize,
        step: f64,
    ) -> LaminationParameters {
        let mut out = *lp;
        let mut fields = match set {
            0 => [&mut out.xi_a1, &mut out.xi_a2, &mut out.xi_a3, &mut out.xi_a4],
            1 => [&mut out.xi_b1, &mut out.xi_b2, &mut out.xi_b3, &mut out.xi_b4],
            _ => [&mut out.xi_d1, &mut out.xi_d2, &mut out.xi_d3, &mut out.xi_d4],
        };
        *fields[col] += step;
        out
    }

    #[test]
    fn gradient_matches_finite_difference() {
        let m = read_laminaprop(&[142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 3.0e9], 0.0).unwrap();
        let lp = sample_lp();
        let h = 1.5;
        let mut grad = GradABD::default();
        grad.calc_lp_grad(h, &m, &lp);

        let terms = |x: Mat3| [x[0][0], x[0][1], x[1][1], x[0][2], x[1][2], x[2][2]];
        let block = |lam: &Laminate, set: usize| match set {
            0 => lam.a,
            1 => lam.b,
            _ => lam.d,
        };
        let base = laminate_from_lamination_parameters(h, &m, &lp);
        let step = 1e-3;
        let tol = 1e-6 * m.q11;

        for (set, expected) in [grad.grad_aij, grad.grad_bij, grad.grad_dij].iter().enumerate() {
            let before = terms(block(&base, set));
            for col in 0..4 {
                let moved =
                    laminate_from_lamination_parameters(h, &m, &shifted(&lp, set, col, step));
                let after = terms(block(&moved, set));
                for row in 0..6 {
                    let fd = (after[row] - before[row]) / step;
                    assert!(
                        (fd - expected[row][col]).abs() <= tol,
                        "set {set} row {row} col {col}: {fd} != {}",
                        expected[row][col]
                    );
                }
            }
        }

        let transverse = |x: Mat2| [x[0][0], x[0][1], x[1][1]];
        let before = transverse(base.atrans);
        for col in 0..2 {
            let mut moved_lp = lp;
            if col == 0 {
                moved_lp.xi_e1 += step;
            } else {
                moved_lp.xi_e2 += step;
            }
            let after = transverse(laminate_from_lamination_parameters(h, &m, &moved_lp).atrans);
            for row in 0..3 {
                let fd = (after[row] - before[row]) / step;
                assert!((fd - grad.grad_atransij[row][col]).abs() <= 1e-6 * m.q44);
            }
        }
    }
}
