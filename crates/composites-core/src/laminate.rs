//! Laminate stiffness: the ABD matrix and its higher-order companions.
//!
//! Classical laminated plate theory (CLPT) and the first-order shear
//! deformation theory (FSDT) use `A`, `B`, `D` and `Atrans`. The third-order
//! theory (TSDT) also needs `E`, `F`, `H`, `Dtrans` and `Ftrans`. The
//! notation follows Reddy, *Mechanics of Laminated Composite Plates and
//! Shells*, 2nd ed., 2004.
//!
//! ```text
//! (A, B, D, E, F, H) = Σ_k Q̄_k ∫ (1, z, z², z³, z⁴, z⁶) dz
//! (Atrans, Dtrans, Ftrans) = Σ_k Q̄s_k ∫ (1, z², z⁴) dz
//! ```
//!
//! with `z` measured from the mid-surface shifted by `offset`.

use crate::error::{CompositesError, Result};
use crate::lamina::Lamina;
use crate::lamination_parameters::LaminationParameters;
use crate::matrix::{Mat2, Mat3, Mat6, Mat8, ZERO2, ZERO3, add_scaled, invert, scaled};
use serde::{Deserialize, Serialize};

/// Equivalent in-plane engineering constants of a laminate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalentProperties {
    pub e1: f64,
    pub e2: f64,
    pub g12: f64,
    pub nu12: f64,
    pub nu21: f64,
}

/// Laminated plate.
///
/// | field                         | description                          |
/// |-------------------------------|--------------------------------------|
/// | `plies`, `stack`              | plies and their angles in degrees    |
/// | `thickness`, `offset`         | total thickness, mid-surface offset  |
/// | `a, b, d, e, f, h`            | in-plane stiffness blocks            |
/// | `atrans, dtrans, ftrans`      | transverse shear blocks `(44, 45, 55)` |
/// | `scf_k13, scf_k23`            | shear correction factors             |
/// | `intrho, intrhoz, intrhoz2`   | mass integrals `∫ρ (1, z, z²) dz`    |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laminate {
    pub plies: Vec<Lamina>,
    pub stack: Vec<f64>,
    pub thickness: f64,
    pub offset: f64,

    pub a: Mat3,
    pub b: Mat3,
    pub d: Mat3,
    pub e: Mat3,
    pub f: Mat3,
    pub h: Mat3,
    pub atrans: Mat2,
    pub dtrans: Mat2,
    pub ftrans: Mat2,

    pub scf_k13: f64,
    pub scf_k23: f64,

    pub intrho: f64,
    pub intrhoz: f64,
    pub intrhoz2: f64,

    pub equivalent: Option<EquivalentProperties>,
}

impl Default for Laminate {
    fn default() -> Self {
        Self {
            plies: Vec::new(),
            stack: Vec::new(),
            thickness: 0.0,
            offset: 0.0,
            a: ZERO3,
            b: ZERO3,
            d: ZERO3,
            e: ZERO3,
            f: ZERO3,
            h: ZERO3,
            atrans: ZERO2,
            dtrans: ZERO2,
            ftrans: ZERO2,
            scf_k13: 5.0 / 6.0,
            scf_k23: 5.0 / 6.0,
            intrho: 0.0,
            intrhoz: 0.0,
            intrhoz2: 0.0,
            equivalent: None,
        }
    }
}

/// `∫ z^(n-1) dz` between `z0` and `z1`.
fn moment(z0: f64, z1: f64, n: i32) -> f64 {
    (z1.powi(n) - z0.powi(n)) / n as f64
}

impl Laminate {
    /// Laminate from already built plies, with the constitutive matrix
    /// calculated.
    pub fn from_plies(plies: Vec<Lamina>, offset: f64) -> Self {
        let mut lam = Self {
            stack: plies.iter().map(|ply| ply.thetadeg).collect(),
            plies,
            offset,
            ..Self::default()
        };
        lam.calc_constitutive_matrix();
        lam
    }

    /// Ply boundaries `(z_k-1, z_k)` from the bottom surface upwards.
    fn ply_bounds(&self) -> impl Iterator<Item = (&Lamina, f64, f64)> {
        let mut z = -self.thickness / 2.0 + self.offset;
        self.plies.iter().map(move |ply| {
            let z0 = z;
            z += ply.thickness;
            (ply, z0, z)
        })
    }

    /// Calculate the laminate constitutive matrices from the plies.
    pub fn calc_constitutive_matrix(&mut self) {
        self.thickness = self.plies.iter().map(|ply| ply.thickness).sum();

        let (mut a, mut b, mut d, mut e, mut f, mut h) = (ZERO3, ZERO3, ZERO3, ZERO3, ZERO3, ZERO3);
        let (mut atrans, mut dtrans, mut ftrans) = (ZERO2, ZERO2, ZERO2);
        let (mut intrho, mut intrhoz, mut intrhoz2) = (0.0, 0.0, 0.0);

        for (ply, z0, z1) in self.ply_bounds() {
            let q = ply.plane_stress_matrix();
            add_scaled(&mut a, &q, moment(z0, z1, 1));
            add_scaled(&mut b, &q, moment(z0, z1, 2));
            add_scaled(&mut d, &q, moment(z0, z1, 3));
            add_scaled(&mut e, &q, moment(z0, z1, 4));
            add_scaled(&mut f, &q, moment(z0, z1, 5));
            add_scaled(&mut h, &q, moment(z0, z1, 7));

            let qs = ply.transverse_shear_matrix();
            add_scaled(&mut atrans, &qs, moment(z0, z1, 1));
            add_scaled(&mut dtrans, &qs, moment(z0, z1, 3));
            add_scaled(&mut ftrans, &qs, moment(z0, z1, 5));

            let rho = ply.matlamina.rho;
            intrho += rho * moment(z0, z1, 1);
            intrhoz += rho * moment(z0, z1, 2);
            intrhoz2 += rho * moment(z0, z1, 3);
        }

        self.a = a;
        self.b = b;
        self.d = d;
        self.e = e;
        self.f = f;
        self.h = h;
        self.atrans = atrans;
        self.dtrans = dtrans;
        self.ftrans = ftrans;
        self.intrho = intrho;
        self.intrhoz = intrhoz;
        self.intrhoz2 = intrhoz2;
        self.equivalent = None;

        tracing::debug!(
            plies = self.plies.len(),
            thickness = self.thickness,
            offset = self.offset,
            "laminate constitutive matrix calculated"
        );
    }

    /// The 6x6 `[[A, B], [B, D]]` matrix.
    #[allow(non_snake_case)]
    pub fn ABD(&self) -> Mat6 {
        let mut out = [[0.0; 6]; 6];
        for i in 0..3 {
            for j in 0..3 {
                out[i][j] = self.a[i][j];
                out[i][j + 3] = self.b[i][j];
                out[i + 3][j] = self.b[i][j];
                out[i + 3][j + 3] = self.d[i][j];
            }
        }
        out
    }

    /// The 8x8 FSDT matrix: ABD plus the `Atrans` block.
    #[allow(non_snake_case)]
    pub fn ABDE(&self) -> Mat8 {
        let abd = self.ABD();
        let mut out = [[0.0; 8]; 8];
        for i in 0..6 {
            out[i][..6].copy_from_slice(&abd[i]);
        }
        for i in 0..2 {
            for j in 0..2 {
                out[i + 6][j + 6] = self.atrans[i][j];
            }
        }
        out
    }

    /// Improved shear correction factors.
    ///
    /// Vlachoutsis, S., "Shear correction factors for plates and shells",
    /// Int. J. Numer. Meth. Engng. 33, 1537-1552, 1992, using one shear
    /// correction factor and assuming constant `G13, G23, E1, E2, nu12,
    /// nu21` within each ply, with `zn1 = offset`.
    ///
    /// Updates `scf_k13` and `scf_k23`.
    pub fn calc_scf(&mut self) -> Result<(f64, f64)> {
        if self.plies.is_empty() {
            return Err(CompositesError::EmptyLaminate);
        }
        let lam_h = self.thickness;
        let offset = self.offset;
        let zbot = -lam_h / 2.0 + offset;

        let (mut d1, mut r1, mut den1) = (0.0, 0.0, 0.0);
        let (mut d2, mut r2, mut den2) = (0.0, 0.0, 0.0);

        for (ply, z1, z2) in self.ply_bounds() {
            let m = &ply.matlamina;
            let (sint, cost) = ply.thetadeg.to_radians().sin_cos();
            let e1 = m.e1 * cost + m.e2 * sint;
            let e2 = m.e2 * cost + m.e1 * sint;
            let nu12 = m.nu12 * cost + m.nu21 * sint;
            let nu21 = m.nu21 * cost + m.nu12 * sint;

            let o = offset;
            let poly = 15.0 * o * z1.powi(4)
                + 30.0 * o * z1.powi(2) * zbot * (2.0 * o - zbot)
                - 15.0 * o * z2.powi(4)
                + 30.0 * o * z2.powi(2) * zbot * (-2.0 * o + zbot)
                - 3.0 * z1.powi(5)
                + 10.0 * z1.powi(3) * (-2.0 * o.powi(2) - 2.0 * o * zbot + zbot.powi(2))
                - 15.0 * z1 * zbot.powi(2) * (4.0 * o.powi(2) - 4.0 * o * zbot + zbot.powi(2))
                + 3.0 * z2.powi(5)
                + 10.0 * z2.powi(3) * (2.0 * o.powi(2) + 2.0 * o * zbot - zbot.powi(2))
                + 15.0 * z2 * zbot.powi(2) * (4.0 * o.powi(2) - 4.0 * o * zbot + zbot.powi(2));
            let dz3 = ((z2 - o).powi(3) - (z1 - o).powi(3)) / 3.0;

            d1 += e1 / (1.0 - nu12 * nu21);
            r1 += d1 * dz3;
            den1 += lam_h * d1.powi(2) * poly / 60.0;

            d2 += e2 / (1.0 - nu12 * nu21);
            r2 += d2 * dz3;
            den2 += lam_h * d2.powi(2) * poly / 60.0;
        }

        self.scf_k13 = r1.powi(2) / den1;
        self.scf_k23 = r2.powi(2) / den2;
        Ok((self.scf_k13, self.scf_k23))
    }

    /// Equivalent laminate moduli from the inverse of the ABD matrix.
    ///
    /// Also stored in `equivalent`.
    pub fn calc_equivalent_properties(&mut self) -> Result<EquivalentProperties> {
        let abd_inv = invert(&self.ABD()).ok_or(CompositesError::SingularMatrix("ABD"))?;
        let (a11, a12, a22, a66) = (abd_inv[0][0], abd_inv[0][1], abd_inv[1][1], abd_inv[2][2]);
        let props = EquivalentProperties {
            e1: 1.0 / (self.thickness * a11),
            e2: 1.0 / (self.thickness * a22),
            g12: 1.0 / (self.thickness * a66),
            nu12: -a12 / a11,
            nu21: -a12 / a22,
        };
        self.equivalent = Some(props);
        Ok(props)
    }

    /// Lamination parameters of the stacking sequence.
    ///
    /// All plies must share one material, the one used to rebuild the
    /// laminate with [`crate::laminate_from_lamination_parameters`].
    pub fn calc_lamination_parameters(&self) -> Result<LaminationParameters> {
        let first = self.plies.first().ok_or(CompositesError::EmptyLaminate)?;
        let lam_h: f64 = self.plies.iter().map(|ply| ply.thickness).sum();

        let mut lp = LaminationParameters::default();
        let mut z = -lam_h / 2.0 + self.offset;
        for (index, ply) in self.plies.iter().enumerate() {
            if !first.matlamina.same_material(&ply.matlamina) {
                return Err(CompositesError::MixedMaterials { ply: index });
            }
            let z0 = z;
            z += ply.thickness;
            let z1 = z;

            let a_fac = (z1 - z0) / lam_h;
            let b_fac = 2.0 / lam_h.powi(2) * (z1.powi(2) - z0.powi(2));
            let d_fac = 4.0 / lam_h.powi(3) * (z1.powi(3) - z0.powi(3));

            let thetarad = ply.thetadeg.to_radians();
            let (sin2t, cos2t) = (2.0 * thetarad).sin_cos();
            let (sin4t, cos4t) = (4.0 * thetarad).sin_cos();

            lp.xi_a1 += a_fac * cos2t;
            lp.xi_a2 += a_fac * sin2t;
            lp.xi_a3 += a_fac * cos4t;
            lp.xi_a4 += a_fac * sin4t;

            lp.xi_b1 += b_fac * cos2t;
            lp.xi_b2 += b_fac * sin2t;
            lp.xi_b3 += b_fac * cos4t;
            lp.xi_b4 += b_fac * sin4t;

            lp.xi_d1 += d_fac * cos2t;
            lp.xi_d2 += d_fac * sin2t;
            lp.xi_d3 += d_fac * cos4t;
            lp.xi_d4 += d_fac * sin4t;

            lp.xi_e1 += a_fac * cos2t;
            lp.xi_e2 += a_fac * sin2t;
        }

        tracing::debug!(?lp, "lamination parameters calculated");
        Ok(lp)
    }

    /// Force a balanced laminate: `A16 = A26 = 0` and `A45 = 0`.
    pub fn make_balanced(&mut self) {
        self.a[0][2] = 0.0;
        self.a[1][2] = 0.0;
        self.a[2][0] = 0.0;
        self.a[2][1] = 0.0;
        self.atrans[0][1] = 0.0;
        self.atrans[1][0] = 0.0;
    }

    /// Force an orthotropic laminate: all 16 and 26 terms and the
    /// transverse 45 terms are set to zero.
    pub fn make_orthotropic(&mut self) -> Result<()> {
        if self.offset != 0.0 {
            return Err(CompositesError::OffsetNotSupported("orthotropic"));
        }
        for m in [
            &mut self.a,
            &mut self.b,
            &mut self.d,
            &mut self.e,
            &mut self.f,
            &mut self.h,
        ] {
            m[0][2] = 0.0;
            m[1][2] = 0.0;
            m[2][0] = 0.0;
            m[2][1] = 0.0;
        }
        for m in [&mut self.atrans, &mut self.dtrans, &mut self.ftrans] {
            m[0][1] = 0.0;
            m[1][0] = 0.0;
        }
        Ok(())
    }

    /// Force a symmetric laminate: the odd moments `B` and `E` vanish.
    pub fn make_symmetric(&mut self) -> Result<()> {
        if self.offset != 0.0 {
            return Err(CompositesError::OffsetNotSupported("symmetric"));
        }
        self.b = ZERO3;
        self.e = ZERO3;
        Ok(())
    }

    /// Homogenize the stiffness through the thickness.
    ///
    /// Every moment is derived from `A` and `Atrans` as if each ply were
    /// smeared over the whole thickness.
    pub fn make_smeared(&mut self) -> Result<()> {
        if self.offset != 0.0 {
            return Err(CompositesError::OffsetNotSupported("smeared"));
        }
        let h = self.thickness;
        self.b = ZERO3;
        self.e = ZERO3;
        self.d = scaled(&self.a, h.powi(2) / 12.0);
        self.f = scaled(&self.a, h.powi(4) / 80.0);
        self.h = scaled(&self.a, h.powi(6) / 448.0);
        self.dtrans = scaled(&self.atrans, h.powi(2) / 12.0);
        self.ftrans = scaled(&self.atrans, h.powi(4) / 80.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::read_laminaprop;

    fn isotropic_ply(thickness: f64, thetadeg: f64) -> Lamina {
        let m = read_laminaprop(&[71e9, 0.28], 2700.0).unwrap();
        Lamina::new(thickness, thetadeg, m)
    }

    fn cross_ply() -> Laminate {
        let m = read_laminaprop(&[142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 3.0e9], 1600.0).unwrap();
        let plies = [0.0, 90.0, 30.0]
            .into_iter()
            .map(|t| Lamina::new(0.25e-3, t, m.clone()))
            .collect();
        Laminate::from_plies(plies, 0.0)
    }

    #[test]
    fn single_ply_moments() {
        let lam = Laminate::from_plies(vec![isotropic_ply(2.0, 0.0)], 0.0);
        let q11 = lam.plies[0].q11l;
        assert_eq!(lam.thickness, 2.0);
        assert!((lam.a[0][0] - 2.0 * q11).abs() < 1e-3);
        assert_eq!(lam.b, ZERO3);
        assert!((lam.d[0][0] - 8.0 / 12.0 * q11).abs() / q11 < 1e-12);
        assert!((lam.f[0][0] - 32.0 / 80.0 * q11).abs() / q11 < 1e-12);
        assert!((lam.h[0][0] - 128.0 / 448.0 * q11).abs() / q11 < 1e-12);
        assert!((lam.intrho - 5400.0).abs() < 1e-9);
        assert!(lam.intrhoz.abs() < 1e-9);
    }

    #[test]
    fn offset_creates_coupling() {
        let lam = Laminate::from_plies(vec![isotropic_ply(1.0, 0.0)], 0.5);
        // z from 0 to 1: B = Q/2
        let q11 = lam.plies[0].q11l;
        assert!((lam.b[0][0] - q11 / 2.0).abs() / q11 < 1e-12);
        assert!((lam.intrhoz - 2700.0 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn abde_layout() {
        let lam = cross_ply();
        let abd = lam.ABD();
        let abde = lam.ABDE();
        assert_eq!(abd[0][3], lam.b[0][0]);
        assert_eq!(abd[5][2], lam.b[2][2]);
        assert_eq!(abd[4][4], lam.d[1][1]);
        assert_eq!(abde[6][6], lam.atrans[0][0]);
        assert_eq!(abde[7][6], lam.atrans[1][0]);
        assert_eq!(abde[6][0], 0.0);
    }

    #[test]
    fn isotropic_equivalent_properties() {
        let mut lam = Laminate::from_plies(vec![isotropic_ply(1e-3, 0.0)], 0.0);
        let props = lam.calc_equivalent_properties().unwrap();
        assert!((props.e1 - 71e9).abs() / 71e9 < 1e-10);
        assert!((props.e2 - 71e9).abs() / 71e9 < 1e-10);
        assert!((props.g12 - 71e9 / 2.56).abs() / 71e9 < 1e-10);
        assert!((props.nu12 - 0.28).abs() < 1e-10);
        assert_eq!(lam.equivalent, Some(props));
    }

    #[test]
    fn empty_laminate_errors() {
        let mut lam = Laminate::default();
        assert!(matches!(
            lam.calc_lamination_parameters(),
            Err(CompositesError::EmptyLaminate)
        ));
        assert!(matches!(lam.calc_scf(), Err(CompositesError::EmptyLaminate)));
        assert!(matches!(
            lam.calc_equivalent_properties(),
            Err(CompositesError::SingularMatrix("ABD"))
        ));
    }

    #[test]
    fn single_isotropic_ply_scf_is_five_sixths() {
        let mut lam = Laminate::from_plies(vec![isotropic_ply(0.125e-3, 0.0)], 0.0);
        let (k13, k23) = lam.calc_scf().unwrap();
        assert!((k13 - 5.0 / 6.0).abs() < 1e-10);
        assert!((k23 - 5.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn mixed_materials_rejected() {
        let m = read_laminaprop(&[142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 3.0e9], 0.0).unwrap();
        let plies = vec![isotropic_ply(1.0, 0.0), Lamina::new(1.0, 0.0, m)];
        let lam = Laminate::from_plies(plies, 0.0);
        assert!(matches!(
            lam.calc_lamination_parameters(),
            Err(CompositesError::MixedMaterials { ply: 1 })
        ));
    }

    #[test]
    fn forcing_with_offset_is_rejected() {
        let mut lam = Laminate::from_plies(vec![isotropic_ply(1.0, 0.0)], 1.0);
        assert!(lam.make_orthotropic().is_err());
        assert!(lam.make_symmetric().is_err());
        assert!(lam.make_smeared().is_err());
        lam.make_balanced();
    }

    #[test]
    fn make_orthotropic_zeroes_coupling_terms() {
        let mut lam = cross_ply();
        assert!(lam.a[0][2].abs() > 0.0);
        lam.make_orthotropic().unwrap();
        for m in [lam.a, lam.b, lam.d, lam.e, lam.f, lam.h] {
            assert_eq!([m[0][2], m[1][2], m[2][0], m[2][1]], [0.0; 4]);
        }
        assert_eq!(lam.dtrans[0][1], 0.0);
    }

    #[test]
    fn make_smeared_homogenizes() {
        let mut lam = cross_ply();
        lam.make_smeared().unwrap();
        let h = lam.thickness;
        assert_eq!(lam.b, ZERO3);
        assert_eq!(lam.e, ZERO3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = h * h / 12.0 * lam.a[i][j];
                assert!((lam.d[i][j] - expected).abs() <= 1e-12 * lam.d[0][0].abs());
            }
        }
    }
}
