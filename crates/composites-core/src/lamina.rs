//! A single ply: material, thickness and orientation.

use crate::material::MatLamina;
use crate::matrix::{Mat2, Mat3, Mat6};
use serde::{Deserialize, Serialize};

/// Composite lamina.
///
/// The rotated stiffnesses `q11l .. q55l` are the plane-stress and
/// transverse shear terms in the laminate coordinate system, filled in by
/// [`Lamina::rebuild`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lamina {
    pub plyid: Option<usize>,
    pub thickness: f64,
    /// Ply angle in degrees.
    pub thetadeg: f64,
    pub matlamina: MatLamina,

    pub q11l: f64,
    pub q12l: f64,
    pub q22l: f64,
    pub q16l: f64,
    pub q26l: f64,
    pub q66l: f64,
    pub q44l: f64,
    pub q45l: f64,
    pub q55l: f64,
}

impl Lamina {
    pub fn new(thickness: f64, thetadeg: f64, matlamina: MatLamina) -> Self {
        let mut ply = Self {
            plyid: None,
            thickness,
            thetadeg,
            matlamina,
            q11l: 0.0,
            q12l: 0.0,
            q22l: 0.0,
            q16l: 0.0,
            q26l: 0.0,
            q66l: 0.0,
            q44l: 0.0,
            q45l: 0.0,
            q55l: 0.0,
        };
        ply.rebuild();
        ply
    }

    /// Recompute the rotated stiffnesses.
    ///
    /// The in-plane terms use the plane-stress reduction of the engineering
    /// constants, also for tri-axial materials.
    pub fn rebuild(&mut self) {
        let m = &self.matlamina;
        let den = 1.0 - m.nu12 * m.nu21;
        let q11 = m.e1 / den;
        let q12 = m.nu12 * m.e2 / den;
        let q22 = m.e2 / den;
        let q44 = m.g23;
        let q55 = m.g13;
        let q66 = m.g12;

        let (sint, cost) = self.thetadeg.to_radians().sin_cos();
        let cos2 = cost.powi(2);
        let cos3 = cost.powi(3);
        let cos4 = cost.powi(4);
        let sin2 = sint.powi(2);
        let sin3 = sint.powi(3);
        let sin4 = sint.powi(4);
        let sincos = sint * cost;

        self.q11l = q11 * cos4 + 2.0 * (q12 + 2.0 * q66) * sin2 * cos2 + q22 * sin4;
        self.q12l = (q11 + q22 - 4.0 * q66) * sin2 * cos2 + q12 * (sin4 + cos4);
        self.q22l = q11 * sin4 + 2.0 * (q12 + 2.0 * q66) * sin2 * cos2 + q22 * cos4;
        self.q16l =
            (q11 - q12 - 2.0 * q66) * sint * cos3 + (q12 - q22 + 2.0 * q66) * sin3 * cost;
        self.q26l =
            (q11 - q12 - 2.0 * q66) * sin3 * cost + (q12 - q22 + 2.0 * q66) * sint * cos3;
        self.q66l = (q11 + q22 - 2.0 * q12 - 2.0 * q66) * sin2 * cos2 + q66 * (sin4 + cos4);
        self.q44l = q44 * cos2 + q55 * sin2;
        self.q45l = (q55 - q44) * sincos;
        self.q55l = q55 * cos2 + q44 * sin2;
    }

    /// Transformation matrix for displacements to the laminate csys (L).
    pub fn get_transf_matrix_displ_to_laminate(&self) -> Mat3 {
        let (sint, cost) = self.thetadeg.to_radians().sin_cos();
        [[cost, sint, 0.0], [-sint, cost, 0.0], [0.0, 0.0, 1.0]]
    }

    /// Rotated constitutive matrix: plane stress in `[0..3]`, transverse
    /// shear `(44, 45, 55)` in `[3..5]`.
    pub fn get_constitutive_matrix(&self) -> [[f64; 5]; 5] {
        [
            [self.q11l, self.q12l, self.q16l, 0.0, 0.0],
            [self.q12l, self.q22l, self.q26l, 0.0, 0.0],
            [self.q16l, self.q26l, self.q66l, 0.0, 0.0],
            [0.0, 0.0, 0.0, self.q44l, self.q45l],
            [0.0, 0.0, 0.0, self.q45l, self.q55l],
        ]
    }

    pub(crate) fn plane_stress_matrix(&self) -> Mat3 {
        [
            [self.q11l, self.q12l, self.q16l],
            [self.q12l, self.q22l, self.q26l],
            [self.q16l, self.q26l, self.q66l],
        ]
    }

    pub(crate) fn transverse_shear_matrix(&self) -> Mat2 {
        [[self.q44l, self.q45l], [self.q45l, self.q55l]]
    }

    /// Transformation matrix for stresses to the lamina csys (R).
    ///
    /// Voigt order `(xx, yy, zz, yz, xz, xy)`.
    pub fn get_transf_matrix_stress_to_lamina(&self) -> Mat6 {
        let (sint, cost) = self.thetadeg.to_radians().sin_cos();
        let (cos2, sin2) = (cost * cost, sint * sint);
        let sin2t = 2.0 * sint * cost;
        let sincos = sint * cost;
        [
            [cos2, sin2, 0.0, 0.0, 0.0, sin2t],
            [sin2, cos2, 0.0, 0.0, 0.0, -sin2t],
            [0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, cost, -sint, 0.0],
            [0.0, 0.0, 0.0, sint, cost, 0.0],
            [-sincos, sincos, 0.0, 0.0, 0.0, cos2 - sin2],
        ]
    }

    /// Transformation matrix for stresses to the laminate csys (T).
    pub fn get_transf_matrix_stress_to_laminate(&self) -> Mat6 {
        let (sint, cost) = self.thetadeg.to_radians().sin_cos();
        let (cos2, sin2) = (cost * cost, sint * sint);
        let sin2t = 2.0 * sint * cost;
        let sincos = sint * cost;
        [
            [cos2, sin2, 0.0, 0.0, 0.0, -sin2t],
            [sin2, cos2, 0.0, 0.0, 0.0, sin2t],
            [0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, cost, sint, 0.0],
            [0.0, 0.0, 0.0, -sint, cost, 0.0],
            [sincos, -sincos, 0.0, 0.0, 0.0, cos2 - sin2],
        ]
    }
}
