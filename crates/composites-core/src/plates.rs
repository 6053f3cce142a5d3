//! Convenience constructors for laminated and isotropic plates.

use crate::error::{CompositesError, Result};
use crate::lamina::Lamina;
use crate::laminate::Laminate;
use crate::lamination_parameters::{LaminationParameters, laminate_from_lamination_parameters};
use crate::material::read_laminaprop;
use serde::{Deserialize, Serialize};

/// Stacking sequence input for [`laminated_plate`].
///
/// `plyt` or `plyts` must be supplied, and `laminaprop` or `laminaprops`.
/// The per-ply lists take precedence and must have one entry per ply.
///
/// For orthotropic plies `laminaprop = (E11, E22, nu12, G12, G13, G23)`; for
/// isotropic plies `laminaprop = (E, nu)`. See [`read_laminaprop`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlateInput {
    /// Ply angles in degrees, bottom to top.
    pub stack: Vec<f64>,
    #[serde(default)]
    pub plyt: Option<f64>,
    #[serde(default)]
    pub plyts: Option<Vec<f64>>,
    #[serde(default)]
    pub laminaprop: Option<Vec<f64>>,
    #[serde(default)]
    pub laminaprops: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub rho: f64,
    #[serde(default)]
    pub rhos: Option<Vec<f64>>,
    #[serde(default)]
    pub offset: f64,
    #[serde(default = "default_calc_scf")]
    pub calc_scf: bool,
}

fn default_calc_scf() -> bool {
    true
}

impl PlateInput {
    /// Uniform ply thickness and material.
    pub fn new(stack: impl Into<Vec<f64>>, plyt: f64, laminaprop: impl Into<Vec<f64>>) -> Self {
        Self {
            stack: stack.into(),
            plyt: Some(plyt),
            plyts: None,
            laminaprop: Some(laminaprop.into()),
            laminaprops: None,
            rho: 0.0,
            rhos: None,
            offset: 0.0,
            calc_scf: true,
        }
    }
}

/// Expand a uniform value or validate a per-ply list.
fn per_ply<T: Clone>(
    field: &'static str,
    list: Option<&Vec<T>>,
    uniform: Option<&T>,
    plies: usize,
) -> Result<Vec<T>> {
    match (list, uniform) {
        (Some(list), _) if list.len() != plies => Err(CompositesError::LengthMismatch {
            field,
            expected: plies,
            actual: list.len(),
        }),
        (Some(list), _) => Ok(list.clone()),
        (None, Some(value)) => Ok(vec![value.clone(); plies]),
        (None, None) => Err(CompositesError::MissingInput(field)),
    }
}

/// Build a [`Laminate`] from a stacking sequence.
///
/// The constitutive matrix is calculated and, when `calc_scf` is set, the
/// improved shear correction factors replace the default 5/6.
pub fn laminated_plate(input: &PlateInput) -> Result<Laminate> {
    let n = input.stack.len();
    let plyts = per_ply("plyt or plyts", input.plyts.as_ref(), input.plyt.as_ref(), n)?;
    let laminaprops = per_ply(
        "laminaprop or laminaprops",
        input.laminaprops.as_ref(),
        input.laminaprop.as_ref(),
        n,
    )?;
    let rhos = per_ply("rhos", input.rhos.as_ref(), Some(&input.rho), n)?;

    let mut plies = Vec::with_capacity(n);
    for (index, (((thetadeg, plyt), laminaprop), rho)) in input
        .stack
        .iter()
        .zip(plyts)
        .zip(laminaprops.iter())
        .zip(rhos)
        .enumerate()
    {
        if !(plyt > 0.0 && plyt.is_finite()) {
            return Err(CompositesError::InvalidInput(format!(
                "ply {index} has invalid thickness {plyt}"
            )));
        }
        let matlamina = read_laminaprop(laminaprop, rho)?;
        let mut ply = Lamina::new(plyt, *thetadeg, matlamina);
        ply.plyid = Some(index);
        plies.push(ply);
    }

    let mut lam = Laminate::from_plies(plies, input.offset);
    if input.calc_scf && !lam.plies.is_empty() {
        lam.calc_scf()?;
    }
    tracing::debug!(
        stack = ?input.stack,
        thickness = lam.thickness,
        scf_k13 = lam.scf_k13,
        scf_k23 = lam.scf_k23,
        "laminated plate built"
    );
    Ok(lam)
}

/// Isotropic plate as a single 0 degree ply with `laminaprop = (E, nu)`.
///
/// With a non-zero `offset` the plate shows extension-bending coupling.
pub fn isotropic_plate(
    thickness: f64,
    e: f64,
    nu: f64,
    offset: f64,
    calc_scf: bool,
    rho: f64,
) -> Result<Laminate> {
    laminated_plate(&PlateInput {
        rho,
        offset,
        calc_scf,
        ..PlateInput::new([0.0], thickness, [e, nu])
    })
}

/// Homogenized `[±a1, ±a2, ..., ±an]` laminate.
///
/// In the limit of many repetitions `B = 0` and `D = h²/12 A`, the
/// principle of homogenization used for double-double laminates.
pub fn n_double_plate(
    thickness: f64,
    anglesdeg: &[f64],
    laminaprop: &[f64],
    rho: f64,
) -> Result<Laminate> {
    if anglesdeg.is_empty() {
        return Err(CompositesError::MissingInput("angles"));
    }
    let matlamina = read_laminaprop(laminaprop, rho)?;

    let n = anglesdeg.len() as f64;
    let mean = |f: fn(f64) -> f64| anglesdeg.iter().map(|t| f(t.to_radians())).sum::<f64>() / n;
    let cos2 = mean(|t| (2.0 * t).cos());
    let cos4 = mean(|t| (4.0 * t).cos());

    let lp = LaminationParameters {
        xi_a1: cos2,
        xi_a3: cos4,
        xi_d1: cos2,
        xi_d3: cos4,
        xi_e1: cos2,
        ..LaminationParameters::default()
    };
    let mut lam = laminate_from_lamination_parameters(thickness, &matlamina, &lp);
    lam.stack = anglesdeg.iter().flat_map(|&t| [t, -t]).collect();
    lam.make_smeared()?;

    tracing::debug!(
        angles = ?anglesdeg,
        trace = matlamina.trace(),
        "homogenized n-double plate built"
    );
    Ok(lam)
}

/// Double-double laminate `[±phi, ±psi]`.
///
/// Shrivastava, Sharma, Tsai and Mohite, "D and DD-drop layup optimization
/// of aircraft wing panels under multi-load case design environment",
/// Compos. Struct. 248, 2020.
pub fn double_double_plate(
    thickness: f64,
    phideg: f64,
    psideg: f64,
    laminaprop: &[f64],
    rho: f64,
) -> Result<Laminate> {
    n_double_plate(thickness, &[phideg, psideg], laminaprop, rho)
}
