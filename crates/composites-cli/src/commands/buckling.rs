use crate::config::{InputFile, PanelInput};
use crate::support::{exit_with, load_input_or_exit, or_exit, print_json_or_exit};
use composites_core::kassapoglou::{
    calc_beff, calc_nxx_crit, calc_nxx_crit_combined_shear, calc_nxx_crit_combined_shear_full,
    calc_nxy_crit,
};
use composites_core::{BendingStiffness, Laminate, NewtonOptions, laminated_plate};
use serde::Serialize;

pub struct Args {
    pub input: String,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub k: Option<f64>,
    pub px: Option<f64>,
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BucklingReport {
    pub a: f64,
    pub b: f64,
    pub k: f64,
    pub stiffness: BendingStiffness,
    pub nxx_crit: f64,
    /// Absent when the shear solution did not converge.
    pub nxy_crit: Option<f64>,
    pub nxx_crit_combined_shear: f64,
    pub nxx_crit_combined_shear_full: f64,
    /// Present when an applied force above the critical force is given.
    pub beff: Option<f64>,
}

/// Flag values take precedence over the `[panel]` table.
fn resolve_panel(panel: Option<PanelInput>, args: &Args) -> Result<(f64, f64, f64), String> {
    let panel = panel.unwrap_or_default();
    let a = args
        .a
        .or(panel.a)
        .ok_or("panel length missing: use --a or [panel].a")?;
    let b = args
        .b
        .or(panel.b)
        .ok_or("panel width missing: use --b or [panel].b")?;
    let k = args.k.or(panel.k).unwrap_or(0.0);
    Ok((a, b, k))
}

fn build_laminate(file: &InputFile) -> Result<Laminate, String> {
    match (&file.plate, &file.lamination_parameters) {
        (Some(plate), _) => laminated_plate(plate).map_err(|e| e.to_string()),
        (None, Some(params)) => params.build().map_err(|e| e.to_string()),
        (None, None) => Err("input file needs a [plate] or [lamination_parameters] table".into()),
    }
}

pub fn buckling_report(
    lam: &Laminate,
    a: f64,
    b: f64,
    k: f64,
    px: Option<f64>,
) -> composites_core::Result<BucklingReport> {
    buckling_report_with(lam, a, b, k, px, &NewtonOptions::default())
}

fn buckling_report_with(
    lam: &Laminate,
    a: f64,
    b: f64,
    k: f64,
    px: Option<f64>,
    newton: &NewtonOptions,
) -> composites_core::Result<BucklingReport> {
    let stiffness = BendingStiffness::from(lam);
    let nxx_crit = calc_nxx_crit(a, b, None, Some(1), &stiffness)?;
    let nxy_crit = match calc_nxy_crit(a, &stiffness, newton) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "shear buckling load not calculated");
            None
        }
    };
    let nxx_crit_combined_shear = calc_nxx_crit_combined_shear(k, a, b, &stiffness);
    let nxx_crit_combined_shear_full = calc_nxx_crit_combined_shear_full(k, a, b, &stiffness);

    let pcr = nxx_crit * b;
    let beff = px.filter(|&px| px > pcr).map(|px| {
        calc_beff(b, px, pcr, lam.a[0][0], lam.a[0][1], lam.a[1][1])
    });
    tracing::debug!(nxx_crit, ?nxy_crit, ?beff, "buckling loads calculated");

    Ok(BucklingReport {
        a,
        b,
        k,
        stiffness,
        nxx_crit,
        nxy_crit,
        nxx_crit_combined_shear,
        nxx_crit_combined_shear_full,
        beff,
    })
}

pub fn run(args: Args) {
    let file = load_input_or_exit(&args.input);
    let (a, b, k) = resolve_panel(file.panel, &args).unwrap_or_else(|e| exit_with(e));
    let lam = or_exit(build_laminate(&file));
    let report = or_exit(buckling_report(&lam, a, b, k, args.px));

    if args.json {
        print_json_or_exit(&report);
        return;
    }

    println!("composites buckling {}", args.input);
    println!("  Panel: a = {a}, b = {b}");
    println!("  Nxx critical (compression): {:.6e}", report.nxx_crit);
    match report.nxy_crit {
        Some(nxy_crit) => println!("  Nxy critical (shear): {nxy_crit:.6e}"),
        None => println!("  Nxy critical (shear): not converged"),
    }
    println!("  Combined loading with Nxy = {k} Nxx:");
    println!("    Nxx critical: {:.6e}", report.nxx_crit_combined_shear);
    println!(
        "    Nxx critical (with D16, D26): {:.6e}",
        report.nxx_crit_combined_shear_full
    );
    match (args.px, report.beff) {
        (Some(_), Some(beff)) => println!("  Effective width: {beff:.6e}"),
        (Some(px), None) => println!("  Effective width: not buckled at Px = {px}"),
        (None, _) => {}
    }
}
