//! Laminate summaries shared by the commands.

use composites_core::matrix::{Mat2, Mat3};
use composites_core::{EquivalentProperties, Laminate, LaminationParameters};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct LaminateReport {
    pub thickness: f64,
    pub offset: f64,
    pub stack: Vec<f64>,
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
    pub lamination_parameters: Option<LaminationParameters>,
}

impl LaminateReport {
    /// Summarize a laminate. Equivalent properties and lamination parameters
    /// are omitted when they cannot be calculated.
    pub fn new(lam: &mut Laminate) -> Self {
        let equivalent = lam
            .calc_equivalent_properties()
            .map_err(|e| tracing::warn!("no equivalent properties: {e}"))
            .ok();
        let lamination_parameters = if lam.plies.is_empty() {
            None
        } else {
            lam.calc_lamination_parameters()
                .map_err(|e| tracing::warn!("no lamination parameters: {e}"))
                .ok()
        };
        Self {
            thickness: lam.thickness,
            offset: lam.offset,
            stack: lam.stack.clone(),
            a: lam.a,
            b: lam.b,
            d: lam.d,
            e: lam.e,
            f: lam.f,
            h: lam.h,
            atrans: lam.atrans,
            dtrans: lam.dtrans,
            ftrans: lam.ftrans,
            scf_k13: lam.scf_k13,
            scf_k23: lam.scf_k23,
            intrho: lam.intrho,
            intrhoz: lam.intrhoz,
            intrhoz2: lam.intrhoz2,
            equivalent,
            lamination_parameters,
        }
    }

    pub fn render_text(&self, title: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "  Thickness: {}", self.thickness);
        if self.offset != 0.0 {
            let _ = writeln!(out, "  Offset: {}", self.offset);
        }
        if !self.stack.is_empty() {
            let _ = writeln!(out, "  Stack: {}", format_angles(&self.stack));
        }
        write_matrix(&mut out, "A", &self.a);
        write_matrix(&mut out, "B", &self.b);
        write_matrix(&mut out, "D", &self.d);
        write_matrix(&mut out, "Atrans", &self.atrans);
        let _ = writeln!(
            out,
            "  Shear correction: k13 = {:.6}, k23 = {:.6}",
            self.scf_k13, self.scf_k23
        );
        if self.intrho != 0.0 {
            let _ = writeln!(out, "  Mass per area: {}", self.intrho);
        }
        if let Some(eq) = &self.equivalent {
            let _ = writeln!(
                out,
                "  Equivalent: E1 = {:.6e}, E2 = {:.6e}, G12 = {:.6e}, nu12 = {:.6}, nu21 = {:.6}",
                eq.e1, eq.e2, eq.g12, eq.nu12, eq.nu21
            );
        }
        if let Some(lp) = &self.lamination_parameters {
            out.push_str("  Lamination parameters:\n");
            out.push_str(&render_lamination_parameters(lp, "    "));
        }
        out
    }
}

pub fn format_angles(angles: &[f64]) -> String {
    let items: Vec<String> = angles.iter().map(|t| t.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn write_matrix<const N: usize>(out: &mut String, name: &str, m: &[[f64; N]; N]) {
    let _ = writeln!(out, "  {name}:");
    for row in m {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>14.6e}")).collect();
        let _ = writeln!(out, "    {}", cells.join(" "));
    }
}

pub fn render_lamination_parameters(lp: &LaminationParameters, indent: &str) -> String {
    let mut out = String::new();
    for (name, value) in lp.named() {
        let _ = writeln!(out, "{indent}{name} = {value:.6}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use composites_core::{PlateInput, laminated_plate};

    #[test]
    fn unidirectional_lamination_parameters() {
        let lam = laminated_plate(&PlateInput::new([0.0, 0.0], 0.25, [71e9, 0.33])).unwrap();
        let lp = lam.calc_lamination_parameters().unwrap();
        insta::assert_snapshot!(render_lamination_parameters(&lp, ""), @r"
        xiA1 = 1.000000
        xiA2 = 0.000000
        xiA3 = 1.000000
        xiA4 = 0.000000
        xiB1 = 0.000000
        xiB2 = 0.000000
        xiB3 = 0.000000
        xiB4 = 0.000000
        xiD1 = 1.000000
        xiD2 = 0.000000
        xiD3 = 1.000000
        xiD4 = 0.000000
        xiE1 = 1.000000
        xiE2 = 0.000000
        ");
    }

    #[test]
    fn report_skips_missing_sections() {
        let mut lam = Laminate::default();
        let report = LaminateReport::new(&mut lam);
        assert!(report.equivalent.is_none());
        assert!(report.lamination_parameters.is_none());
        let text = report.render_text("composites test");
        assert!(text.starts_with("composites test\n  Thickness: 0\n"));
        assert!(!text.contains("Stack"));
        assert!(!text.contains("Equivalent"));
    }

    #[test]
    fn report_of_cross_ply() {
        let mut lam = laminated_plate(&PlateInput::new(
            [0.0, 90.0, 90.0, 0.0],
            0.000125,
            [142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 3.0e9],
        ))
        .unwrap();
        let report = LaminateReport::new(&mut lam);
        assert!(report.equivalent.is_some());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stack"], serde_json::json!([0.0, 90.0, 90.0, 0.0]));
        assert_eq!(json["lamination_parameters"]["xiA1"], serde_json::json!(0.0));
        let text = report.render_text("composites plate");
        assert!(text.contains("  Stack: [0, 90, 90, 0]\n"));
        assert!(text.contains("  Atrans:\n"));
    }
}
