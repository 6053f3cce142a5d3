use crate::report::LaminateReport;
use crate::support::{or_exit, print_json_or_exit};
use composites_core::double_double_plate;

pub struct Args {
    pub thickness: f64,
    pub phi: f64,
    pub psi: f64,
    pub laminaprop: Vec<f64>,
    pub rho: f64,
    pub json: bool,
}

pub fn run(args: Args) {
    let mut lam = or_exit(double_double_plate(
        args.thickness,
        args.phi,
        args.psi,
        &args.laminaprop,
        args.rho,
    ));
    let report = LaminateReport::new(&mut lam);

    if args.json {
        print_json_or_exit(&report);
    } else {
        let title = format!("composites double-double [±{}, ±{}]", args.phi, args.psi);
        print!("{}", report.render_text(&title));
    }
}
