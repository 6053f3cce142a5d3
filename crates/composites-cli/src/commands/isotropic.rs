use crate::report::LaminateReport;
use crate::support::{or_exit, print_json_or_exit};
use composites_core::isotropic_plate;

pub struct Args {
    pub thickness: f64,
    pub e: f64,
    pub nu: f64,
    pub offset: f64,
    pub rho: f64,
    pub calc_scf: bool,
    pub json: bool,
}

pub fn run(args: Args) {
    let mut lam = or_exit(isotropic_plate(
        args.thickness,
        args.e,
        args.nu,
        args.offset,
        args.calc_scf,
        args.rho,
    ));
    let report = LaminateReport::new(&mut lam);

    if args.json {
        print_json_or_exit(&report);
    } else {
        print!("{}", report.render_text("composites isotropic"));
    }
}
