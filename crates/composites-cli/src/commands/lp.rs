use crate::cli::LpForce;
use crate::report::render_lamination_parameters;
use crate::support::{load_input_or_exit, or_exit, print_json_or_exit};
use composites_core::LaminationParameters;
use composites_core::lamination_parameters::{
    make_balanced_lp, make_orthotropic_lp, make_symmetric_lp,
};
use composites_core::laminated_plate;

pub fn apply_forces(lp: &mut LaminationParameters, forces: &[LpForce]) {
    for force in forces {
        match force {
            LpForce::Balanced => make_balanced_lp(lp),
            LpForce::Orthotropic => make_orthotropic_lp(lp),
            LpForce::Symmetric => make_symmetric_lp(lp),
        }
    }
}

pub fn run(input: String, force: Vec<LpForce>, json_output: bool) {
    let file = load_input_or_exit(&input);
    let plate = or_exit(file.plate());

    let lam = or_exit(laminated_plate(plate));
    let mut lp = or_exit(lam.calc_lamination_parameters());
    apply_forces(&mut lp, &force);

    if json_output {
        print_json_or_exit(&lp);
    } else {
        println!("composites lp {input}");
        print!("{}", render_lamination_parameters(&lp, "  "));
    }
}
