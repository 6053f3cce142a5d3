use crate::cli::LaminateForce;
use crate::report::LaminateReport;
use crate::support::{load_input_or_exit, or_exit, print_json_or_exit};
use composites_core::{Laminate, Result, laminated_plate};

pub fn apply_forces(lam: &mut Laminate, forces: &[LaminateForce]) -> Result<()> {
    for force in forces {
        match force {
            LaminateForce::Balanced => lam.make_balanced(),
            LaminateForce::Orthotropic => lam.make_orthotropic()?,
            LaminateForce::Symmetric => lam.make_symmetric()?,
            LaminateForce::Smeared => lam.make_smeared()?,
        }
        tracing::debug!(?force, "laminate property forced");
    }
    Ok(())
}

pub fn run(input: String, force: Vec<LaminateForce>, json_output: bool) {
    let file = load_input_or_exit(&input);
    let plate = or_exit(file.plate());

    let mut lam = or_exit(laminated_plate(plate));
    or_exit(apply_forces(&mut lam, &force));
    let report = LaminateReport::new(&mut lam);

    if json_output {
        print_json_or_exit(&report);
    } else {
        print!("{}", report.render_text("composites plate"));
    }
}
