use crate::report::LaminateReport;
use crate::support::{load_input_or_exit, or_exit, print_json_or_exit};

pub fn run(input: String, json_output: bool) {
    let file = load_input_or_exit(&input);
    let params = or_exit(file.lamination_parameters());

    let mut lam = or_exit(params.build());
    let mut report = LaminateReport::new(&mut lam);
    report.lamination_parameters = Some(params.lp);

    if json_output {
        print_json_or_exit(&report);
    } else {
        print!("{}", report.render_text("composites from-lp"));
    }
}
