//! Composites CLI: the `composites` command.

mod cli;
mod commands;
mod config;
mod report;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("COMPOSITES_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Plate { input, force, json } => commands::plate::run(input, force, json),

        Commands::Isotropic {
            thickness,
            e,
            nu,
            offset,
            rho,
            no_scf,
            json,
        } => commands::isotropic::run(commands::isotropic::Args {
            thickness,
            e,
            nu,
            offset,
            rho,
            calc_scf: !no_scf,
            json,
        }),

        Commands::Lp { input, force, json } => commands::lp::run(input, force, json),

        Commands::FromLp { input, json } => commands::from_lp::run(input, json),

        Commands::DoubleDouble {
            thickness,
            phi,
            psi,
            laminaprop,
            rho,
            json,
        } => commands::double_double::run(commands::double_double::Args {
            thickness,
            phi,
            psi,
            laminaprop,
            rho,
            json,
        }),

        Commands::Buckling {
            input,
            a,
            b,
            k,
            px,
            json,
        } => commands::buckling::run(commands::buckling::Args {
            input,
            a,
            b,
            k,
            px,
            json,
        }),
    }
}
