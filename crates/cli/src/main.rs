//! Singlet CLI: drive the process-wide singletons.
//!
//! - `singlet [demo]` - walk through both strategies for both services
//! - `singlet stress -t 8 -n 100` - hammer every singleton and verify
//!
//! The eager audit log is installed before any command runs; if its
//! destination cannot be opened the process exits with status 1.

mod commands;
mod format;
mod parse;
mod run;

use std::process;

use singlet::StartupConfig;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_demo, format_error, format_stress, OutputMode};
use parse::{global_options, matches_to_action, CliAction};
use run::{ensure_parent, run_demo, run_stress};

fn main() {
    let matches = build_cli().get_matches();
    let globals = global_options(&matches);

    init_logging(globals.verbose);

    let output_mode = if globals.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(2);
        }
    };

    // Destination directories are the caller's job, not the core's.
    for path in [&globals.eager.path, &globals.lazy.path] {
        if let Err(e) = ensure_parent(path) {
            eprintln!("(error) cannot create directory for {}: {}", path.display(), e);
            process::exit(1);
        }
    }

    if let Err(e) = singlet::startup(&StartupConfig::new(globals.eager.clone())) {
        tracing::error!(error = %e, "startup failed");
        eprintln!("{}", format_error(&e, output_mode));
        process::exit(1);
    }

    let exit_code = match action {
        CliAction::Demo => match run_demo(&globals) {
            Ok(report) => {
                println!("{}", format_demo(&report, output_mode));
                0
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, output_mode));
                1
            }
        },
        CliAction::Stress { threads, calls } => match run_stress(&globals, threads, calls) {
            Ok(report) => {
                println!("{}", format_stress(&report, output_mode));
                if report.passed() {
                    0
                } else {
                    3
                }
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, output_mode));
                1
            }
        },
    };
    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
