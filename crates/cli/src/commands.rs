//! clap command tree.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the `singlet` command.
pub fn build_cli() -> Command {
    Command::new("singlet")
        .about("Drive the process-wide sequence generator and audit log singletons")
        .arg(
            Arg::new("eager-log")
                .long("eager-log")
                .value_name("PATH")
                .default_value("eager_audit.log")
                .global(true)
                .help("Destination of the eager audit log"),
        )
        .arg(
            Arg::new("lazy-log")
                .long("lazy-log")
                .value_name("PATH")
                .default_value("lazy_audit.log")
                .global(true)
                .help("Destination of the lazy audit log"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("fsync every audit append"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print results as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log every construction and mutation"),
        )
        .subcommand(
            Command::new("demo").about("Walk through both strategies for both services"),
        )
        .subcommand(
            Command::new("stress")
                .about("Hammer every singleton from many threads and verify the results")
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .value_parser(value_parser!(usize))
                        .default_value("8"),
                )
                .arg(
                    Arg::new("calls")
                        .short('n')
                        .long("calls")
                        .value_parser(value_parser!(usize))
                        .default_value("100")
                        .help("Calls per thread per singleton"),
                ),
        )
}
