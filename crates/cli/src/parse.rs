//! ArgMatches → CliAction conversion.

use clap::ArgMatches;
use singlet::{AuditOptions, DurabilityMode};
use std::path::PathBuf;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Sequential walk-through of both strategies
    Demo,
    /// Concurrent verification run
    Stress {
        /// Worker threads
        threads: usize,
        /// Calls per thread per singleton
        calls: usize,
    },
}

/// Settings shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub eager: AuditOptions,
    pub lazy: AuditOptions,
    pub json: bool,
    pub verbose: bool,
}

/// Read the global flags.
pub fn global_options(matches: &ArgMatches) -> GlobalOptions {
    let durability = if matches.get_flag("strict") {
        DurabilityMode::Strict
    } else {
        DurabilityMode::Flush
    };
    let path = |name: &str| {
        matches
            .get_one::<String>(name)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{}.log", name.replace('-', "_"))))
    };

    GlobalOptions {
        eager: AuditOptions::new(path("eager-log")).durability(durability),
        lazy: AuditOptions::new(path("lazy-log")).durability(durability),
        json: matches.get_flag("json"),
        verbose: matches.get_flag("verbose"),
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    match matches.subcommand() {
        None | Some(("demo", _)) => Ok(CliAction::Demo),
        Some(("stress", sub)) => {
            let threads = sub.get_one::<usize>("threads").copied().unwrap_or(8);
            let calls = sub.get_one::<usize>("calls").copied().unwrap_or(100);
            if threads == 0 {
                return Err("--threads must be at least 1".to_string());
            }
            Ok(CliAction::Stress { threads, calls })
        }
        Some((other, _)) => Err(format!("Unknown command: {}", other)),
    }
}
