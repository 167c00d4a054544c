//! Demo and stress runs.
//!
//! Both assume `singlet::startup` already installed the eager audit log.

use crate::parse::GlobalOptions;
use serde::Serialize;
use singlet::prelude::*;
use singlet::{read_log, AuditLog, LogLine, SequenceGenerator, Strategy};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::thread;

/// Outcome of the walk-through.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub eager_numbers: Vec<u64>,
    pub lazy_numbers: Vec<u64>,
    pub eager_log: PathBuf,
    pub lazy_log: PathBuf,
    pub records_per_log: usize,
}

/// Three `next()` calls through two separately obtained handles, then
/// three records through two separately obtained log handles, for each
/// strategy.
pub fn run_demo(globals: &GlobalOptions) -> Result<DemoReport> {
    let eager_numbers = three_numbers(EagerSequence::instance, EagerSequence::instance)?;
    let lazy_numbers = three_numbers(LazySequence::instance, LazySequence::instance)?;

    let eager = EagerAuditLog::instance()?;
    eager.record("Eager instance action 1")?;
    eager.record("Eager instance action 2")?;
    EagerAuditLog::instance()?.record("Eager instance action 3")?;

    let lazy = LazyAuditLog::instance(&globals.lazy)?;
    lazy.record("Lazy instance action 1")?;
    lazy.record("Lazy instance action 2")?;
    LazyAuditLog::instance(&globals.lazy)?.record("Lazy instance action 3")?;

    Ok(DemoReport {
        eager_numbers,
        lazy_numbers,
        eager_log: eager.path().to_path_buf(),
        lazy_log: lazy.path().to_path_buf(),
        records_per_log: 3,
    })
}

fn three_numbers(
    first: fn() -> &'static SequenceGenerator,
    second: fn() -> &'static SequenceGenerator,
) -> Result<Vec<u64>> {
    let generator = first();
    let a = generator.next()?;
    let b = generator.next()?;
    let c = second().next()?;
    Ok(vec![a, b, c])
}

/// Verification of one sequence singleton.
#[derive(Debug, Serialize)]
pub struct SequenceCheck {
    pub strategy: String,
    pub values: usize,
    pub first: u64,
    pub last: u64,
    pub contiguous: bool,
    pub per_thread_increasing: bool,
}

impl SequenceCheck {
    pub fn passed(&self) -> bool {
        self.contiguous && self.per_thread_increasing
    }
}

/// Verification of one audit log singleton.
#[derive(Debug, Serialize)]
pub struct AuditCheck {
    pub strategy: String,
    pub path: PathBuf,
    pub expected_lines: usize,
    pub new_lines: usize,
    pub malformed: usize,
    pub distinct_messages: usize,
}

impl AuditCheck {
    pub fn passed(&self) -> bool {
        self.malformed == 0
            && self.new_lines == self.expected_lines
            && self.distinct_messages == self.expected_lines
    }
}

/// Outcome of a stress run.
#[derive(Debug, Serialize)]
pub struct StressReport {
    pub threads: usize,
    pub calls_per_thread: usize,
    pub sequences: Vec<SequenceCheck>,
    pub audit_logs: Vec<AuditCheck>,
}

impl StressReport {
    pub fn passed(&self) -> bool {
        self.sequences.iter().all(SequenceCheck::passed)
            && self.audit_logs.iter().all(AuditCheck::passed)
    }
}

struct WorkerOutput {
    eager: Vec<u64>,
    lazy: Vec<u64>,
}

/// Run every singleton from `threads` threads, `calls` times each.
pub fn run_stress(globals: &GlobalOptions, threads: usize, calls: usize) -> Result<StressReport> {
    let eager_log = EagerAuditLog::instance()?;
    let lazy_log = LazyAuditLog::instance(&globals.lazy)?;

    let eager_before = line_count(eager_log)?;
    let lazy_before = line_count(lazy_log)?;
    let eager_start = EagerSequence::instance().current();
    let lazy_start = LazySequence::instance().current();

    let outputs = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let lazy_options = &globals.lazy;
                s.spawn(move || -> Result<WorkerOutput> {
                    let mut out = WorkerOutput {
                        eager: Vec::with_capacity(calls),
                        lazy: Vec::with_capacity(calls),
                    };
                    for i in 0..calls {
                        out.eager.push(EagerSequence::next()?);
                        out.lazy.push(LazySequence::next()?);
                        EagerAuditLog::record(&format!("stress worker {t} call {i}"))?;
                        LazyAuditLog::instance(lazy_options)?
                            .record(&format!("stress worker {t} call {i}"))?;
                    }
                    Ok(out)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect::<Result<Vec<_>>>()
    })?;

    let expected = threads * calls;
    let sequences = vec![
        check_sequence(
            Strategy::Eager,
            eager_start,
            outputs.iter().map(|o| o.eager.as_slice()),
            expected,
        ),
        check_sequence(
            Strategy::Lazy,
            lazy_start,
            outputs.iter().map(|o| o.lazy.as_slice()),
            expected,
        ),
    ];
    let audit_logs = vec![
        check_audit(Strategy::Eager, eager_log, eager_before, expected)?,
        check_audit(Strategy::Lazy, lazy_log, lazy_before, expected)?,
    ];

    Ok(StressReport {
        threads,
        calls_per_thread: calls,
        sequences,
        audit_logs,
    })
}

fn check_sequence<'a>(
    strategy: Strategy,
    start: u64,
    per_thread: impl Iterator<Item = &'a [u64]>,
    expected: usize,
) -> SequenceCheck {
    let mut all = Vec::with_capacity(expected);
    let mut per_thread_increasing = true;
    for values in per_thread {
        per_thread_increasing &= values.windows(2).all(|w| w[0] < w[1]);
        all.extend_from_slice(values);
    }
    all.sort_unstable();

    let contiguous = all.len() == expected
        && all
            .iter()
            .enumerate()
            .all(|(i, v)| *v == start + 1 + i as u64);

    SequenceCheck {
        strategy: strategy.to_string(),
        values: all.len(),
        first: all.first().copied().unwrap_or(start),
        last: all.last().copied().unwrap_or(start),
        contiguous,
        per_thread_increasing,
    }
}

fn read_destination(log: &AuditLog) -> Result<Vec<LogLine>> {
    read_log(log.path()).map_err(|source| Error::Io {
        path: log.path().to_path_buf(),
        source,
    })
}

fn line_count(log: &AuditLog) -> Result<usize> {
    Ok(read_destination(log)?.len())
}

fn check_audit(
    strategy: Strategy,
    log: &AuditLog,
    before: usize,
    expected: usize,
) -> Result<AuditCheck> {
    let lines = read_destination(log)?;
    let new = lines.get(before..).unwrap_or(&[]);

    let mut malformed = 0;
    let mut messages = HashSet::new();
    for line in new {
        match line {
            LogLine::Entry(entry) => {
                messages.insert(entry.message.as_str());
            }
            LogLine::Banner | LogLine::Malformed(_) => malformed += 1,
        }
    }

    Ok(AuditCheck {
        strategy: strategy.to_string(),
        path: log.path().to_path_buf(),
        expected_lines: expected,
        new_lines: new.len(),
        malformed,
        distinct_messages: messages.len(),
    })
}

/// Create the parent directory of a destination.
pub fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
