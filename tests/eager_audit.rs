//! Eager Audit Log Singleton Tests
//!
//! The eager audit log is installed by `startup`. Everything runs in one
//! test function so the before/after-startup states are observable.

use singlet::prelude::*;
use singlet::{read_log, LogLine, Strategy};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

fn entry_messages(lines: &[LogLine]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| match l {
            LogLine::Entry(e) => Some(e.message.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn eager_audit_log_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("eager_audit.log");
    assert_eq!(EagerAuditLog::strategy(), Strategy::Eager);

    // ------------------------------------------------------------------
    // Before startup
    // ------------------------------------------------------------------
    assert!(matches!(
        EagerAuditLog::instance(),
        Err(Error::NotPreloaded(_))
    ));
    let err = EagerAuditLog::record("too early").unwrap_err();
    assert!(err.is_fatal());
    assert!(!path.exists());

    // ------------------------------------------------------------------
    // Startup installs the log and writes the banner
    // ------------------------------------------------------------------
    singlet::startup(&StartupConfig::new(AuditOptions::new(&path))).unwrap();
    assert_eq!(read_log(&path).unwrap(), vec![LogLine::Banner]);

    // A second startup with the same destination is a no-op
    let installed = EagerAuditLog::instance().unwrap();
    singlet::startup(&StartupConfig::new(AuditOptions::new(&path))).unwrap();
    assert!(std::ptr::eq(
        installed,
        EagerAuditLog::preload(AuditOptions::new(&path)).unwrap()
    ));
    assert_eq!(read_log(&path).unwrap(), vec![LogLine::Banner]);

    // A different destination is ignored; the first one wins
    let other = temp_dir.path().join("other.log");
    singlet::startup(&StartupConfig::new(AuditOptions::new(&other))).unwrap();
    let again = EagerAuditLog::preload(AuditOptions::new(&other)).unwrap();
    assert!(std::ptr::eq(installed, again));
    assert_eq!(again.path(), path.as_path());
    assert!(!other.exists());

    // ...or rejected when the caller asks for that
    let err = EagerAuditLog::preload(
        AuditOptions::new(&other).on_conflict(ConflictPolicy::Reject),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ConfigConflict { .. }));
    assert!(!other.exists());
    assert_eq!(read_log(&path).unwrap(), vec![LogLine::Banner]);

    // ------------------------------------------------------------------
    // Sequential records through separately obtained handles
    // ------------------------------------------------------------------
    let first = EagerAuditLog::instance().unwrap();
    first.record("action 1").unwrap();
    first.record("action 2").unwrap();
    let second = EagerAuditLog::instance().unwrap();
    second.record("action 3").unwrap();
    assert!(std::ptr::eq(first, second));

    let lines = read_log(&path).unwrap();
    assert_eq!(lines[0], LogLine::Banner);
    assert_eq!(entry_messages(&lines), vec!["action 1", "action 2", "action 3"]);
    let stamps: Vec<_> = lines
        .iter()
        .filter_map(|l| match l {
            LogLine::Entry(e) => Some(e.timestamp),
            _ => None,
        })
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));

    // ------------------------------------------------------------------
    // Concurrent records: N intact lines, one banner
    // ------------------------------------------------------------------
    const NUM_THREADS: usize = 12;
    const RECORDS_PER_THREAD: usize = 25;
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..RECORDS_PER_THREAD {
                    EagerAuditLog::record(&format!("worker {t} action {i}")).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let lines = read_log(&path).unwrap();
    assert_eq!(lines.len(), 1 + 3 + NUM_THREADS * RECORDS_PER_THREAD);
    assert_eq!(lines.iter().filter(|l| **l == LogLine::Banner).count(), 1);
    assert!(!lines.iter().any(|l| matches!(l, LogLine::Malformed(_))));

    let messages = entry_messages(&lines);
    for t in 0..NUM_THREADS {
        for i in 0..RECORDS_PER_THREAD {
            let expected = format!("worker {t} action {i}");
            assert_eq!(messages.iter().filter(|m| **m == expected).count(), 1);
        }
    }
    assert_eq!(
        EagerAuditLog::instance().unwrap().records_written(),
        (3 + NUM_THREADS * RECORDS_PER_THREAD) as u64
    );

    // Raw file ends with a newline and nothing after it
    assert!(fs::read_to_string(&path).unwrap().ends_with('\n'));
}
