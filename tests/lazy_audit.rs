//! Lazy Audit Log Singleton Tests
//!
//! Construction failure, retry and the first-destination-wins policy,
//! observed on a fresh process-wide cell.

use singlet::prelude::*;
use singlet::{read_log, LogLine, Strategy};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn lazy_audit_log_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = temp_dir.path().join("logs");
    let path = log_dir.join("lazy_audit.log");
    let options = AuditOptions::new(&path);

    assert!(LazyAuditLog::get().is_none());
    assert_eq!(LazyAuditLog::strategy(), Strategy::Lazy);

    // ------------------------------------------------------------------
    // First construction fails: destination directory missing
    // ------------------------------------------------------------------
    let err = LazyAuditLog::instance(&options).unwrap_err();
    assert!(matches!(err, Error::Construction { singleton: "lazy-audit-log", .. }));
    assert!(err.is_retryable());
    assert!(LazyAuditLog::get().is_none());
    assert_eq!(LazyAuditLog::failed_attempts(), 1);
    assert_eq!(LazyAuditLog::constructions(), 0);

    // ------------------------------------------------------------------
    // Condition fixed: the next access succeeds
    // ------------------------------------------------------------------
    fs::create_dir(&log_dir).unwrap();
    let first = LazyAuditLog::instance(&options).unwrap();
    assert_eq!(LazyAuditLog::constructions(), 1);
    assert_eq!(read_log(&path).unwrap(), vec![LogLine::Banner]);

    first.record("action 1").unwrap();
    first.record("action 2").unwrap();

    // ------------------------------------------------------------------
    // A different destination is ignored; the first one wins
    // ------------------------------------------------------------------
    let other = temp_dir.path().join("other.log");
    let second = LazyAuditLog::instance(&AuditOptions::new(&other)).unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(second.path(), path.as_path());
    second.record("action 3").unwrap();
    assert!(!other.exists());

    // ...or rejected when the caller asks for that
    let err = LazyAuditLog::instance(
        &AuditOptions::new(&other).on_conflict(ConflictPolicy::Reject),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ConfigConflict { .. }));
    assert!(!other.exists());

    let lines = read_log(&path).unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], LogLine::Banner);
    let entries: Vec<_> = lines[1..]
        .iter()
        .map(|l| match l {
            LogLine::Entry(e) => e.clone(),
            other => panic!("unexpected line {other:?}"),
        })
        .collect();
    assert_eq!(
        entries.iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
        vec!["action 1", "action 2", "action 3"]
    );
    assert!(entries[0].timestamp <= entries[1].timestamp);
    assert!(entries[1].timestamp <= entries[2].timestamp);

    // ------------------------------------------------------------------
    // Concurrent records from many threads
    // ------------------------------------------------------------------
    const NUM_THREADS: usize = 10;
    const RECORDS_PER_THREAD: usize = 30;
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let barrier = Arc::clone(&barrier);
            let options = options.clone();
            thread::spawn(move || {
                barrier.wait();
                let log = LazyAuditLog::instance(&options).unwrap();
                for i in 0..RECORDS_PER_THREAD {
                    log.record(&format!("lazy worker {t} action {i}")).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let lines = read_log(&path).unwrap();
    assert_eq!(lines.len(), 4 + NUM_THREADS * RECORDS_PER_THREAD);
    assert!(lines[1..].iter().all(|l| matches!(l, LogLine::Entry(_))));
    assert_eq!(LazyAuditLog::constructions(), 1);
    assert_eq!(LazyAuditLog::failed_attempts(), 1);
}
