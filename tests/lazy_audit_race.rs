//! Lazy Audit Log Construction Race
//!
//! Many threads hit an uninitialized lazy audit log at once. Exactly one
//! construction happens, so the destination holds exactly one banner.

use singlet::prelude::*;
use singlet::{read_log, LogLine};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn racing_first_access_constructs_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("raced.log");

    const NUM_THREADS: usize = 24;
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let barrier = Arc::clone(&barrier);
            // Every thread proposes its own destination; only one may win
            let own = temp_dir.path().join(format!("raced_{t}.log"));
            let options = if t == 0 {
                AuditOptions::new(&path)
            } else {
                AuditOptions::new(own)
            };
            thread::spawn(move || {
                barrier.wait();
                let log = LazyAuditLog::instance(&options).unwrap();
                log.record(&format!("hello from {t}")).unwrap();
                log as *const _ as usize
            })
        })
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(LazyAuditLog::constructions(), 1);

    let winner = LazyAuditLog::get().unwrap().path().to_path_buf();
    let lines = read_log(&winner).unwrap();
    assert_eq!(lines.iter().filter(|l| **l == LogLine::Banner).count(), 1);
    assert_eq!(lines.len(), 1 + NUM_THREADS);

    // Losing destinations were never opened
    let files = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(files, 1);
}
