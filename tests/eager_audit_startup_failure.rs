//! Eager Audit Log Startup Failure Tests
//!
//! An unwritable destination fails `startup` with a construction error
//! and leaves the eager log uninstalled.

use singlet::prelude::*;

#[test]
fn startup_fails_for_missing_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("missing").join("audit.log");

    let err = singlet::startup(&StartupConfig::new(AuditOptions::new(&path))).unwrap_err();
    match &err {
        Error::Construction { singleton, source } => {
            assert_eq!(*singleton, "eager-audit-log");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Construction, got {other:?}"),
    }
    assert_eq!(err.code(), "Construction");

    assert!(matches!(
        EagerAuditLog::instance(),
        Err(Error::NotPreloaded("eager-audit-log"))
    ));
    assert!(!path.exists());
}
