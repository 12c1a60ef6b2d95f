//! File logging runs in its own test binary, the global subscriber can only
//! be installed once per process.

use shopdash_common::{init_logging, LoggingConfig};

#[test]
fn test_file_logging_flushes_on_guard_drop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("shopdash.log");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let guard = init_logging(LoggingConfig {
        level: "info".to_string(),
        file_path: Some(path.display().to_string()),
        ..LoggingConfig::default()
    })
    .unwrap();
    tracing::info!("dashboard run started");
    drop(guard);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("dashboard run started"));

    // A second subscriber cannot be installed.
    assert!(init_logging(LoggingConfig::default()).is_err());
}
