//! Test for init_tracing: log lines land in the configured file, parent directories are created.

use tempfile::TempDir;
use tutor_bot::init_tracing;

/// **Test: init_tracing creates the log directory and writes plain-text lines with level and target.**
#[test]
fn test_init_tracing_writes_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/logs/tutor-bot.log");
    let path_str = path.to_str().unwrap();

    init_tracing(path_str, false).unwrap();
    tracing::info!(exchanges = 3, "Session ended");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("INFO"));
    assert!(contents.contains("logger_test"));
    assert!(contents.contains("Session ended exchanges=3"));
    assert!(!contents.contains('\u{1b}'));

    // Global subscriber is already set.
    assert!(init_tracing(path_str, false).is_err());
}
