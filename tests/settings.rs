use console_overlay::settings::{Settings, SETTINGS_FILE};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::tempdir;

static TEST_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn missing_file_uses_defaults() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let dir = tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let s = Settings::load(SETTINGS_FILE).unwrap();
    assert_eq!(s.idle_interval_ms, 300);
    assert_eq!(s.active_interval_ms, 40);
    assert_eq!(s.status_refresh(), Duration::from_secs(5));
    assert!(!s.debug_logging);
}

#[test]
fn empty_file_uses_defaults() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let dir = tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    std::fs::write(SETTINGS_FILE, "  \n").unwrap();

    let s = Settings::load(SETTINGS_FILE).unwrap();
    assert_eq!(s.max_messages_per_turn, 8);
}

#[test]
fn partial_file_fills_in_missing_fields() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let dir = tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    std::fs::write(
        SETTINGS_FILE,
        r#"{ "debug_logging": true, "idle_interval_ms": 500, "max_messages_per_turn": 0 }"#,
    )
    .unwrap();

    let s = Settings::load(SETTINGS_FILE).unwrap();
    assert!(s.debug_logging);
    let cadence = s.cadence();
    assert_eq!(cadence.idle_interval, Duration::from_millis(500));
    assert_eq!(cadence.active_interval, Duration::from_millis(40));
    assert_eq!(cadence.max_messages_per_turn, 1);
    assert_eq!(s.notification_mailbox, 4);
}

#[test]
fn malformed_file_is_an_error() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let dir = tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    std::fs::write(SETTINGS_FILE, "{ not json").unwrap();

    assert!(Settings::load(SETTINGS_FILE).is_err());
}

#[test]
fn save_then_load_keeps_values() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let dir = tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let mut s = Settings::default();
    s.log_file = Some("overlay.log".into());
    s.notification_display_secs = 2.5;
    s.save(SETTINGS_FILE).unwrap();

    let loaded = Settings::load(SETTINGS_FILE).unwrap();
    assert_eq!(loaded.log_file.as_deref(), Some("overlay.log"));
    assert_eq!(loaded.notification_display(), Duration::from_millis(2500));
}

#[test]
fn oversized_notification_duration_falls_back_to_default() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let dir = tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    std::fs::write(SETTINGS_FILE, r#"{ "notification_display_secs": 1e30 }"#).unwrap();

    let s = Settings::load(SETTINGS_FILE).unwrap();
    assert_eq!(s.notification_display(), Duration::from_secs(5));

    let negative = Settings {
        notification_display_secs: -3.0,
        ..Settings::default()
    };
    assert_eq!(negative.notification_display(), Duration::ZERO);
}
