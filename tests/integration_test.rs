use anyhow::Result;
use autotyper::config::{Settings, SETTING_KEYS};
use autotyper::sequencer::{Schedule, TypingRequest};
use autotyper::AutoTyperError;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::time::Instant;

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("does-not-exist.json");

    let settings = Settings::load_from(&path);
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_malformed_file_yields_defaults() {
    for contents in ["{not json", "", "[1, 2, 3]", "\"just a string\""] {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();

        let settings = Settings::load_from(temp_file.path());
        assert_eq!(settings, Settings::default(), "contents: {contents:?}");
    }
}

#[test]
fn test_partial_file_overlays_defaults() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(br#"{"font_size": 16}"#)?;

    let settings = Settings::load_from(temp_file.path());
    assert_eq!(settings.font_size, 16);

    let defaults = Settings::default();
    assert_eq!(settings.start_delay, defaults.start_delay);
    assert_eq!(settings.delay, defaults.delay);
    assert_eq!(settings.font, defaults.font);
    assert_eq!(settings.text_color, defaults.text_color);
    assert_eq!(settings.bg_color, defaults.bg_color);
    assert_eq!(settings.always_on_top, defaults.always_on_top);
    Ok(())
}

#[test]
fn test_stored_values_win_over_defaults() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(
        br##"{
        "start_delay": 1.5,
        "delay": 0.05,
        "font": "Consolas",
        "font_size": 14,
        "text_color": "#ff0000",
        "bg_color": "#1e1e1e",
        "always_on_top": true,
        "not_a_setting": "ignored"
    }"##,
    )?;

    let settings = Settings::load_from(temp_file.path());
    assert_eq!(settings.start_delay, 1.5);
    assert_eq!(settings.delay, 0.05);
    assert_eq!(settings.font, "Consolas");
    assert_eq!(settings.font_size, 14);
    assert_eq!(settings.text_color, "#ff0000");
    assert_eq!(settings.bg_color, "#1e1e1e");
    assert!(settings.always_on_top);
    Ok(())
}

#[test]
fn test_save_load_roundtrip() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("settings.json");

    let mut original = Settings::default();
    original.set("start_delay", "2.5")?;
    original.set("delay", "0.02")?;
    original.set("font", "JetBrains Mono")?;
    original.set("font_size", "18")?;
    original.set("text_color", "#c0ffee")?;
    original.set("bg_color", "#101010")?;
    original.set("always_on_top", "true")?;

    original.save_to(&path)?;
    let loaded = Settings::load_from(&path);

    assert_eq!(loaded, original);
    Ok(())
}

#[test]
fn test_save_rewrites_all_keys() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("settings.json");

    Settings::default().save_to(&path)?;
    let contents = std::fs::read_to_string(&path)?;
    for key in SETTING_KEYS {
        assert!(contents.contains(key), "missing key {key}");
    }
    Ok(())
}

#[test]
fn test_save_failure_reports_path_and_keeps_memory() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    // A path whose parent is a regular file cannot be written.
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"file")?;
    let path = blocker.join("settings.json");

    let mut settings = Settings::default();
    settings.set("font_size", "20")?;

    let err = settings.save_to(&path).unwrap_err();
    assert!(matches!(err, AutoTyperError::SettingsSave { .. }));
    assert!(err.to_string().contains("settings.json"));

    // The failed write does not roll the value back.
    assert_eq!(settings.font_size, 20);
    Ok(())
}

#[test]
fn test_editing_surface_validation() {
    let mut settings = Settings::default();

    assert!(settings.set("start_delay", "abc").is_err());
    assert!(settings.set("start_delay", "0.9").is_err());
    assert!(settings.set("delay", "0.11").is_err());
    assert!(settings.set("font_size", "7").is_err());
    assert!(settings.set("text_color", "blue").is_err());
    assert!(settings.set("always_on_top", "maybe").is_err());
    assert!(matches!(
        settings.set("no_such_key", "1"),
        Err(AutoTyperError::UnknownSetting { .. })
    ));

    // Nothing above may have modified the record.
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_set_rounding_matches_editor() -> Result<()> {
    let mut settings = Settings::default();
    settings.set("start_delay", "4.96")?;
    assert_eq!(settings.start_delay, 5.0);
    settings.set("delay", "0.09949")?;
    assert_eq!(settings.delay, 0.099);
    Ok(())
}

#[test]
fn test_empty_request_never_schedules() {
    let settings = Settings::default();
    for text in ["", "   ", "\t\n "] {
        assert!(matches!(
            TypingRequest::new(text, &settings),
            Err(AutoTyperError::EmptyText)
        ));
    }
}

#[test]
fn test_schedule_hello_scenario() -> Result<()> {
    let mut settings = Settings::default();
    settings.set("start_delay", "3.0")?;
    settings.set("delay", "0.02")?;

    let request = TypingRequest::new("hello", &settings)?;
    let now = Instant::now();
    let schedule = Schedule::compute(&request, now);

    assert_eq!(schedule.inject_at - now, Duration::from_secs(3));
    assert_eq!(schedule.complete_at - now, Duration::from_millis(3100));
    Ok(())
}

#[test]
fn test_schedule_gap_property() -> Result<()> {
    let mut settings = Settings::default();
    settings.set("start_delay", "1.0")?;
    settings.set("delay", "0.037")?;

    for text in ["a", "hello world", "ümläute änd émojis 🎉", "  padded  "] {
        let request = TypingRequest::new(text, &settings)?;
        let schedule = Schedule::compute(&request, Instant::now());
        assert_eq!(
            schedule.complete_at - schedule.inject_at,
            request.char_delay * request.char_count(),
            "text: {text:?}"
        );
    }
    Ok(())
}

#[test]
fn test_request_copies_delays_from_settings() -> Result<()> {
    let mut settings = Settings::default();
    settings.set("start_delay", "2.0")?;
    settings.set("delay", "0.05")?;

    let request = TypingRequest::new("snapshot", &settings)?;

    // Later edits must not affect a request already issued.
    settings.set("start_delay", "5.0")?;
    settings.set("delay", "0.0")?;

    assert_eq!(request.start_delay, Duration::from_secs(2));
    assert_eq!(request.char_delay, Duration::from_millis(50));
    Ok(())
}
