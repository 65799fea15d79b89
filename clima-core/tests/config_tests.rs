//! Config file round trips on disk.

use clima_core::{Config, LocationMode, model::Coordinates, provider_from_config};

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");

    let cfg = Config::load_from(&path).expect("missing file is not an error");
    assert!(cfg.api_key().is_none());
    assert_eq!(cfg.lang(), "pt_br");
}

#[test]
fn save_creates_directories_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("clima").join("config.toml");

    let mut cfg = Config::default();
    cfg.set_api_key("SECRET".into());
    cfg.lang = Some("en".into());
    cfg.set_fixed_location(Coordinates::new(-23.55, -46.63));

    cfg.save_to(&path).expect("save");
    let loaded = Config::load_from(&path).expect("reload");

    assert_eq!(loaded.api_key(), Some("SECRET"));
    assert_eq!(loaded.lang(), "en");
    assert_eq!(loaded.location.mode, LocationMode::Fixed);
    assert_eq!(loaded.fixed_coordinates(), Some(Coordinates::new(-23.55, -46.63)));
    assert!(provider_from_config(&loaded).is_ok());
}

#[test]
fn invalid_toml_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "api_key = [not toml").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn unknown_location_mode_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[location]\nmode = \"gps\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn saved_file_only_writes_known_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = Config::default();
    cfg.set_api_key("SECRET".into());
    cfg.save_to(&path).expect("save");

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("api_key = \"SECRET\""));
    assert!(written.contains("[location]"));
    assert!(!written.contains("units"));
    assert!(!written.contains("provider"));
}
