use std::path::PathBuf;

use tempfile::TempDir;
use wallkit_settings::{Config, ConfigError, SettingsError};

#[test]
fn toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::new();
    config.layout.wall_height_m = 2.7;
    config.layout.joined_mode = true;
    config.layout.student_name = "Ada".to_string();
    config.export.output_directory = PathBuf::from("sheets");
    config.export.file_prefix = "house".to_string();
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::new();
    config.layout.material_thickness_mm = 0.0;
    config.layout.finger_joints = false;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[layout]\nwall_height_m = 3.0\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.layout.wall_height_m, 3.0);
    assert_eq!(config.layout.material_thickness_mm, 3.0);
    assert!(config.layout.finger_joints);
    assert_eq!(config.export.file_prefix, "laser_sheet");
}

#[test]
fn invalid_config_is_rejected_on_load_and_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[layout]\nwall_height_m = 0.0\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));

    let mut config = Config::new();
    config.layout.material_thickness_mm = -2.0;
    let out = dir.path().join("out.json");
    assert!(matches!(
        config.save_to_file(&out),
        Err(SettingsError::Config(ConfigError::ValueOutOfRange { .. }))
    ));
    assert!(!out.exists());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");
    assert!(matches!(
        Config::load_or_default(Some(&path)),
        Err(SettingsError::IoError(_))
    ));
}
