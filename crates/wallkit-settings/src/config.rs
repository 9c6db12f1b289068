//! Configuration management for WallKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into two sections:
//! - Layout settings (wall height, material, joints, labels)
//! - Export settings (output directory, file prefix)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use wallkit_camtools::{PointerKind, UnrollParameters};
use wallkit_core::constants::DEFAULT_WALL_HEIGHT_M;

use crate::error::{ConfigError, SettingsError, SettingsResult};

const CONFIG_DIR_NAME: &str = "wallkit";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Wall layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Wall height in meters
    pub wall_height_m: f64,
    /// Sheet material thickness; one unit is one plan pixel on the sheet
    pub material_thickness_mm: f64,
    /// Cut finger joints on the short wall edges
    pub finger_joints: bool,
    /// Also lay out a floor patch per room
    pub joined_mode: bool,
    /// Printed on every label
    pub student_name: String,
    /// Larger hit areas for touch input
    pub coarse_pointer: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            wall_height_m: DEFAULT_WALL_HEIGHT_M,
            material_thickness_mm: 3.0,
            finger_joints: true,
            joined_mode: false,
            student_name: String::new(),
            coarse_pointer: false,
        }
    }
}

/// Sheet export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory sheet files are written to
    pub output_directory: PathBuf,
    /// Sheet files are named `<prefix>_<n>.svg`
    pub file_prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            file_prefix: "laser_sheet".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutSettings,
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default location if it exists, else defaults.
    ///
    /// A file that exists but fails to load is an error when it was asked for
    /// explicitly, and is logged and ignored when it is the default file.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let default_path = default_config_path();
        if !default_path.exists() {
            return Ok(Self::default());
        }
        match Self::load_from_file(&default_path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(
                    "Ignoring config at {}: {}",
                    default_path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let layout = &self.layout;
        if !layout.material_thickness_mm.is_finite() || layout.material_thickness_mm < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "layout.material_thickness_mm".to_string(),
                value: layout.material_thickness_mm.to_string(),
            }
            .into());
        }

        self.to_unroll_parameters()
            .validate()
            .map_err(|e| SettingsError::InvalidSetting {
                key: "layout".to_string(),
                reason: e.to_string(),
            })?;

        let prefix = self.export.file_prefix.trim();
        if prefix.is_empty() || prefix.contains(['/', '\\']) {
            return Err(SettingsError::InvalidSetting {
                key: "export.file_prefix".to_string(),
                reason: format!("'{}' is not a usable file name prefix", prefix),
            });
        }

        Ok(())
    }

    /// Parameters for the wall unroller.
    pub fn to_unroll_parameters(&self) -> UnrollParameters {
        UnrollParameters {
            wall_height_m: self.layout.wall_height_m,
            thickness: self.layout.material_thickness_mm,
            finger_joints: self.layout.finger_joints,
            joined_mode: self.layout.joined_mode,
            student_name: self.layout.student_name.trim().to_string(),
            pointer: if self.layout.coarse_pointer {
                PointerKind::Coarse
            } else {
                PointerKind::Fine
            },
            ..UnrollParameters::default()
        }
    }
}

/// `<config dir>/wallkit/config.toml`, falling back to the home directory
/// and then the working directory.
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(CONFIG_DIR_NAME);
    path.push(CONFIG_FILE_NAME);
    path
}
