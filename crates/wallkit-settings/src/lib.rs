//! WallKit Settings Crate
//!
//! Handles layout configuration files and the plan documents the editor
//! saves (rooms, openings, visibility maps, student name).

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{default_config_path, Config, ExportSettings, LayoutSettings};
pub use error::{ConfigError, PersistenceError, PersistenceResult, SettingsError, SettingsResult};
pub use persistence::{
    DocumentMeta, FeatureData, FeatureRecord, IdCounters, PlanDocument, RoomRecord, UiState,
    VisibilityMaps, DOCUMENT_VERSION,
};
