//! Per-wall and per-floor visibility toggles
//!
//! The editor lets the user switch individual wall panels and floor patches
//! off. Disabled pieces are still laid out (so the layout does not jump) but
//! are not exported. The maps outlive every rebuild; walls are keyed by their
//! merged geometry so a toggle survives as long as the wall itself is
//! unchanged, floors are keyed by room id.

use crate::plan::Orientation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable key of a merged wall: `orientation:axis:start:end`, one decimal each.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallKey(String);

impl WallKey {
    pub fn new(orientation: Orientation, axis: f64, start: f64, end: f64) -> Self {
        Self(format!(
            "{}:{}:{}:{}",
            orientation.code(),
            fixed1(axis),
            fixed1(start),
            fixed1(end)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WallKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WallKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One decimal, ties away from zero, never `-0.0`.
pub fn fixed1(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{:.1}", rounded + 0.0)
}

/// Wall and floor visibility maps owned by the editor
///
/// Entries missing from either map count as visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    #[serde(default)]
    walls: BTreeMap<WallKey, bool>,
    #[serde(default)]
    floors: BTreeMap<String, bool>,
}

impl Visibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a wall is enabled, recording it as enabled if unseen.
    pub fn wall_enabled(&mut self, key: &WallKey) -> bool {
        *self.walls.entry(key.clone()).or_insert(true)
    }

    /// Whether a floor patch is enabled, recording it as enabled if unseen.
    pub fn floor_enabled(&mut self, room_id: &str) -> bool {
        *self.floors.entry(room_id.to_string()).or_insert(true)
    }

    /// Read-only lookup; unseen walls are enabled.
    pub fn is_wall_enabled(&self, key: &WallKey) -> bool {
        self.walls.get(key).copied().unwrap_or(true)
    }

    /// Read-only lookup; unseen floors are enabled.
    pub fn is_floor_enabled(&self, room_id: &str) -> bool {
        self.floors.get(room_id).copied().unwrap_or(true)
    }

    pub fn set_wall(&mut self, key: WallKey, enabled: bool) {
        self.walls.insert(key, enabled);
    }

    pub fn set_floor(&mut self, room_id: impl Into<String>, enabled: bool) {
        self.floors.insert(room_id.into(), enabled);
    }

    /// Flip a wall and return its new state.
    pub fn toggle_wall(&mut self, key: &WallKey) -> bool {
        let next = !self.is_wall_enabled(key);
        self.walls.insert(key.clone(), next);
        next
    }

    /// Flip a floor patch and return its new state.
    pub fn toggle_floor(&mut self, room_id: &str) -> bool {
        let next = !self.is_floor_enabled(room_id);
        self.floors.insert(room_id.to_string(), next);
        next
    }

    pub fn walls(&self) -> impl Iterator<Item = (&WallKey, bool)> {
        self.walls.iter().map(|(k, v)| (k, *v))
    }

    pub fn floors(&self) -> impl Iterator<Item = (&str, bool)> {
        self.floors.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.floors.is_empty()
    }
}
