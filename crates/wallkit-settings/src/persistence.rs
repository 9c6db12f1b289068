//! Plan document persistence
//!
//! A plan document is the JSON payload the editor saves: the rooms, the
//! door and window markers drawn on their walls, the two visibility maps
//! and a few UI flags. Values written by older editors are often strings
//! (`"12.5"` instead of `12.5`), so every number is read leniently and a
//! record that still makes no sense is skipped instead of failing the load.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};
use wallkit_core::plan::extract_trailing_int;
use wallkit_core::{FloorPlan, Opening, OpeningKind, PlanPoint, Room, Side, Visibility};

use crate::error::{PersistenceError, PersistenceResult};

pub const DOCUMENT_VERSION: u32 = 1;

/// Marker thickness of a door drawn on a wall, in plan pixels
const DOOR_MARKER_THICKNESS: f64 = 6.0;
/// Marker thickness of a window drawn on a wall, in plan pixels
const WINDOW_MARKER_THICKNESS: f64 = 4.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accept `12.5`, `"12.5"` or `null`; only finite numbers survive.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    }
    .filter(|n| n.is_finite()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Number(u64),
    Text(String),
}

/// Ids may be stored as numbers or strings.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<IdValue>::deserialize(deserializer)? {
        Some(IdValue::Number(n)) => n.to_string(),
        Some(IdValue::Text(s)) => s.trim().to_string(),
        None => String::new(),
    })
}

/// A timestamp that fails to parse is dropped.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }))
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMeta {
    #[serde(deserialize_with = "lenient_timestamp")]
    pub saved_at: Option<DateTime<Utc>>,
    pub student_name: String,
}

/// Next free ids, as the editor last saw them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdCounters {
    pub next_room_id: u64,
    pub next_feature_id: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub joined_mode: bool,
    pub current_tool: Option<String>,
    pub lock_sizes: bool,
}

/// Wall and floor toggles keyed the same way the layout engine keys them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisibilityMaps {
    pub wall_vis: BTreeMap<String, bool>,
    pub floor_vis: BTreeMap<String, bool>,
}

impl VisibilityMaps {
    pub fn from_visibility(visibility: &Visibility) -> Self {
        Self {
            wall_vis: visibility
                .walls()
                .map(|(key, enabled)| (key.to_string(), enabled))
                .collect(),
            floor_vis: visibility
                .floors()
                .map(|(id, enabled)| (id.to_string(), enabled))
                .collect(),
        }
    }

    pub fn to_visibility(&self) -> Visibility {
        let mut visibility = Visibility::new();
        for (key, enabled) in &self.wall_vis {
            visibility.set_wall(key.as_str().into(), *enabled);
        }
        for (id, enabled) in &self.floor_vis {
            visibility.set_floor(id.clone(), *enabled);
        }
        visibility
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub room_id: String,
    pub room_name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub y: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub height: Option<f64>,
}

impl RoomRecord {
    pub fn from_room(room: &Room) -> Self {
        Self {
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            x: Some(room.x),
            y: Some(room.y),
            width: Some(room.width),
            height: Some(room.height),
        }
    }

    /// The room this record describes, with `id` filled in by the caller.
    ///
    /// Returns `None` unless both sizes are positive. A missing position
    /// becomes the origin.
    fn to_room(&self, id: String) -> Option<Room> {
        let width = self.width.filter(|w| *w > 0.0)?;
        let height = self.height.filter(|h| *h > 0.0)?;
        Some(Room::new(
            id,
            self.room_name.clone(),
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            width,
            height,
        ))
    }
}

/// Wall placement of a door or window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureData {
    pub side: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub wall_offset_px: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub length_px: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub window_head_m: Option<f64>,
}

/// A door or window marker as drawn in the editor
///
/// `x`, `y`, `width` and `height` are the marker rectangle straddling the
/// wall line. `data` holds the placement along the wall; when it is missing
/// the placement is recovered from the marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub feature_id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub room: String,
    pub feature: String,
    #[serde(deserialize_with = "lenient_number")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub y: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    pub data: FeatureData,
}

impl FeatureRecord {
    pub fn from_opening(opening: &Opening, room: &Room) -> Self {
        let thickness = if opening.kind.is_door() {
            DOOR_MARKER_THICKNESS
        } else {
            WINDOW_MARKER_THICKNESS
        };
        let (x, y, width, height) = match opening.side {
            Side::Top | Side::Bottom => {
                let axis = if opening.side == Side::Top {
                    room.y
                } else {
                    room.y + room.height
                };
                (
                    room.x + opening.offset,
                    axis - thickness / 2.0,
                    opening.length,
                    thickness,
                )
            }
            Side::Left | Side::Right => {
                let axis = if opening.side == Side::Left {
                    room.x
                } else {
                    room.x + room.width
                };
                (
                    axis - thickness / 2.0,
                    room.y + opening.offset,
                    thickness,
                    opening.length,
                )
            }
        };

        let window_head_m = match opening.kind {
            OpeningKind::Door => None,
            OpeningKind::Window { .. } => opening.kind.window_head_m(),
        };

        Self {
            feature_id: opening.id.clone(),
            room: opening.room_id.clone(),
            feature: if opening.kind.is_door() { "door" } else { "window" }.to_string(),
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            data: FeatureData {
                side: Some(opening.side.as_str().to_string()),
                wall_offset_px: Some(opening.offset),
                length_px: Some(opening.length),
                window_head_m,
            },
        }
    }

    fn kind(&self) -> Option<OpeningKind> {
        match self.feature.trim().to_ascii_lowercase().as_str() {
            "door" => Some(OpeningKind::Door),
            "window" => Some(OpeningKind::Window {
                head_m: self.data.window_head_m,
            }),
            _ => None,
        }
    }

    fn marker_center(&self) -> Option<PlanPoint> {
        let x = self.x?;
        let y = self.y?;
        Some(PlanPoint::new(
            x + self.width.unwrap_or(0.0) / 2.0,
            y + self.height.unwrap_or(0.0) / 2.0,
        ))
    }

    /// The opening this record describes on `room`, with `id` filled in.
    fn to_opening(&self, id: String, room: &Room) -> Option<Opening> {
        let kind = self.kind()?;
        let side = match self.data.side.as_deref().map(str::parse::<Side>) {
            Some(Ok(side)) => side,
            _ => room.nearest_side(self.marker_center()?),
        };

        let (marker_offset, marker_length) = if side.is_horizontal() {
            (self.x.map(|x| x - room.x), self.width)
        } else {
            (self.y.map(|y| y - room.y), self.height)
        };
        let offset = self.data.wall_offset_px.or(marker_offset).unwrap_or(0.0);
        let length = self.data.length_px.or(marker_length)?;

        Some(Opening::new(id, room.id.clone(), side, offset, length, kind))
    }
}

/// A saved floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub meta: DocumentMeta,
    #[serde(default)]
    pub counters: IdCounters,
    #[serde(default)]
    pub ui: UiState,
    #[serde(default)]
    pub visibility: VisibilityMaps,
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    #[serde(default)]
    pub features: Vec<FeatureRecord>,
}

impl Default for PlanDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            meta: DocumentMeta::default(),
            counters: IdCounters::default(),
            ui: UiState::default(),
            visibility: VisibilityMaps::default(),
            rooms: Vec::new(),
            features: Vec::new(),
        }
    }
}

/// Hands out ids for records saved without one, above every id already taken.
struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    fn above<'a>(ids: impl Iterator<Item = &'a str>) -> Self {
        let max = ids.filter_map(extract_trailing_int).max().unwrap_or(0);
        Self { next: max + 1 }
    }

    fn take(&mut self, id: &str) -> String {
        if !id.is_empty() {
            return id.to_string();
        }
        let id = self.next.to_string();
        self.next += 1;
        id
    }
}

impl PlanDocument {
    /// Snapshot of a plan and its toggles, stamped with the current time.
    pub fn from_plan(
        plan: &FloorPlan,
        visibility: &Visibility,
        student_name: &str,
        joined_mode: bool,
    ) -> Self {
        let features = plan
            .openings()
            .iter()
            .filter_map(|opening| {
                plan.room(&opening.room_id)
                    .map(|room| FeatureRecord::from_opening(opening, room))
            })
            .collect();

        Self {
            version: DOCUMENT_VERSION,
            meta: DocumentMeta {
                saved_at: Some(Utc::now()),
                student_name: student_name.to_string(),
            },
            counters: IdCounters {
                next_room_id: plan.next_room_id(),
                next_feature_id: plan.next_opening_id(),
            },
            ui: UiState {
                joined_mode,
                ..UiState::default()
            },
            visibility: VisibilityMaps::from_visibility(visibility),
            rooms: plan.rooms().iter().map(RoomRecord::from_room).collect(),
            features,
        }
    }

    /// Rebuild the plan and the visibility maps.
    ///
    /// Rooms without a positive size and features that cannot be placed on
    /// a known room are skipped. Missing ids are assigned, and the id
    /// counters are recomputed from what was restored.
    pub fn to_plan(&self) -> (FloorPlan, Visibility) {
        let mut plan = FloorPlan::new();

        let mut room_ids = IdAllocator::above(self.rooms.iter().map(|r| r.room_id.as_str()));
        for record in &self.rooms {
            let id = room_ids.take(&record.room_id);
            let Some(room) = record.to_room(id) else {
                debug!("Skipping room {:?} with invalid size", record.room_id);
                continue;
            };
            if let Err(e) = plan.insert_room(room) {
                warn!("Skipping room {:?}: {}", record.room_id, e);
            }
        }

        let mut feature_ids =
            IdAllocator::above(self.features.iter().map(|f| f.feature_id.as_str()));
        for record in &self.features {
            let id = feature_ids.take(&record.feature_id);
            let Some(room) = plan.room(&record.room) else {
                debug!(
                    "Skipping {} {:?} on unknown room {:?}",
                    record.feature, record.feature_id, record.room
                );
                continue;
            };
            let Some(opening) = record.to_opening(id, room) else {
                debug!("Skipping unplaceable feature {:?}", record.feature_id);
                continue;
            };
            if let Err(e) = plan.insert_opening(opening) {
                warn!("Skipping feature {:?}: {}", record.feature_id, e);
            }
        }

        plan.recompute_next_ids();
        (plan, self.visibility.to_visibility())
    }

    pub fn from_json(content: &str) -> PersistenceResult<Self> {
        let document: Self = serde_json::from_str(content)?;
        if document.version != DOCUMENT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(document.version));
        }
        Ok(document)
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> PersistenceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let document = Self::from_json(&content)?;
        debug!(
            "Loaded plan {} ({} rooms, {} features)",
            path.display(),
            document.rooms.len(),
            document.features.len()
        );
        Ok(document)
    }

    pub fn save(&self, path: &Path) -> PersistenceResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
