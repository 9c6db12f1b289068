//! Floor plan model
//!
//! Rooms are axis-aligned rectangles in plan pixels. Doors and windows
//! ("openings") hang off one side of one room and are positioned by their
//! distance from that side's start corner (the left end of a horizontal side,
//! the top end of a vertical side).
//!
//! The editing operations here mirror what the floor plan editor enforces:
//! deleting a room deletes its openings, resizing a room pulls its openings
//! back inside the new walls, and edited openings are clamped rather than
//! rejected whenever a sensible position exists.

use crate::constants::{
    DEFAULT_DOOR_LENGTH_M, DEFAULT_WINDOW_LENGTH_M, MIN_OPENING_LENGTH_PX, WINDOW_HEAD_DEFAULT_M,
};
use crate::error::{ensure_finite, ensure_positive, PlanError, Result};
use crate::units::m_to_px;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Side of a room a wall segment or opening belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// All sides in the order rooms emit their walls.
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Top and bottom walls run along the X axis.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    pub fn orientation(&self) -> Orientation {
        if self.is_horizontal() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Direction a wall line runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    /// Runs along X; the axis coordinate is a Y value
    #[serde(rename = "h")]
    Horizontal,
    /// Runs along Y; the axis coordinate is an X value
    #[serde(rename = "v")]
    Vertical,
}

impl Orientation {
    /// Single-letter code used in wall keys.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Horizontal => "h",
            Self::Vertical => "v",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!("Unknown side: {}", s)),
        }
    }
}

/// A point in plan coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangular room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// True when every coordinate is finite and both sizes are positive.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Length of the wall on the given side.
    pub fn wall_length(&self, side: Side) -> f64 {
        if side.is_horizontal() {
            self.width
        } else {
            self.height
        }
    }

    /// Name shown on labels: the room name, or `Room <id>` when unnamed.
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Room {}", self.id)
        } else {
            self.name.clone()
        }
    }

    /// Side whose wall line is closest to `point`.
    ///
    /// Ties go to the first side in top, bottom, left, right order.
    pub fn nearest_side(&self, point: PlanPoint) -> Side {
        let distances = [
            (Side::Top, (point.y - self.y).abs()),
            (Side::Bottom, (point.y - (self.y + self.height)).abs()),
            (Side::Left, (point.x - self.x).abs()),
            (Side::Right, (point.x - (self.x + self.width)).abs()),
        ];

        let mut best = distances[0];
        for candidate in &distances[1..] {
            if candidate.1 < best.1 {
                best = *candidate;
            }
        }
        best.0
    }
}

/// Door or window, with the window's head height above the floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window {
        /// Height of the window's top edge above the floor, in meters
        #[serde(default)]
        head_m: Option<f64>,
    },
}

impl OpeningKind {
    /// A window with the default head height.
    pub fn window() -> Self {
        Self::Window {
            head_m: Some(WINDOW_HEAD_DEFAULT_M),
        }
    }

    pub fn is_door(&self) -> bool {
        matches!(self, Self::Door)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Door => "Door",
            Self::Window { .. } => "Window",
        }
    }

    /// Width given to a freshly placed opening.
    pub fn default_length_m(&self) -> f64 {
        match self {
            Self::Door => DEFAULT_DOOR_LENGTH_M,
            Self::Window { .. } => DEFAULT_WINDOW_LENGTH_M,
        }
    }

    /// Head height of a window, falling back to the default when unset or invalid.
    /// Doors report `None`.
    pub fn window_head_m(&self) -> Option<f64> {
        match self {
            Self::Door => None,
            Self::Window { head_m } => Some(
                head_m
                    .filter(|h| h.is_finite())
                    .unwrap_or(WINDOW_HEAD_DEFAULT_M),
            ),
        }
    }
}

/// A door or window attached to one side of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: String,
    pub room_id: String,
    pub side: Side,
    /// Distance from the wall's start corner, in plan pixels
    pub offset: f64,
    /// Length along the wall, in plan pixels
    pub length: f64,
    #[serde(flatten)]
    pub kind: OpeningKind,
}

impl Opening {
    pub fn new(
        id: impl Into<String>,
        room_id: impl Into<String>,
        side: Side,
        offset: f64,
        length: f64,
        kind: OpeningKind,
    ) -> Self {
        Self {
            id: id.into(),
            room_id: room_id.into(),
            side,
            offset,
            length,
            kind,
        }
    }

    /// Pull the opening inside a wall of `wall_length` pixels.
    ///
    /// The length is kept at or above the editor minimum unless the wall
    /// itself is shorter, then the offset is clamped so the opening ends
    /// on the wall.
    pub fn clamp_to_wall(&mut self, wall_length: f64) {
        let mut length = if self.length.is_finite() {
            self.length
        } else {
            MIN_OPENING_LENGTH_PX
        };
        if length < MIN_OPENING_LENGTH_PX {
            length = MIN_OPENING_LENGTH_PX;
        }
        if length > wall_length {
            length = wall_length;
        }

        let max_offset = (wall_length - length).max(0.0);
        let mut offset = if self.offset.is_finite() {
            self.offset
        } else {
            0.0
        };
        if offset > max_offset {
            offset = max_offset;
        }
        if offset < 0.0 {
            offset = 0.0;
        }

        self.length = length;
        self.offset = offset;
    }
}

/// Values typed into the opening editor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningEdit {
    /// Opening width in meters
    pub width_m: f64,
    /// Distance from the wall start in meters
    pub offset_m: f64,
    /// Window head height in meters; ignored for doors
    pub head_m: Option<f64>,
}

/// Rooms and their openings, in editor order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    rooms: Vec<Room>,
    openings: Vec<Opening>,
    #[serde(skip)]
    next_room_id: u64,
    #[serde(skip)]
    next_opening_id: u64,
}

impl FloorPlan {
    pub fn new() -> Self {
        Self {
            rooms: Vec::new(),
            openings: Vec::new(),
            next_room_id: 1,
            next_opening_id: 1,
        }
    }

    /// Build a plan from stored records and derive the id counters from them.
    ///
    /// Records are taken as-is; the layout engine skips whatever is unusable.
    pub fn from_parts(rooms: Vec<Room>, openings: Vec<Opening>) -> Self {
        let mut plan = Self {
            rooms,
            openings,
            next_room_id: 1,
            next_opening_id: 1,
        };
        plan.recompute_next_ids();
        plan
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn opening(&self, id: &str) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == id)
    }

    /// Openings attached to one side of one room.
    pub fn openings_on<'a>(
        &'a self,
        room_id: &'a str,
        side: Side,
    ) -> impl Iterator<Item = &'a Opening> + 'a {
        self.openings
            .iter()
            .filter(move |o| o.room_id == room_id && o.side == side)
    }

    /// Label name for a room id, `Room <id>` for unnamed or unknown rooms.
    pub fn room_display_name(&self, id: &str) -> String {
        self.room(id)
            .map(Room::display_name)
            .unwrap_or_else(|| format!("Room {}", id))
    }

    /// Create a room with the next free numeric id.
    pub fn add_room(
        &mut self,
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<String> {
        let id = self.allocate_room_id();
        self.insert_room(Room::new(id.clone(), name, x, y, width, height))?;
        Ok(id)
    }

    /// Add a caller-built room.
    pub fn insert_room(&mut self, room: Room) -> Result<()> {
        ensure_finite("x", room.x)?;
        ensure_finite("y", room.y)?;
        ensure_positive("width", room.width)?;
        ensure_positive("height", room.height)?;

        if self.room(&room.id).is_some() {
            return Err(PlanError::DuplicateRoom { room_id: room.id }.into());
        }

        self.rooms.push(room);
        self.recompute_next_ids();
        Ok(())
    }

    /// Remove a room together with every opening attached to it.
    pub fn remove_room(&mut self, id: &str) -> Result<Room> {
        let index = self.room_index(id)?;
        let room = self.rooms.remove(index);

        let before = self.openings.len();
        self.openings.retain(|o| o.room_id != id);
        debug!(
            "Removed room {} and {} attached openings",
            id,
            before - self.openings.len()
        );

        Ok(room)
    }

    pub fn move_room(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        ensure_finite("x", x)?;
        ensure_finite("y", y)?;
        let index = self.room_index(id)?;
        let room = &mut self.rooms[index];
        room.x = x;
        room.y = y;
        Ok(())
    }

    /// Resize a room and clamp its openings into the new wall lengths.
    pub fn resize_room(&mut self, id: &str, width: f64, height: f64) -> Result<()> {
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        let index = self.room_index(id)?;
        let room = &mut self.rooms[index];
        room.width = width;
        room.height = height;
        let room = room.clone();

        for opening in self.openings.iter_mut().filter(|o| o.room_id == id) {
            opening.clamp_to_wall(room.wall_length(opening.side));
        }
        Ok(())
    }

    /// Add a caller-built opening, clamped into its wall.
    pub fn insert_opening(&mut self, mut opening: Opening) -> Result<()> {
        let wall_length = self
            .room(&opening.room_id)
            .map(|r| r.wall_length(opening.side))
            .ok_or_else(|| PlanError::UnknownRoom {
                room_id: opening.room_id.clone(),
            })?;

        if self.opening(&opening.id).is_some() {
            return Err(PlanError::DuplicateOpening {
                opening_id: opening.id,
            }
            .into());
        }

        opening.clamp_to_wall(wall_length);
        self.openings.push(opening);
        self.recompute_next_ids();
        Ok(())
    }

    /// Drop a door or window on the room wall nearest to `click`.
    ///
    /// The opening gets the default width for its kind (capped at the wall
    /// length) and is centered on the click, then pushed back inside the wall.
    pub fn place_opening(
        &mut self,
        room_id: &str,
        kind: OpeningKind,
        click: PlanPoint,
    ) -> Result<String> {
        let room = self.room(room_id).ok_or_else(|| PlanError::UnknownRoom {
            room_id: room_id.to_string(),
        })?;
        ensure_finite("click x", click.x)?;
        ensure_finite("click y", click.y)?;

        let side = room.nearest_side(click);
        let wall_length = room.wall_length(side);
        let along = if side.is_horizontal() {
            click.x - room.x
        } else {
            click.y - room.y
        };

        let length = m_to_px(kind.default_length_m()).min(wall_length);
        let mut start = along - length / 2.0;
        if start < 0.0 {
            start = 0.0;
        }
        if start + length > wall_length {
            start = wall_length - length;
        }
        if start < 0.0 {
            start = 0.0;
        }

        let kind = match kind {
            OpeningKind::Window { head_m: None } => OpeningKind::window(),
            other => other,
        };

        let id = self.allocate_opening_id();
        self.openings.push(Opening::new(
            id.clone(),
            room_id,
            side,
            start,
            length,
            kind,
        ));
        Ok(id)
    }

    /// Apply values from the opening editor.
    ///
    /// A non-positive or non-finite width is rejected. Everything else is
    /// clamped: the length to `[MIN_OPENING_LENGTH_PX, wall length]`, the
    /// offset to the free space left on the wall, and a window head to the
    /// wall height (falling back to the default head when invalid).
    pub fn edit_opening(&mut self, id: &str, edit: OpeningEdit, wall_height_m: f64) -> Result<()> {
        if !edit.width_m.is_finite() || edit.width_m <= 0.0 {
            return Err(PlanError::InvalidOpening {
                reason: format!("width must be positive, got {}", edit.width_m),
            }
            .into());
        }

        let index = self
            .openings
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| PlanError::UnknownOpening {
                opening_id: id.to_string(),
            })?;

        let wall_length = {
            let opening = &self.openings[index];
            self.room(&opening.room_id)
                .map(|r| r.wall_length(opening.side))
                .ok_or_else(|| PlanError::UnknownRoom {
                    room_id: opening.room_id.clone(),
                })?
        };

        let offset_m = if edit.offset_m.is_finite() && edit.offset_m >= 0.0 {
            edit.offset_m
        } else {
            0.0
        };

        let opening = &mut self.openings[index];
        opening.length = m_to_px(edit.width_m);
        opening.offset = m_to_px(offset_m);
        opening.clamp_to_wall(wall_length);

        if let OpeningKind::Window { head_m } = &mut opening.kind {
            let mut head = edit
                .head_m
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(WINDOW_HEAD_DEFAULT_M);
            if wall_height_m.is_finite() && head > wall_height_m {
                head = wall_height_m;
            }
            *head_m = Some(head);
        }

        Ok(())
    }

    pub fn remove_opening(&mut self, id: &str) -> Result<Opening> {
        let index = self
            .openings
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| PlanError::UnknownOpening {
                opening_id: id.to_string(),
            })?;
        Ok(self.openings.remove(index))
    }

    /// Reset the id counters to one past the largest trailing number in use.
    ///
    /// Ids such as `"12"`, `"room12"` and `"feature_12"` all count as 12.
    pub fn recompute_next_ids(&mut self) {
        self.next_room_id = self
            .rooms
            .iter()
            .filter_map(|r| extract_trailing_int(&r.id))
            .max()
            .unwrap_or(0)
            + 1;
        self.next_opening_id = self
            .openings
            .iter()
            .filter_map(|o| extract_trailing_int(&o.id))
            .max()
            .unwrap_or(0)
            + 1;
    }

    pub fn next_room_id(&self) -> u64 {
        self.next_room_id
    }

    pub fn next_opening_id(&self) -> u64 {
        self.next_opening_id
    }

    fn room_index(&self, id: &str) -> Result<usize> {
        self.rooms
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| {
                PlanError::UnknownRoom {
                    room_id: id.to_string(),
                }
                .into()
            })
    }

    fn allocate_room_id(&mut self) -> String {
        if self.next_room_id == 0 {
            self.recompute_next_ids();
        }
        let mut candidate = self.next_room_id;
        while self.room(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        self.next_room_id = candidate + 1;
        candidate.to_string()
    }

    fn allocate_opening_id(&mut self) -> String {
        if self.next_opening_id == 0 {
            self.recompute_next_ids();
        }
        let mut candidate = self.next_opening_id;
        while self.opening(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        self.next_opening_id = candidate + 1;
        candidate.to_string()
    }
}

/// Trailing decimal number of an id, ignoring trailing whitespace.
pub fn extract_trailing_int(value: &str) -> Option<u64> {
    let trimmed = value.trim_end();
    let digits_start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    trimmed[digits_start..].parse().ok()
}
