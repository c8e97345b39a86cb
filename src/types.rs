//! Core scene types shared across all modules.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PayloadError;

// ---------------------------------------------------------------------------
// Basic math
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }
}

// ---------------------------------------------------------------------------
// Floors
// ---------------------------------------------------------------------------

/// Logical floor names as they appear on the wire and on screen.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum FloorLabel {
    Ground,
    First,
    Second,
    Third,
}

impl FloorLabel {
    /// Every floor, bottom to top.
    pub const ALL: [FloorLabel; 4] = [
        FloorLabel::Ground,
        FloorLabel::First,
        FloorLabel::Second,
        FloorLabel::Third,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FloorLabel::Ground => "Ground",
            FloorLabel::First => "First",
            FloorLabel::Second => "Second",
            FloorLabel::Third => "Third",
        }
    }
}

impl std::fmt::Display for FloorLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FloorLabel {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FloorLabel::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| PayloadError::UnknownFloor {
                label: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SceneStats {
    pub elevators: usize,
    pub floors: usize,
    pub pending_actions: usize,
    pub total_ticks: u64,
    /// Actions that reached an elevator.
    pub dispatched_actions: u64,
    /// Actions whose elevator identity was not registered.
    pub unroutable_actions: u64,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Fixed geometry of the 1600×850 scene surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub canvas: Size,
    /// x of the first elevator shaft.
    pub elevator_base_offset: f32,
    /// Horizontal distance between consecutive shafts.
    pub column_width: f32,
    /// y of the top-most floor rule.
    pub floor_top_offset: f32,
    /// Vertical distance between consecutive floor rules.
    pub row_height: f32,
    pub shaft_top: f32,
    pub shaft: Size,
    pub car: Size,
    /// Horizontal inset of the car inside its shaft.
    pub car_inset: f32,
    pub elevator_label_y: f32,
    pub elevator_label_size: f32,
    pub rule_start_x: f32,
    pub rule_end_x: f32,
    pub floor_label_x: f32,
    pub floor_label_size: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            canvas: Size::new(1600.0, 850.0),
            elevator_base_offset: 50.0,
            column_width: 300.0,
            floor_top_offset: 200.0,
            row_height: 200.0,
            shaft_top: 50.0,
            shaft: Size::new(100.0, 800.0),
            car: Size::new(80.0, 100.0),
            car_inset: 10.0,
            elevator_label_y: 35.0,
            elevator_label_size: 24.0,
            rule_start_x: 10.0,
            rule_end_x: 1200.0,
            floor_label_x: 1220.0,
            floor_label_size: 16.0,
        }
    }
}
