//! Elevator Scene
//!
//! A live animated scene of elevators moving between floors, driven by
//! position events from an MQTT broker.
//!
//! ## Architecture
//!
//! ```text
//! bridge::mqtt  (bridge thread)  ← broker subscription, elevator/+/*
//!   └── bridge::translate        ← topic + JSON → Action
//!         ⇣ crossbeam channel
//! Scene  (scene.rs)              ← action queue, routing, layout
//!   ├── ElevatorEntity           ← routed by identity
//!   │     └── MotionEntity       ← fixed-step easing toward target_y
//!   └── FloorEntity              ← static rule + label
//!         ⇣
//! Canvas (canvas.rs)             ← drawing backend / DrawList recorder
//! ```
//!
//! The scene core has no transport or runtime dependency.  The MQTT bridge,
//! settings loader and binary sit behind the default `bridge` feature.

pub mod action;
pub mod bridge;
pub mod canvas;
pub mod entity;
pub mod error;
pub mod protocol;
pub mod scene;
pub mod types;

#[cfg(feature = "bridge")]
pub mod settings;

pub use action::{Action, ActionSink};
pub use canvas::{Canvas, DrawCommand, DrawList, TextAlign};
pub use entity::{ElevatorEntity, FloorEntity, MotionEntity, Stage};
pub use error::{MotionError, PayloadError, RoutingError, SettingsError};
pub use protocol::DoorStatus;
pub use scene::{FloorMap, Scene, TickReport};
#[cfg(feature = "bridge")]
pub use settings::SceneSettings;
pub use types::{FloorLabel, Layout, Rgb, SceneStats, Size, Vec2};
