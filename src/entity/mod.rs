//! Scene members.
//!
//! ```text
//! Scene
//!   ├── ElevatorEntity  (elevator.rs) ← identity, routing target
//!   │     └── MotionEntity (motion.rs) ← the car, eases toward target_y
//!   └── FloorEntity     (floor.rs)    ← static rule + label
//! ```
//!
//! Elevators and floors share the [`Stage`] interface so the scene can draw
//! and update them uniformly, even though floors never change.

pub mod elevator;
pub mod floor;
pub mod motion;

pub use elevator::ElevatorEntity;
pub use floor::FloorEntity;
pub use motion::MotionEntity;

use crate::canvas::Canvas;
use crate::types::Layout;

/// Something the scene draws and advances once per frame.
pub trait Stage {
    fn draw(&self, canvas: &mut dyn Canvas, layout: &Layout);

    /// Advance one tick.
    fn update(&mut self);
}
