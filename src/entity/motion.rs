//! `MotionEntity` – the elevator car.
//!
//! Each tick the car moves a fixed `speed` towards `target_y`.  The step is
//! never shortened, so a target that is not a whole number of steps away is
//! never hit exactly: the car ends up bouncing between the two positions
//! either side of it, one step apart.

use crate::canvas::Canvas;
use crate::error::MotionError;
use crate::types::{Layout, Rgb, Size, Vec2};

pub const DEFAULT_SPEED: f32 = 10.0;
/// Resting y of a freshly created car (the ground floor).
pub const DEFAULT_Y: f32 = 700.0;

const CORNER_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MotionEntity {
    pub position: Vec2,
    pub size: Size,
    pub target_y: f32,
    speed: f32,
}

impl MotionEntity {
    /// A car at `position`, at rest (its target is where it stands).
    pub fn new(position: Vec2, size: Size, speed: f32) -> Result<Self, MotionError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(MotionError::InvalidSpeed(speed));
        }
        Ok(Self {
            position,
            size,
            target_y: position.y,
            speed,
        })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_target(&mut self, y: f32) {
        self.target_y = y;
    }

    pub fn is_at_target(&self) -> bool {
        self.position.y == self.target_y
    }

    pub fn update(&mut self) {
        if self.position.y < self.target_y {
            self.position.y += self.speed;
        } else if self.position.y > self.target_y {
            self.position.y -= self.speed;
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, fill: Rgb) {
        canvas.rect(self.position, self.size, fill, CORNER_RADIUS);
    }
}

impl Default for MotionEntity {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, DEFAULT_Y),
            size: Layout::default().car,
            target_y: DEFAULT_Y,
            speed: DEFAULT_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_at(y: f32, speed: f32) -> MotionEntity {
        MotionEntity::new(Vec2::new(0.0, y), Size::new(80.0, 100.0), speed).unwrap()
    }

    #[test]
    fn default_car_rests_on_ground_floor() {
        let m = MotionEntity::default();
        assert_eq!(m.position.y, 700.0);
        assert_eq!(m.target_y, 700.0);
        assert_eq!(m.speed(), 10.0);
        assert_eq!(m.size, Layout::default().car);
        assert!(m.is_at_target());
    }

    #[test]
    fn rejects_unusable_speed() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                MotionEntity::new(Vec2::default(), Size::new(1.0, 1.0), bad),
                Err(MotionError::InvalidSpeed(_))
            ));
        }
    }

    #[test]
    fn moves_up_by_fixed_steps_and_stops_on_exact_target() {
        let mut m = car_at(700.0, 10.0);
        m.set_target(500.0);
        for _ in 0..20 {
            m.update();
        }
        assert_eq!(m.position.y, 500.0);
        assert!(m.is_at_target());

        // Staying put once there.
        m.update();
        assert_eq!(m.position.y, 500.0);
    }

    #[test]
    fn moves_down_towards_larger_y() {
        let mut m = car_at(100.0, 10.0);
        m.set_target(130.0);
        m.update();
        assert_eq!(m.position.y, 110.0);
    }

    #[test]
    fn oscillates_around_unreachable_target() {
        let mut m = car_at(700.0, 10.0);
        m.set_target(655.0);

        let mut seen = vec![m.position.y];
        for _ in 0..8 {
            m.update();
            seen.push(m.position.y);
        }

        assert_eq!(
            seen,
            vec![700.0, 690.0, 680.0, 670.0, 660.0, 650.0, 660.0, 650.0, 660.0]
        );
        assert!(!m.is_at_target());
    }

    #[test]
    fn draws_single_rounded_rect() {
        let mut list = crate::canvas::DrawList::new();
        car_at(300.0, 10.0).draw(&mut list, Rgb::gray(0));
        assert_eq!(list.len(), 1);
        match &list.commands()[0] {
            crate::canvas::DrawCommand::Rect {
                origin,
                corner_radius,
                ..
            } => {
                assert_eq!(origin.y, 300.0);
                assert_eq!(*corner_radius, 5.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
