//! `ElevatorEntity` – one shaft, its label and its car.

use super::{MotionEntity, Stage};
use crate::canvas::{Canvas, TextAlign};
use crate::protocol::DoorStatus;
use crate::types::{Layout, Rgb, Vec2};

const SHAFT_FILL: Rgb = Rgb::gray(235);
const LABEL_FILL: Rgb = Rgb::gray(10);
const PASSENGER_LABEL_SIZE: f32 = 16.0;

/// Car colour for each door state.
fn car_fill(door: DoorStatus) -> Rgb {
    match door {
        DoorStatus::Closed => Rgb::new(255, 179, 179),
        DoorStatus::Opening | DoorStatus::Closing => Rgb::new(255, 214, 153),
        DoorStatus::Open => Rgb::new(179, 230, 179),
    }
}

#[derive(Debug, Clone)]
pub struct ElevatorEntity {
    identity: String,
    pub motion: MotionEntity,
    /// x of the shaft's left edge, assigned by the scene layout.
    horizontal_slot: f32,
    door: DoorStatus,
    passengers: Vec<String>,
}

impl ElevatorEntity {
    /// An elevator with a default car resting on the ground floor.
    pub fn new(identity: impl Into<String>) -> Self {
        Self::with_motion(identity, MotionEntity::default())
    }

    pub fn with_motion(identity: impl Into<String>, motion: MotionEntity) -> Self {
        Self {
            identity: identity.into(),
            motion,
            horizontal_slot: 0.0,
            door: DoorStatus::default(),
            passengers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.identity
    }

    pub fn horizontal_slot(&self) -> f32 {
        self.horizontal_slot
    }

    /// Place the shaft at `x`; the car follows, inset from the shaft edge
    /// and sized by `layout`.
    pub fn set_slot(&mut self, x: f32, layout: &Layout) {
        self.horizontal_slot = x;
        self.motion.position.x = x + layout.car_inset;
        self.motion.size = layout.car;
    }

    pub fn set_target(&mut self, y: f32) {
        self.motion.set_target(y);
    }

    pub fn target_y(&self) -> f32 {
        self.motion.target_y
    }

    pub fn door(&self) -> DoorStatus {
        self.door
    }

    pub fn set_door(&mut self, status: DoorStatus) {
        self.door = status;
    }

    pub fn passengers(&self) -> &[String] {
        &self.passengers
    }

    pub fn set_passengers(&mut self, passengers: Vec<String>) {
        self.passengers = passengers;
    }
}

impl Stage for ElevatorEntity {
    fn draw(&self, canvas: &mut dyn Canvas, layout: &Layout) {
        // Shaft
        canvas.rect(
            Vec2::new(self.horizontal_slot, layout.shaft_top),
            layout.shaft,
            SHAFT_FILL,
            0.0,
        );

        // Name above the shaft
        canvas.text(
            &self.identity,
            Vec2::new(
                self.horizontal_slot + layout.shaft.w / 2.0,
                layout.elevator_label_y,
            ),
            layout.elevator_label_size,
            TextAlign::Center,
            LABEL_FILL,
        );

        // Car
        self.motion.draw(canvas, car_fill(self.door));

        if !self.passengers.is_empty() {
            let m = &self.motion;
            canvas.text(
                &self.passengers.len().to_string(),
                Vec2::new(m.position.x + m.size.w / 2.0, m.position.y + m.size.h / 2.0),
                PASSENGER_LABEL_SIZE,
                TextAlign::Center,
                LABEL_FILL,
            );
        }
    }

    fn update(&mut self) {
        self.motion.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, DrawList};
    use crate::types::Size;

    #[test]
    fn slot_moves_car_with_inset() {
        let layout = Layout::default();
        let mut e = ElevatorEntity::new("Ionisch");
        e.set_slot(350.0, &layout);
        assert_eq!(e.horizontal_slot(), 350.0);
        assert_eq!(e.motion.position.x, 360.0);
    }

    #[test]
    fn car_takes_its_size_from_layout() {
        let layout = Layout {
            car: Size::new(60.0, 90.0),
            ..Layout::default()
        };
        let mut e = ElevatorEntity::new("A");
        assert_eq!(e.motion.size, Layout::default().car);

        e.set_slot(50.0, &layout);
        assert_eq!(e.motion.size, Size::new(60.0, 90.0));
    }

    #[test]
    fn set_target_forwards_to_car() {
        let mut e = ElevatorEntity::new("A");
        e.set_target(300.0);
        assert_eq!(e.motion.target_y, 300.0);
        // Nothing moves until update.
        assert_eq!(e.motion.position.y, 700.0);
        e.update();
        assert_eq!(e.motion.position.y, 690.0);
    }

    #[test]
    fn draws_shaft_label_then_car() {
        let layout = Layout::default();
        let mut e = ElevatorEntity::new("Dorisch");
        e.set_slot(50.0, &layout);

        let mut list = DrawList::new();
        e.draw(&mut list, &layout);

        let cmds = list.commands();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(
            &cmds[0],
            DrawCommand::Rect { origin, size, .. }
                if origin.x == 50.0 && origin.y == 50.0 && size.w == 100.0 && size.h == 800.0
        ));
        assert!(matches!(
            &cmds[1],
            DrawCommand::Text { text, at, align: TextAlign::Center, .. }
                if text == "Dorisch" && at.x == 100.0 && at.y == 35.0
        ));
        assert!(matches!(
            &cmds[2],
            DrawCommand::Rect { origin, fill, .. }
                if origin.x == 60.0 && *fill == car_fill(DoorStatus::Closed)
        ));
    }

    #[test]
    fn door_state_changes_car_colour() {
        let layout = Layout::default();
        let mut e = ElevatorEntity::new("A");
        e.set_door(DoorStatus::Open);

        let mut list = DrawList::new();
        e.draw(&mut list, &layout);
        assert!(matches!(
            &list.commands()[2],
            DrawCommand::Rect { fill, .. } if *fill == car_fill(DoorStatus::Open)
        ));
    }

    #[test]
    fn passenger_count_drawn_inside_car() {
        let layout = Layout::default();
        let mut e = ElevatorEntity::new("A");
        e.set_passengers(vec!["Student_0".into(), "Student_3".into()]);

        let mut list = DrawList::new();
        e.draw(&mut list, &layout);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["A", "2"]);
    }
}
