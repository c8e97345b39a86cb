//! `FloorEntity` – a horizontal rule with the floor's name beside it.

use super::Stage;
use crate::canvas::{Canvas, TextAlign};
use crate::types::{FloorLabel, Layout, Rgb, Vec2};

const RULE_STROKE: Rgb = Rgb::gray(1);
const LABEL_FILL: Rgb = Rgb::gray(0);

#[derive(Debug, Clone, PartialEq)]
pub struct FloorEntity {
    label: FloorLabel,
    /// y of the rule, assigned by the scene layout every frame.
    vertical_slot: f32,
}

impl FloorEntity {
    pub fn new(label: FloorLabel) -> Self {
        Self {
            label,
            vertical_slot: 0.0,
        }
    }

    pub fn label(&self) -> FloorLabel {
        self.label
    }

    pub fn vertical_slot(&self) -> f32 {
        self.vertical_slot
    }

    pub fn set_slot(&mut self, y: f32) {
        self.vertical_slot = y;
    }
}

impl Stage for FloorEntity {
    fn draw(&self, canvas: &mut dyn Canvas, layout: &Layout) {
        canvas.line(
            Vec2::new(layout.rule_start_x, self.vertical_slot),
            Vec2::new(layout.rule_end_x, self.vertical_slot),
            RULE_STROKE,
            1.0,
        );
        canvas.text(
            self.label.as_str(),
            Vec2::new(layout.floor_label_x, self.vertical_slot),
            layout.floor_label_size,
            TextAlign::Left,
            LABEL_FILL,
        );
    }

    /// Floors are static.
    fn update(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, DrawList};

    #[test]
    fn update_never_changes_state() {
        let mut f = FloorEntity::new(FloorLabel::Second);
        f.set_slot(400.0);
        let before = f.clone();
        for _ in 0..100 {
            f.update();
        }
        assert_eq!(f, before);
    }

    #[test]
    fn draws_rule_and_label_at_slot() {
        let layout = Layout::default();
        let mut f = FloorEntity::new(FloorLabel::First);
        f.set_slot(600.0);

        let mut list = DrawList::new();
        f.draw(&mut list, &layout);

        let cmds = list.commands();
        assert_eq!(cmds.len(), 2);
        assert!(matches!(
            &cmds[0],
            DrawCommand::Line { from, to, .. }
                if from.x == 10.0 && to.x == 1200.0 && from.y == 600.0 && to.y == 600.0
        ));
        assert!(matches!(
            &cmds[1],
            DrawCommand::Text { text, at, .. } if text == "First" && at.x == 1220.0 && at.y == 600.0
        ));
    }
}
