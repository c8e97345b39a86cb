//! Drawing surface abstraction.
//!
//! The scene never talks to a graphics backend directly.  Everything it
//! draws goes through [`Canvas`], which a backend (window, browser, test)
//! implements.  [`DrawList`] is the built-in implementation: it records
//! commands so a frame can be inspected in tests or streamed as JSON.

use serde::{Deserialize, Serialize};

use crate::types::{Rgb, Size, Vec2};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
}

/// Immediate-mode drawing primitives used by the scene.
pub trait Canvas {
    /// Fill the whole surface.
    fn clear(&mut self, color: Rgb);

    /// Filled rectangle with its top-left corner at `origin`.
    fn rect(&mut self, origin: Vec2, size: Size, fill: Rgb, corner_radius: f32);

    fn line(&mut self, from: Vec2, to: Vec2, stroke: Rgb, weight: f32);

    /// Text whose baseline starts (or is centred, see `align`) at `at`.
    fn text(&mut self, text: &str, at: Vec2, size: f32, align: TextAlign, fill: Rgb);
}

// ---------------------------------------------------------------------------
// Recording canvas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Rgb,
    },
    Rect {
        origin: Vec2,
        size: Size,
        fill: Rgb,
        corner_radius: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Rgb,
        weight: f32,
    },
    Text {
        text: String,
        at: Vec2,
        size: f32,
        align: TextAlign,
        fill: Rgb,
    },
}

/// A [`Canvas`] that records every call in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Forget all recorded commands, keeping the allocation for the next frame.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// All text strings drawn so far, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn rect(&mut self, origin: Vec2, size: Size, fill: Rgb, corner_radius: f32) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            fill,
            corner_radius,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: Rgb, weight: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke,
            weight,
        });
    }

    fn text(&mut self, text: &str, at: Vec2, size: f32, align: TextAlign, fill: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            size,
            align,
            fill,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut list = DrawList::new();
        list.clear(Rgb::gray(250));
        list.rect(Vec2::new(1.0, 2.0), Size::new(3.0, 4.0), Rgb::gray(0), 0.0);
        list.text("hi", Vec2::new(0.0, 0.0), 12.0, TextAlign::Left, Rgb::gray(0));

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::Rect { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["hi"]);
    }

    #[test]
    fn reset_empties_list() {
        let mut list = DrawList::new();
        list.line(Vec2::default(), Vec2::new(1.0, 1.0), Rgb::gray(0), 1.0);
        list.reset();
        assert!(list.is_empty());
    }

    #[test]
    fn commands_serialize_with_op_tag() {
        let mut list = DrawList::new();
        list.clear(Rgb::new(1, 2, 3));
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["commands"][0]["op"], "clear");
        assert_eq!(json["commands"][0]["color"]["g"], 2);
    }
}
