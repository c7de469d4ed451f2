//! Drawing surfaces
//!
//! Cells paint through the [`Surface`] trait. [`DisplayList`] is the surface
//! used by the JS host and by tests: it records every call as a serializable
//! command and measures text with fixed-advance metrics.

use super::context::Color;
use crate::cells::Bitmap;
use crate::models::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

pub trait Surface {
    /// Extent of `text` rendered at `font_size`
    fn text_extent(&self, text: &str, font_size: i32) -> Size;

    /// Colour used by subsequent line and frame calls
    fn set_pen(&mut self, color: Color);

    fn draw_rect(&mut self, rect: Rect);

    fn draw_line(&mut self, from: Point, to: Point);

    /// Draw `text` with its baseline's left end at `at`
    fn draw_text(&mut self, text: &str, at: Point, font_size: i32, color: Color);

    /// Blit `bitmap` scaled into `dest`
    fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Rect);
}

/// A single recorded draw call
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect { rect: Rect, color: Color },
    Line { from: Point, to: Point, color: Color },
    Text { text: String, x: i32, y: i32, font_size: i32, color: Color },
    Bitmap { width: u32, height: u32, dest: Rect, caption: Vec<String> },
}

/// Recording surface
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
    #[serde(skip)]
    pen: Option<Color>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self { commands: Vec::new(), pen: None }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded text commands, in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for DisplayList {
    /// Every character advances by half the font size; height is the font size
    fn text_extent(&self, text: &str, font_size: i32) -> Size {
        let chars = text.chars().count() as i32;
        Size::new((chars * font_size + 1) / 2, font_size)
    }

    fn set_pen(&mut self, color: Color) {
        self.pen = Some(color);
    }

    fn draw_rect(&mut self, rect: Rect) {
        let color = self.pen.unwrap_or(Color::BLACK);
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        let color = self.pen.unwrap_or(Color::BLACK);
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_text(&mut self, text: &str, at: Point, font_size: i32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x: at.x,
            y: at.y,
            font_size,
            color,
        });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Rect) {
        self.commands.push(DrawCommand::Bitmap {
            width: bitmap.width(),
            height: bitmap.height(),
            dest,
            caption: bitmap.caption().to_vec(),
        });
    }
}
