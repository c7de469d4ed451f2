//! Layout configuration and the per-cycle rendering context
//!
//! Everything a cell consults while being measured or drawn arrives through
//! [`RenderContext`]: zoom, canvas bound, default frame rate, visible band,
//! colours and the drawing surface. Nothing is read from global state.

use super::surface::Surface;
use crate::models::{Size, TextStyle};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vertical range of the canvas that is currently visible
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub top: i32,
    pub bottom: i32,
}

/// Configuration for layout calculations
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Zoom factor applied to fonts, gaps and images
    pub zoom: f64,

    /// Visible canvas extent; images are capped at 90% of it
    pub canvas_size: Size,

    /// Frame rate of slideshows that have none of their own
    pub default_frame_rate: i32,

    /// Base font size in pixels before zoom
    pub font_size: i32,

    /// Only cells intersecting this band are painted; `None` paints all
    pub visible_band: Option<Band>,

    /// Width available to one visual line
    pub line_width: i32,

    /// Left indent of every visual line
    pub indent: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            canvas_size: Size::new(800, 600),
            default_frame_rate: 2,
            font_size: 12,
            visible_band: None,
            line_width: 600,
            indent: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colour lookup by text style
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Palette {
    colors: HashMap<TextStyle, Color>,
}

impl Palette {
    pub fn new() -> Self {
        Self { colors: HashMap::new() }
    }

    pub fn set(&mut self, style: TextStyle, color: Color) {
        self.colors.insert(style, color);
    }

    /// Colour for `style`; unknown styles fall back to black
    pub fn color(&self, style: TextStyle) -> Color {
        self.colors.get(&style).copied().unwrap_or(Color::BLACK)
    }
}

pub static DEFAULT_PALETTE: Lazy<Palette> = Lazy::new(|| {
    let mut p = Palette::new();
    p.set(TextStyle::Variable, Color::rgb(0, 0, 0));
    p.set(TextStyle::Function, Color::rgb(0, 0, 0));
    p.set(TextStyle::Number, Color::rgb(0, 0, 0));
    p.set(TextStyle::GreekConstant, Color::rgb(0, 0, 0));
    p.set(TextStyle::SpecialConstant, Color::rgb(0, 0, 0));
    p.set(TextStyle::String, Color::rgb(0, 0, 0));
    p.set(TextStyle::MainPrompt, Color::rgb(255, 0, 0));
    p.set(TextStyle::OtherPrompt, Color::rgb(255, 0, 0));
    p.set(TextStyle::Label, Color::rgb(255, 192, 128));
    p.set(TextStyle::Input, Color::rgb(0, 0, 255));
    p.set(TextStyle::Highlight, Color::rgb(255, 0, 0));
    p.set(TextStyle::Error, Color::RED);
    p.set(TextStyle::Text, Color::rgb(0, 0, 0));
    p.set(TextStyle::Title, Color::rgb(0, 0, 0));
    p
});

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE.clone()
    }
}

/// Bundle handed to every layout and draw call of one cycle
pub struct RenderContext<'a> {
    pub config: &'a LayoutConfig,
    pub palette: &'a Palette,
    pub surface: &'a mut dyn Surface,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a LayoutConfig, palette: &'a Palette, surface: &'a mut dyn Surface) -> Self {
        Self { config, palette, surface }
    }

    pub fn scale(&self) -> f64 {
        self.config.zoom
    }

    pub fn canvas_size(&self) -> Size {
        self.config.canvas_size
    }

    pub fn visible_band(&self) -> Option<Band> {
        self.config.visible_band
    }

    pub fn color(&self, style: TextStyle) -> Color {
        self.palette.color(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: LayoutConfig = serde_json::from_str(r#"{"zoom": 2.0}"#).unwrap();
        assert_eq!(config.zoom, 2.0);
        assert_eq!(config.default_frame_rate, 2);
        assert_eq!(config.visible_band, None);
    }

    #[test]
    fn test_palette_fallback() {
        let palette = Palette::default();
        assert_eq!(palette.color(TextStyle::Error), Color::RED);
        assert_eq!(palette.color(TextStyle::CodeOperator), Color::BLACK);
    }
}
