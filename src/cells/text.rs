//! Text atoms - the leaves every expression is built from

use crate::layout::RenderContext;
use crate::models::{scale_px, CellBody, CellId, Point, Size, TextStyle, Worksheet};
use quick_xml::escape::escape;

#[derive(Clone, Debug, PartialEq)]
pub struct TextCell {
    pub text: String,
}

impl TextCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn to_plain_text(&self) -> String {
        self.text.clone()
    }

    pub fn to_tex(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for ch in self.text.chars() {
            match ch {
                '\\' => out.push_str("\\backslash{}"),
                '_' | '%' | '#' | '&' | '$' | '{' | '}' => {
                    out.push('\\');
                    out.push(ch);
                }
                _ => out.push(ch),
            }
        }
        out
    }

    /// Persistence markup; the tag says how the atom was styled
    pub fn to_xml(&self, style: TextStyle, hidden: bool) -> String {
        let tag = if hidden {
            "h"
        } else {
            match style {
                TextStyle::Variable => "v",
                TextStyle::Number => "n",
                TextStyle::Function => "fnm",
                TextStyle::String => "st",
                TextStyle::GreekConstant => "g",
                TextStyle::SpecialConstant => "s",
                TextStyle::Label | TextStyle::MainPrompt | TextStyle::OtherPrompt => "lbl",
                _ => "t",
            }
        };
        format!("<{tag}>{}</{tag}>", escape(self.text.as_str()))
    }
}

impl Worksheet {
    pub fn new_text(&mut self, text: impl Into<String>, style: TextStyle) -> CellId {
        self.insert(crate::models::Cell::text(text, style))
    }

    fn measure_text(&self, id: CellId, ctx: &RenderContext, font_size: i32) -> Size {
        let text = match &self[id].body {
            CellBody::Text(t) => t.text.as_str(),
            _ => "",
        };
        ctx.surface.text_extent(text, scale_px(font_size, ctx.scale()))
    }

    pub(crate) fn text_recalculate_widths(&mut self, id: CellId, ctx: &mut RenderContext, font_size: i32) {
        let extent = self.measure_text(id, ctx, font_size);
        let cell = &mut self[id];
        cell.geometry.width = if cell.is_hidden { 0 } else { extent.width };
        cell.reset_data();
    }

    pub(crate) fn text_recalculate_size(&mut self, id: CellId, ctx: &mut RenderContext, font_size: i32) {
        let extent = self.measure_text(id, ctx, font_size);
        let geometry = &mut self[id].geometry;
        geometry.height = extent.height;
        geometry.center = extent.height / 2;
    }

    pub(crate) fn text_draw(&mut self, id: CellId, ctx: &mut RenderContext, point: Point, font_size: i32) {
        if self[id].is_hidden || !self.draw_this_cell(id, ctx, point) {
            return;
        }
        let cell = &self[id];
        if let CellBody::Text(t) = &cell.body {
            let color = ctx.color(cell.foreground_style());
            let font = scale_px(font_size, ctx.scale());
            ctx.surface.draw_text(&t.text, point, font, color);
        }
    }
}
