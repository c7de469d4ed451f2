//! Concrete cell kinds and the per-kind dispatch of the cell contract
//!
//! Each kind adds its operations to [`Worksheet`] in its own module; the
//! methods here pick the right one by matching on [`CellBody`].

pub mod bitmap;
pub mod conjugate;
pub mod diff;
pub mod image;
pub mod slideshow;
pub mod text;

pub use bitmap::Bitmap;
pub use conjugate::ConjugateCell;
pub use diff::DiffCell;
pub use image::ImageCell;
pub use slideshow::SlideShowCell;
pub use text::TextCell;

use crate::layout::RenderContext;
use crate::models::{Cell, CellBody, CellId, CellKind, Point, Worksheet};

impl Worksheet {
    /// Deep copy of a single cell and everything it owns, unlinked
    pub fn copy(&mut self, id: CellId) -> CellId {
        let body = match self[id].body.clone() {
            CellBody::Conjugate(c) => CellBody::Conjugate(self.conjugate_copy_payload(&c)),
            CellBody::Diff(d) => CellBody::Diff(self.diff_copy_payload(&d)),
            other => other,
        };
        let mut copy = Cell::new(body);
        let source = &self[id];
        copy.copy_data_from(source);
        copy.is_hidden = source.is_hidden;
        self.insert(copy)
    }

    /// Free everything the cell owns but not the cell itself or its tail
    pub fn release(&mut self, id: CellId) {
        for child in self.owned_lists(id) {
            self.destroy(child);
        }
        let cell = &mut self[id];
        match &mut cell.body {
            CellBody::Conjugate(c) => *c = ConjugateCell::default(),
            CellBody::Diff(d) => *d = DiffCell::default(),
            CellBody::Image(img) => img.bitmap = None,
            CellBody::SlideShow(show) => *show = SlideShowCell::default(),
            CellBody::Text(_) => {}
        }
        cell.reset_data();
    }

    /// Heads of the sub-lists a compound cell owns
    pub(crate) fn owned_lists(&self, id: CellId) -> Vec<CellId> {
        match &self[id].body {
            CellBody::Conjugate(c) => c.owned_lists(),
            CellBody::Diff(d) => d.owned_lists(),
            _ => Vec::new(),
        }
    }

    /// Width pass for one cell; sub-lists are measured first
    pub fn recalculate_widths(&mut self, id: CellId, ctx: &mut RenderContext, font_size: i32) {
        match self[id].kind() {
            CellKind::Text => self.text_recalculate_widths(id, ctx, font_size),
            CellKind::Conjugate => self.conjugate_recalculate_widths(id, ctx, font_size),
            CellKind::Diff => self.diff_recalculate_widths(id, ctx, font_size),
            CellKind::Image | CellKind::SlideShow => {
                self.image_recalculate_widths(id, ctx)
            }
        }
    }

    /// Height and center pass for one cell; widths must be final
    pub fn recalculate_size(&mut self, id: CellId, ctx: &mut RenderContext, font_size: i32) {
        match self[id].kind() {
            CellKind::Text => self.text_recalculate_size(id, ctx, font_size),
            CellKind::Conjugate => self.conjugate_recalculate_size(id, ctx, font_size),
            CellKind::Diff => self.diff_recalculate_size(id, ctx, font_size),
            CellKind::Image | CellKind::SlideShow => {
                self.image_recalculate_size(id, ctx)
            }
        }
    }

    /// Paint one cell with its baseline's left end at `point` and remember
    /// where it went
    pub fn draw(&mut self, id: CellId, ctx: &mut RenderContext, point: Point, font_size: i32) {
        match self[id].kind() {
            CellKind::Text => self.text_draw(id, ctx, point, font_size),
            CellKind::Conjugate => self.conjugate_draw(id, ctx, point, font_size),
            CellKind::Diff => self.diff_draw(id, ctx, point, font_size),
            CellKind::Image => self.image_draw(id, ctx, point),
            CellKind::SlideShow => self.slideshow_draw(id, ctx, point),
        }
        self[id].current_point = Some(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TextStyle;

    #[test]
    fn test_copy_is_independent() {
        let mut sheet = Worksheet::new();
        let inner = sheet.new_text("z", TextStyle::Variable);
        let conj = sheet.new_conjugate(Some(inner));
        sheet[conj].force_break_line = true;

        let copy = sheet.copy(conj);
        assert_ne!(copy, conj);
        assert_eq!(sheet[copy].kind(), CellKind::Conjugate);
        assert!(sheet[copy].force_break_line);

        let copied_inner = match &sheet[copy].body {
            CellBody::Conjugate(c) => c.inner().unwrap(),
            _ => unreachable!(),
        };
        assert_ne!(copied_inner, inner);

        sheet.destroy(conj);
        assert_eq!(sheet.to_plain_text(copy), "conjugate(z)");
    }

    #[test]
    fn test_release_frees_sub_lists_only() {
        let mut sheet = Worksheet::new();
        let inner = sheet.new_text("z", TextStyle::Variable);
        let conj = sheet.new_conjugate(Some(inner));
        // conjugate, inner, `conjugate(` and `)`
        assert_eq!(sheet.len(), 4);
        sheet.release(conj);
        assert_eq!(sheet.len(), 1);
        assert!(!sheet.contains(inner));
        assert!(sheet.contains(conj));
    }
}
