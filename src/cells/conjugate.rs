//! Conjugate cell: an expression with an overline
//!
//! Besides the inner expression the cell owns two helper atoms,
//! `conjugate(` and `)`, which stand in for the overline once the cell is
//! broken up across lines.

use crate::layout::RenderContext;
use crate::models::{scale_px, Cell, CellBody, CellId, Point, Rect, TextStyle, Worksheet};
use crate::export::AssetSink;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConjugateCell {
    pub(crate) inner: Option<CellId>,
    pub(crate) open: Option<CellId>,
    pub(crate) close: Option<CellId>,
}

impl ConjugateCell {
    pub fn inner(&self) -> Option<CellId> {
        self.inner
    }

    pub(crate) fn owned_lists(&self) -> Vec<CellId> {
        [self.inner, self.open, self.close].into_iter().flatten().collect()
    }
}

impl Worksheet {
    pub fn new_conjugate(&mut self, inner: Option<CellId>) -> CellId {
        let open = self.new_text("conjugate(", TextStyle::Function);
        let close = self.new_text(")", TextStyle::Default);
        let id = self.insert(Cell::new(CellBody::Conjugate(ConjugateCell {
            inner: None,
            open: Some(open),
            close: Some(close),
        })));
        self.set_conjugate_inner(id, inner);
        id
    }

    /// Replace the inner expression, destroying the old one
    pub fn set_conjugate_inner(&mut self, id: CellId, inner: Option<CellId>) {
        let Some(inner) = inner else {
            return;
        };
        let old = match &mut self[id].body {
            CellBody::Conjugate(c) => c.inner.replace(inner),
            _ => {
                log::warn!("set_conjugate_inner on non-conjugate cell {:?}", id);
                return;
            }
        };
        if let Some(old) = old {
            self.destroy(old);
        }
        let group = self[id].group;
        self.set_group_list(Some(inner), group);
        self[id].reset_data();
    }

    fn conjugate(&self, id: CellId) -> ConjugateCell {
        match &self[id].body {
            CellBody::Conjugate(c) => *c,
            _ => ConjugateCell::default(),
        }
    }

    pub(crate) fn conjugate_copy_payload(&mut self, c: &ConjugateCell) -> ConjugateCell {
        ConjugateCell {
            inner: c.inner.map(|i| self.copy_list(i)),
            open: c.open.map(|i| self.copy_list(i)),
            close: c.close.map(|i| self.copy_list(i)),
        }
    }

    pub(crate) fn conjugate_recalculate_widths(&mut self, id: CellId, ctx: &mut RenderContext, font_size: i32) {
        let c = self.conjugate(id);
        let scale = ctx.scale();
        self.recalculate_widths_list(c.inner, ctx, font_size);
        self.recalculate_widths_list(c.open, ctx, font_size);
        self.recalculate_widths_list(c.close, ctx, font_size);

        let width = self.full_width(c.inner, scale) + scale_px(8, scale);
        let cell = &mut self[id];
        cell.geometry.width = width;
        cell.reset_data();
    }

    pub(crate) fn conjugate_recalculate_size(&mut self, id: CellId, ctx: &mut RenderContext, font_size: i32) {
        let c = self.conjugate(id);
        let scale = ctx.scale();
        self.recalculate_size_list(c.inner, ctx, font_size);
        self.recalculate_size_list(c.open, ctx, font_size);
        self.recalculate_size_list(c.close, ctx, font_size);

        let (height, center) = match c.inner {
            Some(inner) => (self.max_height(inner), self.max_center(inner)),
            None => (0, 0),
        };
        let geometry = &mut self[id].geometry;
        geometry.height = height + scale_px(4, scale);
        geometry.center = center + scale_px(2, scale);
    }

    pub(crate) fn conjugate_draw(&mut self, id: CellId, ctx: &mut RenderContext, point: Point, font_size: i32) {
        if self[id].is_broken || !self.draw_this_cell(id, ctx, point) {
            return;
        }
        let c = self.conjugate(id);
        let scale = ctx.scale();

        let inner_at = Point::new(point.x + scale_px(4, scale), point.y);
        self.draw_list(c.inner, ctx, inner_at, font_size);

        let cell = &self[id];
        let pen = ctx.color(cell.pen_style());
        let y = point.y - cell.geometry.center + scale_px(2, scale);
        let from = Point::new(point.x + scale_px(2, scale), y);
        let to = Point::new(point.x + cell.geometry.width - scale_px(2, scale) - 1, y);
        ctx.surface.set_pen(pen);
        ctx.surface.draw_line(from, to);
    }

    /// Splice `conjugate(`, the inner list and `)` into the draw order in
    /// place of this cell
    pub(crate) fn conjugate_break_up(&mut self, id: CellId) -> bool {
        let c = self.conjugate(id);
        let (Some(inner), Some(open), Some(close)) = (c.inner, c.open, c.close) else {
            return false;
        };

        let mut last = inner;
        while let Some(next) = self.next_to_draw(last) {
            last = next;
        }
        let prev = self.previous_to_draw(id);
        let next = self.next_to_draw(id);

        self[open].links.previous_to_draw = prev;
        self[open].links.next_to_draw = Some(inner);
        self[inner].links.previous_to_draw = Some(open);
        self[last].links.next_to_draw = Some(close);
        self[close].links.previous_to_draw = Some(last);
        self[close].links.next_to_draw = next;
        if let Some(next) = next {
            self[next].links.previous_to_draw = Some(close);
        }
        if let Some(prev) = prev {
            self[prev].links.next_to_draw = Some(open);
        }
        self[id].links.next_to_draw = Some(open);
        true
    }

    /// Selection inside the overline, when the rectangle lies within the
    /// inner expression
    pub(crate) fn conjugate_select_inner(&mut self, id: CellId, rect: &Rect) -> (CellId, CellId) {
        if let Some(inner) = self.conjugate(id).inner {
            if self.contains_rect(inner, rect, true) {
                if let Some(found) = self.select_rect(Some(inner), rect) {
                    return found;
                }
            }
        }
        (id, id)
    }

    pub(crate) fn conjugate_to_plain_text(&self, id: CellId) -> String {
        format!("conjugate({})", self.list_to_plain_text(self.conjugate(id).inner))
    }

    pub(crate) fn conjugate_to_tex(&self, id: CellId) -> String {
        format!("\\overline{{{}}}", self.list_to_tex(self.conjugate(id).inner))
    }

    pub(crate) fn conjugate_to_xml(&self, id: CellId, assets: &mut dyn AssetSink) -> String {
        format!("<cj>{}</cj>", self.list_to_xml(self.conjugate(id).inner, assets))
    }
}
