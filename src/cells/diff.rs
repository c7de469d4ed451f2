//! Differentiation cell: the differential operator followed by its base

use crate::export::AssetSink;
use crate::layout::RenderContext;
use crate::models::{scale_px, Cell, CellBody, CellId, Point, Rect, Worksheet, CELL_SKIP};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffCell {
    pub(crate) base: Option<CellId>,
    pub(crate) diff: Option<CellId>,
}

impl DiffCell {
    pub fn base(&self) -> Option<CellId> {
        self.base
    }

    pub fn diff(&self) -> Option<CellId> {
        self.diff
    }

    pub(crate) fn owned_lists(&self) -> Vec<CellId> {
        [self.base, self.diff].into_iter().flatten().collect()
    }
}

impl Worksheet {
    pub fn new_diff(&mut self, base: Option<CellId>, diff: Option<CellId>) -> CellId {
        let id = self.insert(Cell::new(CellBody::Diff(DiffCell::default())));
        self.set_diff_base(id, base);
        self.set_diff_arg(id, diff);
        id
    }

    pub fn set_diff_base(&mut self, id: CellId, base: Option<CellId>) {
        let Some(base) = base else {
            return;
        };
        let old = match &mut self[id].body {
            CellBody::Diff(d) => d.base.replace(base),
            _ => {
                log::warn!("set_diff_base on non-diff cell {:?}", id);
                return;
            }
        };
        if let Some(old) = old {
            self.destroy(old);
        }
        let group = self[id].group;
        self.set_group_list(Some(base), group);
        self[id].reset_data();
    }

    /// Replace the differential operand; it is never shown with a
    /// multiplication dot
    pub fn set_diff_arg(&mut self, id: CellId, diff: Option<CellId>) {
        let Some(diff) = diff else {
            return;
        };
        let old = match &mut self[id].body {
            CellBody::Diff(d) => d.diff.replace(diff),
            _ => {
                log::warn!("set_diff_arg on non-diff cell {:?}", id);
                return;
            }
        };
        if let Some(old) = old {
            self.destroy(old);
        }
        self[diff].suppress_multiplication_dot = true;
        let group = self[id].group;
        self.set_group_list(Some(diff), group);
        self[id].reset_data();
    }

    fn diff_cell(&self, id: CellId) -> DiffCell {
        match &self[id].body {
            CellBody::Diff(d) => *d,
            _ => DiffCell::default(),
        }
    }

    pub(crate) fn diff_copy_payload(&mut self, d: &DiffCell) -> DiffCell {
        DiffCell {
            base: d.base.map(|i| self.copy_list(i)),
            diff: d.diff.map(|i| {
                let copy = self.copy_list(i);
                self[copy].suppress_multiplication_dot = true;
                copy
            }),
        }
    }

    pub(crate) fn diff_recalculate_widths(&mut self, id: CellId, ctx: &mut RenderContext, font_size: i32) {
        let d = self.diff_cell(id);
        let scale = ctx.scale();
        self.recalculate_widths_list(d.base, ctx, font_size);
        self.recalculate_widths_list(d.diff, ctx, font_size);

        let width = self.full_width(d.base, scale)
            + self.full_width(d.diff, scale)
            + 2 * scale_px(CELL_SKIP, scale);
        let cell = &mut self[id];
        cell.geometry.width = width;
        cell.reset_data();
    }

    pub(crate) fn diff_recalculate_size(&mut self, id: CellId, ctx: &mut RenderContext, font_size: i32) {
        let d = self.diff_cell(id);
        self.recalculate_size_list(d.base, ctx, font_size);
        self.recalculate_size_list(d.diff, ctx, font_size);

        let mut center = 0;
        let mut drop = 0;
        for head in [d.base, d.diff].into_iter().flatten() {
            center = center.max(self.max_center(head));
            drop = drop.max(self.max_drop(head));
        }
        let geometry = &mut self[id].geometry;
        geometry.center = center;
        geometry.height = center + drop;
    }

    pub(crate) fn diff_draw(&mut self, id: CellId, ctx: &mut RenderContext, point: Point, font_size: i32) {
        if !self.draw_this_cell(id, ctx, point) {
            return;
        }
        let d = self.diff_cell(id);
        let scale = ctx.scale();

        self.draw_list(d.diff, ctx, point, font_size);
        let offset = self.full_width(d.diff, scale) + 2 * scale_px(CELL_SKIP, scale);
        self.draw_list(d.base, ctx, Point::new(point.x + offset, point.y), font_size);
    }

    /// Selection inside the base expression, if it holds the rectangle
    pub(crate) fn diff_select_inner(&mut self, id: CellId, rect: &Rect) -> (CellId, CellId) {
        if let Some(base) = self.diff_cell(id).base {
            if self.contains_rect(base, rect, true) {
                if let Some(found) = self.select_rect(Some(base), rect) {
                    return found;
                }
            }
        }
        (id, id)
    }

    pub(crate) fn diff_to_plain_text(&self, id: CellId) -> String {
        let d = self.diff_cell(id);
        format!(
            "'diff({},{})",
            self.list_to_plain_text(d.base),
            self.list_to_plain_text(d.diff)
        )
    }

    pub(crate) fn diff_to_tex(&self, id: CellId) -> String {
        let d = self.diff_cell(id);
        self.list_to_tex(d.diff) + &self.list_to_tex(d.base)
    }

    pub(crate) fn diff_to_xml(&self, id: CellId, assets: &mut dyn AssetSink) -> String {
        let d = self.diff_cell(id);
        let base = self.list_to_xml(d.base, assets);
        let diff = self.list_to_xml(d.diff, assets);
        format!("<d>{}{}</d>", base, diff)
    }
}
