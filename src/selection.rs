//! Rectangle selection over the draw order

use crate::models::{CellId, CellKind, Rect, Worksheet};

impl Worksheet {
    /// First and last drawn cells hit by `rect`
    ///
    /// When only one cell is hit, a compound cell may narrow the selection
    /// down to part of one of its sub-expressions.
    pub fn select_rect(&mut self, head: Option<CellId>, rect: &Rect) -> Option<(CellId, CellId)> {
        let first = self.select_first(head, rect)?;
        let last = self.select_last(first, rect);
        if first == last {
            return Some(self.select_inner(first, rect));
        }
        Some((first, last))
    }

    /// First cell in draw order whose own rectangle meets `rect`
    pub fn select_first(&mut self, head: Option<CellId>, rect: &Rect) -> Option<CellId> {
        let ids: Vec<CellId> = self.iter_draw(head).collect();
        ids.into_iter().find(|&id| self.rect(id, false).intersects(rect))
    }

    /// Last cell, from `first` on, whose own rectangle meets `rect`
    pub fn select_last(&mut self, first: CellId, rect: &Rect) -> CellId {
        let ids: Vec<CellId> = self.iter_draw(Some(first)).collect();
        let mut last = first;
        for id in ids {
            if self.rect(id, false).intersects(rect) {
                last = id;
            }
        }
        last
    }

    /// Narrow a single-cell selection into the cell's sub-expression
    pub fn select_inner(&mut self, id: CellId, rect: &Rect) -> (CellId, CellId) {
        match self[id].kind() {
            CellKind::Conjugate => self.conjugate_select_inner(id, rect),
            CellKind::Diff => self.diff_select_inner(id, rect),
            _ => (id, id),
        }
    }
}
