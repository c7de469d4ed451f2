//! Line breaking and draw-order maintenance
//!
//! A compound cell that does not fit a line can be "broken up": its helper
//! atoms and sub-lists are spliced into the draw order in its place, so the
//! line breaker can wrap between them. The content order never changes.
//!
//! A broken cell stays in the content list and keeps its own `next_to_draw`
//! pointing at its first spliced child, while its draw predecessor skips it.
//! Its own `previous_to_draw` is not maintained; the real neighbours are
//! read off the first and last spliced parts.

use crate::models::{scale_px, CellBody, CellId, CellKind, Worksheet, CELL_SKIP};

impl Worksheet {
    /// Splice the cell's parts into the draw order in its place
    ///
    /// Returns `false` when the kind cannot be broken up or the cell
    /// already is.
    pub fn break_up(&mut self, id: CellId) -> bool {
        if self[id].is_broken || self[id].kind() != CellKind::Conjugate {
            return false;
        }
        self[id].is_broken = true;
        if !self.conjugate_break_up(id) {
            self[id].is_broken = false;
            return false;
        }
        self[id].reset_data();
        log::debug!("broke up {:?}", id);
        true
    }

    /// Which cell draws right before a broken cell's spliced parts
    fn broken_predecessor(&self, id: CellId) -> Option<CellId> {
        match &self[id].body {
            CellBody::Conjugate(c) => match c.open {
                Some(open) => self.previous_to_draw(open),
                None => self.previous_to_draw(id),
            },
            _ => self.previous_to_draw(id),
        }
    }

    /// Where the draw order continues after a broken cell's spliced parts
    fn broken_successor(&self, id: CellId) -> Option<CellId> {
        match &self[id].body {
            CellBody::Conjugate(c) => match c.close {
                Some(close) => self.next_to_draw(close),
                None => self.next_to_draw(id),
            },
            _ => self.next_to_draw(id),
        }
    }

    /// Undo [`Worksheet::break_up`]; a cell that is not broken is left alone
    pub fn unbreak(&mut self, id: CellId) {
        if !self[id].is_broken {
            return;
        }
        let prev = self.broken_predecessor(id);
        let after = self.broken_successor(id);

        self[id].is_broken = false;
        self[id].links.previous_to_draw = prev;
        self[id].links.next_to_draw = after;
        if let Some(after) = after {
            self[after].links.previous_to_draw = Some(id);
        }
        if let Some(prev) = prev {
            self[prev].links.next_to_draw = Some(id);
        }

        for child in self.owned_lists(id) {
            self.unbreak_list(Some(child));
        }
        self[id].reset_data();
    }

    /// Collapse every break in the list; afterwards the draw order equals
    /// the content order again
    pub fn unbreak_list(&mut self, head: Option<CellId>) {
        let Some(head) = head else {
            return;
        };
        self[head].links.previous_to_draw = None;

        let mut cur = Some(head);
        while let Some(id) = cur {
            let next = self.next(id);
            self.unbreak(id);
            self[id].links.next_to_draw = next;
            if let Some(next) = next {
                self[next].links.previous_to_draw = Some(id);
            }
            cur = next;
        }
    }

    /// Break up every cell wider than `client_width`, walking the draw
    /// order so the parts of a broken cell get their turn too
    ///
    /// Returns how many cells were broken up.
    pub fn break_up_cells(&mut self, head: Option<CellId>, client_width: i32) -> usize {
        let mut count = 0;
        let mut cur = head;
        while let Some(id) = cur {
            let cell = &self[id];
            if !cell.is_broken && cell.geometry.width > client_width && self.break_up(id) {
                count += 1;
            }
            cur = self.next_to_draw(id);
        }
        count
    }

    /// Decide where visual lines start
    ///
    /// Walks the draw order, resetting each cell's cache. A line starts at a
    /// cell that forces one, or where the cell would make the running width
    /// exceed `full_width`. The running width counts one gap after every cell.
    pub fn break_lines(&mut self, head: Option<CellId>, full_width: i32, scale: f64) {
        let gap = scale_px(CELL_SKIP, scale);
        let mut current = 0;
        let mut lines = 0;

        let mut cur = head;
        while let Some(id) = cur {
            let cell = &mut self[id];
            cell.reset_data();
            cell.break_line = false;
            if !cell.is_broken {
                let width = cell.geometry.width;
                if cell.break_line_here() || current + width > full_width {
                    cell.break_line = true;
                    current = 0;
                    lines += 1;
                }
                current += width + gap;
            }
            cur = cell.links.next_to_draw;
        }
        log::debug!("break_lines: {} line starts within width {}", lines, full_width);
    }
}
