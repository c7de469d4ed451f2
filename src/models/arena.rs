//! Cell storage and the two list orders
//!
//! All cells of a worksheet live in one arena and are addressed by `CellId`.
//! A content list is owned by its head: destroying a cell destroys its whole
//! tail unless the tail was detached first. The draw-order links and the
//! `previous`/`group` back-references are observational and never take part
//! in destruction.

use super::cell::{Cell, GroupId};
use std::ops::{Index, IndexMut};

/// Stable handle of a cell inside a [`Worksheet`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u32);

impl CellId {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u32) -> Self {
        CellId(raw)
    }

    /// Raw slot index, for handing ids across the JS boundary
    pub fn index(self) -> u32 {
        self.0
    }
}

pub struct Worksheet {
    slots: Vec<Option<Cell>>,
    free: Vec<u32>,
    /// Zoom of the last layout or draw, used when measuring drawn lines
    scale: f64,
}

impl Default for Worksheet {
    fn default() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), scale: 1.0 }
    }
}

impl Worksheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Switching zoom drops every memoized line width
    pub(crate) fn set_scale(&mut self, scale: f64) {
        if self.scale != scale {
            for cell in self.slots.iter_mut().flatten() {
                cell.geometry.line_width = None;
            }
        }
        self.scale = scale;
    }

    /// Store a cell; it starts unlinked
    pub fn insert(&mut self, mut cell: Cell) -> CellId {
        cell.links = Default::default();
        match self.free.pop() {
            Some(raw) => {
                self.slots[raw as usize] = Some(cell);
                CellId(raw)
            }
            None => {
                self.slots.push(Some(cell));
                CellId((self.slots.len() - 1) as u32)
            }
        }
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.slots.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.slots.get_mut(id.0 as usize).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live cells, including those owned by compound cells
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn next(&self, id: CellId) -> Option<CellId> {
        self[id].links.next
    }

    pub fn previous(&self, id: CellId) -> Option<CellId> {
        self[id].links.previous
    }

    pub fn next_to_draw(&self, id: CellId) -> Option<CellId> {
        self[id].links.next_to_draw
    }

    pub fn previous_to_draw(&self, id: CellId) -> Option<CellId> {
        self[id].links.previous_to_draw
    }

    pub fn group(&self, id: CellId) -> Option<GroupId> {
        self[id].group
    }

    /// First cell of the content list `id` is part of
    pub fn first(&self, id: CellId) -> CellId {
        let mut cur = id;
        while let Some(prev) = self[cur].links.previous {
            cur = prev;
        }
        cur
    }

    /// Last cell of the content list `id` is part of
    pub fn last(&self, id: CellId) -> CellId {
        let mut cur = id;
        while let Some(next) = self[cur].links.next {
            cur = next;
        }
        cur
    }

    /// Content-order traversal starting at `head`
    pub fn iter(&self, head: Option<CellId>) -> ListIter<'_> {
        ListIter { sheet: self, cur: head, draw_order: false }
    }

    /// Draw-order traversal starting at `head`; broken cells are skipped
    pub fn iter_draw(&self, head: Option<CellId>) -> ListIter<'_> {
        ListIter { sheet: self, cur: head, draw_order: true }
    }

    pub fn list_len(&self, head: Option<CellId>) -> usize {
        self.iter(head).count()
    }

    /// Append the list starting at `tail` to the list containing `head`
    ///
    /// The appended cells are linked into both the content order and the
    /// draw order; aggregates of the receiving list become dirty.
    pub fn append_cell(&mut self, head: CellId, tail: Option<CellId>) {
        let Some(tail) = tail else {
            return;
        };

        let last_in_list = self.last(head);
        self[last_in_list].links.next = Some(tail);
        self[tail].links.previous = Some(last_in_list);

        let mut last_to_draw = last_in_list;
        while let Some(next) = self[last_to_draw].links.next_to_draw {
            last_to_draw = next;
        }
        self[last_to_draw].links.next_to_draw = Some(tail);
        self[tail].links.previous_to_draw = Some(last_to_draw);

        self.invalidate_list(Some(self.first(head)));
    }

    /// Build a list from individually inserted cells, in order
    pub fn link_list(&mut self, ids: &[CellId]) -> Option<CellId> {
        let (&head, rest) = ids.split_first()?;
        for &id in rest {
            self.append_cell(head, Some(id));
        }
        Some(head)
    }

    /// Cut the list after `id`; the returned tail is now owned by the caller
    pub fn detach_next(&mut self, id: CellId) -> Option<CellId> {
        let tail = self[id].links.next.take()?;
        self[tail].links.previous = None;
        if self[id].links.next_to_draw == Some(tail) {
            self[id].links.next_to_draw = None;
        }
        if self[tail].links.previous_to_draw == Some(id) {
            self[tail].links.previous_to_draw = None;
        }
        self.invalidate_list(Some(self.first(id)));
        Some(tail)
    }

    /// Destroy `head` together with everything it owns: its kind-specific
    /// payload and the whole content tail after it
    pub fn destroy(&mut self, head: CellId) {
        if let Some(prev) = self[head].links.previous {
            self[prev].links.next = None;
            if self[prev].links.next_to_draw == Some(head) {
                self[prev].links.next_to_draw = None;
            }
        }

        let mut cur = Some(head);
        while let Some(id) = cur {
            cur = self[id].links.next;
            self.release(id);
            self.slots[id.0 as usize] = None;
            self.free.push(id.0);
        }
    }

    /// Set the owning group on every cell of a list and of the lists they own
    pub fn set_group_list(&mut self, head: Option<CellId>, group: Option<GroupId>) {
        let mut cur = head;
        while let Some(id) = cur {
            self[id].group = group;
            for child in self.owned_lists(id) {
                self.set_group_list(Some(child), group);
            }
            cur = self[id].links.next;
        }
    }

    /// Deep-copy a whole list; the copy keeps content order, shares nothing
    /// with the source, and is unlinked from any group
    pub fn copy_list(&mut self, head: CellId) -> CellId {
        let dest_head = self.copy(head);
        let mut src = self[head].links.next;
        while let Some(id) = src {
            let copy = self.copy(id);
            self.append_cell(dest_head, Some(copy));
            src = self[id].links.next;
        }
        dest_head
    }

    /// Mark the geometry of every cell in the list dirty
    pub fn invalidate_list(&mut self, head: Option<CellId>) {
        let mut cur = head;
        while let Some(id) = cur {
            self[id].reset_data();
            cur = self[id].links.next;
        }
    }
}

impl Index<CellId> for Worksheet {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Cell {
        match self.get(id) {
            Some(cell) => cell,
            None => panic!("use of released cell {:?}", id),
        }
    }
}

impl IndexMut<CellId> for Worksheet {
    fn index_mut(&mut self, id: CellId) -> &mut Cell {
        match self.get_mut(id) {
            Some(cell) => cell,
            None => panic!("use of released cell {:?}", id),
        }
    }
}

/// Walks one of the two list orders
pub struct ListIter<'a> {
    sheet: &'a Worksheet,
    cur: Option<CellId>,
    draw_order: bool,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        loop {
            let id = self.cur?;
            let cell = &self.sheet[id];
            if self.draw_order {
                self.cur = cell.links.next_to_draw;
                if cell.is_broken {
                    continue;
                }
            } else {
                self.cur = cell.links.next;
            }
            return Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::TextStyle;

    fn text_list(sheet: &mut Worksheet, items: &[&str]) -> Option<CellId> {
        let ids: Vec<CellId> = items
            .iter()
            .map(|t| sheet.insert(Cell::text(*t, TextStyle::Variable)))
            .collect();
        sheet.link_list(&ids)
    }

    #[test]
    fn test_append_links_both_orders() {
        let mut sheet = Worksheet::new();
        let a = text_list(&mut sheet, &["a", "b", "c"]);
        let b = text_list(&mut sheet, &["d", "e"]);
        sheet.append_cell(a.unwrap(), b);

        let content: Vec<CellId> = sheet.iter(a).collect();
        let draw: Vec<CellId> = sheet.iter_draw(a).collect();
        assert_eq!(content.len(), 5);
        assert_eq!(content, draw);
        for pair in content.windows(2) {
            assert_eq!(sheet.previous(pair[1]), Some(pair[0]));
            assert_eq!(sheet.previous_to_draw(pair[1]), Some(pair[0]));
        }
    }

    #[test]
    fn test_append_none_is_noop() {
        let mut sheet = Worksheet::new();
        let a = text_list(&mut sheet, &["a"]).unwrap();
        sheet.append_cell(a, None);
        assert_eq!(sheet.list_len(Some(a)), 1);
    }

    #[test]
    fn test_destroy_frees_tail() {
        let mut sheet = Worksheet::new();
        let head = text_list(&mut sheet, &["a", "b", "c"]).unwrap();
        assert_eq!(sheet.len(), 3);
        sheet.destroy(head);
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_detach_keeps_tail_alive() {
        let mut sheet = Worksheet::new();
        let head = text_list(&mut sheet, &["a", "b", "c"]).unwrap();
        let tail = sheet.detach_next(head).unwrap();
        sheet.destroy(head);
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.list_len(Some(tail)), 2);
        assert_eq!(sheet.previous(tail), None);
    }

    #[test]
    fn test_destroy_mid_list_truncates_owner() {
        let mut sheet = Worksheet::new();
        let head = text_list(&mut sheet, &["a", "b", "c"]).unwrap();
        let second = sheet.next(head).unwrap();
        sheet.destroy(second);
        assert_eq!(sheet.list_len(Some(head)), 1);
        assert_eq!(sheet.next_to_draw(head), None);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut sheet = Worksheet::new();
        let a = sheet.insert(Cell::text("a", TextStyle::Variable));
        sheet.destroy(a);
        let b = sheet.insert(Cell::text("b", TextStyle::Variable));
        assert_eq!(a, b);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_first_and_last() {
        let mut sheet = Worksheet::new();
        let head = text_list(&mut sheet, &["a", "b", "c"]).unwrap();
        let last = sheet.last(head);
        assert_eq!(sheet.first(last), head);
        assert_eq!(sheet.next(last), None);
    }

    #[test]
    fn test_group_propagates() {
        let mut sheet = Worksheet::new();
        let head = text_list(&mut sheet, &["a", "b"]);
        sheet.set_group_list(head, Some(GroupId(4)));
        for id in sheet.iter(head).collect::<Vec<_>>() {
            assert_eq!(sheet.group(id), Some(GroupId(4)));
        }
    }
}
