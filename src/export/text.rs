//! Plain-text rendering

use crate::models::{CellBody, CellId, Worksheet};

/// What image-bearing cells show in text form
pub const GRAPHICS_TEXT: &str = " (Graphics) ";
pub const SLIDESHOW_TEXT: &str = " << Graphics >> ";

impl Worksheet {
    pub fn to_plain_text(&self, id: CellId) -> String {
        match &self[id].body {
            CellBody::Text(t) => t.to_plain_text(),
            CellBody::Conjugate(_) => self.conjugate_to_plain_text(id),
            CellBody::Diff(_) => self.diff_to_plain_text(id),
            CellBody::Image(_) => GRAPHICS_TEXT.to_string(),
            CellBody::SlideShow(_) => SLIDESHOW_TEXT.to_string(),
        }
    }

    /// Content-order rendering; a cell with an intrinsic line break starts
    /// a new line unless it comes first
    pub fn list_to_plain_text(&self, head: Option<CellId>) -> String {
        let mut out = String::new();
        for (i, id) in self.iter(head).enumerate() {
            if i > 0 && self[id].force_break_line {
                out.push('\n');
            }
            out.push_str(&self.to_plain_text(id));
        }
        out
    }

    /// Text for the clipboard: the alternate copy text when one is set
    pub fn copy_text(&self, id: CellId) -> String {
        let cell = &self[id];
        if cell.alt_copy_text.is_empty() {
            self.to_plain_text(id)
        } else {
            cell.alt_copy_text.clone()
        }
    }
}
