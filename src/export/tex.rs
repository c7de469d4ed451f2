//! TeX rendering

use super::text::{GRAPHICS_TEXT, SLIDESHOW_TEXT};
use crate::models::{CellBody, CellId, TextStyle, Worksheet};

/// Closes one display-math block and opens the next
const DISPLAY_BREAK: &str = "\\]\\[";

impl Worksheet {
    pub fn to_tex(&self, id: CellId) -> String {
        match &self[id].body {
            CellBody::Text(t) => t.to_tex(),
            CellBody::Conjugate(_) => self.conjugate_to_tex(id),
            CellBody::Diff(_) => self.diff_to_tex(id),
            CellBody::Image(_) => GRAPHICS_TEXT.to_string(),
            CellBody::SlideShow(_) => SLIDESHOW_TEXT.to_string(),
        }
    }

    /// Content-order rendering; labels and line breaks start a new display
    /// block once something has been emitted
    pub fn list_to_tex(&self, head: Option<CellId>) -> String {
        let mut out = String::new();
        for id in self.iter(head) {
            let cell = &self[id];
            if !out.is_empty() && (cell.text_style == TextStyle::Label || cell.break_line) {
                out.push_str(DISPLAY_BREAK);
            }
            out.push_str(&self.to_tex(id));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{CellType, TextStyle, Worksheet};

    #[test]
    fn test_label_opens_new_block() {
        let mut sheet = Worksheet::new();
        let label = sheet.new_text("(%o1)", TextStyle::Label);
        sheet[label].set_type(CellType::Label);
        let x = sheet.new_text("x", TextStyle::Variable);
        let label2 = sheet.new_text("(%o2)", TextStyle::Label);
        let y = sheet.new_text("y", TextStyle::Variable);
        let head = sheet.link_list(&[label, x, label2, y]);
        assert_eq!(sheet.list_to_tex(head), "(\\%o1)x\\]\\[(\\%o2)y");
    }

    #[test]
    fn test_conjugate_is_overlined() {
        let mut sheet = Worksheet::new();
        let z = sheet.new_text("z", TextStyle::Variable);
        let conj = sheet.new_conjugate(Some(z));
        assert_eq!(sheet.to_tex(conj), "\\overline{z}");
    }
}
