//! Persistence markup
//!
//! Bitmaps are not inlined: each one is handed to the [`AssetSink`] and the
//! markup references the name it returns.

use super::sinks::AssetSink;
use crate::models::{CellBody, CellId, Worksheet};

impl Worksheet {
    pub fn to_xml(&self, id: CellId, assets: &mut dyn AssetSink) -> String {
        let cell = &self[id];
        match &cell.body {
            CellBody::Text(t) => t.to_xml(cell.text_style, cell.is_hidden),
            CellBody::Conjugate(_) => self.conjugate_to_xml(id, assets),
            CellBody::Diff(_) => self.diff_to_xml(id, assets),
            CellBody::Image(img) => img.to_xml(assets),
            CellBody::SlideShow(show) => show.to_xml(assets),
        }
    }

    /// Content-order rendering; runs of highlighted cells are wrapped in
    /// `<hl>` elements
    pub fn list_to_xml(&self, head: Option<CellId>, assets: &mut dyn AssetSink) -> String {
        let mut out = String::new();
        let mut highlight = false;
        for id in self.iter(head) {
            let cell_highlight = self[id].highlight;
            if cell_highlight && !highlight {
                out.push_str("<hl>\n");
                highlight = true;
            }
            if !cell_highlight && highlight {
                out.push_str("</hl>\n");
                highlight = false;
            }
            out.push_str(&self.to_xml(id, assets));
        }
        if highlight {
            out.push_str("</hl>\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::export::MemoryAssets;
    use crate::models::{TextStyle, Worksheet};

    #[test]
    fn test_highlight_runs_wrapped_once() {
        let mut sheet = Worksheet::new();
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|t| sheet.new_text(*t, TextStyle::Variable))
            .collect();
        sheet[ids[1]].highlight = true;
        sheet[ids[2]].highlight = true;
        let head = sheet.link_list(&ids);
        let mut assets = MemoryAssets::new();
        assert_eq!(
            sheet.list_to_xml(head, &mut assets),
            "<v>a</v><hl>\n<v>b</v><v>c</v></hl>\n<v>d</v>"
        );
    }

    #[test]
    fn test_trailing_highlight_is_closed() {
        let mut sheet = Worksheet::new();
        let a = sheet.new_text("a", TextStyle::Variable);
        sheet[a].highlight = true;
        let mut assets = MemoryAssets::new();
        assert_eq!(sheet.list_to_xml(Some(a), &mut assets), "<hl>\n<v>a</v></hl>\n");
    }
}
