//! Building cell lists from a serialized description
//!
//! The host hands over a JSON array of cells; compound cells nest their
//! sub-expressions as arrays of the same shape:
//!
//! ```json
//! [{"kind": "text", "text": "a", "style": 1},
//!  {"kind": "conjugate", "inner": [{"kind": "text", "text": "z"}]}]
//! ```

use crate::cells::{Bitmap, ImageCell, SlideShowCell};
use crate::error::BuildError;
use crate::models::{Cell, CellBody, CellId, CellType, TextStyle, Worksheet};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CellSpec {
    #[serde(flatten)]
    pub content: ContentSpec,
    #[serde(default)]
    pub cell_type: Option<CellType>,
    #[serde(default)]
    pub force_break_line: bool,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub hidden: bool,
}

/// Encoded image with the name it is known by
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ImageData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: Vec<u8>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentSpec {
    Text {
        text: String,
        #[serde(default)]
        style: TextStyle,
    },
    Conjugate {
        inner: Vec<CellSpec>,
    },
    Diff {
        base: Vec<CellSpec>,
        diff: Vec<CellSpec>,
    },
    Image {
        #[serde(flatten)]
        image: ImageData,
        #[serde(default = "default_true")]
        draw_rectangle: bool,
    },
    #[serde(rename = "slideshow")]
    SlideShow {
        frames: Vec<ImageData>,
        #[serde(default)]
        frame_rate: Option<i32>,
    },
}

fn default_true() -> bool {
    true
}

impl Worksheet {
    /// Parse a JSON cell list and build it; returns the list head
    pub fn from_json(&mut self, json: &str) -> Result<CellId, BuildError> {
        let specs: Vec<CellSpec> = serde_json::from_str(json)?;
        self.build_list(&specs).ok_or(BuildError::Empty)
    }

    /// Build a content list; `None` for an empty description
    pub fn build_list(&mut self, specs: &[CellSpec]) -> Option<CellId> {
        let ids: Vec<CellId> = specs.iter().map(|spec| self.build_cell(spec)).collect();
        self.link_list(&ids)
    }

    pub fn build_cell(&mut self, spec: &CellSpec) -> CellId {
        let id = match &spec.content {
            ContentSpec::Text { text, style } => self.new_text(text.as_str(), *style),
            ContentSpec::Conjugate { inner } => {
                let inner = self.build_list(inner);
                self.new_conjugate(inner)
            }
            ContentSpec::Diff { base, diff } => {
                let base = self.build_list(base);
                let diff = self.build_list(diff);
                self.new_diff(base, diff)
            }
            ContentSpec::Image { image, draw_rectangle } => {
                let mut cell = ImageCell::new(Bitmap::from_bytes(&image.name, &image.data));
                cell.draw_rectangle = *draw_rectangle;
                self.insert(Cell::new(CellBody::Image(cell)))
            }
            ContentSpec::SlideShow { frames, frame_rate } => {
                let frames: Vec<(String, Vec<u8>)> = frames
                    .iter()
                    .map(|f| (f.name.clone(), f.data.clone()))
                    .collect();
                let mut show = SlideShowCell::from_bytes(&frames);
                if let Some(rate) = frame_rate {
                    show.set_frame_rate(*rate);
                }
                self.new_slideshow(show)
            }
        };

        let cell = &mut self[id];
        if let Some(cell_type) = spec.cell_type {
            cell.set_type(cell_type);
        }
        cell.force_break_line = spec.force_break_line;
        cell.highlight = spec.highlight;
        cell.is_hidden = spec.hidden;
        cell.reset_data();
        id
    }
}
