//! The cell node
//!
//! Every cell, whatever its kind, shares identity, style tags, line-breaking
//! flags, the geometry cache and two sets of links: the owning content order
//! (`next`/`previous`) and the observational draw order
//! (`next_to_draw`/`previous_to_draw`). Kind-specific data lives in
//! [`CellBody`].

use super::arena::CellId;
use super::geometry::{Geometry, Point};
use super::style::{CellType, TextStyle};
use crate::cells::{ConjugateCell, DiffCell, ImageCell, SlideShowCell, TextCell};

/// Opaque handle of the worksheet group (input/output block) a cell belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GroupId(pub u64);

/// Which concrete cell this is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Text,
    Conjugate,
    Diff,
    Image,
    SlideShow,
}

/// Kind-specific payload
#[derive(Clone, Debug)]
pub enum CellBody {
    Text(TextCell),
    Conjugate(ConjugateCell),
    Diff(DiffCell),
    Image(ImageCell),
    SlideShow(SlideShowCell),
}

impl CellBody {
    pub fn kind(&self) -> CellKind {
        match self {
            CellBody::Text(_) => CellKind::Text,
            CellBody::Conjugate(_) => CellKind::Conjugate,
            CellBody::Diff(_) => CellKind::Diff,
            CellBody::Image(_) => CellKind::Image,
            CellBody::SlideShow(_) => CellKind::SlideShow,
        }
    }
}

/// Links of one cell into the content list and the draw-order list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Links {
    pub next: Option<CellId>,
    pub previous: Option<CellId>,
    pub next_to_draw: Option<CellId>,
    pub previous_to_draw: Option<CellId>,
}

#[derive(Clone, Debug)]
pub struct Cell {
    pub cell_type: CellType,
    pub text_style: TextStyle,
    pub geometry: Geometry,

    /// Start a new visual line here; recomputed every layout pass
    pub break_line: bool,
    /// This cell always starts a new visual line; survives invalidation
    pub force_break_line: bool,
    /// The cell is elided from the draw order in favour of its children
    pub is_broken: bool,
    pub is_hidden: bool,
    pub highlight: bool,
    /// Leave extra vertical space before the line this cell starts
    pub big_skip: bool,
    pub suppress_multiplication_dot: bool,
    /// Text put on the clipboard instead of the plain-text rendering
    pub alt_copy_text: String,

    pub(crate) links: Links,
    pub(crate) group: Option<GroupId>,
    /// Where the cell was drawn last (left end of its baseline)
    pub(crate) current_point: Option<Point>,

    pub body: CellBody,
}

impl Cell {
    pub fn new(body: CellBody) -> Self {
        let cell_type = match body.kind() {
            CellKind::Image => CellType::Image,
            CellKind::SlideShow => CellType::Slide,
            _ => CellType::Default,
        };
        Self {
            cell_type,
            text_style: TextStyle::Variable,
            geometry: Geometry::default(),
            break_line: false,
            force_break_line: false,
            is_broken: false,
            is_hidden: false,
            highlight: false,
            big_skip: true,
            suppress_multiplication_dot: false,
            alt_copy_text: String::new(),
            links: Links::default(),
            group: None,
            current_point: None,
            body,
        }
    }

    /// Convenience constructor for a text atom
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        let mut cell = Self::new(CellBody::Text(TextCell::new(text)));
        cell.text_style = style;
        cell
    }

    pub fn kind(&self) -> CellKind {
        self.body.kind()
    }

    /// Set the cell type and with it the matching text style
    pub fn set_type(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
        self.text_style = cell_type.default_style();
    }

    pub fn is_math(&self) -> bool {
        self.text_style.is_math()
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    /// Reset memoized geometry; transient line breaks fall back to the
    /// intrinsic one
    pub fn reset_data(&mut self) {
        self.geometry.invalidate();
        self.break_line = self.force_break_line;
    }

    /// Does a visual line start at this cell?
    pub fn break_line_here(&self) -> bool {
        !self.is_broken && (self.break_line || self.force_break_line || self.cell_type.starts_line())
    }

    /// Style whose colour the cell's text is drawn in
    pub fn foreground_style(&self) -> TextStyle {
        if self.highlight {
            return TextStyle::Highlight;
        }
        match self.cell_type {
            CellType::Prompt => TextStyle::OtherPrompt,
            CellType::MainPrompt => TextStyle::MainPrompt,
            CellType::Error => TextStyle::Error,
            CellType::Label => TextStyle::Label,
            _ => self.text_style,
        }
    }

    /// Style whose colour lines and frames are drawn in
    pub fn pen_style(&self) -> TextStyle {
        if self.highlight {
            return TextStyle::Highlight;
        }
        match self.cell_type {
            CellType::Prompt => TextStyle::OtherPrompt,
            CellType::Input => TextStyle::Input,
            _ => TextStyle::Default,
        }
    }

    /// Attributes that travel with a copy: type, style, intrinsic break and
    /// alternate clipboard text. Links and geometry do not.
    pub(crate) fn copy_data_from(&mut self, source: &Cell) {
        self.alt_copy_text = source.alt_copy_text.clone();
        self.force_break_line = source.force_break_line;
        self.cell_type = source.cell_type;
        self.text_style = source.text_style;
    }
}
