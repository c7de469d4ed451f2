//! Models module for the math cell worksheet
//!
//! This module contains the cell node, the arena holding the content and
//! draw-order lists, and the geometry and style types they use.

pub mod arena;
pub mod cell;
pub mod geometry;
pub mod style;

// Re-export commonly used types
pub use arena::{CellId, ListIter, Worksheet};
pub use cell::{Cell, CellBody, CellKind, GroupId};
pub use geometry::{scale_px, Geometry, ImageSize, Point, Rect, Size, CELL_SKIP, LINE_SKIP};
pub use style::{CellType, TextStyle, STYLE_COUNT};
