//! Geometry primitives and the per-cell layout cache

use serde::{Deserialize, Serialize};

/// Horizontal gap between two neighbouring cells, in unscaled pixels
pub const CELL_SKIP: i32 = 2;

/// Vertical gap between two visual lines, in unscaled pixels
pub const LINE_SKIP: i32 = 2;

/// Scale a pixel distance by the zoom factor, rounding to the nearest pixel
pub fn scale_px(px: i32, scale: f64) -> i32 {
    (px as f64 * scale + 0.5) as i32
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in canvas coordinates
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The rectangle reported for cells that are not drawn themselves
    pub const EMPTY: Rect = Rect { x: -1, y: -1, width: 0, height: 0 };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// True if the two rectangles share a non-empty area
    pub fn intersects(&self, other: &Rect) -> bool {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        x < right && y < bottom
    }

    /// True if `other` lies completely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }
}

/// Memoized geometry of one cell
///
/// `width`, `height` and `center` are written by the layout passes. The
/// aggregates are lazily recomputed: `None` means dirty.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
    /// Distance from the top of the cell to its baseline
    pub center: i32,
    pub(crate) max_center: Option<i32>,
    pub(crate) max_drop: Option<i32>,
    pub(crate) full_width: Option<i32>,
    pub(crate) line_width: Option<i32>,
}

impl Geometry {
    /// Height below the baseline
    pub fn drop(&self) -> i32 {
        self.height - self.center
    }

    /// Mark every memoized aggregate dirty
    pub fn invalidate(&mut self) {
        self.max_center = None;
        self.max_drop = None;
        self.full_width = None;
        self.line_width = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.max_center.is_none()
            && self.max_drop.is_none()
            && self.full_width.is_none()
            && self.line_width.is_none()
    }
}

/// Result of exporting a bitmap; `(-1, -1)` signals failure
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub x: i32,
    pub y: i32,
}

impl ImageSize {
    pub const FAILED: ImageSize = ImageSize { x: -1, y: -1 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_failure(&self) -> bool {
        *self == Self::FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_px_rounds() {
        assert_eq!(scale_px(2, 1.0), 2);
        assert_eq!(scale_px(2, 1.3), 3);
        assert_eq!(scale_px(8, 0.5), 4);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::EMPTY));
        assert!(!Rect::EMPTY.intersects(&Rect::new(-5, -5, 10, 10)));
    }

    #[test]
    fn test_rect_contains() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.contains(&Rect::new(2, 2, 3, 3)));
        assert!(a.contains(&a));
        assert!(!a.contains(&Rect::new(8, 8, 3, 3)));
    }

    #[test]
    fn test_invalidate_marks_dirty() {
        let mut g = Geometry {
            width: 4,
            height: 6,
            center: 2,
            max_center: Some(2),
            max_drop: Some(4),
            full_width: Some(4),
            line_width: Some(4),
        };
        assert!(!g.is_dirty());
        g.invalidate();
        assert!(g.is_dirty());
        assert_eq!(g.width, 4);
        assert_eq!(g.drop(), 4);
    }
}
