//! Canvas-relative image scaling
//!
//! Images follow the zoom but never shrink below their natural size because
//! of it, and never grow beyond 90% of the visible canvas on either axis.
//! The width and height passes each call into here with the same inputs, so
//! both land on the same scale factor.

use crate::models::Size;

/// Share of the canvas an image may occupy on each axis
pub const CANVAS_FRACTION: f64 = 0.9;

/// Scale factor for an image of `natural` size under `zoom` on `canvas`
///
/// A non-positive canvas dimension leaves that axis unbounded.
pub fn image_scale(zoom: f64, natural: Size, canvas: Size) -> f64 {
    let mut scale = zoom.max(1.0);

    if canvas.width > 0 && natural.width > 0 {
        let bound = CANVAS_FRACTION * canvas.width as f64;
        if scale * natural.width as f64 > bound {
            scale = bound / natural.width as f64;
        }
    }
    if canvas.height > 0 && natural.height > 0 {
        let bound = CANVAS_FRACTION * canvas.height as f64;
        if scale * natural.height as f64 > bound {
            scale = bound / natural.height as f64;
        }
    }

    scale
}

/// Pixel extent of one axis, rounded and held inside the canvas bound
fn scaled_axis(natural: i32, scale: f64, canvas: i32) -> i32 {
    let px = (scale * natural as f64).round() as i32;
    if canvas > 0 {
        px.min((CANVAS_FRACTION * canvas as f64).floor() as i32)
    } else {
        px
    }
}

/// Laid-out width of an image including its border on both sides
pub fn image_width(zoom: f64, natural: Size, canvas: Size, border: i32) -> i32 {
    let scale = image_scale(zoom, natural, canvas);
    scaled_axis(natural.width, scale, canvas.width) + 2 * border
}

/// Laid-out height of an image including its border on both sides
pub fn image_height(zoom: f64, natural: Size, canvas: Size, border: i32) -> i32 {
    let scale = image_scale(zoom, natural, canvas);
    scaled_axis(natural.height, scale, canvas.height) + 2 * border
}
