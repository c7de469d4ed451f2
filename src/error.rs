//! Error types
//!
//! None of these cross the layout/draw/serialize contract: exports map them
//! to `ImageSize::FAILED`, decode failures become placeholder bitmaps. They
//! exist so the helpers underneath can use `?`.

use thiserror::Error;

/// Failures while writing bitmaps out of the worksheet
#[derive(Debug, Error)]
pub enum ExportError {
    /// Encoding or decoding through the image codecs failed
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error while writing the output
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The cell has nothing to export
    #[error("cell has no bitmap to export")]
    NoBitmap,
}

/// Failures while building cells from a serialized description
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid cell description: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("cell list is empty")]
    Empty,
}
