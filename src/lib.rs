//! Math Worksheet Cell Layout WASM Module
//!
//! Cell model and layout engine for a math worksheet: expressions are lists
//! of cells kept in two orders (content and draw), measured in two passes,
//! broken across lines, hit tested by rectangle and serialized to plain
//! text, TeX and persistence markup.

pub mod api;
pub mod breaking;
pub mod builder;
pub mod cells;
pub mod error;
pub mod export;
pub mod layout;
pub mod models;
pub mod selection;

// Re-export commonly used types
pub use builder::{CellSpec, ContentSpec, ImageData};
pub use cells::{Bitmap, ConjugateCell, DiffCell, ImageCell, SlideShowCell, TextCell};
pub use error::{BuildError, ExportError};
pub use export::{AssetSink, Clipboard, MemoryAssets, MemoryClipboard};
pub use layout::{Band, Color, DisplayList, DrawCommand, LayoutConfig, Palette, RenderContext, Surface};
pub use models::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only when a logger is already installed
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Math worksheet layout WASM module initialized");
}
