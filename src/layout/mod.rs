//! Layout: rendering context, drawing surfaces, image scaling and the
//! list-level layout engine

pub mod context;
pub mod engine;
pub mod scaling;
pub mod surface;

pub use context::{Band, Color, LayoutConfig, Palette, RenderContext, DEFAULT_PALETTE};
pub use scaling::{image_height, image_scale, image_width};
pub use surface::{DisplayList, DrawCommand, Surface};
