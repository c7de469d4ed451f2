//! Serialization of cell lists
//!
//! Three renderings exist for every cell: plain text (clipboard and search),
//! TeX markup, and the persistence markup saved in worksheet files. The list
//! variants add the separators that depend on a cell's neighbours.

pub mod sinks;
pub mod tex;
pub mod text;
pub mod xml;

pub use sinks::{AssetSink, Clipboard, MemoryAssets, MemoryClipboard};
