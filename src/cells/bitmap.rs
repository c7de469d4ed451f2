//! Decoded bitmaps carried by image cells
//!
//! Decoding never fails from the caller's point of view: anything that cannot
//! be read becomes a placeholder (a framed box with both diagonals) whose
//! caption names what went wrong.

use crate::error::ExportError;
use crate::models::geometry::Size;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

pub const PLACEHOLDER_WIDTH: u32 = 400;
pub const PLACEHOLDER_HEIGHT: u32 = 250;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    pixels: RgbaImage,
    /// Lines drawn centered over a placeholder; empty for real images
    caption: Vec<String>,
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels, caption: Vec::new() }
    }

    /// Decode an in-memory image
    pub fn decode(name: &str, bytes: &[u8]) -> Option<Self> {
        match image::load_from_memory(bytes) {
            Ok(img) => Some(Self::new(img.to_rgba8())),
            Err(e) => {
                log::warn!("could not decode image {}: {}", name, e);
                None
            }
        }
    }

    /// Read and decode an image file; with `remove` the file is deleted
    /// after reading
    pub fn read_file(path: &Path, remove: bool) -> Option<Self> {
        let name = path.display().to_string();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("could not read image {}: {}", name, e);
                return None;
            }
        };
        if remove {
            if let Err(e) = std::fs::remove_file(path) {
                log::warn!("could not remove {}: {}", name, e);
            }
        }
        Self::decode(&name, &bytes)
    }

    /// Decode an in-memory image, naming it `name` in the placeholder caption
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Self {
        Self::decode(name, bytes).unwrap_or_else(|| Self::error_placeholder(name))
    }

    /// Load an image file, falling back to a placeholder naming the file
    pub fn from_file(path: &Path, remove: bool) -> Self {
        Self::read_file(path, remove)
            .unwrap_or_else(|| Self::error_placeholder(&path.display().to_string()))
    }

    fn error_placeholder(name: &str) -> Self {
        Self::placeholder(vec!["Error".to_string(), name.to_string()])
    }

    /// Fixed-size error box with a border, both diagonals and a caption
    pub fn placeholder(caption: Vec<String>) -> Self {
        let (w, h) = (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT);
        let mut pixels = RgbaImage::from_pixel(w, h, WHITE);

        for x in 0..w {
            pixels.put_pixel(x, 0, BLACK);
            pixels.put_pixel(x, h - 1, BLACK);
        }
        for y in 0..h {
            pixels.put_pixel(0, y, BLACK);
            pixels.put_pixel(w - 1, y, BLACK);
        }

        let steps = w.max(h);
        for t in 0..=steps {
            let x = t * (w - 1) / steps;
            let y = t * (h - 1) / steps;
            pixels.put_pixel(x, y, BLACK);
            pixels.put_pixel(x, h - 1 - y, BLACK);
        }

        Self { pixels, caption }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as i32, self.height() as i32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn caption(&self) -> &[String] {
        &self.caption
    }

    pub fn is_placeholder(&self) -> bool {
        !self.caption.is_empty()
    }

    /// Encode as PNG
    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut buf = Cursor::new(Vec::new());
        self.pixels.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Write a PNG file and return the written image's size
    pub fn save_png(&self, path: &Path) -> Result<Size, ExportError> {
        self.pixels.save_with_format(path, ImageFormat::Png)?;
        Ok(self.size())
    }
}
