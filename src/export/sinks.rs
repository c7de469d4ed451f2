//! Collaborators that receive data leaving the worksheet

use crate::cells::Bitmap;

/// Store for binary assets referenced from persistence markup
pub trait AssetSink {
    /// Store PNG data and return the file name the markup should reference
    fn register_png(&mut self, png: Vec<u8>) -> String;
}

/// In-memory asset store naming files `image1.png`, `image2.png`, ...
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    counter: u32,
    files: Vec<(String, Vec<u8>)>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetSink for MemoryAssets {
    fn register_png(&mut self, png: Vec<u8>) -> String {
        self.counter += 1;
        let name = format!("image{}.png", self.counter);
        self.files.push((name.clone(), png));
        name
    }
}

/// System clipboard, as far as image cells are concerned
pub trait Clipboard {
    /// Replace the clipboard contents with `bitmap`; false if the clipboard
    /// could not be opened
    fn set_bitmap(&mut self, bitmap: &Bitmap) -> bool;
}

/// Clipboard that keeps the last bitmap it was given
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub bitmap: Option<Bitmap>,
}

impl Clipboard for MemoryClipboard {
    fn set_bitmap(&mut self, bitmap: &Bitmap) -> bool {
        self.bitmap = Some(bitmap.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_assets_number_files() {
        let mut assets = MemoryAssets::new();
        assert_eq!(assets.register_png(vec![1]), "image1.png");
        assert_eq!(assets.register_png(vec![2, 3]), "image2.png");
        assert_eq!(assets.get("image2.png"), Some(&[2u8, 3][..]));
        assert_eq!(assets.len(), 2);
    }
}
