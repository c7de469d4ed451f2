//! Image sequence ("slideshow") cell
//!
//! Only the displayed frame takes part in layout and drawing. The frame rate
//! is either the cell's own or, when unset, the default handed in by the
//! caller.

use super::bitmap::Bitmap;
use super::image::{register_bitmap, IMAGE_BORDER};
use crate::error::ExportError;
use crate::export::AssetSink;
use crate::layout::{Color, RenderContext};
use crate::models::{Cell, CellBody, CellId, ImageSize, Point, Worksheet};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const MIN_FRAME_RATE: i32 = 1;
pub const MAX_FRAME_RATE: i32 = 200;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlideShowCell {
    frames: Vec<Bitmap>,
    displayed: usize,
    /// `None` falls back to the configured default
    frame_rate: Option<i32>,
}

impl SlideShowCell {
    pub fn new(frames: Vec<Bitmap>) -> Self {
        Self { frames, displayed: 0, frame_rate: None }
    }

    /// Decode one frame per entry; unreadable frames become placeholders
    /// captioned with their index
    pub fn from_bytes(frames: &[(String, Vec<u8>)]) -> Self {
        let frames = frames
            .iter()
            .enumerate()
            .map(|(i, (name, bytes))| {
                Bitmap::decode(name, bytes).unwrap_or_else(|| frame_placeholder(i))
            })
            .collect();
        Self::new(frames)
    }

    /// Load one frame per file, deleting each file after reading
    pub fn from_files(paths: &[&Path]) -> Self {
        let frames = paths
            .iter()
            .enumerate()
            .map(|(i, path)| Bitmap::read_file(path, true).unwrap_or_else(|| frame_placeholder(i)))
            .collect();
        Self::new(frames)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Bitmap] {
        &self.frames
    }

    pub fn displayed_index(&self) -> usize {
        self.displayed
    }

    pub fn displayed_frame(&self) -> Option<&Bitmap> {
        self.frames.get(self.displayed)
    }

    /// Select the frame to show; anything out of range shows the last one
    pub fn set_displayed_index(&mut self, index: i64) {
        let count = self.frames.len();
        self.displayed = match usize::try_from(index) {
            Ok(i) if i < count => i,
            _ => count.saturating_sub(1),
        };
    }

    /// Set the cell's own rate, clamped to 1..=200; a negative value unsets
    /// it. Returns the stored value.
    pub fn set_frame_rate(&mut self, freq: i32) -> Option<i32> {
        self.frame_rate = if freq < 0 {
            None
        } else {
            Some(freq.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE))
        };
        self.frame_rate
    }

    pub fn explicit_frame_rate(&self) -> Option<i32> {
        self.frame_rate
    }

    /// Effective rate in frames per second
    pub fn frame_rate(&self, default: i32) -> i32 {
        self.frame_rate.unwrap_or(default)
    }

    pub fn to_xml(&self, assets: &mut dyn AssetSink) -> String {
        let names: Vec<String> = self
            .frames
            .iter()
            .map(|frame| register_bitmap(Some(frame), assets))
            .collect();
        match self.frame_rate {
            Some(rate) => format!("\n<slide fr=\"{}\">{}</slide>", rate, names.join(";")),
            None => format!("\n<slide>{}</slide>", names.join(";")),
        }
    }

    /// Write all frames as a looping animated GIF
    fn write_gif(&self, path: &Path, rate: i32) -> Result<(), ExportError> {
        let file = File::create(path)?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite)?;

        let centis = (100 / rate.max(MIN_FRAME_RATE)) as u32;
        let delay = Delay::from_numer_denom_ms(centis * 10, 1);
        for frame in &self.frames {
            encoder.encode_frame(Frame::from_parts(frame.pixels().clone(), 0, 0, delay))?;
        }
        Ok(())
    }
}

fn frame_placeholder(index: usize) -> Bitmap {
    log::warn!("slideshow frame {} could not be loaded", index);
    Bitmap::placeholder(vec![format!("Error {}", index)])
}

impl Worksheet {
    pub fn new_slideshow(&mut self, show: SlideShowCell) -> CellId {
        self.insert(Cell::new(CellBody::SlideShow(show)))
    }

    /// Build a slideshow from image files, which are deleted after reading
    pub fn load_slideshow(&mut self, paths: &[&Path]) -> CellId {
        self.new_slideshow(SlideShowCell::from_files(paths))
    }

    pub fn slideshow(&self, id: CellId) -> Option<&SlideShowCell> {
        match &self[id].body {
            CellBody::SlideShow(show) => Some(show),
            _ => None,
        }
    }

    /// Mutable access to the slideshow payload; geometry is invalidated
    /// since the displayed frame may change
    pub fn slideshow_mut(&mut self, id: CellId) -> Option<&mut SlideShowCell> {
        let cell = &mut self[id];
        cell.reset_data();
        match &mut cell.body {
            CellBody::SlideShow(show) => Some(show),
            _ => None,
        }
    }

    pub(crate) fn slideshow_draw(&mut self, id: CellId, ctx: &mut RenderContext, point: Point) {
        if self.bitmap(id).is_none() || !self.draw_this_cell(id, ctx, point) {
            return;
        }
        self.draw_framed_bitmap(id, ctx, point, Color::RED, true, IMAGE_BORDER);
    }

    /// Export every frame as an animated GIF
    ///
    /// Returns the first frame's size, `(0, 0)` for an empty slideshow, or
    /// [`ImageSize::FAILED`].
    pub fn to_gif(&self, id: CellId, path: &Path, default_rate: i32) -> ImageSize {
        let Some(show) = self.slideshow(id) else {
            return ImageSize::FAILED;
        };
        let rate = show.frame_rate(default_rate);
        match show.write_gif(path, rate) {
            Ok(()) => match show.frames.first() {
                Some(first) => ImageSize::new(first.width() as i32, first.height() as i32),
                None => ImageSize::new(0, 0),
            },
            Err(e) => {
                log::warn!("gif export to {} failed: {}", path.display(), e);
                ImageSize::FAILED
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::bitmap::{PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
    use image::{Rgba, RgbaImage};

    fn frames(n: usize) -> Vec<Bitmap> {
        (0..n)
            .map(|i| Bitmap::new(RgbaImage::from_pixel(4 + i as u32, 3, Rgba([0, 0, 0, 255]))))
            .collect()
    }

    #[test]
    fn test_frame_rate_clamps_and_unsets() {
        let mut show = SlideShowCell::new(frames(3));
        assert_eq!(show.frame_rate(2), 2);
        assert_eq!(show.set_frame_rate(500), Some(200));
        assert_eq!(show.set_frame_rate(0), Some(1));
        assert_eq!(show.set_frame_rate(15), Some(15));
        assert_eq!(show.frame_rate(2), 15);
        assert_eq!(show.set_frame_rate(-1), None);
        assert_eq!(show.frame_rate(7), 7);
    }

    #[test]
    fn test_displayed_index_out_of_range_shows_last() {
        let mut show = SlideShowCell::new(frames(3));
        show.set_displayed_index(1);
        assert_eq!(show.displayed_index(), 1);
        show.set_displayed_index(9);
        assert_eq!(show.displayed_index(), 2);
        show.set_displayed_index(-4);
        assert_eq!(show.displayed_index(), 2);
        assert_eq!(show.displayed_frame().map(Bitmap::width), Some(6));
    }

    #[test]
    fn test_bad_frame_gets_indexed_placeholder() {
        let show = SlideShowCell::from_bytes(&[
            ("a.png".to_string(), frames(1)[0].to_png().unwrap()),
            ("b.png".to_string(), b"junk".to_vec()),
        ]);
        assert_eq!(show.frame_count(), 2);
        assert!(!show.frames()[0].is_placeholder());
        let bad = &show.frames()[1];
        assert_eq!(bad.caption(), &["Error 1".to_string()]);
        assert_eq!((bad.width(), bad.height()), (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
    }

    fn gif_delays_ms(path: &Path) -> Vec<f64> {
        use image::codecs::gif::GifDecoder;
        use image::AnimationDecoder;

        let file = File::open(path).unwrap();
        let decoder = GifDecoder::new(std::io::BufReader::new(file)).unwrap();
        decoder
            .into_frames()
            .collect_frames()
            .unwrap()
            .iter()
            .map(|frame| {
                let (numer, denom) = frame.delay().numer_denom_ms();
                numer as f64 / denom as f64
            })
            .collect()
    }

    #[test]
    fn test_gif_frame_delay_follows_frame_rate() {
        let dir = tempfile::tempdir().unwrap();
        let mut sheet = Worksheet::new();
        let uniform = vec![Bitmap::new(RgbaImage::from_pixel(4, 3, Rgba([9, 9, 9, 255]))); 2];

        // no own rate: default of 4 per second is 25 centiseconds
        let show = sheet.new_slideshow(SlideShowCell::new(uniform.clone()));
        let path = dir.path().join("default.gif");
        assert_eq!(sheet.to_gif(show, &path, 4), ImageSize::new(4, 3));
        assert_eq!(gif_delays_ms(&path), vec![250.0, 250.0]);

        // own rate 3 wins over the default; 100 / 3 truncates to 33
        let mut own = SlideShowCell::new(uniform);
        own.set_frame_rate(3);
        let show = sheet.new_slideshow(own);
        let path = dir.path().join("own.gif");
        sheet.to_gif(show, &path, 4);
        assert_eq!(gif_delays_ms(&path), vec![330.0, 330.0]);
    }

    #[test]
    fn test_empty_slideshow_is_harmless() {
        let mut show = SlideShowCell::new(Vec::new());
        show.set_displayed_index(3);
        assert_eq!(show.displayed_index(), 0);
        assert!(show.displayed_frame().is_none());
    }
}
