//! Still image cell

use super::bitmap::Bitmap;
use crate::error::ExportError;
use crate::export::{AssetSink, Clipboard};
use crate::layout::{image_height, image_width, Color, RenderContext};
use crate::models::{Cell, CellBody, CellId, ImageSize, Point, Rect, Size, Worksheet};
use std::path::Path;

/// Frame width around an image, in pixels
pub const IMAGE_BORDER: i32 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageCell {
    pub(crate) bitmap: Option<Bitmap>,
    /// Frame the image with a rectangle
    pub draw_rectangle: bool,
    pub border: i32,
}

impl Default for ImageCell {
    fn default() -> Self {
        Self { bitmap: None, draw_rectangle: true, border: IMAGE_BORDER }
    }
}

impl ImageCell {
    pub fn new(bitmap: Bitmap) -> Self {
        Self { bitmap: Some(bitmap), ..Self::default() }
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    pub fn to_xml(&self, assets: &mut dyn AssetSink) -> String {
        let name = register_bitmap(self.bitmap.as_ref(), assets);
        if self.draw_rectangle {
            format!("<img>{}</img>", name)
        } else {
            format!("<img rect=\"false\">{}</img>", name)
        }
    }
}

/// Hand a bitmap to the asset store as PNG and return its generated name
pub(crate) fn register_bitmap(bitmap: Option<&Bitmap>, assets: &mut dyn AssetSink) -> String {
    let png = match bitmap.map(Bitmap::to_png) {
        Some(Ok(png)) => png,
        Some(Err(e)) => {
            log::warn!("could not encode image asset: {}", e);
            Vec::new()
        }
        None => Vec::new(),
    };
    assets.register_png(png)
}

impl Worksheet {
    pub fn new_image(&mut self, bitmap: Option<Bitmap>) -> CellId {
        let body = ImageCell { bitmap, ..ImageCell::default() };
        self.insert(Cell::new(CellBody::Image(body)))
    }

    /// Load an image file into a new cell; with `remove` the file is deleted
    /// after reading
    pub fn load_image(&mut self, path: &Path, remove: bool) -> CellId {
        self.new_image(Some(Bitmap::from_file(path, remove)))
    }

    /// Replace the bitmap; the cell needs a new layout pass afterwards
    pub fn set_bitmap(&mut self, id: CellId, bitmap: Bitmap) {
        let cell = &mut self[id];
        match &mut cell.body {
            CellBody::Image(img) => img.bitmap = Some(bitmap),
            _ => {
                log::warn!("set_bitmap on non-image cell {:?}", id);
                return;
            }
        }
        cell.geometry.width = -1;
        cell.geometry.height = -1;
        cell.reset_data();
    }

    /// Bitmap currently shown by an image-bearing cell: the image itself, or
    /// a slideshow's displayed frame
    pub fn bitmap(&self, id: CellId) -> Option<&Bitmap> {
        match &self[id].body {
            CellBody::Image(img) => img.bitmap.as_ref(),
            CellBody::SlideShow(show) => show.displayed_frame(),
            _ => None,
        }
    }

    fn image_natural(&self, id: CellId) -> (Size, i32) {
        let natural = self.bitmap(id).map(Bitmap::size).unwrap_or_default();
        let border = match &self[id].body {
            CellBody::Image(img) => img.border,
            _ => IMAGE_BORDER,
        };
        (natural, border)
    }

    /// Width pass shared by stills and slideshows
    pub(crate) fn image_recalculate_widths(&mut self, id: CellId, ctx: &mut RenderContext) {
        let (natural, border) = self.image_natural(id);
        let width = image_width(ctx.scale(), natural, ctx.canvas_size(), border);
        let cell = &mut self[id];
        cell.geometry.width = width;
        cell.reset_data();
    }

    /// Height pass shared by stills and slideshows
    pub(crate) fn image_recalculate_size(&mut self, id: CellId, ctx: &mut RenderContext) {
        let (natural, border) = self.image_natural(id);
        let height = image_height(ctx.scale(), natural, ctx.canvas_size(), border);
        let geometry = &mut self[id].geometry;
        geometry.height = height;
        geometry.center = height / 2;
    }

    pub(crate) fn image_draw(&mut self, id: CellId, ctx: &mut RenderContext, point: Point) {
        if self.bitmap(id).is_none() || !self.draw_this_cell(id, ctx, point) {
            return;
        }
        let cell = &self[id];
        let (draw_rectangle, border) = match &cell.body {
            CellBody::Image(img) => (img.draw_rectangle, img.border),
            _ => (true, IMAGE_BORDER),
        };
        let pen = ctx.color(cell.pen_style());
        self.draw_framed_bitmap(id, ctx, point, pen, draw_rectangle, border);
    }

    /// Blit the shown bitmap inside the cell's box, optionally framed
    pub(crate) fn draw_framed_bitmap(
        &self,
        id: CellId,
        ctx: &mut RenderContext,
        point: Point,
        pen: Color,
        draw_rectangle: bool,
        border: i32,
    ) {
        let Some(bitmap) = self.bitmap(id) else {
            return;
        };
        let g = &self[id].geometry;
        let frame = Rect::new(point.x, point.y - g.center, g.width, g.height);
        let inside = Rect::new(
            frame.x + border,
            frame.y + border,
            frame.width - 2 * border,
            frame.height - 2 * border,
        );

        ctx.surface.set_pen(pen);
        if draw_rectangle {
            ctx.surface.draw_rect(frame);
        }
        ctx.surface.draw_bitmap(bitmap, inside);
    }

    /// Write the shown bitmap to a PNG file
    ///
    /// Returns the written image's pixel size or [`ImageSize::FAILED`].
    pub fn to_image_file(&self, id: CellId, path: &Path) -> ImageSize {
        let result = self
            .bitmap(id)
            .ok_or(ExportError::NoBitmap)
            .and_then(|bitmap| bitmap.save_png(path));
        match result {
            Ok(size) => ImageSize::new(size.width, size.height),
            Err(e) => {
                log::warn!("could not export {}: {}", path.display(), e);
                ImageSize::FAILED
            }
        }
    }

    /// Put the shown bitmap on the clipboard
    pub fn copy_to_clipboard(&self, id: CellId, clipboard: &mut dyn Clipboard) -> bool {
        match self.bitmap(id) {
            Some(bitmap) => clipboard.set_bitmap(bitmap),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DisplayList, LayoutConfig, Palette};
    use crate::models::CellType;
    use image::{Rgba, RgbaImage};

    fn bitmap(w: u32, h: u32) -> Bitmap {
        Bitmap::new(RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255])))
    }

    fn layout(sheet: &mut Worksheet, id: CellId, config: &LayoutConfig) {
        let palette = Palette::default();
        let mut surface = DisplayList::new();
        let mut ctx = RenderContext::new(config, &palette, &mut surface);
        sheet.recalculate_widths(id, &mut ctx, 12);
        sheet.recalculate_size(id, &mut ctx, 12);
    }

    #[test]
    fn test_image_cell_type() {
        let mut sheet = Worksheet::new();
        let id = sheet.new_image(Some(bitmap(4, 4)));
        assert_eq!(sheet[id].cell_type, CellType::Image);
    }

    #[test]
    fn test_size_includes_border() {
        let mut sheet = Worksheet::new();
        let id = sheet.new_image(Some(bitmap(100, 50)));
        layout(&mut sheet, id, &LayoutConfig::default());
        assert_eq!(sheet[id].geometry.width, 102);
        assert_eq!(sheet[id].geometry.height, 52);
        assert_eq!(sheet[id].geometry.center, 26);
    }

    #[test]
    fn test_large_image_capped_by_canvas() {
        let mut sheet = Worksheet::new();
        let id = sheet.new_image(Some(bitmap(2000, 100)));
        let config = LayoutConfig { canvas_size: Size::new(1000, 1000), ..LayoutConfig::default() };
        layout(&mut sheet, id, &config);
        assert_eq!(sheet[id].geometry.width, 902);
        assert_eq!(sheet[id].geometry.height, 47);
    }

    #[test]
    fn test_empty_image_has_border_only() {
        let mut sheet = Worksheet::new();
        let id = sheet.new_image(None);
        layout(&mut sheet, id, &LayoutConfig::default());
        assert_eq!(sheet[id].geometry.width, 2);
        assert_eq!(sheet.to_image_file(id, Path::new("unused.png")), ImageSize::FAILED);
    }

    #[test]
    fn test_set_bitmap_invalidates() {
        let mut sheet = Worksheet::new();
        let id = sheet.new_image(Some(bitmap(10, 10)));
        layout(&mut sheet, id, &LayoutConfig::default());
        sheet.set_bitmap(id, bitmap(20, 30));
        assert_eq!(sheet[id].geometry.width, -1);
        layout(&mut sheet, id, &LayoutConfig::default());
        assert_eq!(sheet[id].geometry.width, 22);
        assert_eq!(sheet[id].geometry.height, 32);
    }
}
