//! Layout engine - list-level geometry passes, memoized aggregates and drawing
//!
//! A layout cycle runs in a fixed order: every width (content order), then
//! every height (content order), then the draw-order rebuild by the line
//! breaker. Drawing and hit testing walk the draw order afterwards.
//! Aggregates (`full_width`, `line_width`, `max_center`, `max_drop`) are
//! computed on first read and cached until the cell is invalidated.

use super::context::RenderContext;
use crate::models::{scale_px, CellId, Point, Rect, Worksheet, CELL_SKIP, LINE_SKIP};

impl Worksheet {
    /// Width pass over a content list
    pub fn recalculate_widths_list(&mut self, head: Option<CellId>, ctx: &mut RenderContext, font_size: i32) {
        let mut cur = head;
        while let Some(id) = cur {
            self.recalculate_widths(id, ctx, font_size);
            cur = self.next(id);
        }
    }

    /// Height pass over a content list; widths must already be final
    pub fn recalculate_size_list(&mut self, head: Option<CellId>, ctx: &mut RenderContext, font_size: i32) {
        let mut cur = head;
        while let Some(id) = cur {
            self.recalculate_size(id, ctx, font_size);
            cur = self.next(id);
        }
    }

    /// Width of the whole content list: every cell plus one gap per boundary
    pub fn full_width(&mut self, head: Option<CellId>, scale: f64) -> i32 {
        let Some(head) = head else {
            return 0;
        };
        if let Some(w) = self[head].geometry.full_width {
            return w;
        }

        let gap = scale_px(CELL_SKIP, scale);
        let mut total = -gap;
        let mut cur = Some(head);
        while let Some(id) = cur {
            total += self[id].geometry.width + gap;
            cur = self.next(id);
        }
        self[head].geometry.full_width = Some(total);
        total
    }

    /// Width of the visual line from `id` up to the next line start, along
    /// the draw order
    pub fn line_width(&mut self, id: CellId, scale: f64) -> i32 {
        if let Some(w) = self[id].geometry.line_width {
            return w;
        }

        let mut run = vec![id];
        let mut cur = id;
        while let Some(next) = self.next_to_draw(cur) {
            let cell = &self[next];
            if cell.break_line_here() {
                break;
            }
            run.push(next);
            if cell.geometry.line_width.is_some() {
                break;
            }
            cur = next;
        }

        let gap = scale_px(CELL_SKIP, scale);
        let mut rest: Option<i32> = None;
        for &c in run.iter().rev() {
            let cell = &mut self[c];
            let value = match (cell.geometry.line_width, rest) {
                (Some(w), _) => w,
                (None, _) if cell.is_broken => rest.unwrap_or(0),
                (None, None) => cell.geometry.width,
                (None, Some(r)) => cell.geometry.width + gap + r,
            };
            cell.geometry.line_width = Some(value);
            rest = Some(value);
        }
        rest.unwrap_or(0)
    }

    /// Largest ascent on the visual line starting at `id`
    pub fn max_center(&mut self, id: CellId) -> i32 {
        if let Some(c) = self[id].geometry.max_center {
            return c;
        }

        let mut max = 0;
        let mut cur = id;
        loop {
            let cell = &self[cur];
            if !cell.is_broken {
                max = max.max(cell.geometry.center);
            }
            match cell.links.next_to_draw {
                Some(next) if !self[next].break_line_here() => cur = next,
                _ => break,
            }
        }
        self[id].geometry.max_center = Some(max);
        max
    }

    /// Largest descent on the visual line starting at `id`
    pub fn max_drop(&mut self, id: CellId) -> i32 {
        if let Some(d) = self[id].geometry.max_drop {
            return d;
        }

        let mut max = 0;
        let mut cur = id;
        loop {
            let cell = &self[cur];
            if !cell.is_broken {
                max = max.max(cell.geometry.drop());
            }
            match cell.links.next_to_draw {
                Some(next) if !self[next].break_line_here() => cur = next,
                _ => break,
            }
        }
        self[id].geometry.max_drop = Some(max);
        max
    }

    pub fn max_height(&mut self, id: CellId) -> i32 {
        self.max_center(id) + self.max_drop(id)
    }

    /// Is the cell at `point` inside the visible band?
    pub fn draw_this_cell(&mut self, id: CellId, ctx: &RenderContext, point: Point) -> bool {
        let Some(band) = ctx.visible_band() else {
            return true;
        };
        !(point.y - self.max_center(id) > band.bottom || point.y + self.max_drop(id) < band.top)
    }

    /// Draw a draw-order list on one line starting at `point`
    pub fn draw_list(&mut self, head: Option<CellId>, ctx: &mut RenderContext, mut point: Point, font_size: i32) {
        self.set_scale(ctx.scale());
        let gap = scale_px(CELL_SKIP, ctx.scale());
        let ids: Vec<CellId> = self.iter_draw(head).collect();
        for id in ids {
            self.draw(id, ctx, point, font_size);
            point.x += self[id].geometry.width + gap;
        }
    }

    /// Draw a draw-order list across visual lines, the first line's top at
    /// `origin`; returns the total height used
    pub fn draw_lines(&mut self, head: Option<CellId>, ctx: &mut RenderContext, origin: Point, font_size: i32) -> i32 {
        let ids: Vec<CellId> = self.iter_draw(head).collect();
        let Some(&first) = ids.first() else {
            return 0;
        };

        let scale = ctx.scale();
        self.set_scale(scale);
        let gap = scale_px(CELL_SKIP, scale);
        let line_skip = scale_px(LINE_SKIP, scale);
        let left = origin.x + ctx.config.indent;

        let mut point = Point::new(left, origin.y + self.max_center(first));
        let mut drop = self.max_drop(first);

        for (i, &id) in ids.iter().enumerate() {
            self.draw(id, ctx, point, font_size);
            match ids.get(i + 1) {
                Some(&next) if self[next].break_line_here() => {
                    point.x = left;
                    point.y += drop + self.max_center(next);
                    if self[id].big_skip {
                        point.y += line_skip;
                    }
                    drop = self.max_drop(next);
                }
                _ => point.x += self[id].geometry.width + gap,
            }
        }

        log::debug!("drew {} cells, height {}", ids.len(), point.y + drop - origin.y);
        point.y + drop - origin.y
    }

    /// Screen rectangle of the cell, or of its whole visual line with `all`
    ///
    /// Cells that are broken or were never drawn report [`Rect::EMPTY`].
    pub fn rect(&mut self, id: CellId, all: bool) -> Rect {
        let (point, is_broken) = (self[id].current_point, self[id].is_broken);
        let Some(point) = point else {
            return Rect::EMPTY;
        };
        if is_broken {
            return Rect::EMPTY;
        }
        if all {
            let top = point.y - self.max_center(id);
            let width = self.line_width(id, self.scale());
            let height = self.max_height(id);
            return Rect::new(point.x, top, width, height);
        }
        let g = &self[id].geometry;
        Rect::new(point.x, point.y - g.center, g.width, g.height)
    }

    pub fn contains_rect(&mut self, id: CellId, small: &Rect, all: bool) -> bool {
        self.rect(id, all).contains(small)
    }

    /// Frame the cell (or its line) with `border` pixels of margin
    pub fn draw_bounding_box(&mut self, id: CellId, ctx: &mut RenderContext, all: bool, border: i32) {
        let r = self.rect(id, all);
        ctx.surface.draw_rect(Rect::new(
            r.x - border,
            r.y - border,
            r.width + 2 * border,
            r.height + 2 * border,
        ));
    }

    /// One complete layout cycle for a top-level list
    pub fn layout_list(&mut self, head: Option<CellId>, ctx: &mut RenderContext) {
        let font_size = ctx.config.font_size;
        let scale = ctx.scale();
        self.set_scale(scale);

        self.unbreak_list(head);
        self.recalculate_widths_list(head, ctx, font_size);
        self.recalculate_size_list(head, ctx, font_size);

        let client_width = ctx.config.line_width - ctx.config.indent;
        let broken = self.break_up_cells(head, client_width);
        self.break_lines(head, client_width, scale);

        let full_width = self.full_width(head, scale);
        log::debug!(
            "layout cycle: {} cells, {} broken up, full width {}",
            self.list_len(head),
            broken,
            full_width
        );
    }
}
