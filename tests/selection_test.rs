// Test rectangle selection over drawn worksheets

use mathcell_layout::{
    CellId, DisplayList, LayoutConfig, Palette, Point, Rect, RenderContext, TextStyle, Worksheet,
};

fn draw(sheet: &mut Worksheet, head: CellId) {
    let config = LayoutConfig::default();
    let palette = Palette::default();
    let mut display = DisplayList::new();
    let mut ctx = RenderContext::new(&config, &palette, &mut display);
    sheet.layout_list(Some(head), &mut ctx);
    sheet.draw_lines(Some(head), &mut ctx, Point::new(0, 0), config.font_size);
}

/// `a conjugate(x y) b`, drawn with its baseline at y = 8
fn conjugate_sample(sheet: &mut Worksheet) -> Vec<CellId> {
    let x = sheet.new_text("x", TextStyle::Variable);
    let y = sheet.new_text("y", TextStyle::Variable);
    let inner = sheet.link_list(&[x, y]);
    let a = sheet.new_text("a", TextStyle::Variable);
    let conj = sheet.new_conjugate(inner);
    let b = sheet.new_text("b", TextStyle::Variable);
    let head = sheet.link_list(&[a, conj, b]).expect("list should not be empty");
    draw(sheet, head);
    vec![a, conj, b, x, y]
}

#[test]
fn test_disjoint_rect_gives_none() {
    let mut sheet = Worksheet::new();
    let ids = conjugate_sample(&mut sheet);
    assert_eq!(sheet.select_rect(Some(ids[0]), &Rect::new(500, 500, 5, 5)), None);
}

#[test]
fn test_rect_across_line_selects_first_and_last() {
    let mut sheet = Worksheet::new();
    let ids = conjugate_sample(&mut sheet);
    // a spans x 0..6, the conjugate 8..30, b 32..38
    let hit = sheet.select_rect(Some(ids[0]), &Rect::new(2, 4, 32, 2));
    assert_eq!(hit, Some((ids[0], ids[2])));
}

#[test]
fn test_selection_descends_into_conjugate() {
    let mut sheet = Worksheet::new();
    let ids = conjugate_sample(&mut sheet);
    // inside the inner `x`, drawn 4px into the conjugate
    let hit = sheet.select_rect(Some(ids[0]), &Rect::new(13, 4, 2, 2));
    assert_eq!(hit, Some((ids[3], ids[3])));
}

#[test]
fn test_overline_margin_selects_conjugate_itself() {
    let mut sheet = Worksheet::new();
    let ids = conjugate_sample(&mut sheet);
    // the left margin of the conjugate lies outside its inner expression
    let hit = sheet.select_rect(Some(ids[0]), &Rect::new(9, 1, 1, 1));
    assert_eq!(hit, Some((ids[1], ids[1])));
}

#[test]
fn test_selection_descends_into_diff_base() {
    let mut sheet = Worksheet::new();
    let base = sheet.new_text("f", TextStyle::Function);
    let arg = sheet.new_text("x", TextStyle::Variable);
    let diff = sheet.new_diff(Some(base), Some(arg));
    draw(&mut sheet, diff);

    // `x` is drawn at 0..6, the base after a double gap at 10..16
    let hit = sheet.select_rect(Some(diff), &Rect::new(11, 2, 2, 2));
    assert_eq!(hit, Some((base, base)));

    // the operand is not a selection target of its own
    let hit = sheet.select_rect(Some(diff), &Rect::new(1, 2, 2, 2));
    assert_eq!(hit, Some((diff, diff)));
}
