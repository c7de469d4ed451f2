// Test plain text, TeX and persistence markup of whole worksheets

use image::{Rgba, RgbaImage};
use mathcell_layout::{
    Bitmap, CellId, CellType, MemoryAssets, SlideShowCell, TextStyle, Worksheet,
};

fn bitmap(w: u32, h: u32) -> Bitmap {
    Bitmap::new(RgbaImage::from_pixel(w, h, Rgba([200, 100, 50, 255])))
}

fn diff_sample(sheet: &mut Worksheet) -> CellId {
    let base = sheet.new_text("f(x)", TextStyle::Function);
    let arg = sheet.new_text("x", TextStyle::Variable);
    sheet.new_diff(Some(base), Some(arg))
}

#[test]
fn test_diff_renderings() {
    let mut sheet = Worksheet::new();
    let diff = diff_sample(&mut sheet);

    assert_eq!(sheet.to_plain_text(diff), "'diff(f(x),x)");
    assert_eq!(sheet.to_tex(diff), "xf(x)", "TeX puts the operator first");

    let mut assets = MemoryAssets::new();
    assert_eq!(sheet.to_xml(diff, &mut assets), "<d><fnm>f(x)</fnm><v>x</v></d>");
    assert!(assets.is_empty());
}

#[test]
fn test_diff_argument_has_no_multiplication_dot() {
    let mut sheet = Worksheet::new();
    let diff = diff_sample(&mut sheet);
    let copy = sheet.copy(diff);
    for id in [diff, copy] {
        let arg = match &sheet[id].body {
            mathcell_layout::CellBody::Diff(d) => d.diff().expect("diff argument"),
            _ => unreachable!(),
        };
        assert!(sheet[arg].suppress_multiplication_dot);
    }
}

#[test]
fn test_image_markup_registers_png() {
    let mut sheet = Worksheet::new();
    let framed = sheet.new_image(Some(bitmap(5, 4)));
    let bare = sheet.new_image(Some(bitmap(3, 3)));
    if let mathcell_layout::CellBody::Image(img) = &mut sheet[bare].body {
        img.draw_rectangle = false;
    }
    let head = sheet.link_list(&[framed, bare]);

    let mut assets = MemoryAssets::new();
    let xml = sheet.list_to_xml(head, &mut assets);
    assert_eq!(xml, "<img>image1.png</img><img rect=\"false\">image2.png</img>");

    let png = assets.get("image1.png").expect("first image should be registered");
    let back = Bitmap::from_bytes("image1.png", png);
    assert_eq!((back.width(), back.height()), (5, 4));

    assert_eq!(sheet.list_to_plain_text(head), " (Graphics)  (Graphics) ");
}

#[test]
fn test_slideshow_markup_carries_explicit_rate_only() {
    let mut sheet = Worksheet::new();
    let show = sheet.new_slideshow(SlideShowCell::new(vec![bitmap(2, 2), bitmap(2, 2)]));

    let mut assets = MemoryAssets::new();
    assert_eq!(
        sheet.to_xml(show, &mut assets),
        "\n<slide>image1.png;image2.png</slide>"
    );

    sheet.slideshow_mut(show).expect("slideshow").set_frame_rate(10);
    assert_eq!(
        sheet.to_xml(show, &mut assets),
        "\n<slide fr=\"10\">image3.png;image4.png</slide>"
    );
    assert_eq!(sheet.to_plain_text(show), " << Graphics >> ");
    assert_eq!(sheet.to_tex(show), " << Graphics >> ");
}

#[test]
fn test_worksheet_markup_is_well_formed() {
    let mut sheet = Worksheet::new();
    let label = sheet.new_text("(%o1)", TextStyle::Label);
    sheet[label].set_type(CellType::Label);
    let lt = sheet.new_text("a<b & c", TextStyle::Default);
    sheet[lt].highlight = true;
    let z = sheet.new_text("z", TextStyle::Variable);
    let conj = sheet.new_conjugate(Some(z));
    sheet[conj].highlight = true;
    let diff = diff_sample(&mut sheet);
    let img = sheet.new_image(Some(bitmap(2, 2)));
    let show = sheet.new_slideshow(SlideShowCell::new(vec![bitmap(1, 1)]));
    let head = sheet.link_list(&[label, lt, conj, diff, img, show]);

    let mut assets = MemoryAssets::new();
    let xml = format!("<mth>{}</mth>", sheet.list_to_xml(head, &mut assets));
    let doc = roxmltree::Document::parse(&xml).expect("markup should be well-formed XML");

    let root = doc.root_element();
    let tags: Vec<&str> = root
        .children()
        .filter(|n| n.is_element())
        .map(|n| n.tag_name().name())
        .collect();
    assert_eq!(tags, vec!["lbl", "hl", "d", "img", "slide"]);

    let hl = root
        .children()
        .find(|n| n.has_tag_name("hl"))
        .expect("highlight run");
    let text = hl
        .children()
        .find(|n| n.has_tag_name("t"))
        .and_then(|n| n.text());
    assert_eq!(text, Some("a<b & c"));
    assert_eq!(assets.len(), 2);
}

#[test]
fn test_tex_list_breaks_only_after_content() {
    let mut sheet = Worksheet::new();
    let a = sheet.new_text("a", TextStyle::Variable);
    let b = sheet.new_text("b", TextStyle::Variable);
    sheet[a].break_line = true;
    sheet[b].break_line = true;
    let head = sheet.link_list(&[a, b]);
    assert_eq!(sheet.list_to_tex(head), "a\\]\\[b");
}
