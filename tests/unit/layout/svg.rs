use super::*;

#[test]
fn numbers_are_compact_and_stable() {
    assert_eq!(num(12.0), "12");
    assert_eq!(num(12.5), "12.5");
    assert_eq!(num(1.0 / 3.0), "0.33");
    assert_eq!(num(-0.001), "0");
    assert_eq!(num(-2.256), "-2.26");
}

#[test]
fn document_declares_requested_size() {
    let doc = SvgWriter::new(800, 600).finish();
    assert_eq!(doc.width(), 800);
    assert_eq!(doc.height(), 600);
    assert!(doc.as_str().starts_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600">"#
    ));
    assert!(doc.as_str().ends_with("</svg>"));
}

#[test]
fn rects_skip_transparent_and_clamp_radius() {
    let mut w = SvgWriter::new(10, 10);
    let r = RectPaint {
        x: 0.0,
        y: 0.0,
        w: 10.0,
        h: 4.0,
        radius: 12.0,
    };
    w.fill_rect(r, Color::TRANSPARENT);
    w.fill_rect(r, Color::rgba(255, 0, 0, 128));
    let svg = w.finish().into_bytes();
    let svg = String::from_utf8(svg).unwrap();
    assert_eq!(svg.matches("<rect").count(), 1);
    assert!(svg.contains(r#"rx="2""#));
    assert!(svg.contains(r##"fill="#ff0000" fill-opacity="0.5""##));
}

#[test]
fn border_is_inset_by_half_its_width() {
    let mut w = SvgWriter::new(100, 100);
    w.stroke_rect(
        RectPaint {
            x: 10.0,
            y: 10.0,
            w: 50.0,
            h: 20.0,
            radius: 6.0,
        },
        2.0,
        Color::rgb(0x33, 0x33, 0x33),
    );
    let svg = w.finish();
    assert!(svg.as_str().contains(
        r##"<rect x="11" y="11" width="48" height="18" rx="5" fill="none" stroke="#333333" stroke-width="2"/>"##
    ));
}

#[test]
fn text_is_escaped() {
    let mut w = SvgWriter::new(10, 10);
    w.text(0.0, 12.0, "Inter", 14.0, 500, Color::WHITE, "a < b & \"c\"");
    let svg = w.finish();
    assert!(svg.as_str().contains("a &lt; b &amp; &quot;c&quot;"));
    assert!(svg.as_str().contains(r#"font-weight="500""#));
}
