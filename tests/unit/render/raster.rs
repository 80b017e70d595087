use super::*;
use crate::foundation::color::Color;
use crate::layout::svg::{RectPaint, SvgWriter};

fn red_square_doc() -> VectorDocument {
    let mut w = SvgWriter::new(40, 20);
    w.fill_rect(
        RectPaint {
            x: 0.0,
            y: 0.0,
            w: 20.0,
            h: 20.0,
            radius: 0.0,
        },
        Color::rgb(0xff, 0, 0),
    );
    w.finish()
}

#[test]
fn png_fits_requested_width_and_keeps_aspect() {
    let font = FontAsset::from_raw("Inter", Vec::new());
    let png = ResvgRasterizer
        .rasterize(&red_square_doc(), 80, &font)
        .unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (80, 40));
    assert_eq!(img.get_pixel(10, 10).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(70, 10).0[3], 0);
}

#[test]
fn rasterizing_is_deterministic() {
    let font = FontAsset::from_raw("Inter", Vec::new());
    let doc = red_square_doc();
    let a = ResvgRasterizer.rasterize(&doc, 40, &font).unwrap();
    let b = ResvgRasterizer.rasterize(&doc, 40, &font).unwrap();
    assert_eq!(a, b);
}

#[test]
fn raster_size_rejects_degenerate_widths() {
    let size = usvg::Size::from_wh(100.0, 50.0).unwrap();
    assert_eq!(raster_size(size, 200).unwrap(), (200, 100, 2.0));
    assert!(raster_size(size, 0).is_err());
    assert!(raster_size(size, MAX_DIM + 1).is_err());

    let tall = usvg::Size::from_wh(1.0, 1000.0).unwrap();
    assert!(matches!(
        raster_size(tall, 100),
        Err(CanvasError::Render(_))
    ));
}
