use super::*;

#[test]
fn canvas_id_rejects_empty_and_separators() {
    assert!(CanvasId::new("").is_err());
    assert!(CanvasId::new("a/b").is_err());
    assert!(CanvasId::new("a\0b").is_err());
    assert_eq!(CanvasId::new("doc-1").unwrap().as_str(), "doc-1");
}

#[test]
fn canvas_id_parses_from_str() {
    let id: CanvasId = "calendar-1".parse().unwrap();
    assert_eq!(id.to_string(), "calendar-1");
}

#[test]
fn format_follows_extension() {
    assert_eq!(OutputFormat::from_path(Path::new("out.svg")), OutputFormat::Svg);
    assert_eq!(OutputFormat::from_path(Path::new("out.SVG")), OutputFormat::Svg);
    assert_eq!(OutputFormat::from_path(Path::new("out.png")), OutputFormat::Png);
    assert_eq!(OutputFormat::from_path(Path::new("out.jpg")), OutputFormat::Png);
    assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Png);
    assert_eq!(OutputFormat::from_path(Path::new("dir.svg/out")), OutputFormat::Png);
}
