use super::*;
use serde_json::json;

#[test]
fn style_deserializes_camel_case_with_defaults() {
    let s: Style = serde_json::from_value(json!({
        "flexDirection": "column",
        "justifyContent": "space-between",
        "alignItems": "center",
        "padding": 24,
        "margin": {"bottom": 8},
        "background": "#1a1a1a",
        "fontWeight": 600
    }))
    .unwrap();

    assert_eq!(s.flex_direction, FlexDirection::Column);
    assert_eq!(s.justify_content, Some(JustifyContent::SpaceBetween));
    assert_eq!(s.align_items, Some(AlignItems::Center));
    assert_eq!(s.padding, Edges::all(24.0));
    assert_eq!(s.margin, Edges { bottom: 8.0, ..Edges::default() });
    assert_eq!(s.background, Some(Color::rgb(0x1a, 0x1a, 0x1a)));
    assert_eq!(s.font_weight, Some(600));
    assert_eq!(s.display, Display::Flex);
    assert_eq!(s.gap, 0.0);
}

#[test]
fn unknown_style_attributes_are_rejected() {
    assert!(serde_json::from_value::<Style>(json!({"transform": "rotate(3deg)"})).is_err());
    assert!(serde_json::from_value::<Style>(json!({"padding": {"inline": 3}})).is_err());
    assert!(serde_json::from_value::<Style>(json!({"justifyContent": "stretch"})).is_err());
}

#[test]
fn alignment_aliases_accept_start_and_end() {
    let s: Style = serde_json::from_value(json!({"justifyContent": "end", "alignItems": "start"})).unwrap();
    assert_eq!(s.justify_content, Some(JustifyContent::FlexEnd));
    assert_eq!(s.align_items, Some(AlignItems::FlexStart));
}

#[test]
fn validate_rejects_unresolvable_values() {
    assert!(Style::default().validate().is_ok());
    assert!(Style::default().gap(-1.0).validate().is_err());
    assert!(Style::default().width(f32::NAN).validate().is_err());
    assert!(Style::default().font_size(0.0).validate().is_err());
    assert!(Style::default().font_weight(450).validate().is_err());
    assert!(Style::default().font_weight(1000).validate().is_err());
    assert!(Style::default().opacity(1.5).validate().is_err());
    assert!(
        Style::default()
            .margin(Edges::all(-4.0))
            .validate()
            .is_ok()
    );

    let err = Style::default().font_weight(450).validate().unwrap_err();
    assert!(matches!(err, CanvasError::Render(_)));
}

#[test]
fn text_style_inherits_only_set_attributes() {
    let parent = TextStyle::default().inherit(&Style::default().color(Color::WHITE).font_size(24.0));
    let child = parent.inherit(&Style::default().font_weight(600));
    assert_eq!(child.color, Color::WHITE);
    assert_eq!(child.font_size, 24.0);
    assert_eq!(child.font_weight, 600);

    let root = TextStyle::default();
    assert_eq!(root.font_size, DEFAULT_FONT_SIZE);
    assert_eq!(root.font_weight, DEFAULT_FONT_WEIGHT);
    assert_eq!(root.color, Color::BLACK);
}
