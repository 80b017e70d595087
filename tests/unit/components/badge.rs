use serde_json::json;

use super::*;

#[test]
fn sizes_and_variants_drive_style() {
    let el = Badge::new("ok", BadgeVariant::Success)
        .size(BadgeSize::Lg)
        .element();
    let style = el.style();
    assert_eq!(style.background, Some(Color::rgb(0x16, 0x65, 0x34)));
    assert_eq!(style.color, Some(Color::rgb(0xbb, 0xf7, 0xd0)));
    assert_eq!(style.font_size, Some(14.0));
    assert_eq!(style.font_weight, Some(500));
    assert_eq!(style.padding, Edges::symmetric(6.0, 12.0));
    assert_eq!(style.border_radius, 8.0);
    assert_eq!(style.border_color, None);
    assert!(matches!(&el.children()[0], Element::Text { content, .. } if content == "ok"));
}

#[test]
fn outline_badges_are_bordered_and_unfilled() {
    let el = Badge::new("draft", BadgeVariant::Outline).element();
    let style = el.style();
    assert_eq!(style.background, Some(Color::TRANSPARENT));
    assert_eq!(style.border_width, 1.0);
    assert_eq!(style.border_color, Some(Color::rgb(0x3f, 0x3f, 0x46)));
    assert_eq!(style.font_size, Some(12.0));
}

#[test]
fn group_and_showcase_layout() {
    let badges = default_showcase_badges();
    let group = badge_group(&badges, 4.0);
    assert_eq!(group.style().flex_direction, FlexDirection::Row);
    assert_eq!(group.style().gap, 4.0);
    assert_eq!(group.children().len(), 3);

    let showcase = badge_showcase(&badges);
    assert_eq!(showcase.style().padding, Edges::all(24.0));
    assert_eq!(showcase.style().background, Some(Color::rgb(0x1a, 0x1a, 0x1a)));
    assert_eq!(showcase.children()[0].style().gap, DEFAULT_BADGE_GAP);
}

#[test]
fn props_use_defaults_and_accept_children_alias() {
    let badge: Badge = serde_json::from_value(json!({"children": "New"})).unwrap();
    assert_eq!(badge, Badge::new("New", BadgeVariant::Default));
    assert_eq!(badge.size, BadgeSize::Md);

    assert!(serde_json::from_value::<Badge>(json!({"text": "x", "variant": "loud"})).is_err());
    assert!(serde_json::from_value::<Badge>(json!({"text": "x", "size": "xl"})).is_err());
}
