use serde_json::json;

use super::*;

fn texts(el: &Element) -> Vec<(String, Style)> {
    let mut out = Vec::new();
    if let Element::Text { style, content } = el {
        out.push((content.clone(), style.clone()));
    }
    for child in el.children() {
        out.extend(texts(child));
    }
    out
}

#[test]
fn default_card_matches_house_style() {
    let card = Card::titled("Status").element();
    let style = card.style();
    assert_eq!(style.flex_direction, FlexDirection::Column);
    assert_eq!(style.padding, Edges::all(24.0));
    assert_eq!(style.border_radius, 12.0);
    assert_eq!(style.border_width, 1.0);
    assert_eq!(style.background, Some(Color::rgb(0x1a, 0x1a, 0x1a)));
    assert_eq!(style.border_color, Some(Color::rgb(0x33, 0x33, 0x33)));
    assert_eq!(style.width, None);

    let t = texts(&card);
    assert_eq!(t.len(), 1);
    assert_eq!(t[0].0, "Status");
    assert_eq!(t[0].1.font_size, Some(24.0));
    assert_eq!(t[0].1.font_weight, Some(600));
    assert_eq!(t[0].1.margin.bottom, 16.0);
}

#[test]
fn description_tightens_title_spacing() {
    let card = Card::titled("Deploy")
        .description("Production rollout")
        .variant(CardVariant::Light)
        .element();
    let t = texts(&card);
    assert_eq!(t[0].1.margin.bottom, 8.0);
    assert_eq!(t[1].0, "Production rollout");
    assert_eq!(t[1].1.font_size, Some(14.0));
    assert_eq!(t[1].1.color, Some(Color::rgb(0x66, 0x66, 0x66)));
    assert_eq!(t[1].1.margin.bottom, 16.0);
    assert_eq!(card.style().background, Some(Color::WHITE));
}

#[test]
fn rows_are_spread_label_value_pairs() {
    let card = Card::titled("Build")
        .row(CardRow::new("Status", "green"))
        .row(CardRow::new("Duration", "42s"))
        .element();
    let content = card.children().last().unwrap();
    assert_eq!(content.style().flex_direction, FlexDirection::Column);
    assert_eq!(content.style().gap, 8.0);
    assert_eq!(content.children().len(), 2);

    let row = &content.children()[0];
    assert_eq!(row.style().justify_content, Some(JustifyContent::SpaceBetween));
    assert_eq!(row.style().align_items, Some(AlignItems::Center));
    let pair = texts(row);
    assert_eq!(pair[0].0, "Status");
    assert_eq!(pair[0].1.color, Some(Color::rgb(0xa0, 0xa0, 0xa0)));
    assert_eq!(pair[1].0, "green");
    assert_eq!(pair[1].1.font_weight, Some(500));
}

#[test]
fn props_accept_numeric_row_values() {
    let card: Card = serde_json::from_value(json!({
        "title": "Usage",
        "variant": "dark",
        "width": 420,
        "rows": [{"label": "Requests", "value": 1200}, {"label": "Region", "value": "eu"}],
    }))
    .unwrap();
    assert_eq!(card.variant, CardVariant::Dark);
    assert_eq!(card.width, Some(420.0));
    assert_eq!(card.padding, DEFAULT_CARD_PADDING);
    assert_eq!(card.rows[0].value, "1200");
    assert_eq!(card.element().style().width, Some(420.0));
}

#[test]
fn props_reject_unknown_variant_and_bad_values() {
    assert!(serde_json::from_value::<Card>(json!({"variant": "neon"})).is_err());
    assert!(
        serde_json::from_value::<Card>(json!({"rows": [{"label": "a", "value": [1]}]})).is_err()
    );
}
