use super::*;
use crate::render::font::test_font;

fn engine() -> Option<TextLayoutEngine> {
    let Some(font) = test_font() else {
        eprintln!("skipping: no usable font on this machine");
        return None;
    };
    Some(TextLayoutEngine::new(&font).unwrap())
}

#[test]
fn wrapping_narrows_and_grows_the_box() {
    let Some(mut engine) = engine() else { return };
    let style = TextStyle::default();
    let text = "the quick brown fox jumps over the lazy dog";

    let (w1, h1) = engine.measure(text, &style, None);
    let (w2, h2) = engine.measure(text, &style, Some(w1 / 3.0));
    assert!(w1 > 0.0 && h1 > 0.0);
    assert!(w2 < w1);
    assert!(h2 > h1);
}

#[test]
fn shaped_lines_cover_the_text_in_order() {
    let Some(mut engine) = engine() else { return };
    let style = TextStyle {
        font_size: 20.0,
        ..TextStyle::default()
    };
    let text = "alpha beta gamma delta";
    let (w, _) = engine.measure("alpha beta", &style, None);
    let lines = engine.shape_lines(text, &style, w);

    assert!(lines.len() >= 2);
    let joined = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(joined, text);
    for pair in lines.windows(2) {
        assert!(pair[1].baseline > pair[0].baseline);
    }
    assert!(lines.iter().all(|l| l.advance <= w + 0.5));
}

#[test]
fn measurement_is_deterministic() {
    let Some(mut engine) = engine() else { return };
    let style = TextStyle::default();
    assert_eq!(
        engine.measure("Badge", &style, None),
        engine.measure("Badge", &style, None)
    );
}

#[test]
fn trailing_whitespace_does_not_widen_the_box() {
    let Some(mut engine) = engine() else { return };
    let style = TextStyle::default();
    let (bare, _) = engine.measure("Badge", &style, None);
    let (padded, _) = engine.measure("Badge    ", &style, None);
    assert_eq!(bare, padded);

    let (w, _) = engine.measure("alpha beta", &style, None);
    let lines = engine.shape_lines("alpha beta gamma", &style, w);
    assert_eq!(lines[0].text, "alpha beta");
    assert!(lines[0].advance <= w);
}
