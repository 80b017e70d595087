use super::*;

fn id(s: &str) -> CanvasId {
    CanvasId::new(s).unwrap()
}

#[test]
fn default_layout_matches_tmp_convention() {
    assert_eq!(
        resolve(&id("document-1")).path(),
        Path::new("/tmp/canvas-document-1.sock")
    );
}

#[test]
fn resolution_is_deterministic() {
    let r = SocketResolver::new("/run/canvases");
    assert_eq!(r.resolve(&id("a")), r.resolve(&id("a")));
    assert_eq!(r.dir(), Path::new("/run/canvases"));
}

#[test]
fn distinct_ids_get_distinct_addresses() {
    let r = SocketResolver::default();
    let ids = ["a", "b", "a-1", "a.1", "A", "calendar-1", "1"];
    let mut seen = std::collections::HashSet::new();
    for s in ids {
        assert!(seen.insert(r.resolve(&id(s))), "collision for {s}");
    }
}
