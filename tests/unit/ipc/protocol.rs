use super::*;
use serde_json::json;

#[test]
fn commands_use_wire_type_names() {
    let update = Command::Update {
        config: json!({"title": "x"}),
    };
    assert_eq!(
        encode_frame(&update).unwrap(),
        b"{\"type\":\"update\",\"config\":{\"title\":\"x\"}}\n".to_vec()
    );
    assert_eq!(
        encode_frame(&Command::GetSelection).unwrap(),
        b"{\"type\":\"getSelection\"}\n".to_vec()
    );
    assert_eq!(
        encode_frame(&Command::GetContent).unwrap(),
        b"{\"type\":\"getContent\"}\n".to_vec()
    );
}

#[test]
fn decodes_known_replies() {
    let r = decode_reply(b"{\"type\":\"selection\",\"data\":{\"text\":\"hi\"}}\n").unwrap();
    assert_eq!(
        r,
        Reply::Selection {
            data: json!({"text": "hi"})
        }
    );

    let r = decode_reply(b"  {\"type\":\"content\",\"data\":\"body\"}  ").unwrap();
    assert_eq!(r, Reply::Content { data: json!("body") });

    let r = decode_reply(b"{\"type\":\"selection\"}").unwrap();
    assert_eq!(r, Reply::Selection { data: Value::Null });
}

#[test]
fn unknown_type_is_unrecognized_not_an_error() {
    let r = decode_reply(b"{\"type\":\"pong\",\"extra\":1}").unwrap();
    assert_eq!(r, Reply::Unrecognized);
}

#[test]
fn malformed_frames_are_decode_errors() {
    assert!(matches!(
        decode_reply(b"not json"),
        Err(CanvasError::Serde(_))
    ));
    assert!(matches!(decode_reply(b"{\"data\":1}"), Err(CanvasError::Serde(_))));
    assert!(matches!(decode_reply(b"\n"), Err(CanvasError::Serde(_))));
    assert!(matches!(decode_reply(&[0xff, 0xfe]), Err(CanvasError::Serde(_))));
}

#[test]
fn payload_only_for_matching_kind() {
    let sel = Reply::Selection { data: json!([1, 2]) };
    assert_eq!(
        sel.clone().into_payload(ReplyKind::Selection),
        Some(json!([1, 2]))
    );
    assert_eq!(sel.into_payload(ReplyKind::Content), None);
    assert_eq!(Reply::Ack.into_payload(ReplyKind::Selection), None);
    assert_eq!(
        Reply::Content { data: Value::Null }.into_payload(ReplyKind::Content),
        None
    );
}

#[test]
fn commands_decode_back() {
    let cmd = decode_command(b"{\"type\":\"update\",\"config\":{\"a\":1}}\n").unwrap();
    assert_eq!(cmd, Command::Update { config: json!({"a": 1}) });
    assert!(decode_command(b"{\"type\":\"explode\"}").is_err());
}
