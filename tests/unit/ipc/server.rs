use super::*;
use serde_json::json;

#[derive(Default)]
struct Doc {
    config: Value,
    selection: Option<Value>,
}

impl CanvasHandler for Doc {
    fn apply_update(&mut self, config: Value) {
        self.config = config;
    }

    fn selection(&self) -> Option<Value> {
        self.selection.clone()
    }

    fn content(&self) -> Option<Value> {
        self.config.get("content").cloned()
    }
}

async fn exchange(server: &CanvasServer, doc: &mut Doc, frame: &[u8]) -> Vec<u8> {
    let path = server.address().path().to_path_buf();
    let frame = frame.to_vec();
    let client = tokio::spawn(async move {
        let mut s = UnixStream::connect(path).await.unwrap();
        s.write_all(&frame).await.unwrap();
        let mut out = Vec::new();
        s.read_to_end(&mut out).await.unwrap();
        out
    });
    server.serve_one(doc).await.unwrap();
    client.await.unwrap()
}

#[tokio::test]
async fn update_applies_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let server =
        CanvasServer::bind(&SocketResolver::new(dir.path()), &CanvasId::new("d").unwrap()).unwrap();
    let mut doc = Doc::default();

    let out = exchange(
        &server,
        &mut doc,
        b"{\"type\":\"update\",\"config\":{\"content\":\"hi\"}}\n",
    )
    .await;
    assert!(out.is_empty());
    assert_eq!(doc.config, json!({"content": "hi"}));

    let out = exchange(&server, &mut doc, b"{\"type\":\"getContent\"}\n").await;
    assert_eq!(out, b"{\"type\":\"content\",\"data\":\"hi\"}\n".to_vec());
}

#[tokio::test]
async fn missing_selection_closes_without_reply() {
    let dir = tempfile::tempdir().unwrap();
    let server =
        CanvasServer::bind(&SocketResolver::new(dir.path()), &CanvasId::new("d").unwrap()).unwrap();
    let mut doc = Doc::default();
    assert!(exchange(&server, &mut doc, b"{\"type\":\"getSelection\"}\n").await.is_empty());

    doc.selection = Some(json!({"start": 1, "end": 4}));
    let out = exchange(&server, &mut doc, b"{\"type\":\"getSelection\"}\n").await;
    assert_eq!(
        decode_reply_for_test(&out),
        Reply::Selection {
            data: json!({"start": 1, "end": 4})
        }
    );
}

#[tokio::test]
async fn garbage_is_ignored_and_server_keeps_serving() {
    let dir = tempfile::tempdir().unwrap();
    let server =
        CanvasServer::bind(&SocketResolver::new(dir.path()), &CanvasId::new("d").unwrap()).unwrap();
    let mut doc = Doc::default();

    assert!(exchange(&server, &mut doc, b"definitely not json\n").await.is_empty());
    assert!(exchange(&server, &mut doc, b"{\"type\":\"selfDestruct\"}\n").await.is_empty());
    assert_eq!(doc.config, Value::Null);

    doc.selection = Some(json!("still alive"));
    let out = exchange(&server, &mut doc, b"{\"type\":\"getSelection\"}\n").await;
    assert!(!out.is_empty());
}

#[tokio::test]
async fn bind_replaces_stale_socket_and_drop_removes_it() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = SocketResolver::new(dir.path());
    let id = CanvasId::new("stale").unwrap();
    let path = resolver.resolve(&id).path().to_path_buf();
    std::fs::write(&path, b"left over").unwrap();

    let server = CanvasServer::bind(&resolver, &id).unwrap();
    assert_eq!(server.address().path(), path.as_path());
    drop(server);
    assert!(!path.exists());
}

fn decode_reply_for_test(bytes: &[u8]) -> Reply {
    crate::ipc::protocol::decode_reply(bytes).unwrap()
}

#[tokio::test]
async fn silent_peer_is_dropped_and_later_clients_are_served() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = SocketResolver::new(dir.path());
    let id = CanvasId::new("busy").unwrap();
    let server = CanvasServer::bind(&resolver, &id)
        .unwrap()
        .with_read_timeout(Duration::from_millis(100));
    let path = server.address().path().to_path_buf();

    let mut idle = UnixStream::connect(&path).await.unwrap();
    let canvas = tokio::spawn(async move {
        let mut doc = Doc {
            config: json!({"content": "ready"}),
            selection: None,
        };
        server.serve_one(&mut doc).await.unwrap();
        server.serve_one(&mut doc).await.unwrap();
    });

    let client = crate::ipc::client::CanvasClient::new(crate::ipc::client::ClientOpts {
        socket_dir: dir.path().to_path_buf(),
        timeout: Duration::from_secs(2),
    });
    assert_eq!(client.fetch_content(&id).await.unwrap(), Some(json!("ready")));

    let mut rest = Vec::new();
    idle.read_to_end(&mut rest).await.unwrap();
    assert!(rest.is_empty());
    canvas.await.unwrap();
}
