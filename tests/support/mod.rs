// One-time server bootstrap shared by the integration tests in a binary.
#![allow(dead_code)]

use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test server is running and return its base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // The server gets its own OS thread and runtime so it outlives each
        // `#[tokio::test]` runtime.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Ephemeral port avoids clashing with a locally running service.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{addr}"));
                game_stream::run(listener).await.expect("server failed");
            });
        });
        wait_for_server(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };
    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

// Starts a game session and returns its id.
pub async fn start_game(client: &reqwest::Client, base_url: &str) -> String {
    let response = client
        .post(format!("{base_url}/start_game"))
        .send()
        .await
        .expect("start_game request should succeed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("expected json body");
    body["game_id"]
        .as_str()
        .expect("expected game_id")
        .to_string()
}

// Reads chunks from an open event stream until one full frame has arrived.
pub async fn next_frame(response: &mut reqwest::Response) -> String {
    let mut frame = String::new();
    tokio::time::timeout(Duration::from_secs(2), async {
        while !frame.ends_with("\n\n") {
            let chunk = response
                .chunk()
                .await
                .expect("expected chunk")
                .expect("expected stream to stay open");
            frame.push_str(std::str::from_utf8(&chunk).expect("expected utf-8"));
        }
    })
    .await
    .expect("expected a frame");
    frame
}
