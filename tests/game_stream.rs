mod support;

use reqwest::StatusCode;

const FORM: &str = "application/x-www-form-urlencoded";

#[tokio::test]
async fn test_viewers_receive_published_events() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();
    let game_id = support::start_game(&client, base_url).await;

    let join_url = format!("{base_url}/join_game/{game_id}");
    let (first, second) = tokio::join!(client.get(&join_url).send(), client.get(&join_url).send());
    let mut first = first.expect("first join should succeed");
    let mut second = second.expect("second join should succeed");
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        first.headers()["content-type"],
        "text/event-stream",
        "join should open an event stream"
    );
    assert_eq!(first.headers()["access-control-allow-origin"], "*");

    let res = client
        .post(format!("{base_url}/game_event"))
        .header("content-type", FORM)
        .body(format!("game_id={game_id}&event=roll%3A4"))
        .send()
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(support::next_frame(&mut first).await, "data: roll:4\n\n");
    assert_eq!(support::next_frame(&mut second).await, "data: roll:4\n\n");
}

#[tokio::test]
async fn test_disconnected_viewer_does_not_block_the_session() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();
    let game_id = support::start_game(&client, base_url).await;

    let join_url = format!("{base_url}/join_game/{game_id}");
    let leaving = client.get(&join_url).send().await.expect("join should succeed");
    let mut staying = client.get(&join_url).send().await.expect("join should succeed");
    drop(leaving);

    for event in ["one", "two"] {
        let res = client
            .post(format!("{base_url}/game_event"))
            .json(&serde_json::json!({ "game_id": game_id, "event": event }))
            .send()
            .await
            .expect("request should succeed");
        assert_eq!(res.status(), StatusCode::OK);
    }

    assert_eq!(support::next_frame(&mut staying).await, "data: one\n\n");
    assert_eq!(support::next_frame(&mut staying).await, "data: two\n\n");
}

#[tokio::test]
async fn test_event_for_unknown_game_is_rejected() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base_url}/game_event"))
        .header("content-type", FORM)
        .body("game_id=missing&event=roll%3A4")
        .send()
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.expect("expected json body");
    assert_eq!(body["error"], "unknown game_id");
}

#[tokio::test]
async fn test_join_for_unknown_game_is_rejected() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{base_url}/join_game/missing"))
        .send()
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
