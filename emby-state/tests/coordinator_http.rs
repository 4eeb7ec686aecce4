//! Coordinators against a mock Emby server

use std::time::Duration;

use emby_api::EmbyClient;
use emby_state::{
    Coordinator, CoordinatorConfig, LatestItemsResource, SessionsResource, StateError,
};
use mockito::{Matcher, Server};

fn sessions_config() -> CoordinatorConfig {
    CoordinatorConfig::sessions().with_min_refresh_interval(Duration::ZERO)
}

#[tokio::test]
async fn test_sessions_refresh_indexes_by_client() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/emby/Sessions")
        .match_header("X-Emby-Token", "key")
        .with_status(200)
        .with_body(
            r#"[
                {"Id":"1","UserName":"bob","PlayState":{"IsPlaying":true}},
                {"UserName":"nobody"}
            ]"#,
        )
        .create_async()
        .await;

    let client = EmbyClient::new(&server.url(), "key").unwrap();
    let coordinator = Coordinator::new(SessionsResource::new(client), sessions_config()).unwrap();

    let index = coordinator.first_refresh().await.unwrap();
    assert_eq!(index.len(), 1);
    assert!(index.get("1").unwrap().is_playing());
}

#[tokio::test]
async fn test_failed_poll_serves_previous_snapshot() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", "/emby/Sessions")
        .with_status(200)
        .with_body(r#"[{"Id":"1","UserName":"bob"}]"#)
        .expect(1)
        .create_async()
        .await;

    let client = EmbyClient::new(&server.url(), "key").unwrap();
    let coordinator = Coordinator::new(SessionsResource::new(client), sessions_config()).unwrap();
    coordinator.refresh().await.unwrap();
    ok.assert_async().await;
    ok.remove_async().await;

    server
        .mock("GET", "/emby/Sessions")
        .with_status(502)
        .create_async()
        .await;

    let err = coordinator.refresh().await.unwrap_err();
    assert!(matches!(err, StateError::RefreshFailed { .. }));

    let cached = coordinator.get_cached().unwrap();
    assert_eq!(cached.get("1").unwrap().user_name.as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_malformed_payload_is_a_failed_refresh() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/emby/Sessions")
        .with_status(200)
        .with_body(r#"{"not":"an array"}"#)
        .create_async()
        .await;

    let client = EmbyClient::new(&server.url(), "key").unwrap();
    let coordinator = Coordinator::new(SessionsResource::new(client), sessions_config()).unwrap();

    assert!(coordinator.refresh().await.is_err());
    assert!(coordinator.get_cached().is_none());
    assert!(coordinator.last_error().unwrap().contains("Parse error"));
}

#[tokio::test]
async fn test_latest_items_refresh() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/emby/Users/u1/Items/Latest")
        .match_query(Matcher::UrlEncoded("Limit".into(), "10".into()))
        .with_status(200)
        .with_body(
            r#"[
                {"Id":"a","Name":"Arrival","Type":"Movie"},
                {"Id":"b","Name":"Dune","Type":"Movie"}
            ]"#,
        )
        .create_async()
        .await;

    let client = EmbyClient::new(&server.url(), "key").unwrap();
    let coordinator = Coordinator::new(
        LatestItemsResource::new(client, "u1"),
        CoordinatorConfig::latest_items(),
    )
    .unwrap();

    let latest = coordinator.first_refresh().await.unwrap();
    assert_eq!(latest.first_of_type("Movie").unwrap().name.as_deref(), Some("Arrival"));
}
