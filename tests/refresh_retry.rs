mod common;

use std::time::Duration;

use gym_api_gateway::{
    ApiClient, ApiRequest, Config, Error, FailureKind, InMemorySessionStore, SessionKey,
    SessionStore,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{authorization, harness, requests_to, signed_in};

const REFRESH: &str = "/api/v1/users/token/refresh/";

async fn mount_refresh(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/notifications/"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/notifications/"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .and(body_json(json!({"refresh": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = signed_in(&server, "A1", "R1");
    let resp = h.client.notifications().list().await.expect("replayed");

    assert_eq!(resp.status.as_u16(), 200);
    assert_eq!(resp.body, json!([{"id": 3}]));
    assert_eq!(h.store.get(SessionKey::Access).as_deref(), Some("A2"));
    assert_eq!(h.store.get(SessionKey::Refresh).as_deref(), Some("R1"));
    assert!(h.redirect.routes().is_empty());

    let refresh_calls = requests_to(&server, REFRESH).await;
    assert_eq!(authorization(&refresh_calls[0]), None);
}

#[tokio::test]
async fn replayed_request_keeps_method_query_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/bookings/5/"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/bookings/5/"))
        .and(header("Authorization", "Bearer A2"))
        .and(body_json(json!({"status": "cancelled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})),
        1,
    )
    .await;

    let h = signed_in(&server, "A1", "R1");
    h.client.bookings().cancel(5).await.expect("cancelled");
}

#[tokio::test]
async fn rotated_refresh_token_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gyms/"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gyms/"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access": "A2", "refresh": "R2"})),
        1,
    )
    .await;

    let h = signed_in(&server, "A1", "R1");
    h.client.gyms().list().await.expect("list");

    assert_eq!(h.store.get(SessionKey::Refresh).as_deref(), Some("R2"));
}

#[tokio::test]
async fn invalid_refresh_token_clears_session_and_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({"detail": "Token is invalid or expired"})),
        1,
    )
    .await;

    let h = signed_in(&server, "A1", "R1");
    let err = h.client.users().me().await.expect_err("session lost");

    assert!(err.is_session_expired());
    assert_eq!(err.kind(), FailureKind::Response);
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert_eq!(
        err.body(),
        Some(&json!({"detail": "Token is invalid or expired"}))
    );
    assert_eq!(h.store.get(SessionKey::Access), None);
    assert_eq!(h.store.get(SessionKey::Refresh), None);
    assert_eq!(h.redirect.routes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn malformed_refresh_response_is_a_failed_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/payments/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"token": "A2"})),
        1,
    )
    .await;

    let h = signed_in(&server, "A1", "R1");
    let err = h.client.payments().list().await.expect_err("malformed");

    match err {
        Error::SessionExpired(cause) => assert!(matches!(*cause, Error::Decode { .. })),
        other => panic!("expected Error::SessionExpired, got {:?}", other),
    }
    assert!(h.store.credentials().is_none());
    assert_eq!(h.redirect.routes().len(), 1);
}

#[tokio::test]
async fn refresh_server_error_is_a_failed_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gyms/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, ResponseTemplate::new(503), 1).await;

    let h = signed_in(&server, "A1", "R1");
    let err = h.client.gyms().list().await.expect_err("refresh failed");

    assert!(err.is_session_expired());
    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    assert!(h.store.credentials().is_none());
}

#[tokio::test]
async fn refresh_timeout_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gyms/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"access": "A2"}))
            .set_delay(Duration::from_secs(3)),
        1,
    )
    .await;

    let store = std::sync::Arc::new(InMemorySessionStore::with_credentials(
        "A1",
        Some("R1".into()),
    ));
    let redirect = std::sync::Arc::new(common::RecordingRedirect::default());
    let client = ApiClient::builder(Config::from_values(server.uri(), None, None, Some(1)))
        .session_store(store.clone())
        .login_redirect(redirect.clone())
        .build()
        .expect("client");

    let err = client.gyms().list().await.expect_err("timed out");

    assert!(err.is_session_expired());
    assert_eq!(err.kind(), FailureKind::Network);
    assert!(err.status().is_none());
    assert!(store.credentials().is_none());
    assert_eq!(redirect.routes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn missing_refresh_token_skips_refresh_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gyms/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})),
        0,
    )
    .await;

    let h = harness(&server, InMemorySessionStore::with_credentials("A1", None));
    let err = h.client.gyms().list().await.expect_err("no refresh token");

    assert!(err.is_session_expired());
    assert!(!h.client.is_authenticated());
    assert_eq!(h.redirect.routes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn second_401_after_replay_is_returned_without_another_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin-only/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "nope"})))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})),
        1,
    )
    .await;

    let h = signed_in(&server, "A1", "R1");
    let err = h.client.get("/admin-only/").await.expect_err("still 401");

    assert!(err.is_unauthorized());
    assert!(!err.is_session_expired());
    assert_eq!(err.body(), Some(&json!({"detail": "nope"})));
    assert_eq!(h.store.get(SessionKey::Access).as_deref(), Some("A2"));
    assert!(h.redirect.routes().is_empty());
}

#[tokio::test]
async fn request_with_retry_marker_never_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gyms/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})),
        0,
    )
    .await;

    let h = signed_in(&server, "A1", "R1");
    let err = h
        .client
        .send(ApiRequest::get("/gyms/").mark_retried())
        .await
        .expect_err("401 propagated");

    assert!(err.is_unauthorized());
    assert_eq!(h.store.get(SessionKey::Access).as_deref(), Some("A1"));
}

#[tokio::test]
async fn non_401_errors_bypass_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gyms/1/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "forbidden"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gyms/2/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})),
        0,
    )
    .await;

    let h = signed_in(&server, "A1", "R1");

    let forbidden = h.client.gyms().get(1).await.expect_err("403");
    assert_eq!(forbidden.status().map(|s| s.as_u16()), Some(403));
    assert_eq!(forbidden.body(), Some(&json!({"detail": "forbidden"})));

    let broken = h.client.gyms().get(2).await.expect_err("500");
    assert_eq!(broken.status().map(|s| s.as_u16()), Some(500));
    assert_eq!(broken.kind(), FailureKind::Response);

    assert_eq!(h.store.get(SessionKey::Access).as_deref(), Some("A1"));
    assert!(h.redirect.routes().is_empty());
}
