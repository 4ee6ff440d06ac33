#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vitalwatch_api::types::{
    ChangePasswordRequest, HealthDataQuery, LoginRequest, PageRequest, RegisterDeviceRequest,
    SyncDataPoint, SyncHealthDataRequest,
};
use vitalwatch_api::{ApiClient, Error, StaticToken, TokenSource};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_with(tokens: Arc<dyn TokenSource>) -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api/v1", server.uri());
    let client = ApiClient::with_client(&base, reqwest::Client::new(), tokens).unwrap();
    (server, client)
}

async fn setup() -> (MockServer, ApiClient) {
    setup_with(Arc::new(StaticToken::none())).await
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "status": 200, "message": "OK", "data": data })
}

fn user_json(id: i64, username: &str) -> serde_json::Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.test"),
        "fullName": "Test User",
        "gender": "FEMALE",
        "weightKg": 60.0,
        "heightM": 1.65,
        "bmi": 22.0,
        "enabled": true,
        "devices": []
    })
}

// ── Envelope handling ───────────────────────────────────────────────

#[tokio::test]
async fn test_enveloped_body_returns_data_only() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(user_json(7, "mai"))))
        .mount(&server)
        .await;

    let user = client.get_user(7).await.unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.username, "mai");
    assert_eq!(user.bmi, Some(22.0));
}

#[tokio::test]
async fn test_dashboard_body_is_not_enveloped() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiUsageStats": {
                "requestsPerMinute": 1250.0,
                "averageResponseTimeMs": 45.0,
                "successRatePercentage": 99.88
            },
            "usersStats": { "totalUsers": 10, "activeUsers": 7 },
            "devicesStats": { "totalDevices": 4, "activeDevices": 3, "inactiveDevices": 1 },
            "databaseStats": {
                "responseTimeMs": 12.0,
                "connectionPoolSize": 100,
                "activeConnections": 45,
                "databaseSizeGB": 2.4,
                "connected": false
            },
            "serverStats": {
                "uptime": 1_324_980,
                "cpuUsage": 34.0,
                "memoryUsage": 62.0,
                "diskUsage": 45.0,
                "totalMemoryGB": 16.0,
                "totalDiskGB": 500.0
            }
        })))
        .mount(&server)
        .await;

    let snapshot = client.dashboard().await.unwrap();
    assert_eq!(snapshot.users_stats.total_users, 10);
    assert!(!snapshot.database_stats.connected);
    assert_eq!(snapshot.server_stats.uptime, 1_324_980);
}

#[tokio::test]
async fn test_null_data_decodes_as_unit() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/alerts/ALT001/viewed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": 200, "message": "ok", "data": null })),
        )
        .mount(&server)
        .await;

    client.mark_alert_viewed("ALT001").await.unwrap();
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.get_user(1).await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("oops")),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_error_uses_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "User not found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_user(99).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn test_error_falls_back_to_status_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.list_devices(&PageRequest::default()).await.unwrap_err();
    assert!(
        matches!(err, Error::Api { status: 502, ref message } if message == "HTTP error! status: 502"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_error_with_empty_body_falls_back() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .login(&LoginRequest {
            username: "admin".into(),
            password: SecretString::from("wrong"),
        })
        .await
        .unwrap_err();
    assert!(err.is_auth_rejected());
    assert_eq!(err.to_string(), "HTTP error! status: 401");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let client = ApiClient::with_client(
        "http://127.0.0.1:9/api/v1",
        reqwest::Client::new(),
        Arc::new(StaticToken::none()),
    )
    .unwrap();

    let err = client.dashboard().await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {err:?}");
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let (server, client) = setup_with(Arc::new(StaticToken::new("tok-123"))).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/1/devices"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 5,
            "deviceUuid": "uuid-5",
            "deviceName": "Band",
            "isActive": true,
            "userId": 1,
            "username": "mai"
        }]))))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client.list_user_devices(1).await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].device_uuid, "uuid-5");
}

#[tokio::test]
async fn test_login_returns_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({ "username": "admin", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "token": "jwt" }))))
        .mount(&server)
        .await;

    let resp = client
        .login(&LoginRequest {
            username: "admin".into(),
            password: SecretString::from("s3cret"),
        })
        .await
        .unwrap();
    assert_eq!(resp.token.expose_secret(), "jwt");
}

// ── Lists and queries ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_users_sends_page_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "content": [user_json(1, "a"), user_json(2, "b")],
            "page": 0,
            "size": 10,
            "totalElements": 23,
            "totalPages": 3,
            "first": true,
            "last": false
        }))))
        .mount(&server)
        .await;

    let page = client.list_users(&PageRequest::new(0, 10)).await.unwrap();
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_pages, 3);
    assert!(page.first);
}

#[tokio::test]
async fn test_page_past_end_is_empty_not_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/alerts"))
        .and(query_param("page", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "content": [],
            "page": 7,
            "size": 10,
            "totalElements": 23,
            "totalPages": 3,
            "first": false,
            "last": true
        }))))
        .mount(&server)
        .await;

    let page = client.list_alerts(&PageRequest::new(7, 10)).await.unwrap();
    assert!(page.content.is_empty());
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn test_health_data_sends_window() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/3/dev-9/health-data"))
        .and(query_param("from", "2026-01-01T00:00:00Z"))
        .and(query_param("to", "2026-01-01T01:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "deviceUuid": "dev-9",
            "dataPoints": [
                { "timestamp": "2026-01-01T00:05:00Z", "heartRate": 72.0, "spo2": 98.0, "stepCount": 12 }
            ]
        }))))
        .mount(&server)
        .await;

    let window = HealthDataQuery {
        from: Some("2026-01-01T00:00:00Z".into()),
        to: Some("2026-01-01T01:00:00Z".into()),
    };
    let data = client.user_health_data(3, "dev-9", &window).await.unwrap();
    assert_eq!(data.data_points.len(), 1);
    assert_eq!(data.data_points[0].step_count, Some(12));
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_register_device_posts_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/device"))
        .and(body_json(json!({
            "deviceUuid": "u-1",
            "deviceName": "Wrist",
            "username": "mai"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
            "id": 11,
            "deviceUuid": "u-1",
            "deviceName": "Wrist",
            "isActive": true,
            "userId": 2,
            "username": "mai"
        }))))
        .mount(&server)
        .await;

    let device = client
        .register_device(&RegisterDeviceRequest {
            device_uuid: "u-1".into(),
            device_name: "Wrist".into(),
            username: "mai".into(),
        })
        .await
        .unwrap();
    assert_eq!(device.id, 11);
}

#[tokio::test]
async fn test_change_password_and_sync_accept_empty_data() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/user/4/password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 200, "message": "updated" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/sync/health-data"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client
        .change_password(
            4,
            &ChangePasswordRequest {
                current_password: SecretString::from("old"),
                new_password: SecretString::from("new"),
            },
        )
        .await
        .unwrap();

    client
        .sync_health_data(&SyncHealthDataRequest {
            device_uuid: "u-1".into(),
            data_points: vec![SyncDataPoint {
                timestamp: "2026-01-01T00:00:00Z".into(),
                heart_rate: Some(70.0),
                spo2: None,
                step_count: None,
            }],
        })
        .await
        .unwrap();
}
