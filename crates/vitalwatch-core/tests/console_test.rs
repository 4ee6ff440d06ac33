#![allow(clippy::unwrap_used)]
// End-to-end tests for `Console` and its page containers against wiremock.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vitalwatch_core::dashboard::DATABASE;
use vitalwatch_core::model::ServiceState;
use vitalwatch_core::{
    AlertFilter, AlertId, AlertStatus, Console, ConsoleConfig, CoreError, DeviceFilter, DeviceUuid,
    LoadState, LoginError, LoginForm, PageRequest, Session, UserId,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Console) {
    let server = MockServer::start().await;
    let config = ConsoleConfig::with_base_url(&format!("{}/api/v1", server.uri())).unwrap();
    let console = Console::new(config, Session::in_memory()).unwrap();
    (server, console)
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "status": 200, "message": "OK", "data": data })
}

fn page_json(content: serde_json::Value, page: u32, total_pages: u32) -> serde_json::Value {
    let len = content.as_array().map_or(0, Vec::len);
    json!({
        "content": content,
        "page": page,
        "size": 10,
        "totalElements": u64::from(total_pages) * 10,
        "totalPages": total_pages,
        "first": page == 0,
        "last": page + 1 >= total_pages,
        "numberOfElements": len
    })
}

fn alert_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "userId": "u-1",
        "userName": "Mai Tran",
        "timestamp": "2026-03-01T08:15:00Z",
        "heartRate": 142,
        "spO2": 91,
        "mlScore": 0.92,
        "severity": "HIGH",
        "status": status
    })
}

fn device_json(id: i64, name: &str, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "deviceUuid": format!("uuid-{id}"),
        "deviceName": name,
        "isActive": active,
        "userId": 7,
        "username": "mai"
    })
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_with_blank_password_sends_nothing() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let form = LoginForm::new("admin", SecretString::from(String::new()));
    let err = console.login(&form).await.unwrap_err();
    assert!(matches!(err, LoginError::MissingField { .. }));
    assert!(!console.session().is_authenticated());
}

#[tokio::test]
async fn test_login_stores_token_and_identity() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({ "username": "admin", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "token": "jwt-abc" }))))
        .expect(1)
        .mount(&server)
        .await;

    let form = LoginForm::new("admin", SecretString::from("s3cret".to_owned()));
    let user = console.login(&form).await.unwrap();
    assert_eq!(user.username, "admin");

    let token = console.session().token().unwrap().unwrap();
    assert_eq!(token.expose_secret(), "jwt-abc");
    assert_eq!(console.session().user().unwrap().unwrap().username, "admin");
}

#[tokio::test]
async fn test_login_rejection_is_invalid_credentials() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let form = LoginForm::new("admin", SecretString::from("wrong".to_owned()));
    let err = console.login(&form).await.unwrap_err();
    assert!(matches!(err, LoginError::InvalidCredentials));
    assert!(console.session().token().unwrap().is_none());
}

#[tokio::test]
async fn test_session_token_is_sent_as_bearer() {
    let (server, console) = setup().await;
    console
        .session()
        .set_token(&SecretString::from("jwt-xyz".to_owned()))
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard"))
        .and(header("authorization", "Bearer jwt-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dashboard_json(true)))
        .expect(1)
        .mount(&server)
        .await;

    console.dashboard_snapshot().await.unwrap();
}

#[tokio::test]
async fn test_logout_clears_token() {
    let (_server, console) = setup().await;
    console
        .session()
        .set_token(&SecretString::from("jwt".to_owned()))
        .unwrap();
    console.logout().unwrap();
    assert!(!console.session().is_authenticated());
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_user_is_none() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "User not found" })))
        .mount(&server)
        .await;

    assert!(console.get_user(UserId(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_detail_joins_profile_and_devices() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 7,
            "username": "mai",
            "email": "mai@example.test",
            "fullName": "Mai Tran",
            "profilePictureUrl": "",
            "gender": "FEMALE",
            "enabled": true
        }))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user/7/devices"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!([device_json(3, "Band", true)]))),
        )
        .mount(&server)
        .await;

    let detail = console.user_detail(UserId(7)).await.unwrap().unwrap();
    assert_eq!(detail.user.full_name, "Mai Tran");
    assert!(detail.user.profile_picture_url.is_none());
    assert_eq!(detail.devices.len(), 1);
    assert_eq!(detail.devices[0].name, "Band");
}

#[tokio::test]
async fn test_user_keeps_reported_bmi_when_inconsistent() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 8,
            "username": "bao",
            "email": "bao@example.test",
            "fullName": "Bao Tran",
            "weightKg": 60.0,
            "heightM": 1.6,
            "bmi": 31.2,
            "enabled": true
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let user = console.get_user(UserId(8)).await.unwrap().unwrap();
    assert_eq!(user.bmi, Some(31.2));
    assert_eq!(user.bmi_matches_metrics(), Some(false));
    assert_eq!(user.bmi_display(), "31.2");
}

#[tokio::test]
async fn test_user_health_sends_window() {
    let (server, console) = setup().await;
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/user/7/uuid-3/health-data"))
        .and(query_param("from", "2026-03-01T11:30:00Z"))
        .and(query_param("to", "2026-03-01T12:30:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "deviceUuid": "uuid-3",
            "dataPoints": [
                { "timestamp": "2026-03-01T11:45:00Z", "heartRate": 72, "spO2": 98, "stepCount": 40 },
                { "timestamp": "not a time", "heartRate": 80, "spO2": 97, "stepCount": 10 }
            ]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let series = console
        .user_health(
            UserId(7),
            &DeviceUuid::from("uuid-3".to_owned()),
            vitalwatch_core::TimeRange::LastHour,
            now,
        )
        .await
        .unwrap();
    assert_eq!(series.metrics.len(), 1);
    assert_eq!(series.total_steps(), 40);
}

// ── Paged lists ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_devices_page_pages_and_filters_locally() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            json!([device_json(1, "Band", true), device_json(2, "Watch", false)]),
            0,
            3,
        ))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            json!([device_json(11, "Ring", true)]),
            1,
            3,
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let page = console.devices_page(PageRequest::default(), DeviceFilter::default());
    page.load().await;

    let snap = page.snapshot();
    assert_eq!(snap.state, LoadState::Loaded);
    assert_eq!(snap.pager.unwrap().label(), "1 of 3");
    assert_eq!(snap.view.visible_len(), 2);

    page.set_filter(DeviceFilter {
        search: String::new(),
        active: Some(false),
    });
    let snap = page.snapshot();
    assert_eq!(snap.view.visible_len(), 1);
    assert_eq!(snap.view.visible().next().unwrap().name, "Watch");

    assert!(page.next_page().await);
    let snap = page.snapshot();
    assert_eq!(snap.pager.unwrap().label(), "2 of 3");
    assert_eq!(snap.view.items().len(), 1);
    assert_eq!(snap.view.visible_len(), 0);
}

#[tokio::test]
async fn test_failed_list_settles_failed_with_server_message() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database unavailable" })),
        )
        .mount(&server)
        .await;

    let page = console.users_page(PageRequest::default(), vitalwatch_core::UserFilter::default());
    page.load().await;

    let snap = page.snapshot();
    assert_eq!(
        snap.state,
        LoadState::Failed {
            message: "API error: database unavailable".into()
        }
    );
    assert!(snap.view.items().is_empty());
}

// ── Dashboard ───────────────────────────────────────────────────────

fn dashboard_json(connected: bool) -> serde_json::Value {
    json!({
        "apiUsageStats": {
            "requestsPerMinute": 120.0,
            "averageResponseTimeMs": 45.0,
            "successRatePercentage": 99.0
        },
        "usersStats": { "totalUsers": 200, "activeUsers": 150 },
        "devicesStats": { "totalDevices": 80, "activeDevices": 60, "inactiveDevices": 20 },
        "databaseStats": {
            "responseTimeMs": 3.0,
            "connectionPoolSize": 20,
            "activeConnections": 5,
            "databaseSizeGB": 1.5,
            "connected": connected
        },
        "serverStats": {
            "uptime": 93_780,
            "cpuUsage": 35.0,
            "memoryUsage": 50.0,
            "diskUsage": 40.0,
            "totalMemoryGB": 16.0,
            "totalDiskGB": 100.0
        }
    })
}

#[tokio::test]
async fn test_dashboard_disconnected_database_row_is_stopped() {
    let (server, console) = setup().await;
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dashboard_json(false)))
        .mount(&server)
        .await;

    let view = console.dashboard(now).await.unwrap();
    assert_eq!(view.service(DATABASE).unwrap().state, ServiceState::Stopped);
    assert_eq!(view.users.inactive, 50);
    assert_eq!(view.system.uptime, "1d 2h 3m");
    assert_eq!(view.checked_at, now);
}

// ── Alerts ──────────────────────────────────────────────────────────

async fn mount_alert_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            json!([alert_json("a-1", "NEW"), alert_json("a-2", "NEW"), alert_json("a-3", "VIEWED")]),
            0,
            1,
        ))))
        .mount(server)
        .await;
}

fn status_of(board: &vitalwatch_core::AlertBoard, id: &str) -> AlertStatus {
    board
        .list()
        .snapshot()
        .view
        .items()
        .iter()
        .find(|a| a.id.as_str() == id)
        .unwrap()
        .status
}

#[tokio::test]
async fn test_viewing_new_alert_changes_only_that_alert() {
    let (server, console) = setup().await;
    mount_alert_list(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/alerts/a-1/viewed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let board = console.alert_board(PageRequest::default(), AlertFilter::default());
    board.load().await;

    let shown = board.view(&AlertId::from("a-1")).await.unwrap().unwrap();
    assert_eq!(shown.status, AlertStatus::Viewed);
    assert_eq!(status_of(&board, "a-1"), AlertStatus::Viewed);
    assert_eq!(status_of(&board, "a-2"), AlertStatus::New);
    assert_eq!(status_of(&board, "a-3"), AlertStatus::Viewed);
}

#[tokio::test]
async fn test_viewing_seen_alert_issues_no_call() {
    let (server, console) = setup().await;
    mount_alert_list(&server).await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let board = console.alert_board(PageRequest::default(), AlertFilter::default());
    board.load().await;

    let shown = board.view(&AlertId::from("a-3")).await.unwrap().unwrap();
    assert_eq!(shown.status, AlertStatus::Viewed);
}

#[tokio::test]
async fn test_resolving_resolved_alert_issues_no_call() {
    let (server, console) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page_json(
            json!([alert_json("a-1", "RESOLVED")]),
            0,
            1,
        ))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/alerts/a-1/resolved"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let board = console.alert_board(PageRequest::default(), AlertFilter::default());
    board.load().await;

    let resolved = board.resolve(&AlertId::from("a-1")).await.unwrap().unwrap();
    assert_eq!(resolved.status, AlertStatus::Resolved);
    assert_eq!(status_of(&board, "a-1"), AlertStatus::Resolved);
}

#[tokio::test]
async fn test_failed_resolve_keeps_local_status() {
    let (server, console) = setup().await;
    mount_alert_list(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/alerts/a-2/resolved"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let board = console.alert_board(PageRequest::default(), AlertFilter::default());
    board.load().await;

    let err = board.resolve(&AlertId::from("a-2")).await.unwrap_err();
    assert!(matches!(err, CoreError::Api { .. }));
    assert_eq!(status_of(&board, "a-2"), AlertStatus::Resolved);
}

#[tokio::test]
async fn test_missing_alert_is_none() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/alerts/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(console.get_alert(&AlertId::from("nope")).await.unwrap().is_none());
}
