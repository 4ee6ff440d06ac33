//! Wire types for the VitalWatch REST API.
//!
//! Field names use camelCase via `#[serde(rename_all = "camelCase")]`.
//! Response types are what sits inside the `data` member of the envelope
//! (or the whole body, for bare endpoints).

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

// ── Pagination ───────────────────────────────────────────────────────

/// Paginated list wrapper returned by every list endpoint.
///
/// A page index at or past `total_pages` comes back with empty `content`
/// and `total_pages` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
}

impl<T> Page<T> {
    /// Map the content while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }
}

/// Query parameters for list endpoints. `page` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort_by: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_by: None,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort_by: None,
        }
    }

    /// Same request, different page.
    pub fn at(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ];
        if let Some(ref sort_by) = self.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        params
    }
}

// ── Auth ─────────────────────────────────────────────────────────────

/// `POST /login` body.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// `POST /login` data.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: SecretString,
}

/// `POST /register` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// `MALE`, `FEMALE` or `OTHER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

// ── Users ────────────────────────────────────────────────────────────

/// User profile — from `GET /users` and `GET /user/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub profile_picture_url: Option<String>,
    /// ISO 8601 date.
    pub dob: Option<String>,
    /// One of: `MALE`, `FEMALE`, `OTHER`.
    pub gender: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_m: Option<f64>,
    pub bmi: Option<f64>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub devices: Vec<DeviceResponse>,
}

/// `PATCH /user` body. Absent fields are left unchanged server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_m: Option<f64>,
}

/// `PATCH /user/{id}/password` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(serialize_with = "expose")]
    pub current_password: SecretString,
    #[serde(serialize_with = "expose")]
    pub new_password: SecretString,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Wearable device — from `GET /devices` and `GET /user/{id}/devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub id: i64,
    pub device_uuid: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub is_active: bool,
    pub user_id: Option<i64>,
    pub username: Option<String>,
}

/// `POST /device` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceRequest {
    pub device_uuid: String,
    pub device_name: String,
    pub username: String,
}

/// `PUT /devices/{id}/config` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfigRequest {
    pub id: i64,
    pub device_uuid: String,
    pub device_name: String,
    pub is_active: bool,
    pub username: String,
}

// ── Health data ──────────────────────────────────────────────────────

/// One sample inside a health-data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDataPoint {
    /// ISO 8601 date-time.
    pub timestamp: String,
    pub heart_rate: Option<f64>,
    #[serde(alias = "spO2")]
    pub spo2: Option<f64>,
    pub step_count: Option<u64>,
}

/// From `GET /user/{id}/{deviceUuid}/health-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDataResponse {
    pub device_uuid: String,
    #[serde(default)]
    pub data_points: Vec<HealthDataPoint>,
}

/// Time window for health-data queries, as ISO 8601 instants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthDataQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl HealthDataQuery {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref from) = self.from {
            params.push(("from", from.clone()));
        }
        if let Some(ref to) = self.to {
            params.push(("to", to.clone()));
        }
        params
    }
}

/// `POST /sync/health-data` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncHealthDataRequest {
    pub device_uuid: String,
    pub data_points: Vec<SyncDataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncDataPoint {
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spo2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count: Option<u64>,
}

// ── Alerts ───────────────────────────────────────────────────────────

/// Health alert — from `GET /alerts` and `GET /alerts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    /// ISO 8601 date-time.
    pub timestamp: String,
    pub heart_rate: f64,
    #[serde(rename = "spO2", alias = "spo2")]
    pub spo2: f64,
    /// Model confidence, 0..1.
    pub ml_score: f64,
    /// One of: `Low`, `Medium`, `High`.
    pub severity: String,
    /// One of: `New`, `Viewed`, `Resolved`.
    pub status: String,
}

// ── Dashboard ────────────────────────────────────────────────────────

/// Composite system snapshot — from `GET /dashboard` (bare body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub api_usage_stats: ApiUsageStats,
    pub users_stats: UsersStats,
    pub devices_stats: DevicesStats,
    pub database_stats: DatabaseStats,
    pub server_stats: ServerStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUsageStats {
    pub requests_per_minute: f64,
    pub average_response_time_ms: f64,
    pub success_rate_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersStats {
    pub total_users: u64,
    pub active_users: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesStats {
    pub total_devices: u64,
    pub active_devices: u64,
    pub inactive_devices: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub response_time_ms: f64,
    pub connection_pool_size: u64,
    pub active_connections: u64,
    #[serde(rename = "databaseSizeGB")]
    pub database_size_gb: f64,
    pub connected: bool,
}

/// Server resources. Usage fields are percentages (0–100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStats {
    /// Seconds since start.
    pub uptime: u64,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    #[serde(rename = "totalMemoryGB")]
    pub total_memory_gb: f64,
    #[serde(rename = "totalDiskGB")]
    pub total_disk_gb: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_past_end_keeps_total_pages() {
        let page: Page<UserResponse> = serde_json::from_value(json!({
            "content": [],
            "page": 5,
            "size": 10,
            "totalElements": 23,
            "totalPages": 3,
            "first": false,
            "last": true
        }))
        .unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_request_query_includes_sort_only_when_set() {
        let plain = PageRequest::new(0, 10).to_query();
        assert_eq!(plain, vec![("page", "0".into()), ("size", "10".into())]);

        let sorted = PageRequest {
            sort_by: Some("username".into()),
            ..PageRequest::new(2, 25)
        };
        assert_eq!(sorted.at(3).to_query()[0], ("page", "3".into()));
        assert_eq!(sorted.to_query()[2], ("sortBy", "username".into()));
    }

    #[test]
    fn login_request_serializes_password() {
        let body = serde_json::to_value(LoginRequest {
            username: "admin".into(),
            password: SecretString::from("hunter2"),
        })
        .unwrap();
        assert_eq!(body, json!({"username": "admin", "password": "hunter2"}));
    }

    #[test]
    fn dashboard_uses_gb_field_names() {
        let stats: DatabaseStats = serde_json::from_value(json!({
            "responseTimeMs": 12.0,
            "connectionPoolSize": 100,
            "activeConnections": 45,
            "databaseSizeGB": 2.4,
            "connected": true
        }))
        .unwrap();
        assert!((stats.database_size_gb - 2.4).abs() < f64::EPSILON);
    }

    #[test]
    fn update_user_omits_absent_fields() {
        let body = serde_json::to_value(UpdateUserRequest {
            id: 3,
            full_name: Some("Ana Lima".into()),
            ..UpdateUserRequest::default()
        })
        .unwrap();
        assert_eq!(body, json!({"id": 3, "fullName": "Ana Lima"}));
    }
}
