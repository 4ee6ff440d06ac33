// ── Dashboard view-model types ──
//
// Produced by `DashboardView::derive` from one `/dashboard` snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub active_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub active_pct: f64,
}

/// Server resources. Usage values are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub uptime: String,
    pub uptime_seconds: u64,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub memory_used: String,
    pub memory_total: String,
    /// `"used / total GB"`.
    pub memory_label: String,
    pub disk_usage: f64,
    pub disk_used: String,
    pub disk_total: String,
    pub disk_label: String,
}

impl SystemHealth {
    /// Highest of CPU, memory and disk usage.
    pub fn peak_usage(&self) -> f64 {
        self.cpu_usage.max(self.memory_usage).max(self.disk_usage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum DatabaseState {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub state: DatabaseState,
    pub response_time_ms: f64,
    pub connections: u64,
    pub max_connections: u64,
    pub pool_usage_pct: f64,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiStats {
    pub requests_per_minute: f64,
    pub avg_response_time_ms: f64,
    pub success_rate: f64,
    /// `100 - success_rate`, clamped to `[0, 100]`.
    pub error_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ServiceState {
    Running,
    Stopped,
    Warning,
}

/// One row of the services table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub name: String,
    pub state: ServiceState,
    pub uptime: String,
    pub last_check: DateTime<Utc>,
}
