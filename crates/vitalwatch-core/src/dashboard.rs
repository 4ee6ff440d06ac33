// ── Dashboard derivation ──
//
// Fans one `/dashboard` snapshot out into the view-models the overview
// page renders. Pure: the same snapshot and `checked_at` always produce
// the same view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitalwatch_api::types::DashboardResponse;

use crate::format::{fmt_gb, fmt_gb_usage, fmt_uptime, pct};
use crate::model::{
    ApiStats, DatabaseState, DatabaseStatus, DeviceStats, ServiceState, ServiceStatus,
    SystemHealth, UserStats,
};

/// Any resource above this percentage puts the application server in
/// `Warning`.
pub const RESOURCE_WARNING_PCT: f64 = 90.0;
/// An API error rate above this percentage puts the gateway in `Warning`.
pub const ERROR_RATE_WARNING_PCT: f64 = 5.0;

pub const API_GATEWAY: &str = "API Gateway";
pub const APPLICATION_SERVER: &str = "Application Server";
pub const DATABASE: &str = "Database";

/// Everything the overview page shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub users: UserStats,
    pub system: SystemHealth,
    pub database: DatabaseStatus,
    pub devices: DeviceStats,
    pub api: ApiStats,
    pub services: Vec<ServiceStatus>,
    pub checked_at: DateTime<Utc>,
}

impl DashboardView {
    pub fn derive(snapshot: &DashboardResponse, checked_at: DateTime<Utc>) -> Self {
        let users = user_stats(snapshot);
        let devices = device_stats(snapshot);
        let system = system_health(snapshot);
        let database = database_status(snapshot);
        let api = api_stats(snapshot);
        let services = service_rows(&system, &database, &api, checked_at);

        Self {
            users,
            system,
            database,
            devices,
            api,
            services,
            checked_at,
        }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceStatus> {
        self.services.iter().find(|s| s.name == name)
    }
}

fn user_stats(snapshot: &DashboardResponse) -> UserStats {
    let s = &snapshot.users_stats;
    UserStats {
        total: s.total_users,
        active: s.active_users,
        inactive: s.total_users.saturating_sub(s.active_users),
        active_pct: pct(s.active_users, s.total_users),
    }
}

fn device_stats(snapshot: &DashboardResponse) -> DeviceStats {
    let s = &snapshot.devices_stats;
    DeviceStats {
        total: s.total_devices,
        active: s.active_devices,
        inactive: s.inactive_devices,
        active_pct: pct(s.active_devices, s.total_devices),
    }
}

fn system_health(snapshot: &DashboardResponse) -> SystemHealth {
    let s = &snapshot.server_stats;
    let memory_used = s.total_memory_gb * s.memory_usage / 100.0;
    let disk_used = s.total_disk_gb * s.disk_usage / 100.0;

    SystemHealth {
        uptime: fmt_uptime(s.uptime),
        uptime_seconds: s.uptime,
        cpu_usage: s.cpu_usage,
        memory_usage: s.memory_usage,
        memory_used: fmt_gb(memory_used),
        memory_total: fmt_gb(s.total_memory_gb),
        memory_label: fmt_gb_usage(memory_used, s.total_memory_gb),
        disk_usage: s.disk_usage,
        disk_used: fmt_gb(disk_used),
        disk_total: fmt_gb(s.total_disk_gb),
        disk_label: fmt_gb_usage(disk_used, s.total_disk_gb),
    }
}

fn database_status(snapshot: &DashboardResponse) -> DatabaseStatus {
    let s = &snapshot.database_stats;
    DatabaseStatus {
        state: if s.connected {
            DatabaseState::Connected
        } else {
            DatabaseState::Disconnected
        },
        response_time_ms: s.response_time_ms,
        connections: s.active_connections,
        max_connections: s.connection_pool_size,
        pool_usage_pct: pct(s.active_connections, s.connection_pool_size),
        size: fmt_gb(s.database_size_gb),
    }
}

fn api_stats(snapshot: &DashboardResponse) -> ApiStats {
    let s = &snapshot.api_usage_stats;
    ApiStats {
        requests_per_minute: s.requests_per_minute,
        avg_response_time_ms: s.average_response_time_ms,
        success_rate: s.success_rate_percentage,
        error_rate: (100.0 - s.success_rate_percentage).clamp(0.0, 100.0),
    }
}

fn service_rows(
    system: &SystemHealth,
    database: &DatabaseStatus,
    api: &ApiStats,
    checked_at: DateTime<Utc>,
) -> Vec<ServiceStatus> {
    let gateway = if api.error_rate > ERROR_RATE_WARNING_PCT {
        ServiceState::Warning
    } else {
        ServiceState::Running
    };
    let server = if system.peak_usage() > RESOURCE_WARNING_PCT {
        ServiceState::Warning
    } else {
        ServiceState::Running
    };
    let db = match database.state {
        DatabaseState::Connected => ServiceState::Running,
        DatabaseState::Disconnected => ServiceState::Stopped,
    };

    [(API_GATEWAY, gateway), (APPLICATION_SERVER, server), (DATABASE, db)]
        .into_iter()
        .map(|(name, state)| ServiceStatus {
            name: name.into(),
            state,
            uptime: system.uptime.clone(),
            last_check: checked_at,
        })
        .collect()
}
