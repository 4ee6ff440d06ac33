// ── Domain model ──
//
// Canonical types the console works with. Wire types from
// `vitalwatch_api::types` are converted into these in `crate::convert`.

pub mod alert;
pub mod dashboard;
pub mod device;
pub mod health;
pub mod ids;
pub mod user;

pub use alert::{Alert, AlertSeverity, AlertStatus};
pub use dashboard::{
    ApiStats, DatabaseState, DatabaseStatus, DeviceStats, ServiceState, ServiceStatus,
    SystemHealth, UserStats,
};
pub use device::{Device, DeviceOwner};
pub use health::{HealthMetric, HealthSeries, TimeRange};
pub use ids::{AlertId, DeviceId, DeviceUuid, UserId};
pub use user::{Gender, User, UserDetail};
