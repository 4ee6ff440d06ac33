//! Domain layer between `vitalwatch-api` and the admin front ends.
//!
//! - **[`Console`]** — Facade owning the API client and the [`Session`].
//!   Every domain service (auth, users, devices, alerts, health and the
//!   dashboard aggregate) is a method on it; wire types are converted into
//!   the canonical [`model`] types before they leave this crate.
//!
//! - **[`DashboardView`]** — Pure derivation of the `/dashboard` snapshot
//!   into the stat cards, resource gauges and service rows an admin sees.
//!
//! - **[`state`]** — Per-view containers: [`ListPage`] for server-paged
//!   lists with page-local filters, [`Resource`] for single fetches, and
//!   [`AlertBoard`] for optimistic alert status changes. Each publishes
//!   through a `watch` channel and is guarded by a [`Mount`] token.
//!
//! - **[`Session`]** — Bearer token, signed-in identity and theme,
//!   persisted in a [`KeyValueStore`].

pub mod auth;
pub mod config;
pub mod console;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod model;
pub mod session;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::{LoginError, LoginForm};
pub use config::{ConsoleConfig, DEFAULT_BASE_URL, TlsVerification};
pub use console::Console;
pub use dashboard::DashboardView;
pub use error::CoreError;
pub use session::{FileStore, KeyValueStore, MemoryStore, Session, SessionUser, Theme};
pub use state::{
    AlertBoard, AlertFilter, DeviceFilter, Filter, ListPage, ListView, LoadState, Mount, Pager,
    Resource, UserDetailPage, UserFilter,
};

pub use model::{
    Alert, AlertId, AlertSeverity, AlertStatus, Device, DeviceId, DeviceUuid, Gender, HealthMetric,
    HealthSeries, TimeRange, User, UserDetail, UserId,
};

// Wire-level request types callers build directly.
pub use vitalwatch_api::types::{
    ChangePasswordRequest, DashboardResponse, DeviceConfigRequest, Page, PageRequest, RegisterDeviceRequest, RegisterRequest,
    SyncDataPoint, SyncHealthDataRequest, UpdateUserRequest,
};
