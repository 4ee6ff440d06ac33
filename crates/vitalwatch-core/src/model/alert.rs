// ── Alert domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

use super::ids::AlertId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    /// Parse a wire value. Unknown values degrade to `Low`.
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            warn!(severity = raw, "unknown alert severity, treating as Low");
            Self::Low
        })
    }
}

/// Lifecycle position of an alert. Ordered: `New < Viewed < Resolved`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum AlertStatus {
    New,
    Viewed,
    Resolved,
}

impl AlertStatus {
    /// Parse a wire value. Unknown values degrade to `New`.
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            warn!(status = raw, "unknown alert status, treating as New");
            Self::New
        })
    }

    /// Move towards `target` without ever moving backwards.
    pub fn advance(self, target: Self) -> Self {
        self.max(target)
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

/// A health anomaly flagged by the backend's model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub user_id: String,
    pub user_name: String,
    /// `None` when the backend sent a value that does not parse.
    pub timestamp: Option<DateTime<Utc>>,
    pub heart_rate: f64,
    pub spo2: f64,
    /// Model confidence, 0..1.
    pub ml_score: f64,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
}

impl Alert {
    /// Confidence as a whole percentage, e.g. `"92%"`.
    pub fn ml_score_display(&self) -> String {
        format!("{:.0}%", self.ml_score * 100.0)
    }
}
