// ── Health sample types ──

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ids::DeviceUuid;

/// One vital-signs sample reported by a wearable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetric {
    pub timestamp: DateTime<Utc>,
    /// Beats per minute.
    pub heart_rate: Option<f64>,
    /// Blood-oxygen saturation, percent.
    pub spo2: Option<f64>,
    pub step_count: Option<u64>,
}

/// Samples for one device over one window, in backend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSeries {
    pub device_uuid: DeviceUuid,
    pub metrics: Vec<HealthMetric>,
}

impl HealthSeries {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Whether timestamps never go backwards. The series is never
    /// reordered; callers that chart it can check this first.
    pub fn is_chronological(&self) -> bool {
        self.metrics
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }

    pub fn latest(&self) -> Option<&HealthMetric> {
        self.metrics.last()
    }

    pub fn average_heart_rate(&self) -> Option<f64> {
        mean(self.metrics.iter().filter_map(|m| m.heart_rate))
    }

    pub fn average_spo2(&self) -> Option<f64> {
        mean(self.metrics.iter().filter_map(|m| m.spo2))
    }

    pub fn total_steps(&self) -> u64 {
        self.metrics.iter().filter_map(|m| m.step_count).sum()
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

// ── TimeRange ───────────────────────────────────────────────────────

/// Window selector on the user-detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TimeRange {
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    LastHour,
    #[default]
    #[strum(serialize = "today")]
    #[serde(rename = "today")]
    Today,
    #[strum(serialize = "7d")]
    #[serde(rename = "7d")]
    LastSevenDays,
}

impl TimeRange {
    /// Resolve to `[from, to]` relative to `now`. `Today` starts at UTC
    /// midnight.
    pub fn window(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let from = match self {
            Self::LastHour => now - Duration::hours(1),
            Self::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map_or(now, |midnight| midnight.and_utc()),
            Self::LastSevenDays => now - Duration::days(7),
        };
        (from, now)
    }

    /// Axis label for a sample: clock time for the hour view, calendar
    /// day otherwise.
    pub fn tick_label(self, ts: DateTime<Utc>) -> String {
        match self {
            Self::LastHour => ts.format("%H:%M").to_string(),
            Self::Today | Self::LastSevenDays => ts.format("%b %-d").to_string(),
        }
    }
}
