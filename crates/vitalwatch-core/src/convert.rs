// ── API-to-domain type conversions ──
//
// Bridges raw `vitalwatch_api::types` responses into the canonical
// `crate::model` types. Enumerated strings are parsed leniently and
// timestamps accept both RFC 3339 and zone-less ISO forms.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use vitalwatch_api::types::{
    AlertResponse, DeviceResponse, HealthDataPoint, HealthDataResponse, UserResponse,
};

use crate::model::{
    Alert, AlertId, AlertSeverity, AlertStatus, Device, DeviceId, DeviceOwner, DeviceUuid, Gender,
    HealthMetric, HealthSeries, User, UserId,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an ISO 8601 timestamp. Zone-less values are taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn parse_gender(raw: Option<&String>) -> Option<Gender> {
    let raw = raw?;
    raw.parse().map_or_else(
        |_| {
            warn!(gender = %raw, "unknown gender value, dropping");
            None
        },
        Some,
    )
}

// ── Users ──────────────────────────────────────────────────────────

impl From<UserResponse> for User {
    fn from(u: UserResponse) -> Self {
        let gender = parse_gender(u.gender.as_ref());
        Self {
            id: UserId(u.id),
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            profile_picture_url: u.profile_picture_url.filter(|s| !s.is_empty()),
            dob: u.dob,
            gender,
            height_m: u.height_m,
            weight_kg: u.weight_kg,
            bmi: u.bmi,
            enabled: u.enabled,
            devices: u.devices.into_iter().map(Device::from).collect(),
        }
    }
}

// ── Devices ────────────────────────────────────────────────────────

impl From<DeviceResponse> for Device {
    fn from(d: DeviceResponse) -> Self {
        let owner = match (d.user_id, d.username) {
            (Some(user_id), Some(username)) => Some(DeviceOwner {
                user_id: UserId(user_id),
                username,
            }),
            (Some(user_id), None) => Some(DeviceOwner {
                user_id: UserId(user_id),
                username: String::new(),
            }),
            (None, _) => None,
        };
        Self {
            id: DeviceId(d.id),
            uuid: DeviceUuid::from(d.device_uuid),
            name: d.device_name,
            active: d.is_active,
            owner,
        }
    }
}

// ── Health data ────────────────────────────────────────────────────

fn metric_from_point(p: HealthDataPoint) -> Option<HealthMetric> {
    let Some(timestamp) = parse_timestamp(&p.timestamp) else {
        warn!(timestamp = %p.timestamp, "dropping health sample with unparseable timestamp");
        return None;
    };
    Some(HealthMetric {
        timestamp,
        heart_rate: p.heart_rate,
        spo2: p.spo2,
        step_count: p.step_count,
    })
}

impl From<HealthDataResponse> for HealthSeries {
    fn from(r: HealthDataResponse) -> Self {
        Self {
            device_uuid: DeviceUuid::from(r.device_uuid),
            metrics: r
                .data_points
                .into_iter()
                .filter_map(metric_from_point)
                .collect(),
        }
    }
}

// ── Alerts ─────────────────────────────────────────────────────────

impl From<AlertResponse> for Alert {
    fn from(a: AlertResponse) -> Self {
        let timestamp = parse_timestamp(&a.timestamp);
        if timestamp.is_none() {
            warn!(alert_id = %a.id, timestamp = %a.timestamp, "unparseable alert timestamp");
        }
        Self {
            severity: AlertSeverity::from_wire(&a.severity),
            status: AlertStatus::from_wire(&a.status),
            id: AlertId::from(a.id),
            user_id: a.user_id,
            user_name: a.user_name,
            timestamp,
            heart_rate: a.heart_rate,
            spo2: a.spo2,
            ml_score: a.ml_score,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_zoned_and_zoneless_timestamps() {
        let expected = Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2026-02-01T08:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-02-01T10:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-02-01T08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-02-01T08:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn user_conversion_keeps_reported_bmi() {
        let user = User::from(UserResponse {
            id: 3,
            username: "bao".into(),
            email: "bao@example.test".into(),
            full_name: "Bao Tran".into(),
            profile_picture_url: Some(String::new()),
            dob: Some("1990-04-02".into()),
            gender: Some("MALE".into()),
            weight_kg: Some(70.0),
            height_m: Some(1.75),
            bmi: Some(99.0),
            enabled: true,
            devices: vec![DeviceResponse {
                id: 8,
                device_uuid: "uuid-8".into(),
                device_name: "Band".into(),
                is_active: false,
                user_id: Some(3),
                username: Some("bao".into()),
            }],
        });
        assert_eq!(user.bmi, Some(99.0));
        assert_eq!(user.gender, Some(Gender::Male));
        assert_eq!(user.profile_picture_url, None);
        assert_eq!(user.devices[0].owner_name(), Some("bao"));
    }

    #[test]
    fn health_series_drops_bad_samples_without_reordering() {
        let series = HealthSeries::from(HealthDataResponse {
            device_uuid: "d-1".into(),
            data_points: vec![
                HealthDataPoint {
                    timestamp: "2026-02-01T09:00:00Z".into(),
                    heart_rate: Some(70.0),
                    spo2: None,
                    step_count: None,
                },
                HealthDataPoint {
                    timestamp: "garbage".into(),
                    heart_rate: Some(1.0),
                    spo2: None,
                    step_count: None,
                },
                HealthDataPoint {
                    timestamp: "2026-02-01T08:00:00Z".into(),
                    heart_rate: Some(75.0),
                    spo2: None,
                    step_count: None,
                },
            ],
        });
        assert_eq!(series.metrics.len(), 2);
        assert_eq!(series.metrics[0].heart_rate, Some(70.0));
        assert!(!series.is_chronological());
    }

    #[test]
    fn alert_conversion_parses_enums() {
        let alert = Alert::from(AlertResponse {
            id: "ALT001".into(),
            user_id: "USR001".into(),
            user_name: "John Smith".into(),
            timestamp: "2026-02-01T08:30:00Z".into(),
            heart_rate: 142.0,
            spo2: 88.0,
            ml_score: 0.92,
            severity: "High".into(),
            status: "New".into(),
        });
        assert_eq!(alert.severity, AlertSeverity::High);
        assert_eq!(alert.status, AlertStatus::New);
        assert_eq!(alert.ml_score_display(), "92%");
        assert_eq!(
            alert.timestamp,
            Some(Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn unparseable_alert_timestamp_is_unknown_not_epoch() {
        let alert = Alert::from(AlertResponse {
            id: "ALT002".into(),
            user_id: "USR001".into(),
            user_name: "John Smith".into(),
            timestamp: "not a time".into(),
            heart_rate: 130.0,
            spo2: 90.0,
            ml_score: 0.8,
            severity: "Medium".into(),
            status: "Viewed".into(),
        });
        assert_eq!(alert.timestamp, None);
        assert_eq!(alert.status, AlertStatus::Viewed);
    }
}
