// ── Page-local filter predicates ──
//
// Filters narrow the rows already fetched for the current page. They
// never trigger a refetch and never see other pages.

use crate::model::{Alert, AlertSeverity, AlertStatus, Device, User};

/// A predicate over one row type.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;

    /// `false` when the filter lets everything through.
    fn is_active(&self) -> bool;
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Users page: free-text search plus an enabled selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive match on full name, username or email.
    pub search: String,
    pub enabled: Option<bool>,
}

impl Filter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || contains_ci(&user.full_name, &needle)
            || contains_ci(&user.username, &needle)
            || contains_ci(&user.email, &needle);
        let enabled_ok = self.enabled.is_none_or(|e| user.enabled == e);
        text_ok && enabled_ok
    }

    fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.enabled.is_some()
    }
}

/// Devices page: free-text search plus an active selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    /// Case-insensitive match on device name, UUID or owner username.
    pub search: String,
    pub active: Option<bool>,
}

impl Filter<Device> for DeviceFilter {
    fn matches(&self, device: &Device) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || contains_ci(&device.name, &needle)
            || contains_ci(device.uuid.as_str(), &needle)
            || device
                .owner_name()
                .is_some_and(|owner| contains_ci(owner, &needle));
        let active_ok = self.active.is_none_or(|a| device.active == a);
        text_ok && active_ok
    }

    fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.active.is_some()
    }
}

/// Alerts page: severity and status selectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub severity: Option<AlertSeverity>,
    pub status: Option<AlertStatus>,
}

impl Filter<Alert> for AlertFilter {
    fn matches(&self, alert: &Alert) -> bool {
        self.severity.is_none_or(|s| alert.severity == s)
            && self.status.is_none_or(|s| alert.status == s)
    }

    fn is_active(&self) -> bool {
        self.severity.is_some() || self.status.is_some()
    }
}
