// ── Identifier newtypes ──
//
// Backend ids are plain integers or strings on the wire. Wrapping them
// keeps a user id from being passed where a device id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Backend user id.
    UserId
);
numeric_id!(
    /// Backend device row id (distinct from the device's hardware UUID).
    DeviceId
);

// ── DeviceUuid ──────────────────────────────────────────────────────

/// Stable hardware identifier a wearable reports with.
///
/// Usually a UUID, but the backend accepts any string, so no format is
/// enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceUuid(String);

impl DeviceUuid {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Fresh random v4 UUID, for registering a device that has none yet.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DeviceUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DeviceUuid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── AlertId ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(String);

impl AlertId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AlertId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AlertId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
