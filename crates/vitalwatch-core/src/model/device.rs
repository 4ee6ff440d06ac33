// ── Device domain types ──

use serde::{Deserialize, Serialize};

use super::ids::{DeviceId, DeviceUuid, UserId};

/// The user a device is currently assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceOwner {
    pub user_id: UserId,
    pub username: String,
}

/// A wearable registered with the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub uuid: DeviceUuid,
    pub name: String,
    pub active: bool,
    /// `None` for devices the backend reports without an owner.
    pub owner: Option<DeviceOwner>,
}

impl Device {
    pub fn owner_name(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.username.as_str())
    }
}
