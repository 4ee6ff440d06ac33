// ── User domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::device::Device;
use super::ids::UserId;

/// Absolute tolerance, in BMI points, when checking a reported BMI
/// against height/weight.
const BMI_TOLERANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A monitored person, as the admin console sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub profile_picture_url: Option<String>,
    /// ISO 8601 date as sent by the backend.
    pub dob: Option<String>,
    pub gender: Option<Gender>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    /// Backend-computed. Never recomputed client-side.
    pub bmi: Option<f64>,
    pub enabled: bool,
    pub devices: Vec<Device>,
}

impl User {
    /// Name to show in lists: full name, or the username when blank.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// BMI as shown in the profile card.
    pub fn bmi_display(&self) -> String {
        match self.bmi {
            Some(bmi) => format!("{bmi:.1}"),
            None => "N/A".into(),
        }
    }

    /// Whether the reported BMI agrees with weight / height².
    ///
    /// `None` when any of the three values is missing or height is zero.
    /// Diagnostic only: the reported value is what gets displayed.
    pub fn bmi_matches_metrics(&self) -> Option<bool> {
        let (bmi, weight, height) = (self.bmi?, self.weight_kg?, self.height_m?);
        if height <= 0.0 {
            return None;
        }
        let expected = weight / (height * height);
        Some((expected - bmi).abs() <= BMI_TOLERANCE)
    }
}

/// A user's profile together with the devices assigned to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    pub user: User,
    pub devices: Vec<Device>,
}
