//! Customer Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a campaign customer
pub type CustomerId = Uuid;

/// Validation state for phone-format and WhatsApp-account checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    #[default]
    Pending,
    Valid,
    Invalid,
}

/// Campaign recipient record
///
/// `is_ready` is computed by the backend (`phone_valid == valid` and
/// `whatsapp_exists == valid`) and trusted as-is. The client never
/// recomputes readiness from the two statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// International format, starts with `+`
    pub phone: String,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub phone_valid: ValidationStatus,
    #[serde(default)]
    pub whatsapp_exists: ValidationStatus,
    #[serde(default)]
    pub is_ready: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Display label: full name when present, otherwise the phone number
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.phone)
    }
}
