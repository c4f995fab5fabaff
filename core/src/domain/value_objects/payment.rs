//! Payment details recorded against an appointment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A received payment. Stored alongside the appointment and surfaced to
/// clients as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Payment channel, e.g. "cash"
    pub method: String,
    /// When the payment was recorded
    pub recorded_at: DateTime<Utc>,
    /// Who recorded it, "user" or "doctor"
    pub recorded_by: String,
}
