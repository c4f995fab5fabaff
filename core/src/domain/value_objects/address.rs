//! Two-line postal address.

use serde::{Deserialize, Serialize};

/// Free-form two-line address, as entered by the account holder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
}
