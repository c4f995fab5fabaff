//! API response envelope types

use serde::Serialize;

/// Standard API response envelope
///
/// Every endpoint answers with `{"success": bool, "message"?: string, ...}`
/// where operation data is flattened alongside the flag, e.g.
/// `{"success": true, "token": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was accepted
    pub success: bool,

    /// Human-readable outcome message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Operation data, flattened into the envelope
    #[serde(flatten)]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    /// Successful outcome carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Declined outcome with the human-readable reason
    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful outcome carrying data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Successful outcome carrying both a message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TokenPayload {
        token: String,
    }

    #[test]
    fn data_is_flattened_into_the_envelope() {
        let response = ApiResponse::success(TokenPayload {
            token: "abc".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["token"], "abc");
        assert!(json.get("message").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn declined_carries_only_the_message() {
        let response = ApiResponse::declined("Slot is not available");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Slot is not available");
    }

    #[test]
    fn message_only_success_has_no_extra_keys() {
        let response = ApiResponse::message("Appointment booked successfully");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 2);
        assert_eq!(json["success"], true);
    }
}
