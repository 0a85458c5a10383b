// API response models (DTOs)

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Body of a failed JSON endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_body_is_exact() {
        assert_eq!(
            serde_json::to_string(&HealthResponse::healthy()).unwrap(),
            r#"{"status":"healthy"}"#
        );
    }

    #[test]
    fn error_body_shape() {
        assert_eq!(
            serde_json::to_value(ErrorResponse::new("boom")).unwrap(),
            serde_json::json!({ "error": "boom" })
        );
    }
}
