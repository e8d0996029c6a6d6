//! API Response envelope
//!
//! Every backend endpoint wraps its payload in the same structure:
//!
//! ```json
//! {
//!     "status": 200,
//!     "code": "SUCCESS",
//!     "message": "Customers retrieved",
//!     "results": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Response code returned on success
pub const API_CODE_SUCCESS: &str = "SUCCESS";

/// Unified backend response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP-like status code echoed in the body
    pub status: u16,
    /// Response code (`SUCCESS` or an error code)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Payload (absent on errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(results: T) -> Self {
        Self {
            status: 200,
            code: API_CODE_SUCCESS.to_string(),
            message: "Success".to_string(),
            results: Some(results),
        }
    }

    /// Create an error response
    pub fn error(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            results: None,
        }
    }

    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        self.code == API_CODE_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_roundtrip() {
        let resp = ApiResponse::ok(vec![1, 2, 3]);
        let json = serde_json::to_string(&resp).unwrap();
        let back: ApiResponse<Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert!(back.is_success());
        assert_eq!(back.results, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_error_envelope_has_no_results() {
        let resp = ApiResponse::<()>::error(500, "ERROR", "boom");
        assert!(!resp.is_success());
        assert!(resp.results.is_none());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("results"));
    }
}
