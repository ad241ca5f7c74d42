//! Service response envelope
//!
//! Every staff-zone service call answers with the same envelope:
//! ```json
//! {
//!     "success": true,
//!     "message": "optional human-readable text",
//!     "result": { "items": [ ... ] }
//! }
//! ```
//! Callers never inspect `success` themselves; they convert the envelope
//! into a [`ServiceResult`] with [`ServiceResponse::into_result`].

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Uniform response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ServiceResponse<T> {
    /// Create a successful response
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            message: None,
            result: Some(result),
        }
    }

    /// Create a failed response
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            result: None,
        }
    }

    /// Convert to a tagged result.
    ///
    /// `success:false` becomes [`ServiceError::Rejected`]; a successful
    /// envelope without a payload is an invalid response.
    pub fn into_result(self) -> ServiceResult<T> {
        if !self.success {
            return Err(ServiceError::Rejected {
                message: self.message,
            });
        }
        self.result
            .ok_or_else(|| ServiceError::InvalidResponse("missing result".to_string()))
    }

    /// Convert, ignoring any payload. Used by commands that only report success.
    pub fn into_ack(self) -> ServiceResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ServiceError::Rejected {
                message: self.message,
            })
        }
    }
}

/// List payload (`result.items`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_items() {
        let json = r#"{"success":true,"result":{"items":[1,2,3]}}"#;
        let resp: ServiceResponse<ListResult<i32>> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_result().unwrap().items, vec![1, 2, 3]);
    }

    #[test]
    fn test_rejected_keeps_message() {
        let json = r#"{"success":false,"message":"locked"}"#;
        let resp: ServiceResponse<ListResult<i32>> = serde_json::from_str(json).unwrap();
        match resp.into_result() {
            Err(ServiceError::Rejected { message }) => assert_eq!(message.as_deref(), Some("locked")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_success_without_result_is_invalid() {
        let resp: ServiceResponse<ListResult<i32>> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(resp.into_result(), Err(ServiceError::InvalidResponse(_))));
    }

    #[test]
    fn test_ack_ignores_payload() {
        let resp: ServiceResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":true,"message":"moved"}"#).unwrap();
        assert!(resp.into_ack().is_ok());

        let resp: ServiceResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(matches!(
            resp.into_ack(),
            Err(ServiceError::Rejected { message: None })
        ));
    }
}
