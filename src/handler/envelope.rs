//! Response envelope
//!
//! The uniform `{"result":..,"message":..,"status":..}` body returned for
//! every request, successful or not.

use serde::Serialize;

use crate::wiki::PageSummary;

/// Outcome of a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    /// Empty title and description unless `status` is `Success`
    pub result: PageSummary,
    pub message: String,
    pub status: Status,
}

impl Envelope {
    pub fn success(result: PageSummary) -> Self {
        Self {
            result,
            message: "result found".to_string(),
            status: Status::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: PageSummary::default(),
            message: message.into(),
            status: Status::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_literals() {
        assert_eq!(serde_json::to_string(&Status::Success).unwrap(), r#""Success""#);
        assert_eq!(serde_json::to_string(&Status::Error).unwrap(), r#""Error""#);
    }

    #[test]
    fn test_error_envelope_shape() {
        let json = serde_json::to_string(&Envelope::error("missing name for query")).unwrap();
        assert_eq!(
            json,
            r#"{"result":{"title":"","short_description":""},"message":"missing name for query","status":"Error"}"#
        );
    }

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::success(PageSummary {
            title: "Test".to_string(),
            short_description: "A test value".to_string(),
        });
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"result":{"title":"Test","short_description":"A test value"},"message":"result found","status":"Success"}"#
        );
    }
}
