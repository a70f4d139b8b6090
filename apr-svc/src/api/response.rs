//! Response envelope
//!
//! Every task and setting endpoint answers with the same JSON shape:
//!
//! ```json
//! {
//!   "messages": ["Report task fetched successfully"],
//!   "status": "OK",
//!   "requestId": "6f1c...",
//!   "data": { ... },
//!   "statusCode": 200,
//!   "error": null,
//!   "httpStatus": "OK"
//! }
//! ```
//!
//! On failure `data` is null and `error` carries the business code and the
//! localized message.

use apr_common::api::BusinessCode;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: BusinessCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub messages: Vec<String>,
    pub status: String,
    pub request_id: String,
    pub data: Option<T>,
    pub status_code: u16,
    pub error: Option<ErrorBody>,
    pub http_status: String,
}

impl<T> Envelope<T> {
    fn new(status: StatusCode, request_id: String, messages: Vec<String>) -> Self {
        Self {
            messages,
            status: status.canonical_reason().unwrap_or("Unknown").to_string(),
            request_id,
            data: None,
            status_code: status.as_u16(),
            error: None,
            http_status: status_name(status),
        }
    }
}

/// Enum-style name of a status, e.g. `NOT_FOUND`
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_ascii_uppercase()
        .replace(['-', ' ', '\''], "_")
}

/// Successful envelope plus its HTTP status
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(code: BusinessCode, request_id: String, message: String, data: T) -> Self {
        let status = code.http_status();
        let mut envelope = Envelope::new(status, request_id, vec![message]);
        envelope.data = Some(data);

        Self { status, envelope }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// Failed envelope plus its HTTP status
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    envelope: Envelope<()>,
}

impl ApiError {
    pub fn new(code: BusinessCode, request_id: String, messages: Vec<String>) -> Self {
        let status = code.http_status();
        let message = messages.first().cloned().unwrap_or_default();
        let mut envelope = Envelope::new(status, request_id, messages);
        envelope.error = Some(ErrorBody { code, message });

        Self { status, envelope }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> Option<BusinessCode> {
        self.envelope.error.as_ref().map(|e| e.code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_name() {
        assert_eq!(status_name(StatusCode::OK), "OK");
        assert_eq!(status_name(StatusCode::NOT_FOUND), "NOT_FOUND");
        assert_eq!(status_name(StatusCode::CREATED), "CREATED");
        assert_eq!(status_name(StatusCode::INTERNAL_SERVER_ERROR), "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::new(
            BusinessCode::TaskGetSuccess,
            "req-1".to_string(),
            "fetched".to_string(),
            vec![1, 2],
        );
        let json = serde_json::to_value(&response.envelope).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["status"], "OK");
        assert_eq!(json["httpStatus"], "OK");
        assert_eq!(json["requestId"], "req-1");
        assert_eq!(json["messages"][0], "fetched");
        assert_eq!(json["data"][1], 2);
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = ApiError::new(
            BusinessCode::SettingNotFound,
            "req-2".to_string(),
            vec!["missing".to_string()],
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let json = serde_json::to_value(&err.envelope).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["httpStatus"], "NOT_FOUND");
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], "APR_SETTING_NOT_FOUND");
        assert_eq!(json["error"]["message"], "missing");
    }
}
