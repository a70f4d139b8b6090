//! Per-request context extractor
//!
//! Collects the request id, the caller's locale and the `username` header,
//! and turns service outcomes into localized envelopes.

use std::convert::Infallible;
use std::fmt::Display;

use apr_common::api::{BusinessCode, Locale, MessageCatalog};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};
use serde::Serialize;
use tower_http::request_id::RequestId;
use tracing::debug;
use uuid::Uuid;

use super::response::{ApiError, ApiResponse};
use crate::error::ServiceError;
use crate::services::Actor;
use crate::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const USERNAME_HEADER: &str = "username";

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub locale: Locale,
    pub username: Option<String>,
    messages: MessageCatalog,
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .extensions
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .or_else(|| {
                parts
                    .headers
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
            })
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let accept_language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());

        let username = parts
            .headers
            .get(USERNAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Self {
            request_id,
            locale: state.messages.resolve_locale(accept_language),
            username,
            messages: state.messages.clone(),
        })
    }
}

impl RequestContext {
    pub fn message(&self, code: BusinessCode) -> String {
        self.messages.message(code, self.locale)
    }

    pub fn ok<T: Serialize>(&self, code: BusinessCode, data: T) -> ApiResponse<T> {
        ApiResponse::new(code, self.request_id.clone(), self.message(code), data)
    }

    pub fn fail(&self, err: ServiceError) -> ApiError {
        let code = err.business_code();
        let mut messages = vec![self.message(code)];
        if let ServiceError::InvalidInput(detail) = &err {
            messages.push(detail.clone());
        }
        debug!("Request {} failed: {}", self.request_id, err);

        ApiError::new(code, self.request_id.clone(), messages)
    }

    /// 400 for a malformed request
    pub fn invalid(&self, detail: impl Display) -> ApiError {
        self.fail(ServiceError::InvalidInput(detail.to_string()))
    }

    /// The caller named by the `username` header, if any
    pub fn actor(&self) -> Option<Actor> {
        self.username.as_deref().map(Actor::new)
    }

    /// The caller for a mutation; a missing `username` header is a bad request
    pub fn require_actor(&self) -> Result<Actor, ApiError> {
        self.actor()
            .ok_or_else(|| self.invalid(format!("missing {} header", USERNAME_HEADER)))
    }
}
