//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::json;

use crate::domain::{Error, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUserId,
    InvalidCursor,
    InvalidPayload,
    InvalidQuery,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUserId => "invalid_user_id",
            Self::InvalidCursor => "invalid_cursor",
            Self::InvalidPayload => "invalid_payload",
            Self::InvalidQuery => "invalid_query",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ValidationCode::MissingField.as_str(),
    }))
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|err| {
        let field = field.as_str();
        Error::invalid_request(format!("{field}: {err}")).with_details(json!({
            "field": field,
            "value": value,
            "code": ValidationCode::InvalidUserId.as_str(),
        }))
    })
}

pub(crate) fn invalid_cursor_error(value: &str) -> Error {
    Error::invalid_request("cursor is not a valid page token").with_details(json!({
        "field": "cursor",
        "value": value,
        "code": ValidationCode::InvalidCursor.as_str(),
    }))
}

/// Error handler for `web::JsonConfig` keeping malformed bodies in the
/// domain error shape.
pub fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}"))
        .with_details(json!({ "code": ValidationCode::InvalidPayload.as_str() }))
        .into()
}

/// Error handler for `web::QueryConfig` keeping malformed query strings in
/// the domain error shape.
pub fn query_payload_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}"))
        .with_details(json!({ "code": ValidationCode::InvalidQuery.as_str() }))
        .into()
}
