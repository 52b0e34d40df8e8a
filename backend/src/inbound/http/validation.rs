//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and form values arrive as raw strings; these helpers turn them into
//! domain types and shape the error payload clients see.

use serde_json::json;
use tracing::warn;

use crate::domain::{Error, ITEM_NOT_FOUND_MESSAGE, ItemId, ItemStatus};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidField,
    UnknownStatus,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidField => "invalid_field",
            ErrorCode::UnknownStatus => "unknown_status",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    /// Wrap a static field name.
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Error for a required form field that was not submitted.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

/// Field present but rejected by domain validation.
pub(crate) fn invalid_field_error(field: FieldName, reason: &impl std::fmt::Display) -> Error {
    let field = field.as_str();
    Error::invalid_request(reason.to_string()).with_details(json!({
        "field": field,
        "code": ErrorCode::InvalidField.as_str(),
    }))
}

/// Parse an item id from a path segment.
///
/// A value that is not a UUID cannot name a stored item, so it is reported
/// as `not_found` rather than as a malformed request.
pub(crate) fn parse_item_id(raw: &str) -> Result<ItemId, Error> {
    raw.parse::<ItemId>()
        .map_err(|_| Error::not_found(ITEM_NOT_FOUND_MESSAGE))
}

/// Parse an admin-supplied status, accepting only the exact names.
pub(crate) fn parse_status(raw: &str, field: FieldName) -> Result<ItemStatus, Error> {
    raw.parse::<ItemStatus>().map_err(|_| {
        warn!(value = raw, "rejected unknown item status");
        let allowed: Vec<&str> = ItemStatus::ALL.iter().map(|s| s.as_str()).collect();
        Error::invalid_request(format!("{} must be one of the known statuses", field.as_str()))
            .with_details(json!({
                "field": field.as_str(),
                "value": raw,
                "allowed": allowed,
                "code": ErrorCode::UnknownStatus.as_str(),
            }))
    })
}
