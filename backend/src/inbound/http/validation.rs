//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, UserId};

/// Machine-readable reason attached to `invalid_request` details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidUuid,
    MalformedBody,
    UnsupportedMediaType,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::MalformedBody => "malformed_body",
            Self::UnsupportedMediaType => "unsupported_media_type",
        }
    }
}

/// Parse a path segment naming a user id.
///
/// Fails with `Invalid {field}: {value}.` so clients see which segment was
/// rejected.
pub(crate) fn parse_user_id(raw: &str, field: &'static str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::invalid_request(format!("Invalid {field}: {raw}.")).with_details(json!({
            "field": field,
            "value": raw,
            "code": ValidationCode::InvalidUuid.as_str(),
        }))
    })
}

/// A request body that could not be decoded.
pub(crate) fn malformed_body(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("Invalid request body: {reason}")).with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
    }))
}

pub(crate) fn unsupported_media_type(content_type: &str) -> Error {
    Error::invalid_request(format!(
        "Unsupported content type '{content_type}'; send application/json or multipart/form-data"
    ))
    .with_details(json!({
        "value": content_type,
        "code": ValidationCode::UnsupportedMediaType.as_str(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn accepts_uuid_segments() {
        let id = parse_user_id("3fa85f64-5717-4562-b3fc-2c963f66afa6", "userId").expect("uuid");
        assert_eq!(id.as_ref(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("not-an-id")]
    #[case("123")]
    fn rejects_malformed_ids_naming_the_value(#[case] raw: &str) {
        let error = parse_user_id(raw, "userId").expect_err("malformed id");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), format!("Invalid userId: {raw}."));
        assert_eq!(
            error.details(),
            Some(&json!({"field": "userId", "value": raw, "code": "invalid_uuid"}))
        );
    }

    #[rstest]
    fn malformed_body_is_invalid_request() {
        let error = malformed_body("expected value at line 1 column 1");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert!(error.message().starts_with("Invalid request body:"));
    }
}
