//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON bodies of the form
//! `{status, code, message, traceId?, details?}`.
//!
//! How much of an error reaches the client depends on the process-wide
//! [`ErrorExposure`], set once at startup.

use std::sync::OnceLock;

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use super::schemas::ErrorCodeSchema;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

static EXPOSURE: OnceLock<ErrorExposure> = OnceLock::new();

/// How much error detail is returned to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorExposure {
    /// Messages and details are returned as raised.
    Development,
    /// Internal errors are redacted and lose their details.
    #[default]
    Production,
}

impl std::str::FromStr for ErrorExposure {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!(
                "unknown error exposure '{other}' (expected development or production)"
            )),
        }
    }
}

/// Install the process-wide exposure mode.
///
/// Returns `false` when a mode was already installed; the first call wins.
pub fn set_error_exposure(exposure: ErrorExposure) -> bool {
    EXPOSURE.set(exposure).is_ok()
}

/// The installed exposure mode, or production when none was set.
pub fn error_exposure() -> ErrorExposure {
    EXPOSURE.get().copied().unwrap_or_default()
}

/// Coarse outcome marker: `fail` for client errors, `error` for server
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Fail,
    Error,
}

impl ResponseStatus {
    fn for_status(status: StatusCode) -> Self {
        if status.is_client_error() {
            Self::Fail
        } else {
            Self::Error
        }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = "fail")]
    pub status: ResponseStatus,
    #[schema(value_type = ErrorCodeSchema, example = "not_found")]
    pub code: ErrorCode,
    #[schema(example = "Profile not found")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::UploadFailed | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Build the client-facing body for `error` under `exposure`.
pub fn render_error(error: &Error, exposure: ErrorExposure) -> ErrorResponse {
    let status = ResponseStatus::for_status(status_for(error.code()));
    let redact =
        exposure == ErrorExposure::Production && matches!(error.code(), ErrorCode::InternalError);

    ErrorResponse {
        status,
        code: error.code(),
        message: if redact {
            REDACTED_MESSAGE.to_owned()
        } else {
            error.message().to_owned()
        },
        trace_id: error.trace_id().map(str::to_owned),
        details: if redact {
            None
        } else {
            error.details().cloned()
        },
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(render_error(self, error_exposure()))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

/// Default service for unmatched routes.
pub async fn route_not_found(request: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "Can't find {} on this server!",
        request.path()
    )))
}
