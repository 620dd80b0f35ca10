//! RFC9457-style API error wrapper.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use javap_core::PasteError;
use tracing::error;

use crate::http::constants::{
    PROBLEM_BAD_REQUEST, PROBLEM_CONTENT_TYPE, PROBLEM_INTERNAL, PROBLEM_NOT_FOUND,
    PROBLEM_PAYLOAD_TOO_LARGE, PROBLEM_UNAUTHORIZED,
};
use crate::models::ProblemDetails;

/// Structured API error rendered as a problem document.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    kind: &'static str,
    title: &'static str,
    detail: Option<String>,
}

impl ApiError {
    const fn new(status: StatusCode, kind: &'static str, title: &'static str) -> Self {
        Self {
            status,
            kind,
            title,
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            PROBLEM_INTERNAL,
            "internal server error",
        )
        .with_detail(message)
    }

    pub(crate) fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, PROBLEM_BAD_REQUEST, "bad request").with_detail(detail)
    }

    pub(crate) fn payload_too_large(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            PROBLEM_PAYLOAD_TOO_LARGE,
            "payload too large",
        )
        .with_detail(detail)
    }

    pub(crate) fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            PROBLEM_UNAUTHORIZED,
            "not the paste owner",
        )
        .with_detail(detail)
    }

    pub(crate) fn not_found(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            PROBLEM_NOT_FOUND,
            "resource not found",
        )
        .with_detail(detail)
    }

    pub(crate) const fn status(&self) -> StatusCode {
        self.status
    }
}

impl Display for ApiError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(formatter, "{}: {detail}", self.title),
            None => formatter.write_str(self.title),
        }
    }
}

impl Error for ApiError {}

impl From<PasteError> for ApiError {
    fn from(err: PasteError) -> Self {
        match &err {
            PasteError::InvalidOwnerToken => Self::bad_request(err.to_string()),
            PasteError::UnknownCompilerTarget { name } => {
                Self::bad_request(format!("{err}: {name}"))
            }
            PasteError::PasteNotFound { id } => Self::not_found(format!("{err}: {id}")),
            PasteError::OwnershipMismatch { id } => Self::unauthorized(format!("{err}: {id}")),
            PasteError::Store { operation, source } => {
                error!(operation, error = %source, "paste storage failed");
                Self::internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ProblemDetails {
            kind: self.kind.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
        };
        let mut response = (self.status, Json(body)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}
