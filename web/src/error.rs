use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::error::{
    DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};
use log::*;

use crate::controller::ErrorResponse;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = self.0.message();
        let (status, error_message) = match self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Config => (
                    StatusCode::BAD_REQUEST,
                    message.unwrap_or_else(|| "Server is not configured".to_string()),
                ),
                InternalErrorKind::Other(detail) => {
                    error!("Internal error: {detail}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL SERVER ERROR".to_string(),
                    )
                }
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Auth => {
                    error!("Meeting platform authentication failed: {message:?}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "Failed to authenticate with the meeting platform".to_string(),
                    )
                }
                ExternalErrorKind::Network => {
                    error!("Meeting platform unreachable: {message:?}");
                    (StatusCode::BAD_GATEWAY, "BAD GATEWAY".to_string())
                }
                ExternalErrorKind::Upstream { body, .. } if !body.is_empty() => {
                    (StatusCode::INTERNAL_SERVER_ERROR, body)
                }
                ExternalErrorKind::Upstream { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message.unwrap_or_else(|| "INTERNAL SERVER ERROR".to_string()),
                ),
                ExternalErrorKind::Other(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
            },
        };

        (status, Json(ErrorResponse { error_message })).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
