//! Controller for webinar registration.

use crate::controller::ErrorResponse;
use crate::extractors::JsonBody;
use crate::{AppState, Error};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::registration as RegistrationApi;
use domain::registration::{RegistrationForm, RegistrationResult};
use log::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of a successful registration; the browser redirects to `joinUrl`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub join_url: String,
}

/// POST /register
///
/// Register a visitor for one webinar occurrence.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegistrationForm,
    responses(
        (status = 200, description = "Successfully registered", body = JoinResponse),
        (status = 400, description = "The request body is not valid JSON", body = ErrorResponse),
        (status = 415, description = "The request body is not declared as JSON", body = ErrorResponse),
        (status = 422, description = "The request body is missing a required field", body = ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "The meeting platform rejected the registrant; errorMessage holds its response verbatim", body = ErrorResponse),
        (status = 502, description = "The meeting platform could not be reached or authenticated", body = ErrorResponse),
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(form): JsonBody<RegistrationForm>,
) -> Result<Response, Error> {
    debug!("POST register for webinar {}", form.webinar_id);

    let result = RegistrationApi::register(app_state.platform.as_ref(), form).await?;

    Ok(match result {
        RegistrationResult::Joined { join_url } => {
            (StatusCode::OK, Json(JoinResponse { join_url })).into_response()
        }
        RegistrationResult::Rejected { error_message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error_message }),
        )
            .into_response(),
    })
}
