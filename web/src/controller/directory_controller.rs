//! Controller for the webinar directory.
//!
//! Lists the configured webinars and their upcoming sessions.

use crate::controller::ErrorResponse;
use crate::{AppState, Error};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use chrono::Utc;
use domain::webinar as WebinarApi;
use domain::webinar::{NextSession, WebinarSummary};
use log::*;

/// GET /directory
///
/// List every configured webinar with its occurrences, in configured order.
#[utoipa::path(
    get,
    path = "/directory",
    responses(
        (status = 200, description = "Successfully retrieved the webinar directory", body = [WebinarSummary]),
        (status = 400, description = "No webinar IDs configured", body = ErrorResponse),
        (status = 500, description = "The meeting platform rejected a webinar lookup", body = ErrorResponse),
        (status = 502, description = "The meeting platform could not be reached or authenticated", body = ErrorResponse),
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET webinar directory");

    let webinars = WebinarApi::list(app_state.platform.as_ref(), &app_state.config).await?;

    debug!("Found {} webinars", webinars.len());

    Ok(Json(webinars))
}

/// GET /directory/next
///
/// The session the registration page preselects: the next upcoming occurrence
/// across all webinars, or the earliest one when none is upcoming.
#[utoipa::path(
    get,
    path = "/directory/next",
    responses(
        (status = 200, description = "Successfully picked the next session", body = NextSession),
        (status = 400, description = "No webinar IDs configured", body = ErrorResponse),
        (status = 404, description = "No webinar has any session", body = ErrorResponse),
    )
)]
pub async fn next(State(app_state): State<AppState>) -> Result<Response, Error> {
    debug!("GET next webinar session");

    let webinars = WebinarApi::list(app_state.platform.as_ref(), &app_state.config).await?;

    match WebinarApi::next_session(&webinars, Utc::now()) {
        Some(session) => Ok(Json(session).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error_message: "No webinar sessions are scheduled".to_string(),
            }),
        )
            .into_response()),
    }
}
