use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod directory_controller;
pub(crate) mod health_check_controller;
pub(crate) mod registration_controller;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
}
