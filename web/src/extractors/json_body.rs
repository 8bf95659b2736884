use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use log::*;
use serde::de::DeserializeOwned;

use crate::controller::ErrorResponse;

/// `Json` whose rejections use the same `{"errorMessage": ...}` body as every
/// other error this service returns.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    let error_message = rejection.body_text();
    debug!("Rejected request body ({status}): {error_message}");

    (status, Json(ErrorResponse { error_message })).into_response()
}
