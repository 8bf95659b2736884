use crate::{controller::health_check_controller, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::controller::{directory_controller, registration_controller, ErrorResponse};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// Global definition of the OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Webinar Registration API"
        ),
        paths(
            directory_controller::index,
            directory_controller::next,
            registration_controller::create,
            health_check_controller::health_check,
        ),
        components(
            schemas(
                domain::webinar::WebinarSummary,
                domain::webinar::Occurrence,
                domain::webinar::NextSession,
                domain::registration::RegistrationForm,
                registration_controller::JoinResponse,
                ErrorResponse,
            )
        ),
        tags(
            (name = "webinar_registration", description = "Webinar directory and registration API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    let static_dir = app_state.config.static_dir.clone();

    Router::new()
        .merge(directory_routes(app_state.clone()))
        .merge(registration_routes(app_state))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes(&static_dir))
}

fn directory_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/directory", get(directory_controller::index))
        .route("/directory/next", get(directory_controller::next))
        .with_state(app_state)
}

/// Only POST is routed; axum answers any other method with 405.
fn registration_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/register", post(registration_controller::create))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

// Serves the built browser bundle for every path the API does not handle
pub fn static_routes(static_dir: &str) -> ServeDir {
    ServeDir::new(static_dir)
}
