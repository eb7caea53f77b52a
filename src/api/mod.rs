// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod body_limit;
pub mod health;
pub mod helpers;
pub mod setup;
pub mod submissions;

pub use admin::AdminApi;
pub use auth::{AuthApi, BearerAuth};
pub use body_limit::BodyLimit;
pub use health::HealthApi;
pub use submissions::SubmissionApi;

use poem::endpoint::StaticFilesEndpoint;
use poem::{post, EndpointExt, Route};
use poem_openapi::OpenApiService;

use crate::app_data::AppData;

/// Compose every route the server exposes
///
/// - `/api/*` OpenAPI endpoints, `/swagger` UI, bodies capped at one photo
/// - `/storage/*` public objects
/// - `/setup-admin` bootstrap function
pub fn build_routes(app_data: &AppData) -> Route {
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.backend.clone()),
            SubmissionApi::new(app_data.submission_coordinator.clone(), app_data.geocoder.clone()),
            AdminApi::new(app_data.backend.clone()),
        ),
        "VersoForms API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("{}/api", app_data.settings.public_base_url()));

    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service.with(BodyLimit::new(body_limit::SUBMISSION_BODY_LIMIT)))
        .nest("/swagger", ui)
        .nest("/storage", StaticFilesEndpoint::new(app_data.settings.storage_root()))
        .at(
            "/setup-admin",
            post(setup::setup_admin)
                .options(setup::setup_admin_preflight)
                .data(app_data.setup_coordinator.clone())
                .with(BodyLimit::new(body_limit::SETUP_BODY_LIMIT)),
        )
}
