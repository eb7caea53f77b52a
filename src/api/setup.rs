use std::sync::Arc;

use poem::error::ReadBodyError;
use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, Body, IntoResponse, Response};

use crate::api::body_limit::SETUP_BODY_LIMIT;
use crate::coordinators::{SetupAdminCoordinator, SetupAdminOutcome};
use crate::errors::SetupAdminError;
use crate::types::dto::setup::{SetupAdminErrorBody, SetupAdminRequest, SetupAdminResponse};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

fn with_cors(response: impl IntoResponse) -> Response {
    response
        .with_header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .with_header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .into_response()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    with_cors(
        Json(SetupAdminErrorBody {
            error: message.into(),
        })
        .with_status(status),
    )
}

/// CORS preflight; always succeeds
#[handler]
pub async fn setup_admin_preflight() -> Response {
    with_cors("ok")
}

/// `POST /setup-admin`: create or confirm the admin account
///
/// The setup key is checked before anything else in the body: a missing,
/// non-string or wrong key answers 403. After that, missing credentials
/// answer 400, a failed backend call 502 with the backend message, and a
/// body that cannot be read or parsed 500.
#[handler]
pub async fn setup_admin(body: Body, coordinator: Data<&Arc<SetupAdminCoordinator>>) -> Response {
    let request: SetupAdminRequest = match read_request(body).await {
        Ok(request) => request,
        Err((status, message)) => {
            tracing::error!("Error in setup-admin function: {}", message);
            return error_response(status, message);
        }
    };

    if let Err(err) = coordinator.verify_setup_key(request.setup_key()) {
        return error_response(StatusCode::FORBIDDEN, err.to_string());
    }

    let (Some(email), Some(password)) = (request.email(), request.password()) else {
        return error_response(StatusCode::BAD_REQUEST, "Email and password are required");
    };

    match coordinator.ensure_admin(email, password).await {
        Ok(outcome) => {
            tracing::info!("{} ({})", outcome.message(), outcome.user_id());
            let user_id = match &outcome {
                SetupAdminOutcome::Created { user_id } => Some(user_id.clone()),
                SetupAdminOutcome::Ensured { .. } => None,
            };
            with_cors(Json(SetupAdminResponse {
                message: outcome.message().to_string(),
                user_id,
            }))
        }
        Err(err) => {
            if let SetupAdminError::Backend { step, source, .. } = &err {
                tracing::error!("setup-admin step {} failed: {}", step, source);
            }
            error_response(StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}

async fn read_request(body: Body) -> Result<SetupAdminRequest, (StatusCode, String)> {
    let bytes = body.into_bytes_limit(SETUP_BODY_LIMIT).await.map_err(|e| match e {
        ReadBodyError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string()),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
