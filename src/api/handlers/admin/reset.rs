use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::{
    bootstrap_secret, json_body,
    types::{ResetPasswordRequest, ResetPasswordResponse},
};
use crate::admin::{AdminError, AdminGateway, ErrorBody};

#[utoipa::path(
    post,
    path = "/admin/users/reset-password",
    request_body = ResetPasswordRequest,
    params(
        ("X-Admin-Bootstrap-Key" = String, Header, description = "Bootstrap secret")
    ),
    responses(
        (status = 200, description = "Password replaced", body = ResetPasswordResponse),
        (status = 400, description = "Invalid JSON or missing fields", body = ErrorBody),
        (status = 401, description = "Bootstrap secret missing or wrong", body = ErrorBody),
        (status = 404, description = "No admin with this email", body = ErrorBody),
        (status = 500, description = "Database or hashing failure", body = ErrorBody),
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn reset_password(
    headers: HeaderMap,
    gateway: Extension<Arc<AdminGateway>>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Response {
    match handle(&headers, &gateway, payload).await {
        Ok(()) => (StatusCode::OK, Json(ResetPasswordResponse { ok: true })).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn handle(
    headers: &HeaderMap,
    gateway: &AdminGateway,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<(), AdminError> {
    // Checked before the body is decoded so a bad secret is never reported
    // as bad input. The gateway operation checks it again on its own.
    let secret = bootstrap_secret(headers);
    gateway.authorize(secret)?;

    let request = json_body(payload)?;

    gateway
        .reset_password(secret, &request.email, &request.new_password)
        .await
}
