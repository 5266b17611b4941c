use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::{bootstrap_secret, json_body, types::CreateAdminRequest};
use crate::admin::{AdminError, AdminGateway, CreatedAdmin, ErrorBody};

#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = CreateAdminRequest,
    params(
        ("X-Admin-Bootstrap-Key" = String, Header, description = "Bootstrap secret")
    ),
    responses(
        (status = 201, description = "Admin created", body = CreatedAdmin),
        (status = 400, description = "Invalid JSON, missing fields or unknown role", body = ErrorBody),
        (status = 401, description = "Bootstrap secret missing or wrong", body = ErrorBody),
        (status = 409, description = "Email already exists", body = ErrorBody),
        (status = 500, description = "Hashing failed", body = ErrorBody),
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn create_admin(
    headers: HeaderMap,
    gateway: Extension<Arc<AdminGateway>>,
    payload: Result<Json<CreateAdminRequest>, JsonRejection>,
) -> Response {
    match handle(&headers, &gateway, payload).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn handle(
    headers: &HeaderMap,
    gateway: &AdminGateway,
    payload: Result<Json<CreateAdminRequest>, JsonRejection>,
) -> Result<CreatedAdmin, AdminError> {
    // Checked before the body is decoded so a bad secret is never reported
    // as bad input. The gateway operation checks it again on its own.
    let secret = bootstrap_secret(headers);
    gateway.authorize(secret)?;

    let request = json_body(payload)?;

    gateway
        .create_account(
            secret,
            &request.email,
            &request.password,
            request.role.as_deref(),
        )
        .await
}
