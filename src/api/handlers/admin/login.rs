use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::{json_body, types::LoginRequest};
use crate::admin::{AdminGateway, AdminProfile, ErrorBody};

#[utoipa::path(
    post,
    path = "/auth/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminProfile),
        (status = 400, description = "Invalid JSON or missing fields", body = ErrorBody),
        (status = 401, description = "Invalid credentials or account disabled", body = ErrorBody),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    gateway: Extension<Arc<AdminGateway>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let request = match json_body(payload) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    match gateway.login(&request.email, &request.password).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => err.into_response(),
    }
}
