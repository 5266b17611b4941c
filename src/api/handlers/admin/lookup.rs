use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::{bootstrap_secret, types::LookupParams};
use crate::admin::{AdminError, AdminGateway, AdminSummary, ErrorBody};

#[utoipa::path(
    get,
    path = "/debug/admin",
    params(
        LookupParams,
        ("X-Admin-Bootstrap-Key" = String, Header, description = "Bootstrap secret")
    ),
    responses(
        (status = 200, description = "Admin found", body = AdminSummary),
        (status = 400, description = "Missing email query parameter", body = ErrorBody),
        (status = 401, description = "Bootstrap secret missing or wrong", body = ErrorBody),
        (status = 404, description = "No admin with this email", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody),
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn lookup_admin(
    headers: HeaderMap,
    gateway: Extension<Arc<AdminGateway>>,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Response {
    // Checked before the query string so a bad secret is never reported as
    // bad input. The gateway operation checks it again on its own.
    let secret = bootstrap_secret(&headers);
    if let Err(err) = gateway.authorize(secret) {
        return err.into_response();
    }

    let Ok(Query(params)) = params else {
        return AdminError::BadRequest("email query param is required").into_response();
    };

    match gateway.lookup_by_email(secret, &params.email).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => err.into_response(),
    }
}
