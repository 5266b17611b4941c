//! Admin account endpoints.
//!
//! Account management (`/admin/users*`, `/debug/admin`) is gated by the
//! bootstrap secret in the `X-Admin-Bootstrap-Key` header. The secret is
//! checked before the body is even decoded.

pub mod create;
pub mod login;
pub mod lookup;
pub mod reset;
pub mod types;

use axum::{extract::rejection::JsonRejection, http::HeaderMap, Json};
use tracing::debug;

use crate::admin::AdminError;

pub const BOOTSTRAP_KEY_HEADER: &str = "x-admin-bootstrap-key";

/// Presented bootstrap secret, empty when the header is missing or not text.
pub(crate) fn bootstrap_secret(headers: &HeaderMap) -> &str {
    headers
        .get(BOOTSTRAP_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AdminError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection.body_text());
        AdminError::BadRequest("invalid json")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bootstrap_secret_reads_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(bootstrap_secret(&headers), "");

        headers.insert(BOOTSTRAP_KEY_HEADER, HeaderValue::from_static("K"));
        assert_eq!(bootstrap_secret(&headers), "K");
    }

    #[test]
    fn bootstrap_secret_ignores_opaque_bytes() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xfa, 0xfb]) {
            headers.insert(BOOTSTRAP_KEY_HEADER, value);
        }
        assert_eq!(bootstrap_secret(&headers), "");
    }
}
