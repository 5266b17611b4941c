//! Request/response types for admin endpoints.
//!
//! Missing JSON fields decode as empty strings so they fail the same
//! "required" validation as explicitly empty ones.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreateAdminRequest {
    pub email: String,
    pub password: String,
    /// `admin` or `super_admin`; defaults to `admin`.
    pub role: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetPasswordResponse {
    pub ok: bool,
}

#[derive(IntoParams, Deserialize, Debug, Default)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct LookupParams {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn missing_fields_decode_empty() -> Result<()> {
        let request: LoginRequest = serde_json::from_str("{}")?;
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());

        let request: CreateAdminRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"pw"}"#)?;
        assert_eq!(request.role, None);
        Ok(())
    }

    #[test]
    fn reset_request_uses_snake_case_field() -> Result<()> {
        let request: ResetPasswordRequest =
            serde_json::from_str(r#"{"email":"a@x.com","new_password":"pw"}"#)?;
        assert_eq!(request.new_password, "pw");
        Ok(())
    }

    #[test]
    fn reset_response_shape() -> Result<()> {
        let value = serde_json::to_value(ResetPasswordResponse { ok: true })?;
        assert_eq!(value, serde_json::json!({ "ok": true }));
        Ok(())
    }
}
