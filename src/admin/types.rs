//! Values returned by gateway operations. None of them carry the password hash.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::roles::Role;

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatedAdmin {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Flat profile returned on a successful login.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminSummary {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}
