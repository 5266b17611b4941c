//! Admin roles and the static role to permission table.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

pub const PERM_ACCESS: &str = "admin:access";

const SUPER_ADMIN_PERMISSIONS: &[&str] = &[
    PERM_ACCESS,
    "admin:users:write",
    "admin:settings:write",
    "admin:all",
];

const ADMIN_PERMISSIONS: &[&str] = &[PERM_ACCESS, "admin:listings:write", "admin:users:read"];

const FALLBACK_PERMISSIONS: &[&str] = &[PERM_ACCESS];

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Admin,
    SuperAdmin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    #[must_use]
    pub fn permissions(self) -> &'static [&'static str] {
        permissions_for(self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole;

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(UnknownRole),
        }
    }
}

/// Permissions granted to a stored role value.
///
/// Roles are validated on write, so the fallback only covers rows edited by hand.
#[must_use]
pub fn permissions_for(role: &str) -> &'static [&'static str] {
    match role {
        "super_admin" => SUPER_ADMIN_PERMISSIONS,
        "admin" => ADMIN_PERMISSIONS,
        _ => FALLBACK_PERMISSIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_permissions() {
        let perms = permissions_for("super_admin");
        assert_eq!(
            perms,
            [
                "admin:access",
                "admin:users:write",
                "admin:settings:write",
                "admin:all"
            ]
        );
        assert_eq!(perms.last(), Some(&"admin:all"));
    }

    #[test]
    fn admin_permissions() {
        assert_eq!(
            permissions_for("admin"),
            ["admin:access", "admin:listings:write", "admin:users:read"]
        );
    }

    #[test]
    fn unknown_role_falls_back() {
        assert_eq!(permissions_for("bogus"), ["admin:access"]);
        assert_eq!(permissions_for(""), ["admin:access"]);
        assert_eq!(permissions_for("Admin"), ["admin:access"]);
    }

    #[test]
    fn role_parses_only_known_values() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("super_admin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!("superadmin".parse::<Role>(), Err(UnknownRole));
        assert_eq!("ADMIN".parse::<Role>(), Err(UnknownRole));
    }

    #[test]
    fn role_defaults_to_admin() {
        assert_eq!(Role::default(), Role::Admin);
        assert_eq!(Role::default().permissions(), permissions_for("admin"));
    }

    #[test]
    fn role_serializes_snake_case() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin)?, "\"super_admin\"");
        assert_eq!(serde_json::from_str::<Role>("\"admin\"")?, Role::Admin);
        Ok(())
    }
}
