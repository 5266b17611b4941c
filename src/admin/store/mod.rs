//! Persistence seam for admin accounts.
//!
//! The gateway only needs four row operations plus a liveness ping. Emails
//! passed in are already normalized.

mod memory;
mod postgres;

pub use memory::MemoryAdminStore;
pub use postgres::PgAdminStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::roles::Role;

/// A stored admin row. `role` is kept as the raw column value.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("last_login_at", &self.last_login_at)
            .finish()
    }
}

#[derive(Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Created(Uuid),
    Duplicate,
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Insert a new admin, reporting a unique violation on email as `Duplicate`.
    async fn insert_admin(&self, admin: &NewAdmin) -> Result<InsertOutcome>;

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>>;

    /// Overwrite the password hash, returning the number of rows affected.
    async fn update_password_hash(&self, email: &str, password_hash: &str) -> Result<u64>;

    async fn touch_last_login(&self, id: Uuid) -> Result<()>;

    async fn ping(&self) -> Result<()>;
}
