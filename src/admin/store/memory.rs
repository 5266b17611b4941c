//! In-process store used by tests and local runs without a database.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AdminAccount, AdminStore, InsertOutcome, NewAdmin};

/// Rows keyed by normalized email.
#[derive(Debug, Default)]
pub struct MemoryAdminStore {
    rows: RwLock<HashMap<String, AdminAccount>>,
}

impl MemoryAdminStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the `is_active` flag, returning false when the email is unknown.
    pub async fn set_active(&self, email: &str, is_active: bool) -> bool {
        let mut rows = self.rows.write().await;
        rows.get_mut(email).is_some_and(|row| {
            row.is_active = is_active;
            true
        })
    }

    pub async fn get(&self, email: &str) -> Option<AdminAccount> {
        self.rows.read().await.get(email).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn insert_admin(&self, admin: &NewAdmin) -> Result<InsertOutcome> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&admin.email) {
            return Ok(InsertOutcome::Duplicate);
        }

        let id = Uuid::new_v4();
        rows.insert(
            admin.email.clone(),
            AdminAccount {
                id,
                email: admin.email.clone(),
                password_hash: admin.password_hash.clone(),
                role: admin.role.as_str().to_string(),
                is_active: true,
                last_login_at: None,
            },
        );

        Ok(InsertOutcome::Created(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        Ok(self.get(email).await)
    }

    async fn update_password_hash(&self, email: &str, password_hash: &str) -> Result<u64> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(email).map_or(0, |row| {
            row.password_hash = password_hash.to_string();
            1
        }))
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<()> {
        let mut rows = self.rows.write().await;
        if let Some(row) = rows.values_mut().find(|row| row.id == id) {
            row.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::roles::Role;

    fn new_admin(email: &str) -> NewAdmin {
        NewAdmin {
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() -> Result<()> {
        let store = MemoryAdminStore::new();
        let first = store.insert_admin(&new_admin("a@x.com")).await?;
        let second = store.insert_admin(&new_admin("a@x.com")).await?;

        assert!(matches!(first, InsertOutcome::Created(_)));
        assert_eq!(second, InsertOutcome::Duplicate);
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn new_rows_are_active() -> Result<()> {
        let store = MemoryAdminStore::new();
        store.insert_admin(&new_admin("a@x.com")).await?;
        let row = store.find_by_email("a@x.com").await?;

        assert!(row.as_ref().is_some_and(|row| row.is_active));
        assert_eq!(row.map(|row| row.role), Some("admin".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn update_reports_rows_affected() -> Result<()> {
        let store = MemoryAdminStore::new();
        store.insert_admin(&new_admin("a@x.com")).await?;

        assert_eq!(store.update_password_hash("a@x.com", "new").await?, 1);
        assert_eq!(store.update_password_hash("b@x.com", "new").await?, 0);
        assert_eq!(
            store.get("a@x.com").await.map(|row| row.password_hash),
            Some("new".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn touch_sets_last_login() -> Result<()> {
        let store = MemoryAdminStore::new();
        let InsertOutcome::Created(id) = store.insert_admin(&new_admin("a@x.com")).await? else {
            anyhow::bail!("expected insert");
        };

        store.touch_last_login(id).await?;
        let row = store.get("a@x.com").await;
        assert!(row.is_some_and(|row| row.last_login_at.is_some()));
        Ok(())
    }

    #[tokio::test]
    async fn set_active_unknown_email() {
        let store = MemoryAdminStore::new();
        assert!(!store.set_active("nobody@x.com", false).await);
        assert!(store.is_empty().await);
    }
}
