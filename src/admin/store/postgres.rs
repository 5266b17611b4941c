//! `PostgreSQL` storage for `private.user_admin`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::{AdminAccount, AdminStore, InsertOutcome, NewAdmin};

#[derive(Debug, Clone)]
pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn query_span(operation: &'static str, statement: &'static str) -> tracing::Span {
    tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement
    )
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn insert_admin(&self, admin: &NewAdmin) -> Result<InsertOutcome> {
        let query = r"
            INSERT INTO private.user_admin (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id
        ";
        let result = sqlx::query(query)
            .bind(&admin.email)
            .bind(&admin.password_hash)
            .bind(admin.role.as_str())
            .fetch_one(&self.pool)
            .instrument(query_span("INSERT", query))
            .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Created(row.get("id"))),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(err).context("failed to insert admin"),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        let query = r"
            SELECT id, email, password_hash, role, is_active, last_login_at
            FROM private.user_admin
            WHERE email = $1
            LIMIT 1
        ";
        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to lookup admin")?;

        Ok(row.map(|row| AdminAccount {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role: row.get("role"),
            is_active: row.get("is_active"),
            last_login_at: row.get("last_login_at"),
        }))
    }

    async fn update_password_hash(&self, email: &str, password_hash: &str) -> Result<u64> {
        let query = r"
            UPDATE private.user_admin
            SET password_hash = $2
            WHERE email = $1
        ";
        let result = sqlx::query(query)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .instrument(query_span("UPDATE", query))
            .await
            .context("failed to update admin password")?;

        Ok(result.rows_affected())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<()> {
        let query = r"
            UPDATE private.user_admin
            SET last_login_at = NOW()
            WHERE id = $1
        ";
        sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .instrument(query_span("UPDATE", query))
            .await
            .context("failed to update last login")?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let acquire_span = tracing::info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self
            .pool
            .acquire()
            .instrument(acquire_span)
            .await
            .context("failed to acquire database connection")?;

        let ping_span = tracing::info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping()
            .instrument(ping_span)
            .await
            .context("failed to ping database")
    }
}
