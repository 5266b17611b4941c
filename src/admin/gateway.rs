//! Admin account operations.
//!
//! Flow Overview:
//! 1) Bootstrap-gated operations check the presented secret before anything else.
//! 2) Inputs are validated and emails normalized.
//! 3) Passwords are hashed or verified off the async executor.
//! 4) Each store call runs under the configured deadline.
//!
//! Security boundaries:
//! - Unknown email and wrong password produce the same error, and both pay for
//!   one bcrypt verification.
//! - Store error details are logged, never returned.
//! - The last-login update runs detached; its failure never fails a login.

use secrecy::SecretString;
use std::{future::Future, sync::Arc, time::Duration};
use tokio::time::timeout;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use super::{
    error::AdminError,
    password::{PasswordHasher, MAX_PASSWORD_BYTES},
    roles::{permissions_for, Role},
    secret::SecretMatcher,
    store::{AdminStore, InsertOutcome, NewAdmin},
    types::{AdminProfile, AdminSummary, CreatedAdmin},
    utils::normalize_email,
};

pub const DEFAULT_STORE_TIMEOUT_SECONDS: u64 = 5;

#[derive(Clone)]
pub struct GatewayConfig {
    bootstrap_secret: SecretString,
    store_timeout: Duration,
}

impl GatewayConfig {
    #[must_use]
    pub fn new(bootstrap_secret: SecretString) -> Self {
        Self {
            bootstrap_secret,
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECONDS),
        }
    }

    #[must_use]
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("bootstrap_secret", &"***")
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

pub struct AdminGateway {
    secret: SecretMatcher,
    hasher: PasswordHasher,
    store: Arc<dyn AdminStore>,
    store_timeout: Duration,
}

impl std::fmt::Debug for AdminGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGateway")
            .field("secret", &self.secret)
            .field("hasher_cost", &self.hasher.cost())
            .field("store_timeout", &self.store_timeout)
            .finish_non_exhaustive()
    }
}

impl AdminGateway {
    #[must_use]
    pub fn new(config: GatewayConfig, hasher: PasswordHasher, store: Arc<dyn AdminStore>) -> Self {
        Self {
            secret: SecretMatcher::new(config.bootstrap_secret),
            hasher,
            store,
            store_timeout: config.store_timeout,
        }
    }

    #[must_use]
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Create a new admin account.
    ///
    /// # Errors
    /// `Unauthorized` on a bad secret, `BadRequest` on invalid input,
    /// `Conflict` when the insert fails, `Hashing`/`Timeout` on server faults.
    #[instrument(skip_all)]
    pub async fn create_account(
        &self,
        presented_secret: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<CreatedAdmin, AdminError> {
        self.authorize(presented_secret)?;

        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AdminError::BadRequest("email and password are required"));
        }

        let role = match role.filter(|role| !role.is_empty()) {
            None => Role::default(),
            Some(role) => role
                .parse::<Role>()
                .map_err(|_| AdminError::BadRequest("role must be admin or super_admin"))?,
        };

        check_password_length(password)?;

        let password_hash = self.hasher.hash(password).await?;
        let admin = NewAdmin {
            email,
            password_hash,
            role,
        };

        // Every insert failure answers the same way; only the log tells them apart.
        match self.with_deadline(self.store.insert_admin(&admin)).await? {
            Ok(InsertOutcome::Created(id)) => {
                debug!("Created admin {}", id);
                Ok(CreatedAdmin {
                    id,
                    email: admin.email,
                    role,
                })
            }
            Ok(InsertOutcome::Duplicate) => {
                debug!("Admin email already exists");
                Err(AdminError::Conflict)
            }
            Err(err) => {
                error!("Failed to insert admin: {err:#}");
                Err(AdminError::Conflict)
            }
        }
    }

    /// Verify credentials and return the admin profile.
    ///
    /// # Errors
    /// `BadRequest` on missing input, `InvalidCredentials` for an unknown email
    /// or wrong password, `AccountDisabled` for an inactive account.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminProfile, AdminError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AdminError::BadRequest("email and password are required"));
        }

        let account = match self.with_deadline(self.store.find_by_email(&email)).await? {
            Ok(account) => account,
            Err(err) => {
                error!("Failed to lookup admin: {err:#}");
                None
            }
        };

        let Some(account) = account else {
            self.hasher.burn(password).await;
            return Err(AdminError::InvalidCredentials);
        };

        let verified = self.hasher.verify(&account.password_hash, password).await;

        if !account.is_active {
            return Err(AdminError::AccountDisabled);
        }

        if !verified {
            return Err(AdminError::InvalidCredentials);
        }

        self.record_login(account.id);

        let permissions = permissions_for(&account.role)
            .iter()
            .map(|permission| (*permission).to_string())
            .collect();

        Ok(AdminProfile {
            id: account.id,
            email: account.email,
            role: account.role,
            permissions,
        })
    }

    /// Overwrite the password of an existing admin.
    ///
    /// # Errors
    /// `Unauthorized`, `BadRequest`, `NotFound` when no row matches,
    /// `Store`/`Timeout`/`Hashing` on server faults.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        presented_secret: &str,
        email: &str,
        new_password: &str,
    ) -> Result<(), AdminError> {
        self.authorize(presented_secret)?;

        let email = normalize_email(email);
        if email.is_empty() || new_password.is_empty() {
            return Err(AdminError::BadRequest("email and new_password are required"));
        }
        check_password_length(new_password)?;

        let password_hash = self.hasher.hash(new_password).await?;

        match self
            .with_deadline(self.store.update_password_hash(&email, &password_hash))
            .await?
        {
            Ok(0) => Err(AdminError::NotFound),
            Ok(_) => Ok(()),
            Err(err) => Err(AdminError::Store(err)),
        }
    }

    /// Look up an admin by email without exposing the hash.
    ///
    /// # Errors
    /// `Unauthorized`, `BadRequest`, `NotFound`, `Store`/`Timeout`.
    #[instrument(skip_all)]
    pub async fn lookup_by_email(
        &self,
        presented_secret: &str,
        email: &str,
    ) -> Result<AdminSummary, AdminError> {
        self.authorize(presented_secret)?;

        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AdminError::BadRequest("email query param is required"));
        }

        match self.with_deadline(self.store.find_by_email(&email)).await? {
            Ok(Some(account)) => Ok(AdminSummary {
                id: account.id,
                email,
                role: account.role,
                is_active: account.is_active,
            }),
            Ok(None) => Err(AdminError::NotFound),
            Err(err) => Err(AdminError::Store(err)),
        }
    }

    /// Ping the store under the deadline.
    pub async fn store_healthy(&self) -> bool {
        match self.with_deadline(self.store.ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                error!("Store ping failed: {err:#}");
                false
            }
            Err(err) => {
                error!("{err}");
                false
            }
        }
    }

    /// Check the presented bootstrap secret.
    ///
    /// # Errors
    /// `Unauthorized` when it does not match.
    pub fn authorize(&self, presented_secret: &str) -> Result<(), AdminError> {
        if self.secret.matches(presented_secret) {
            Ok(())
        } else {
            Err(AdminError::Unauthorized)
        }
    }

    async fn with_deadline<T, F>(&self, call: F) -> Result<anyhow::Result<T>, AdminError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        timeout(self.store_timeout, call)
            .await
            .map_err(|_| AdminError::Timeout(self.store_timeout))
    }

    fn record_login(&self, id: Uuid) {
        let store = Arc::clone(&self.store);
        let deadline = self.store_timeout;

        tokio::spawn(async move {
            match timeout(deadline, store.touch_last_login(id)).await {
                Ok(Ok(())) => debug!("Updated last login for {}", id),
                Ok(Err(err)) => warn!("Failed to update last login for {}: {err:#}", id),
                Err(_) => warn!("Timed out updating last login for {}", id),
            }
        });
    }
}

fn check_password_length(password: &str) -> Result<(), AdminError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AdminError::BadRequest("password must be at most 72 bytes"));
    }
    Ok(())
}
