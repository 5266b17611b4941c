//! Admin credential verification and access control.
//!
//! - [`SecretMatcher`] compares the bootstrap secret in constant time.
//! - [`PasswordHasher`] hashes and verifies passwords with bcrypt.
//! - [`permissions_for`] maps a role to its static permission list.
//! - [`AdminGateway`] ties them to an [`AdminStore`].

pub mod error;
pub mod gateway;
pub mod password;
pub mod roles;
pub mod secret;
pub mod store;
pub mod types;
mod utils;

pub use error::{AdminError, ErrorBody};
pub use gateway::{AdminGateway, GatewayConfig, DEFAULT_STORE_TIMEOUT_SECONDS};
pub use password::{HashingError, PasswordHasher};
pub use roles::{permissions_for, Role};
pub use secret::SecretMatcher;
pub use store::{AdminAccount, AdminStore, InsertOutcome, MemoryAdminStore, NewAdmin, PgAdminStore};
pub use types::{AdminProfile, AdminSummary, CreatedAdmin};
pub use utils::normalize_email;
