//! # admin-auth (Bootstrap-protected admin authentication)
//!
//! `admin-auth` verifies administrator credentials and manages administrator
//! accounts stored in `private.user_admin`.
//!
//! ## Bootstrap secret
//!
//! Creating accounts, resetting passwords and looking accounts up all require a
//! single operator-held secret sent in the `X-Admin-Bootstrap-Key` header. It is
//! compared in constant time and an empty configured secret matches nothing.
//!
//! ## Login
//!
//! Login answers with the account's role and its static permission list.
//! An unknown email and a wrong password are indistinguishable, in both the
//! response body and the work done (one bcrypt verification either way).
//! Disabled accounts are reported as such only after the password is checked.
//!
//! ## Storage
//!
//! Storage sits behind [`admin::AdminStore`]; every call runs under a deadline
//! and the last-login timestamp is updated in the background.

pub mod admin;
pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
