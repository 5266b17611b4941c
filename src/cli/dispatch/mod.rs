//! Map parsed CLI arguments to the action to run.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{
    ARG_BOOTSTRAP_KEY, ARG_DSN, ARG_MAX_CONNECTIONS, ARG_PORT, ARG_STORE_TIMEOUT_SECONDS,
};
use crate::admin::DEFAULT_STORE_TIMEOUT_SECONDS;
use anyhow::{bail, Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or the bootstrap key is empty.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    let bootstrap_key = matches
        .get_one::<String>(ARG_BOOTSTRAP_KEY)
        .cloned()
        .context("missing required argument: --bootstrap-key")?;
    if bootstrap_key.trim().is_empty() {
        bail!("--bootstrap-key must not be empty");
    }

    let store_timeout_seconds = matches
        .get_one::<u64>(ARG_STORE_TIMEOUT_SECONDS)
        .copied()
        .unwrap_or(DEFAULT_STORE_TIMEOUT_SECONDS);
    let max_connections = matches
        .get_one::<u32>(ARG_MAX_CONNECTIONS)
        .copied()
        .unwrap_or(5);

    Ok(Action::Server(Args {
        port,
        dsn,
        bootstrap_key: SecretString::from(bootstrap_key),
        store_timeout_seconds,
        max_connections,
    }))
}
