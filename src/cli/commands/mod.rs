use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_DSN: &str = "dsn";
pub const ARG_BOOTSTRAP_KEY: &str = "bootstrap-key";
pub const ARG_STORE_TIMEOUT_SECONDS: &str = "store-timeout-seconds";
pub const ARG_MAX_CONNECTIONS: &str = "max-connections";
pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names accepted by `--verbose`, in verbosity-count order.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Parse `ADMIN_AUTH_LOG_LEVEL` as a count (`0`..`4`) or a level name.
fn parse_log_level(level: &str) -> Result<u8, String> {
    if let Ok(count) = level.parse::<u8>() {
        if usize::from(count) < LOG_LEVELS.len() {
            return Ok(count);
        }
    }

    LOG_LEVELS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(level.trim()))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level, expected one of: {}", LOG_LEVELS.join(", ")))
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    Command::new("admin-auth")
        .about("Bootstrap-protected admin authentication")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ADMIN_AUTH_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .env("DATABASE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_BOOTSTRAP_KEY)
                .long("bootstrap-key")
                .help("Secret required in the X-Admin-Bootstrap-Key header to manage admins")
                .env("ADMIN_BOOTSTRAP_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_STORE_TIMEOUT_SECONDS)
                .long("store-timeout-seconds")
                .help("Deadline for each database call")
                .default_value("5")
                .env("ADMIN_AUTH_STORE_TIMEOUT_SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_MAX_CONNECTIONS)
                .long("max-connections")
                .help("Maximum number of database connections")
                .default_value("5")
                .env("ADMIN_AUTH_MAX_CONNECTIONS")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help(format!(
                    "Log level, repeat -v or name one of: {} (default: error)",
                    LOG_LEVELS.join(", ")
                ))
                .env("ADMIN_AUTH_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(parse_log_level),
        )
}
