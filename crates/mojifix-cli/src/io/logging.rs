// crates/mojifix-cli/src/io/logging.rs

use tracing_subscriber::EnvFilter;

/// stderr logger. Status lines go to stdout and are not affected.
pub fn init(verbose: u8) -> anyhow::Result<()> {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))
}
