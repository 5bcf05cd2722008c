//! Tracing subscriber for the binary.
//!
//! The libraries only emit; this is the one place a subscriber is installed.
//! Logs go to stderr so rendered SVG and diagram text on stdout stay pipeable.
//! `RUST_LOG`, when set, replaces the level derived from `-v`/`-q`.

use std::io::IsTerminal as _;

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events follow the `-v` level; everything else stays at warn.
const WORKSPACE_CRATES: [&str; 3] = ["metaview", "metaview_core", "metaview_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directives(args.verbosity().level()))?,
    };

    // Request spans carry the href, so targets add nothing but noise.
    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install tracing subscriber: {e}"))
}

/// `warn` for dependencies (reqwest, hyper), `level` for the workspace.
fn filter_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    std::iter::once("warn".to_string())
        .chain(WORKSPACE_CRATES.iter().map(|krate| format!("{krate}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}
