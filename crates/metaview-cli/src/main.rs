//! `metaview`: resolve Restful-Objects metadata and render class diagrams.
//!
//! Exit codes: 0 success, 1 internal error or unreachable server,
//! 2 bad input, 3 resource not found, 4 configuration error.
//! Argument errors keep clap's own codes (`--help` exits 0).

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod logging;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is normal; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }
    let verbosity = cli.global.verbosity();
    debug!(level = %verbosity.level(), command = ?cli.command, "Starting");

    let mut config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            eprintln!("Error: {e:#}");
            return ExitCode::from(4);
        }
    };
    if let Some(server) = &cli.global.server {
        debug!(%server, "Base URL overridden on the command line");
        config.server.base_url = server.clone();
    }

    let output = OutputManager::new(&cli.global, &config);
    let colored = output.supports_color() && std::io::stderr().is_terminal();

    match run(cli, config, output).await {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => report(e, verbosity.is_verbose(), colored),
    }
}

#[instrument(skip_all)]
async fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Parse(args) => commands::parse::execute(args, output),
        Commands::Diagram(args) => commands::diagram::execute(args, config, output).await,
        Commands::System(args) => commands::system::execute(args, config, output).await,
        Commands::Object(args) => commands::object::execute(args, config, output).await,
        Commands::Watch(args) => commands::watch::execute(args, config, output).await,
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, cli.global.config, output),
    }
}

fn report(err: CliError, verbose: bool, colored: bool) -> ExitCode {
    err.log();
    if colored {
        eprint!("{}", err.format_colored(verbose));
    } else {
        eprint!("{}", err.format_plain(verbose));
    }
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_comes_from_the_manifest() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn server_flag_is_global() {
        let cli = Cli::try_parse_from(["metaview", "system", "--server", "http://host/restful"])
            .unwrap();
        assert_eq!(cli.global.server.as_deref(), Some("http://host/restful"));
    }
}
