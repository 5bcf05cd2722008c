//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::Args;
use tracing::Level;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only errors on stderr
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colours (also set by NO_COLOR)
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read configuration from FILE instead of the default location
    #[arg(short, long, global = true, value_name = "FILE", env = "METAVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Restful-Objects base URL, overriding `server.base_url`
    #[arg(short = 's', long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// How results are printed on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Log level for the workspace crates, from `-v` count and `--quiet`.
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            return Verbosity::Quiet;
        }
        Verbosity::Level(match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Level(Level),
}

impl Verbosity {
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Level(level) => level,
        }
    }

    pub fn is_verbose(self) -> bool {
        self.level() > Level::WARN
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise
    #[default]
    Auto,
    Human,
    Plain,
    Json,
}
