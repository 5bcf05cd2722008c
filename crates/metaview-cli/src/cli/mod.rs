//! Command line surface of `metaview`.
//!
//! Argument names and help text live here; commands receive the parsed
//! structs and never look at raw arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use metaview_core::domain::PayloadKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "metaview",
    bin_name = "metaview",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Metadata viewer and class diagrams for Restful Objects servers",
    long_about = "Metaview resolves the hypermedia links of a Restful Objects \
                  server, aggregates domain-type metadata and renders it as \
                  PlantUML class diagrams.",
    after_help = "EXAMPLES:\n\
        \x20 metaview parse response.json\n\
        \x20 metaview diagram simple.SimpleObject --text-only\n\
        \x20 metaview system\n\
        \x20 metaview completions bash > /usr/share/bash-completion/completions/metaview",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a saved JSON response into a transfer object.
    #[command(
        visible_alias = "p",
        about = "Parse a JSON response",
        after_help = "EXAMPLES:\n\
            \x20 metaview parse user.json\n\
            \x20 metaview parse layout.json --kind layout\n\
            \x20 metaview parse type.json --output-format json"
    )]
    Parse(ParseArgs),

    /// Build (and render) the class diagram of a domain type.
    #[command(
        visible_alias = "d",
        about = "Class diagram of a domain type",
        after_help = "EXAMPLES:\n\
            \x20 metaview diagram simple.SimpleObject\n\
            \x20 metaview diagram simple.SimpleObject --text-only\n\
            \x20 metaview diagram --file type.json --layout layout.json --text-only"
    )]
    Diagram(DiagramArgs),

    /// Show user, version and domain types of the server.
    #[command(about = "System overview")]
    System(SystemArgs),

    /// Show a domain object and its layout.
    #[command(
        about = "Show a domain object",
        after_help = "EXAMPLES:\n\
            \x20 metaview object http://localhost:8080/restful/objects/simple.SimpleObject/0"
    )]
    Object(ObjectArgs),

    /// Listen for server-pushed messages.
    #[command(about = "Listen for server push messages")]
    Watch(WatchArgs),

    /// Initialise a Metaview configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 metaview init           # default location\n\
            \x20 metaview init --local   # .metaview.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 metaview completions bash > ~/.local/share/bash-completion/completions/metaview\n\
            \x20 metaview completions zsh  > ~/.zfunc/_metaview\n\
            \x20 metaview completions fish > ~/.config/fish/completions/metaview.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Metaview configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 metaview config get server.base_url\n\
            \x20 metaview config set server.base_url http://localhost:8080/restful\n\
            \x20 metaview config list"
    )]
    Config(ConfigCommands),
}

// ── parse ─────────────────────────────────────────────────────────────────────

/// Arguments for `metaview parse`.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// JSON file to parse; `-` reads stdin.
    #[arg(value_name = "FILE", help = "JSON response file (- for stdin)")]
    pub file: PathBuf,

    /// Payload kind; every handler is tried in turn when omitted.
    #[arg(
        short = 'k',
        long = "kind",
        value_name = "KIND",
        value_enum,
        help = "Payload kind (default: detect)"
    )]
    pub kind: Option<KindArg>,
}

// ── diagram ───────────────────────────────────────────────────────────────────

/// Arguments for `metaview diagram`.
#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("source").required(true).args(["type_name", "file"]))]
pub struct DiagramArgs {
    /// Canonical name of the domain type, fetched from the server.
    #[arg(value_name = "TYPE", help = "Domain type canonical name")]
    pub type_name: Option<String>,

    /// Read the domain type from a saved JSON response instead.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Domain type JSON file"
    )]
    pub file: Option<PathBuf>,

    /// Layout JSON file used for member order.
    #[arg(
        short = 'l',
        long = "layout",
        value_name = "FILE",
        help = "Layout JSON file"
    )]
    pub layout: Option<PathBuf>,

    /// Print the PlantUML text instead of rendering it.
    #[arg(long = "text-only", help = "Print diagram text, skip rendering")]
    pub text_only: bool,

    /// Slot that receives the rendered diagram.
    #[arg(
        long = "slot",
        value_name = "SLOT",
        default_value = "diagram",
        help = "Target slot"
    )]
    pub slot: String,

    /// Do not wait for property return types.
    #[arg(long = "no-member-types", help = "Skip member description requests")]
    pub no_member_types: bool,
}

// ── system ────────────────────────────────────────────────────────────────────

/// Arguments for `metaview system`.
#[derive(Debug, Args)]
pub struct SystemArgs {
    /// Layout resource to load with the system view.
    #[arg(long = "layout", value_name = "URL", help = "Layout URL")]
    pub layout: Option<String>,
}

// ── object ────────────────────────────────────────────────────────────────────

/// Arguments for `metaview object`.
#[derive(Debug, Args)]
pub struct ObjectArgs {
    /// Absolute URL of the object resource.
    #[arg(value_name = "URL", help = "Object URL")]
    pub url: String,
}

// ── watch ─────────────────────────────────────────────────────────────────────

/// Arguments for `metaview watch`.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Event-stream URL; overrides `push.url`.
    #[arg(long = "url", value_name = "URL", help = "Push endpoint URL")]
    pub url: Option<String>,

    /// Slot that receives pushed messages.
    #[arg(
        long = "slot",
        value_name = "SLOT",
        default_value = "push",
        help = "Target slot"
    )]
    pub slot: String,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `metaview init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.metaview.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `metaview completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `metaview config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `server.base_url`.
        key: String,
    },
    /// Set a configuration key in the configuration file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Payload kinds accepted by `--kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum KindArg {
    Menu,
    #[value(alias = "menubars")]
    MenuEntry,
    Layout,
    #[value(alias = "type")]
    DomainType,
    DomainTypes,
    MemberDescription,
    ResultObject,
    ResultValue,
    #[value(alias = "object")]
    DomainObject,
    User,
    Version,
}

impl From<KindArg> for PayloadKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Menu => Self::Menu,
            KindArg::MenuEntry => Self::MenuEntry,
            KindArg::Layout => Self::Layout,
            KindArg::DomainType => Self::DomainType,
            KindArg::DomainTypes => Self::DomainTypes,
            KindArg::MemberDescription => Self::MemberDescription,
            KindArg::ResultObject => Self::ResultObject,
            KindArg::ResultValue => Self::ResultValue,
            KindArg::DomainObject => Self::DomainObject,
            KindArg::User => Self::User,
            KindArg::Version => Self::Version,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn kind_names_match_payload_kinds() {
        for kind in KindArg::value_variants() {
            let name = kind.to_possible_value().map(|v| v.get_name().to_string());
            assert_eq!(name.as_deref(), Some(PayloadKind::from(*kind).as_str()));
        }
    }

    #[test]
    fn parse_diagram_command() {
        let cli = Cli::parse_from(["metaview", "diagram", "simple.SimpleObject", "--text-only"]);
        let Commands::Diagram(args) = cli.command else {
            panic!("expected Diagram command");
        };
        assert_eq!(args.type_name.as_deref(), Some("simple.SimpleObject"));
        assert!(args.text_only);
        assert_eq!(args.slot, "diagram");
    }

    #[test]
    fn diagram_needs_a_source() {
        assert!(Cli::try_parse_from(["metaview", "diagram"]).is_err());
        assert!(Cli::try_parse_from(["metaview", "diagram", "--file", "t.json"]).is_ok());
    }

    #[test]
    fn kind_alias() {
        let cli = Cli::parse_from(["metaview", "parse", "x.json", "-k", "type"]);
        let Commands::Parse(args) = cli.command else {
            panic!("expected Parse command");
        };
        assert_eq!(args.kind, Some(KindArg::DomainType));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["metaview", "--quiet", "--verbose", "system"]);
        assert!(result.is_err());
    }
}
