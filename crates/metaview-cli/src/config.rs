//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `METAVIEW_<SECTION>__<KEY>` (a `.env` file is
//!    loaded into the environment first)
//! 3. Config file (`--config`, else the default location)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "METAVIEW";
const LOCAL_FILE: &str = ".metaview.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Restful Objects server.
    pub server: ServerConfig,
    /// Remote diagram rendering.
    pub render: RenderConfig,
    /// Server push.
    pub push: PushConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub endpoint: String,
    pub diagram_type: String,
    pub output_format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Event-stream URL; push is unsupported when unset.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Write slot contents to files in this directory instead of stdout.
    pub slot_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/restful".into(),
            user: None,
            password: None,
            timeout_secs: 30,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            endpoint: metaview_adapters::renderer::DEFAULT_ENDPOINT.into(),
            diagram_type: "plantuml".into(),
            output_format: "svg".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.metaview.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "metaview", "metaview")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(Self::local_path)
    }

    pub fn local_path() -> PathBuf {
        PathBuf::from(LOCAL_FILE)
    }
}
