//! `metaview config`: read and write configuration values.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `file` is the `--config` path, if one was given; `set` writes there,
/// otherwise to the default location.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    file: Option<PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    let path = file.unwrap_or_else(AppConfig::config_path);

    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.result(&value)?;
        }

        ConfigCommands::Set { key, value } => {
            set_config_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            output.result(&serialise(&config)?)?;
        }

        ConfigCommands::Path => {
            output.result(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn serialise(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

/// Look a dotted key up in the effective configuration.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let tree = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    match key.split('.').try_fold(&tree, |node, part| node.get(part)) {
        Some(Value::Object(_)) | None => Err(unknown_key(key)),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

/// Write one key into the TOML file at `path`, keeping the other entries.
fn set_config_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let Some((section, field)) = key.split_once('.') else {
        return Err(unknown_key(key));
    };
    let defaults = serde_json::to_value(AppConfig::default()).unwrap_or(Value::Null);
    if defaults.get(section).and_then(|s| s.get(field)).is_none() {
        return Err(unknown_key(key));
    }

    let mut document: toml::Table = if path.exists() {
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
        text.parse::<toml::Table>()
            .with_cli_context(|| format!("'{}' is not valid TOML", path.display()))?
    } else {
        toml::Table::new()
    };

    let table = document
        .entry(section)
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(table) = table else {
        return Err(CliError::ConfigError {
            message: format!("'{section}' in '{}' is not a table", path.display()),
            source: None,
        });
    };
    table.insert(field.to_string(), parse_value(raw));

    // Reject values the loader would not accept.
    let candidate = serialise_table(&document)?;
    toml::from_str::<AppConfig>(&candidate).map_err(|e| CliError::InvalidInput {
        message: format!("Invalid value for {key}: {e}"),
        source: None,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, candidate)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))
}

fn serialise_table(document: &toml::Table) -> CliResult<String> {
    toml::to_string_pretty(document).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn parse_value(raw: &str) -> toml::Value {
    if let Ok(flag) = raw.parse::<bool>() {
        return toml::Value::Boolean(flag);
    }
    if let Ok(number) = raw.parse::<i64>() {
        return toml::Value::Integer(number);
    }
    toml::Value::String(raw.to_string())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "server.base_url").unwrap(),
            "http://localhost:8080/restful"
        );
        assert_eq!(get_config_value(&cfg, "server.timeout_secs").unwrap(), "30");
        assert_eq!(get_config_value(&cfg, "push.url").unwrap(), "");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
        assert!(get_config_value(&cfg, "server").is_err());
    }

    #[test]
    fn set_creates_and_updates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        set_config_value(&path, "server.user", "sven").unwrap();
        set_config_value(&path, "server.timeout_secs", "5").unwrap();
        set_config_value(&path, "output.no_color", "true").unwrap();

        let cfg: AppConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.server.user.as_deref(), Some("sven"));
        assert_eq!(cfg.server.timeout_secs, 5);
        assert!(cfg.output.no_color);
        assert_eq!(cfg.render.diagram_type, "plantuml");
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(
            set_config_value(&path, "server.colour", "red"),
            Err(CliError::ConfigError { .. })
        ));
        assert!(matches!(
            set_config_value(&path, "server.timeout_secs", "soon"),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_value("http://x"), toml::Value::String("http://x".into()));
    }
}
