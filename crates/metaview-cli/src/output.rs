//! Everything the binary writes to stdout.
//!
//! Results (diagram text, SVG, JSON) are always written. Status lines are
//! dropped under `--quiet`, except errors. Colour is only used for
//! [`OutputFormat::Human`], so piped output never carries escape codes.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    fn glyph(self) -> char {
        match self {
            Self::Success => '\u{2713}',
            Self::Error => '\u{2717}',
            Self::Warning => '\u{26a0}',
            Self::Info => '\u{2139}',
        }
    }

    fn color(self) -> AnsiColors {
        match self {
            Self::Success => AnsiColors::Green,
            Self::Error => AnsiColors::Red,
            Self::Warning => AnsiColors::Yellow,
            Self::Info => AnsiColors::Blue,
        }
    }

    /// Errors are shown even when `--quiet` is set.
    fn survives_quiet(self) -> bool {
        matches!(self, Self::Error)
    }
}

#[derive(Debug, Clone)]
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };
        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Free-form chatter line.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Command result; `-q` silences chatter, not results.
    pub fn result(&self, content: &str) -> io::Result<()> {
        self.term.write_line(content)
    }

    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Error, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    /// Title of a view (system, object).
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.color {
            self.term.write_line(&text.cyan().bold().to_string())
        } else {
            self.term.write_line(text)
        }
    }

    /// `  key: value` under a header.
    pub fn field(&self, key: &str, value: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.color {
            self.term.write_line(&format!("  {}: {value}", key.dimmed()))
        } else {
            self.term.write_line(&format!("  {key}: {value}"))
        }
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet && !tone.survives_quiet() {
            return Ok(());
        }
        self.term.write_line(&self.status_line(tone, msg))
    }

    fn status_line(&self, tone: Tone, msg: &str) -> String {
        if !self.color {
            return format!("{} {msg}", tone.glyph());
        }
        format!(
            "{} {}",
            tone.glyph().color(tone.color()).bold(),
            msg.color(tone.color())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            server: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn plain_status_lines_have_a_glyph_and_no_escapes() {
        let out = manager(false, false, OutputFormat::Plain);
        assert_eq!(out.status_line(Tone::Warning, "late"), "\u{26a0} late");
        assert_eq!(out.status_line(Tone::Success, "ok"), "\u{2713} ok");
    }

    #[test]
    fn human_status_lines_are_coloured() {
        let out = manager(false, false, OutputFormat::Human);
        assert!(out.status_line(Tone::Error, "boom").contains("\u{1b}["));
    }

    #[test]
    fn only_errors_survive_quiet() {
        assert!(Tone::Error.survives_quiet());
        assert!(!Tone::Info.survives_quiet());
        assert!(manager(true, true, OutputFormat::Plain).print("hidden").is_ok());
    }

    #[test]
    fn color_only_for_human_output() {
        assert!(manager(false, false, OutputFormat::Human).supports_color());
        assert!(!manager(false, true, OutputFormat::Human).supports_color());
        assert!(!manager(false, false, OutputFormat::Plain).supports_color());
    }

    #[test]
    fn config_can_turn_colour_off() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            server: None,
            output_format: OutputFormat::Human,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn explicit_format_is_kept() {
        assert!(manager(false, false, OutputFormat::Json).is_json());
        assert!(!manager(false, false, OutputFormat::Plain).is_json());
    }
}
