//! Terminal output for command results.
//!
//! Logs go to stderr through `tracing`; everything a command *reports* goes
//! through [`OutputManager`] to stdout, so `splint order gtest | ...` gets a
//! clean stream.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const TICK: &str = "\u{2713}";
const WARN: &str = "\u{26a0}";
const INFO: &str = "\u{2139}";
const ON: &str = "\u{25cf}";
const OFF: &str = "\u{25cb}";

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// Flags beat `output.format`; `auto` in both falls back to TTY detection.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_config(&config.output.format).unwrap_or(OutputFormat::Auto)
            }
            explicit => explicit,
        };
        let format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(|| msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(TICK, msg, Style::new().green().bold(), Style::new().green())
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(WARN, msg, Style::new().yellow().bold(), Style::new().yellow())
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(INFO, msg, Style::new().blue().bold(), Style::new().blue())
    }

    /// Indented entry: `● name` when on, `○ name` when off.
    pub fn item(&self, on: bool, msg: &str) -> io::Result<()> {
        let (glyph, marker, text) = if on {
            (ON, Style::new().green(), Style::new())
        } else {
            (OFF, Style::new().dimmed(), Style::new().dimmed())
        };
        self.line(|| format!("  {}", self.paint(glyph, msg, marker, text)))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.line(|| self.style(text, Style::new().cyan().bold()))
    }

    /// Pretty JSON.  Printed even with `--quiet`: it was asked for.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn colored(&self) -> bool {
        self.color
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn line(&self, render: impl FnOnce() -> String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&render())
    }

    fn marked(&self, glyph: &str, msg: &str, marker: Style, text: Style) -> io::Result<()> {
        self.line(|| self.paint(glyph, msg, marker, text))
    }

    fn paint(&self, glyph: &str, msg: &str, marker: Style, text: Style) -> String {
        format!("{} {}", self.style(glyph, marker), self.style(msg, text))
    }

    fn style(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(no_color: bool, output_format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color,
            config: None,
            project: ".".into(),
            output_format,
        }
    }

    fn manager(format: OutputFormat, config: &AppConfig) -> OutputManager {
        OutputManager::new(&args(false, format), config)
    }

    #[test]
    fn plain_is_never_colored() {
        assert!(!manager(OutputFormat::Plain, &AppConfig::default()).colored());
        assert!(manager(OutputFormat::Human, &AppConfig::default()).colored());
    }

    #[test]
    fn no_color_wins_over_human() {
        let out = OutputManager::new(&args(true, OutputFormat::Human), &AppConfig::default());
        assert!(!out.colored());

        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!manager(OutputFormat::Human, &config).colored());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert!(manager(OutputFormat::Auto, &config).is_json());
        assert!(!manager(OutputFormat::Plain, &config).is_json());
    }

    #[test]
    fn uncolored_paint_is_bare_text() {
        let out = manager(OutputFormat::Plain, &AppConfig::default());
        assert_eq!(
            out.paint(ON, "make", Style::new().green(), Style::new()),
            "\u{25cf} make"
        );
    }

    #[test]
    fn quiet_still_writes_json() {
        let mut global = args(true, OutputFormat::Json);
        global.quiet = true;
        let out = OutputManager::new(&global, &AppConfig::default());
        assert!(out.print("hidden").is_ok());
        assert!(out.json(&serde_json::json!({ "total_order": ["make"] })).is_ok());
    }
}
