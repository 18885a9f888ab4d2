//! # Terminal Decoration
//!
//! Colour is decided once per run by [`configure`] and stored in `console`'s
//! global switch. The helpers below read it back, so a line styled here is
//! plain text whenever colour is off.
//!
//! The decision honours, in order:
//! - `--color=always|never`
//! - `NO_COLOR` (any value), `CLICOLOR=0` and `TERM=dumb`, which turn it off
//! - `CLICOLOR_FORCE`, which turns it on without a terminal
//! - otherwise, whether stdout is a colour-capable terminal

use std::env;
use std::fmt::Display;

use console::{style, StyledObject};

/// The `--color` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Unknown values fall back to `Auto`.
    pub fn from_flag(flag: &str) -> Self {
        match flag.to_ascii_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        }
    }
}

/// Decide whether to colour output and apply it globally. Returns the
/// decision.
pub fn configure(mode: ColorMode) -> bool {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            env_preference(|key| env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
                .unwrap_or_else(|| console::Term::stdout().features().colors_supported())
        }
    };
    console::set_colors_enabled(enabled);
    enabled
}

/// What the environment says about colour, if anything.
fn env_preference<F>(var: F) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    if var("NO_COLOR").is_some() {
        return Some(false);
    }
    if var("CLICOLOR").as_deref() == Some("0") || var("TERM").as_deref() == Some("dumb") {
        return Some(false);
    }
    match var("CLICOLOR_FORCE") {
        Some(v) if !v.is_empty() && v != "0" => Some(true),
        _ => None,
    }
}

/// Prefix for the end-of-run summary line.
pub fn summary_marker(conflicts: bool) -> String {
    let colored = console::colors_enabled();
    match (conflicts, colored) {
        (false, true) => format!("{}", style("📦").green()),
        (false, false) => "[OK]".to_string(),
        (true, true) => format!("{}", style("⚠️ ").yellow()),
        (true, false) => "[WARN]".to_string(),
    }
}

/// A rendered conflict report.
pub fn conflict<D: Display>(text: D) -> StyledObject<D> {
    style(text).yellow()
}

/// A `resolving <name> to <ref>` line.
pub fn resolution<D: Display>(text: D) -> StyledObject<D> {
    style(text).cyan()
}
