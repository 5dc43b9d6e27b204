//! ANSI styling for the REPL's error output, grounded in the core
//! compiler's own `Style` helper (raw escape constants, no third-party
//! crate) but gated by [`ColorMode`] the way §6's `--color=WHEN` flag and
//! `set color` key expect: `always` forces it on, `never` (and its aliases
//! `not_file`/`not_isreg`) force it off, `auto` (and its aliases
//! `isatty`/`tty`) follow whether stderr is a terminal.

use cdeclish_options::ColorMode;
use std::io::IsTerminal;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Whether this session's error/prompt output should carry ANSI escapes,
/// resolved once at startup from the active [`ColorMode`].
pub fn enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stderr().is_terminal(),
    }
}

pub fn bold_red(s: &str, color: bool) -> String {
    if color {
        format!("{BOLD}{RED}{s}{RESET}")
    } else {
        s.to_string()
    }
}

pub fn yellow(s: &str, color: bool) -> String {
    if color {
        format!("{YELLOW}{s}{RESET}")
    } else {
        s.to_string()
    }
}

pub fn cyan(s: &str, color: bool) -> String {
    if color {
        format!("{CYAN}{s}{RESET}")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_mode_passes_text_through() {
        assert_eq!(bold_red("error", false), "error");
    }

    #[test]
    fn enabled_mode_wraps_in_escapes() {
        let s = bold_red("error", true);
        assert!(s.contains(RED));
        assert!(s.contains("error"));
        assert!(s.contains(RESET));
    }

    #[test]
    fn always_mode_is_enabled_regardless_of_terminal() {
        assert!(enabled(ColorMode::Always));
    }

    #[test]
    fn never_mode_is_always_disabled() {
        assert!(!enabled(ColorMode::Never));
    }
}
