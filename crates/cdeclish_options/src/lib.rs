//! # cdeclish-options
//!
//! Typed configuration state (component C8): `dialect`, digraph/trigraph
//! mode, east-const placement, the `explicit_int`/`explicit_ecsu` policy
//! masks, alt-tokens, and trailing-semicolon — exactly the fields §4.8
//! enumerates. `OptionState` is a plain value threaded explicitly into every
//! render and check call; nothing here is global or hidden (§9, "Global
//! state").

use cdeclish_types::{Dialect, ExplicitEcsu, ExplicitInt};
use std::fmt;

/// Digraph/trigraph rewriting mode, consumed by the declaration renderer
/// (C6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphMode {
    #[default]
    None,
    Digraphs,
    Trigraphs,
}

/// When color is emitted, independent of the `set` surface's other knobs
/// (carried here because the config-file/CLI surface treats it the same
/// way as the other options in §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    Always,
    #[default]
    Auto,
    Never,
}

/// The full configuration consulted by C4 (checker), C5 (English renderer),
/// and C6 (declaration renderer). Cloned cheaply (every field is `Copy`);
/// callers pass `&OptionState` rather than mutate one shared instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionState {
    pub dialect: Dialect,
    pub graph: GraphMode,
    pub east_const: bool,
    pub explicit_int: ExplicitInt,
    pub explicit_ecsu: ExplicitEcsu,
    pub alt_tokens: bool,
    pub semicolon: bool,
    pub color: ColorMode,
}

impl Default for OptionState {
    fn default() -> Self {
        OptionState {
            dialect: Dialect::CPP17,
            graph: GraphMode::None,
            east_const: false,
            explicit_int: ExplicitInt::empty(),
            explicit_ecsu: ExplicitEcsu::empty(),
            alt_tokens: false,
            semicolon: true,
            color: ColorMode::Auto,
        }
    }
}

/// Why [`OptionState::set`] rejected a key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    UnknownOption(String),
    InvalidValue { option: &'static str, value: String },
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetError::UnknownOption(name) => write!(f, "unknown option `{name}`"),
            SetError::InvalidValue { option, value } => {
                write!(f, "invalid value `{value}` for option `{option}`")
            }
        }
    }
}

impl std::error::Error for SetError {}

impl OptionState {
    /// `set(option, value)` from §6: applies one key/value pair from the
    /// `set` command or the config file. Recognizes the keys listed in §6's
    /// "Persisted state" (hyphenated form); an unrecognized key is a
    /// warning at the collaborator layer, not an error here — callers that
    /// want the config-file's lenient behavior should downgrade
    /// `SetError::UnknownOption` to a warning themselves.
    pub fn set(&mut self, option: &str, value: &str) -> Result<(), SetError> {
        match option {
            "language" => {
                self.dialect = parse_dialect(value).ok_or_else(|| SetError::InvalidValue {
                    option: "language",
                    value: value.to_string(),
                })?;
            }
            "graphs" => {
                self.graph = match value {
                    "none" => GraphMode::None,
                    "di" | "digraphs" => GraphMode::Digraphs,
                    "tri" | "trigraphs" => GraphMode::Trigraphs,
                    _ => {
                        return Err(SetError::InvalidValue { option: "graphs", value: value.to_string() })
                    }
                };
            }
            "digraphs" => {
                self.graph = if parse_bool(value).ok_or_else(|| invalid("digraphs", value))? {
                    GraphMode::Digraphs
                } else {
                    GraphMode::None
                };
            }
            "trigraphs" => {
                self.graph = if parse_bool(value).ok_or_else(|| invalid("trigraphs", value))? {
                    GraphMode::Trigraphs
                } else {
                    GraphMode::None
                };
            }
            "east-const" => self.east_const = parse_bool(value).ok_or_else(|| invalid("east-const", value))?,
            "alt-tokens" => self.alt_tokens = parse_bool(value).ok_or_else(|| invalid("alt-tokens", value))?,
            "semicolon" => self.semicolon = parse_bool(value).ok_or_else(|| invalid("semicolon", value))?,
            "color" => {
                self.color = match value {
                    "always" => ColorMode::Always,
                    "never" => ColorMode::Never,
                    "auto" | "isatty" | "tty" => ColorMode::Auto,
                    "not_file" | "not_isreg" => ColorMode::Never,
                    _ => return Err(SetError::InvalidValue { option: "color", value: value.to_string() }),
                };
            }
            "explicit-int" => {
                self.explicit_int = parse_explicit_int(value).ok_or_else(|| invalid("explicit-int", value))?;
            }
            "explicit-ecsu" => {
                self.explicit_ecsu = parse_explicit_ecsu(value).ok_or_else(|| invalid("explicit-ecsu", value))?;
            }
            other => return Err(SetError::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}

fn invalid(option: &'static str, value: &str) -> SetError {
    SetError::InvalidValue { option, value: value.to_string() }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn parse_dialect(value: &str) -> Option<Dialect> {
    match value.to_ascii_lowercase().as_str() {
        "knr" | "knrc" | "k&r" => Some(Dialect::KNR_C),
        "c89" | "c90" | "ansi" => Some(Dialect::C89),
        "c95" => Some(Dialect::C95),
        "c99" => Some(Dialect::C99),
        "c11" => Some(Dialect::C11),
        "c17" | "c18" => Some(Dialect::C17),
        "c23" => Some(Dialect::C23),
        "c++98" | "cpp98" => Some(Dialect::CPP98),
        "c++03" | "cpp03" => Some(Dialect::CPP03),
        "c++11" | "cpp11" => Some(Dialect::CPP11),
        "c++14" | "cpp14" => Some(Dialect::CPP14),
        "c++17" | "cpp17" => Some(Dialect::CPP17),
        "c++20" | "cpp20" => Some(Dialect::CPP20),
        "c++23" | "cpp23" => Some(Dialect::CPP23),
        "c++26" | "cpp26" => Some(Dialect::CPP26),
        _ => None,
    }
}

/// Parses a comma-separated `{s,i,l,ll} x {signed,unsigned}` mask, e.g.
/// `"unsigned,short"`, `"u-i,s-l"`, or `"i"`.
fn parse_explicit_int(value: &str) -> Option<ExplicitInt> {
    let mut signed = true;
    let mut mask = ExplicitInt::empty();
    let mut any_width = false;
    for token in value.split([',', '-', ' ']).map(str::trim).filter(|s| !s.is_empty()) {
        match token {
            "signed" | "s" => signed = true,
            "unsigned" | "u" => signed = false,
            "short" => {
                mask |= if signed { ExplicitInt::SIGNED_SHORT } else { ExplicitInt::UNSIGNED_SHORT };
                any_width = true;
            }
            "int" | "i" => {
                mask |= if signed { ExplicitInt::SIGNED_INT } else { ExplicitInt::UNSIGNED_INT };
                any_width = true;
            }
            "long" | "l" => {
                mask |= if signed { ExplicitInt::SIGNED_LONG } else { ExplicitInt::UNSIGNED_LONG };
                any_width = true;
            }
            "long-long" | "longlong" | "ll" => {
                mask |= if signed { ExplicitInt::SIGNED_LONG_LONG } else { ExplicitInt::UNSIGNED_LONG_LONG };
                any_width = true;
            }
            "all" => return Some(ExplicitInt::all()),
            "none" | "" => {}
            _ => return None,
        }
    }
    if !any_width && value.trim().is_empty() {
        return Some(ExplicitInt::empty());
    }
    Some(mask)
}

fn parse_explicit_ecsu(value: &str) -> Option<ExplicitEcsu> {
    let mut mask = ExplicitEcsu::empty();
    for token in value.split([',', ' ']).map(str::trim).filter(|s| !s.is_empty()) {
        match token {
            "e" | "enum" => mask |= ExplicitEcsu::ENUM,
            "c" | "class" => mask |= ExplicitEcsu::CLASS,
            "s" | "struct" => mask |= ExplicitEcsu::STRUCT,
            "u" | "union" => mask |= ExplicitEcsu::UNION,
            "all" => return Some(ExplicitEcsu::all()),
            "none" => {}
            _ => return None,
        }
    }
    Some(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_conventional_cdecl_session() {
        let opts = OptionState::default();
        assert_eq!(opts.dialect, Dialect::CPP17);
        assert!(opts.semicolon);
        assert!(!opts.east_const);
    }

    #[test]
    fn set_language_updates_dialect() {
        let mut opts = OptionState::default();
        opts.set("language", "c11").unwrap();
        assert_eq!(opts.dialect, Dialect::C11);
    }

    #[test]
    fn set_unknown_option_is_an_error() {
        let mut opts = OptionState::default();
        let err = opts.set("bogus", "1").unwrap_err();
        assert_eq!(err, SetError::UnknownOption("bogus".to_string()));
    }

    #[test]
    fn set_east_const_parses_common_boolean_spellings() {
        let mut opts = OptionState::default();
        opts.set("east-const", "on").unwrap();
        assert!(opts.east_const);
        opts.set("east-const", "off").unwrap();
        assert!(!opts.east_const);
    }

    #[test]
    fn set_explicit_int_parses_unsigned_short() {
        let mut opts = OptionState::default();
        opts.set("explicit-int", "unsigned,short").unwrap();
        assert!(opts.explicit_int.contains(ExplicitInt::UNSIGNED_SHORT));
        assert!(!opts.explicit_int.contains(ExplicitInt::SIGNED_SHORT));
    }

    #[test]
    fn set_graphs_trigraphs() {
        let mut opts = OptionState::default();
        opts.set("graphs", "tri").unwrap();
        assert_eq!(opts.graph, GraphMode::Trigraphs);
    }

    #[test]
    fn set_invalid_dialect_value_is_rejected() {
        let mut opts = OptionState::default();
        let err = opts.set("language", "cobol").unwrap_err();
        assert!(matches!(err, SetError::InvalidValue { option: "language", .. }));
    }
}
