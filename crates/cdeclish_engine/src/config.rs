//! Persisted configuration (§6): the 14 `set`/config-file keys. Nine of
//! them are [`OptionState`]'s own fields; the remaining five
//! (`debug`, `echo-commands`, `english-types`, `prompt`, `using`) have no
//! home in `cdeclish-options` since that crate is scoped to what C4/C5/C6
//! actually consult (§9, "Global state": a reimplementation should thread
//! an explicit value here rather than reach for a global, and this struct
//! is that value).

use cdeclish_options::{OptionState, SetError};

/// Everything a session remembers across commands: the render/check
/// options plus the five collaborator-only knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub opts: OptionState,
    /// `debug`: echoes the AST shape alongside normal output.
    pub debug: bool,
    /// `echo-commands`: reprints each command before its result, the way a
    /// non-interactive `--file` run would want its transcript to read.
    pub echo_commands: bool,
    /// `english-types`: prefer the English vocabulary for type names in
    /// diagnostics where the declaration vocabulary would otherwise be used.
    pub english_types: bool,
    pub prompt: String,
    /// `using namespace X;` directives accumulated for the session. Accepted
    /// and stored per `set`/config-file syntax but not yet consulted
    /// anywhere a name is resolved; a reimplementation that wants
    /// using-qualified lookup to actually shorten names has to add that
    /// consultation, this field only remembers what was declared.
    pub using: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            opts: OptionState::default(),
            debug: false,
            echo_commands: false,
            english_types: false,
            prompt: "cdeclish> ".to_string(),
            using: Vec::new(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

impl EngineConfig {
    /// Applies one `set key value` pair (or one config-file line). The nine
    /// keys `OptionState::set` knows about are delegated there; the five
    /// collaborator-only keys are handled here.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SetError> {
        match key {
            "debug" => self.debug = parse_bool(value).ok_or_else(|| invalid("debug", value))?,
            "echo-commands" => {
                self.echo_commands = parse_bool(value).ok_or_else(|| invalid("echo-commands", value))?
            }
            "english-types" => {
                self.english_types = parse_bool(value).ok_or_else(|| invalid("english-types", value))?
            }
            "prompt" => self.prompt = value.to_string(),
            "using" => self.using.push(value.to_string()),
            other => return self.opts.set(other, value),
        }
        Ok(())
    }
}

fn invalid(option: &'static str, value: &str) -> SetError {
    SetError::InvalidValue { option, value: value.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_option_state_keys() {
        let mut cfg = EngineConfig::default();
        cfg.set("east-const", "true").unwrap();
        assert!(cfg.opts.east_const);
    }

    #[test]
    fn handles_collaborator_only_keys() {
        let mut cfg = EngineConfig::default();
        cfg.set("prompt", "cdecl> ").unwrap();
        cfg.set("debug", "on").unwrap();
        cfg.set("using", "std").unwrap();
        assert_eq!(cfg.prompt, "cdecl> ");
        assert!(cfg.debug);
        assert_eq!(cfg.using, vec!["std".to_string()]);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut cfg = EngineConfig::default();
        assert!(cfg.set("bogus", "1").is_err());
    }
}
