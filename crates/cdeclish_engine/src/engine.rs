//! The command dispatcher: one [`Engine`] per session, the same way the
//! teacher's REPL keeps one kernel [`cdeclish_lexicon::TypedefRegistry`]-
//! backed context alive across a run of commands ([`Engine::new`] mirrors
//! `Repl::new`'s "load the standard table, then hand back a value the
//! caller owns").
//!
//! [`Engine::execute`] is the single entry point a line editor or
//! `--file` runner drives: it recognizes the leading command word, routes
//! to the matching method below, and folds a close-but-misspelled word
//! into a [`EngineError::UnknownCommand`] suggestion. There is no separate
//! `Command` enum the way `interface::command` has one — the command
//! grammar here is "one keyword, then parser-specific text", simple
//! enough that splitting recognition from execution would only add a
//! layer with nothing to do in between.

use crate::config::EngineConfig;
use crate::decl_parser;
use crate::english_parser;
use crate::error::{EngineError, ParseError};
use crate::suggest;
use cdeclish_ast::owned::{OwnedKind, OwnedNode};
use cdeclish_ast::{freeze, AstArena};
use cdeclish_check::check;
use cdeclish_lexicon::{AddOutcome, TypedefRecord, TypedefRegistry};
use cdeclish_options::OptionState;
use cdeclish_render::{render_decl, render_english};
use cdeclish_sname::{ScopeKind, SName};
use cdeclish_types::StorageTid;

/// A session: persisted options plus the typedef table commands accumulate
/// into. Not global state (§9) — a caller (the CLI's REPL loop, or a
/// one-shot `--file` runner) owns one of these and threads it through every
/// command in turn.
pub struct Engine {
    config: EngineConfig,
    registry: TypedefRegistry,
}

impl Engine {
    /// A fresh session with the predefined typedef table loaded.
    pub fn new() -> Self {
        Engine { config: EngineConfig::default(), registry: TypedefRegistry::with_predefined() }
    }

    /// A fresh session with an empty typedef table (`--no-typedefs`, §6):
    /// only the aliases a session's own `typedef` commands add are visible.
    pub fn without_predefined() -> Self {
        Engine { config: EngineConfig::default(), registry: TypedefRegistry::empty() }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypedefRegistry {
        &self.registry
    }

    fn checked(&self, owned: &OwnedNode) -> Result<(), EngineError> {
        check(owned, &self.config.opts, &self.registry).map_err(EngineError::Check)
    }

    /// `explain DECLARATION`: parses a C/C++ declaration string and renders
    /// it back as a controlled-English sentence.
    pub fn explain(&self, declaration: &str) -> Result<String, EngineError> {
        let arena = AstArena::new();
        let (node, ident) = decl_parser::parse_declaration(&arena, declaration)?;
        let ident = ident.ok_or_else(|| {
            EngineError::Parse(ParseError::Syntactic {
                message: "expected a declared identifier".to_string(),
                pos: declaration.len(),
                suggestion: None,
            })
        })?;
        let owned = freeze(node);
        self.checked(&owned)?;
        Ok(render_english(&owned, &ident, &self.config.opts))
    }

    /// `declare IDENT as ENGLISH`: parses a controlled-English sentence and
    /// renders it back as a C/C++ declaration.
    pub fn declare(&self, sentence: &str) -> Result<String, EngineError> {
        let arena = AstArena::new();
        let (node, ident) = english_parser::parse_declare_sentence(&arena, sentence)?;
        let owned = freeze(node);
        self.checked(&owned)?;
        Ok(render_decl(&owned, &ident, &self.config.opts))
    }

    /// `cast NAME as ENGLISH`: parses a controlled-English type phrase and
    /// renders a C-style cast of `name` to it.
    pub fn cast(&self, name: &str, english: &str) -> Result<String, EngineError> {
        let arena = AstArena::new();
        let node = english_parser::parse_phrase(&arena, english)?;
        let owned = freeze(node);
        self.checked(&owned)?;
        let opts = OptionState { semicolon: false, ..self.config.opts };
        let type_str = render_decl(&owned, "", &opts);
        Ok(format!("({type_str}){name}"))
    }

    /// `typedef DECLARATION`: registers the declared identifier as an alias
    /// for the rest of the declaration's type.
    pub fn typedef(&mut self, declaration: &str) -> Result<String, EngineError> {
        let arena = AstArena::new();
        let (node, ident) = decl_parser::parse_declaration(&arena, declaration)?;
        let ident = ident.ok_or_else(|| {
            EngineError::Parse(ParseError::Syntactic {
                message: "expected the name being aliased".to_string(),
                pos: declaration.len(),
                suggestion: None,
            })
        })?;
        let mut owned = freeze(node);
        self.checked(&owned)?;
        strip_typedef_storage(&mut owned);

        let record = TypedefRecord {
            sname: SName::from_single(ident, ScopeKind::Scope),
            ast: owned,
            dialects_defined_in: self.config.opts.dialect.and_later(),
            is_predefined: false,
            is_hidden_from_show: false,
        };
        match self.registry.add(record) {
            AddOutcome::Ok => Ok(String::new()),
            AddOutcome::Conflict(existing) => Err(EngineError::TypedefConflict(existing)),
        }
    }

    /// `show [GLOB]`: lists every typedef visible in the active dialect
    /// whose name matches `glob` (default `"**"`), one declaration per line.
    pub fn show(&self, glob: Option<&str>) -> Result<String, EngineError> {
        let glob = glob.unwrap_or("**");
        let lines: Vec<String> = self
            .registry
            .iter_visible(glob, self.config.opts.dialect)
            .filter(|record| !record.is_hidden_from_show)
            .map(|record| render_decl(&record.ast, &record.sname.global_name(), &self.config.opts))
            .collect();
        Ok(lines.join("\n"))
    }

    /// `set KEY VALUE`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        self.config.set(key, value).map_err(EngineError::Option)
    }

    /// `help [TOPIC]`: one line per command, or detail on a specific one.
    pub fn help(&self, topic: Option<&str>) -> String {
        match topic {
            Some(topic) => help_topic(topic),
            None => suggest::COMMAND_WORDS.join(", "),
        }
    }

    /// Recognizes the leading command word of `line` and routes to the
    /// matching method, the way [`crate::Engine`]'s callers are expected to
    /// drive a whole session one line at a time.
    pub fn execute(&mut self, line: &str) -> Result<String, EngineError> {
        let trimmed = line.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim_start()),
            None => (trimmed, ""),
        };
        match word {
            "explain" => self.explain(rest),
            "declare" => self.declare(trimmed),
            "cast" => {
                let (name, english) = rest.split_once(" as ").ok_or_else(|| {
                    EngineError::Parse(ParseError::Syntactic {
                        message: "expected `cast NAME as ENGLISH`".to_string(),
                        pos: 0,
                        suggestion: None,
                    })
                })?;
                self.cast(name.trim(), english.trim())
            }
            "typedef" => self.typedef(rest),
            "show" => {
                let glob = if rest.is_empty() { None } else { Some(rest) };
                self.show(glob)
            }
            "set" => {
                let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                self.set(key.trim(), value.trim())?;
                Ok(String::new())
            }
            "help" => {
                let topic = if rest.is_empty() { None } else { Some(rest) };
                Ok(self.help(topic))
            }
            "" => Ok(String::new()),
            other => Err(EngineError::UnknownCommand {
                word: other.to_string(),
                suggestion: suggest::find_similar(other, suggest::COMMAND_WORDS.iter().copied()).map(str::to_string),
            }),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn help_topic(topic: &str) -> String {
    match topic {
        "explain" => "explain DECLARATION — read a C/C++ declaration, print it in English".to_string(),
        "declare" => "declare IDENT as ENGLISH — read an English phrase, print the C/C++ declaration".to_string(),
        "cast" => "cast NAME as ENGLISH — print a C-style cast of NAME to the named type".to_string(),
        "typedef" => "typedef DECLARATION — register the declared name as a type alias".to_string(),
        "show" => "show [GLOB] — list typedefs whose name matches GLOB (default everything)".to_string(),
        "set" => format!("set KEY VALUE — one of: {}", suggest::CONFIG_KEYS.join(", ")),
        "help" => "help [COMMAND] — list commands, or detail one".to_string(),
        other => format!("no help for `{other}`"),
    }
}

/// Clears the `typedef` storage-class bit a `typedef` declaration's own
/// base type picked up while parsing, since a [`TypedefRecord`] stores the
/// type the alias stands for, not the declaration that introduced it
/// (mirrors [`cdeclish_lexicon::predefined`]'s stored ASTs, none of which
/// carry it).
fn strip_typedef_storage(node: &mut OwnedNode) {
    match &mut node.kind {
        OwnedKind::Builtin(t) => t.storage -= StorageTid::TYPEDEF,
        OwnedKind::Typedef(_) | OwnedKind::Tag { .. } | OwnedKind::Name(_) => {
            node.decl_flags.storage -= StorageTid::TYPEDEF
        }
        OwnedKind::Pointer(inner) | OwnedKind::Reference(inner) | OwnedKind::RvalueReference(inner) => {
            if let Some(inner) = inner {
                strip_typedef_storage(inner);
            }
        }
        OwnedKind::PointerToMember { to, .. } => {
            if let Some(to) = to {
                strip_typedef_storage(to);
            }
        }
        OwnedKind::Array { of, .. } => {
            if let Some(of) = of {
                strip_typedef_storage(of);
            }
        }
        OwnedKind::Function { ret, .. } => {
            if let Some(ret) = ret {
                strip_typedef_storage(ret);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_renders_english() {
        let engine = Engine::new();
        assert_eq!(engine.explain("int *x[10]").unwrap(), "declare x as array 10 of pointer to int");
    }

    #[test]
    fn declare_renders_declaration() {
        let engine = Engine::new();
        assert_eq!(engine.declare("declare x as pointer to int").unwrap(), "int *x;");
    }

    #[test]
    fn cast_renders_parenthesized_type() {
        let engine = Engine::new();
        assert_eq!(engine.cast("p", "pointer to int").unwrap(), "(int *)p");
    }

    #[test]
    fn typedef_then_explain_resolves_the_alias() {
        let mut engine = Engine::new();
        engine.typedef("typedef int Meters").unwrap();
        assert_eq!(engine.explain("Meters m").unwrap(), "declare m as int");
    }

    #[test]
    fn typedef_conflict_is_reported() {
        let mut engine = Engine::new();
        engine.typedef("typedef int Meters").unwrap();
        let err = engine.typedef("typedef float Meters").unwrap_err();
        assert!(matches!(err, EngineError::TypedefConflict(_)));
    }

    #[test]
    fn show_lists_matching_typedefs() {
        let mut engine = Engine::new();
        engine.typedef("typedef int Meters").unwrap();
        let out = engine.show(Some("Meters")).unwrap();
        assert_eq!(out, "int Meters;");
    }

    #[test]
    fn unknown_command_suggests_a_fix() {
        let mut engine = Engine::new();
        let err = engine.execute("delcare x as int").unwrap_err();
        match err {
            EngineError::UnknownCommand { word, suggestion } => {
                assert_eq!(word, "delcare");
                assert_eq!(suggestion.as_deref(), Some("declare"));
            }
            _ => panic!("expected UnknownCommand"),
        }
    }

    #[test]
    fn set_updates_option_state() {
        let mut engine = Engine::new();
        engine.execute("set east-const true").unwrap();
        assert!(engine.config().opts.east_const);
    }

    #[test]
    fn without_predefined_starts_with_an_empty_table() {
        let engine = Engine::without_predefined();
        assert_eq!(engine.show(None).unwrap(), "");
    }
}
