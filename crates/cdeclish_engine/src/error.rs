//! Error taxonomy (§7 of the design) and the exit-code mapping the CLI
//! front-end consults. [`ParseError`] covers the two parsers in this crate
//! (lexical and syntactic failures); [`EngineError`] is the top-level error
//! every [`crate::Engine`] method returns, folding in the downstream
//! type-combination, dialect, declarator-shape, name-scope, and
//! registry-conflict categories from the same table.

use cdeclish_check::Diagnostic;
use cdeclish_lexicon::TypedefRecord;
use cdeclish_options::SetError;
use cdeclish_types::ConflictKind;
use std::fmt;

/// A failure recognizing the input text itself, before any AST reaches the
/// checker.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character sequence isn't a valid token at all (stray punctuation,
    /// an unterminated construct).
    Lexical { message: String, pos: usize },
    /// The tokens are individually valid but don't form a declarator or
    /// English phrase at this position. Carries a did-you-mean suggestion
    /// when [`crate::suggest`] found a close match among known keywords.
    Syntactic { message: String, pos: usize, suggestion: Option<String> },
    /// The declaration-specifier sequence combined two atoms that can
    /// never coexist, independent of dialect (`signed unsigned`, `short
    /// long`).
    TypeCombination(ConflictKind),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lexical { message, pos } => write!(f, "{message} at position {pos}"),
            ParseError::Syntactic { message, pos, suggestion: Some(s) } => {
                write!(f, "{message} at position {pos} (did you mean `{s}`?)")
            }
            ParseError::Syntactic { message, pos, suggestion: None } => {
                write!(f, "{message} at position {pos}")
            }
            ParseError::TypeCombination(conflict) => write!(f, "{conflict}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// The error every [`crate::Engine`] command surface returns.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Failed while recognizing the declaration string or English phrase.
    Parse(ParseError),
    /// Parsed cleanly but failed C4's dialect/legality/shape/scope checks.
    Check(Vec<Diagnostic>),
    /// `typedef` named an alias that already exists with a different type.
    TypedefConflict(TypedefRecord),
    /// `set` was given an unrecognized key or a value it couldn't parse.
    Option(SetError),
    /// The command word itself wasn't one of `explain`/`declare`/`cast`/
    /// `typedef`/`show`/`set`/`help`/`exit`/`quit`/`q`.
    UnknownCommand { word: String, suggestion: Option<String> },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Parse(e) => write!(f, "{e}"),
            EngineError::Check(diags) => {
                let joined = diags.iter().map(|d| d.to_string()).collect::<Vec<_>>().join("; ");
                write!(f, "{joined}")
            }
            EngineError::TypedefConflict(existing) => {
                write!(f, "`{}` is already defined with a different type", existing.sname.global_name())
            }
            EngineError::Option(e) => write!(f, "{e}"),
            EngineError::UnknownCommand { word, suggestion: Some(s) } => {
                write!(f, "unknown command `{word}` (did you mean `{s}`?)")
            }
            EngineError::UnknownCommand { word, suggestion: None } => {
                write!(f, "unknown command `{word}`")
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<ParseError> for EngineError {
    fn from(e: ParseError) -> Self {
        EngineError::Parse(e)
    }
}

impl EngineError {
    /// The `sysexits.h`-style process exit code this error maps to (§6).
    /// Every category this crate produces is a malformed-input condition in
    /// the sysexits sense; `73` (can't create output) and `70` (internal
    /// error) are reserved for the CLI front-end's own file-I/O and
    /// panic-catching layers, not produced here.
    pub fn exit_code(&self) -> i32 {
        64
    }
}
