//! # cdeclish-engine
//!
//! The command dispatcher (component C9, not named in the original
//! component table since it is pure glue): hand-rolled parsers for C
//! declaration strings and the controlled-English DSL, bound together with
//! C1-C8 into the `explain`/`declare`/`cast`/`typedef`/`show`/`set`/`help`
//! surface a front-end (grammar, line editor, CLI) drives.
//!
//! Nothing here is global state (§9): an [`Engine`] is a plain value a
//! caller owns and threads through one session, the same way
//! `cdeclish_options::OptionState` is threaded through a single render call.

pub mod config;
pub mod decl_parser;
pub mod engine;
pub mod english_parser;
pub mod error;
pub mod lexer;
pub mod suggest;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, ParseError};
