//! # cdeclish-check
//!
//! The AST semantic checker (component C4): dialect-aware legality of a
//! declarator chain, storage-class unicity, member-only qualifiers, scope
//! nesting, `alignas`, and operator arity. See [`checker`] for the entry
//! point and [`diagnostic`] for the typed messages it produces.

pub mod checker;
pub mod diagnostic;
pub mod operator;

pub use checker::check;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
