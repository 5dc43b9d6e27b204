//! # cdeclish-render
//!
//! The bidirectional renderer (components C5 and C6): turns an
//! already-checked [`cdeclish_ast::owned::OwnedNode`] chain into either the
//! controlled-English form ([`english::render_english`]) or a C/C++
//! declaration ([`decl::render_decl`]). Both renderers are pure functions
//! of `(AST, OptionState)` — neither consults the dialect, since legality
//! is C4's job.

pub mod decl;
pub mod english;

pub use decl::render_decl;
pub use english::render_english;
