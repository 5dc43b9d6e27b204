#![cfg_attr(docsrs, feature(doc_cfg))]

//! # cdeclish-base
//!
//! Pure structural atoms shared across the cdeclish workspace: arena
//! allocation, source spans, and a spanned error type. This crate has no
//! knowledge of C/C++ syntax or English grammar — it only provides the
//! generic infrastructure that `cdeclish-ast`, `cdeclish-check`, and the
//! two renderers build on.

pub mod arena;
pub mod error;
pub mod span;

pub use arena::Arena;
pub use error::{Result, SpannedError};
pub use span::Span;
