//! # cdeclish-ast
//!
//! The AST node model (component C3): a tagged variant over declarator
//! kinds, arena-owned, with non-owning cross-links and a deterministic
//! visitor. See [`node`] for the variant itself, [`arena`] for the owning
//! arena, [`visit`] for traversal, [`shape`] for the dialect-independent
//! structural invariants checked at attach time, and [`owned`] for the
//! `Box`-based snapshot that outlives a command's arena.

pub mod arena;
pub mod node;
pub mod owned;
pub mod shape;
pub mod visit;

pub use arena::AstArena;
pub use node::{Alignas, ArraySize, Node, NodeId, NodeKind, OperatorId, TagKind};
pub use owned::{freeze, OwnedAlignas, OwnedKind, OwnedNode};
pub use shape::ShapeError;
pub use visit::{ast_visit, Direction, VisitControl};
