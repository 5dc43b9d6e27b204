//! Structural (dialect-independent) shape invariants from §4.3.
//!
//! These are checked when a child is attached, not by the semantic checker
//! (C4): they hold in every dialect and describe the AST's own grammar, as
//! opposed to C4's dialect- and scope-sensitive rules. "Function returning
//! array" is the flip side of the array rule below and *is* a C4 concern
//! (the array is the parent there, not the child), so it is rejected by the
//! checker, not here.

use crate::node::{Node, NodeKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// `Array.of` was a function, reference, or rvalue reference.
    ArrayOfInvalidKind,
    /// `Reference.to` (or `RvalueReference.to`) was itself a reference.
    ReferenceToReference,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::ArrayOfInvalidKind => {
                write!(f, "array of function, reference, or rvalue reference is not allowed")
            }
            ShapeError::ReferenceToReference => {
                write!(f, "reference to reference is not allowed")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

fn is_reference(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Reference(_) | NodeKind::RvalueReference(_))
}

fn is_function_like(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Function { .. } | NodeKind::Operator { .. })
}

/// Validates that `child` may legally be attached as `parent`'s target.
pub fn check_attach<'a>(parent: &Node<'a>, child: &Node<'a>) -> Result<(), ShapeError> {
    match &parent.kind {
        NodeKind::Array { .. } => {
            if is_function_like(&child.kind) || is_reference(&child.kind) {
                return Err(ShapeError::ArrayOfInvalidKind);
            }
        }
        NodeKind::Reference(_) | NodeKind::RvalueReference(_) => {
            if is_reference(&child.kind) {
                return Err(ShapeError::ReferenceToReference);
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::AstArena;
    use cdeclish_base::Span;
    use cdeclish_types::{BaseTid, Type};

    #[test]
    fn array_of_function_rejected() {
        let arena = AstArena::new();
        let int_node = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let func = arena.ast_new(
            NodeKind::Function { ret: Default::default(), params: &[], qualifiers: Type::NONE },
            Span::new(0, 1),
            1,
        );
        arena.ast_set_child(func, int_node).unwrap();
        let array = arena.ast_new(
            crate::node::NodeKind::Array { of: Default::default(), size: crate::node::ArraySize::None },
            Span::new(0, 1),
            0,
        );
        assert_eq!(check_attach(array, func), Err(ShapeError::ArrayOfInvalidKind));
    }

    #[test]
    fn array_of_int_ok() {
        let arena = AstArena::new();
        let int_node = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let array = arena.ast_new(
            crate::node::NodeKind::Array { of: Default::default(), size: crate::node::ArraySize::None },
            Span::new(0, 1),
            0,
        );
        assert!(check_attach(array, int_node).is_ok());
    }

    #[test]
    fn reference_to_reference_rejected() {
        let arena = AstArena::new();
        let r1 = arena.ast_new(NodeKind::Reference(Default::default()), Span::new(0, 1), 1);
        let r2 = arena.ast_new(NodeKind::Reference(Default::default()), Span::new(0, 1), 0);
        assert_eq!(check_attach(r2, r1), Err(ShapeError::ReferenceToReference));
    }
}
