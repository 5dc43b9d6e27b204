//! Arena that owns the nodes of one translation unit (one command).
//!
//! Per §5 of the design, each command opens a fresh `AstArena`; on
//! completion (success or error) it is dropped or [`AstArena::reset`]. The
//! arena is the sole owner of its nodes — everything else (parent/child
//! links) is a non-owning reference qualified by the arena's lifetime.

use crate::node::{Node, NodeId, NodeKind};
use cdeclish_base::Span;
use cdeclish_types::Type;
use std::cell::Cell;

pub struct AstArena {
    bump: bumpalo::Bump,
    next_id: Cell<NodeId>,
}

impl AstArena {
    pub fn new() -> Self {
        AstArena {
            bump: bumpalo::Bump::new(),
            next_id: Cell::new(0),
        }
    }

    /// Allocates a new node (`ast_new` from §4.3) with the next id in this
    /// arena and no children attached.
    pub fn ast_new<'a>(&'a self, kind: NodeKind<'a>, span: Span, depth: u32) -> &'a Node<'a> {
        self.ast_new_with_flags(kind, span, depth, Type::NONE)
    }

    /// Like [`Self::ast_new`], but stamps the node's declaration flags
    /// (storage class, cv-qualifiers) at construction time. A builder
    /// driven by an external parser uses this for the specifier sequence
    /// the declarator was parsed under — `decl_flags` is a plain field, not
    /// a `Cell`, so it can only be set here, not after the fact.
    pub fn ast_new_with_flags<'a>(
        &'a self,
        kind: NodeKind<'a>,
        span: Span,
        depth: u32,
        decl_flags: Type,
    ) -> &'a Node<'a> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.bump.alloc(Node::new(id, kind, span, depth, decl_flags))
    }

    /// Attaches `child` to `parent`'s target slot (`ast_set_child`).
    pub fn ast_set_child<'a>(
        &'a self,
        parent: &'a Node<'a>,
        child: &'a Node<'a>,
    ) -> Result<bool, crate::shape::ShapeError> {
        parent.attach_child(child)
    }

    /// Allocates a parameter list in this arena. `Function`/`Operator`/
    /// `Constructor`/`UserDefinedLiteral`/`ApplBlock` take `params` as a
    /// fixed slice at construction time (unlike the single-child kinds,
    /// there is no `ast_set_child`-style append for a parameter list), so a
    /// builder collects the parameter nodes first and hands them here.
    pub fn ast_alloc_params<'a>(&'a self, params: Vec<&'a Node<'a>>) -> &'a [&'a Node<'a>] {
        self.bump.alloc_slice_fill_iter(params)
    }

    /// Reclaims memory, invalidating all outstanding references. The next
    /// command reuses the freed capacity.
    pub fn reset(&mut self) {
        self.bump.reset();
        self.next_id.set(0);
    }

    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ArraySize, NodeKind};
    use cdeclish_types::{BaseTid, Type};

    #[test]
    fn ids_are_distinct_and_increasing() {
        let arena = AstArena::new();
        let a = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 0);
        let b = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(4, 7), 0);
        assert!(b.id > a.id);
    }

    #[test]
    fn set_child_links_both_ways() {
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let ptr = arena.ast_new(NodeKind::Pointer(Default::default()), Span::new(0, 4), 0);
        assert_eq!(arena.ast_set_child(ptr, inner), Ok(true));
        assert_eq!(ptr.target().unwrap().id, inner.id);
        assert_eq!(inner.parent().unwrap().id, ptr.id);
    }

    #[test]
    fn set_child_on_leaf_kind_is_noop() {
        let arena = AstArena::new();
        let leaf = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 0);
        let other = arena.ast_new(
            NodeKind::Array { of: Default::default(), size: ArraySize::None },
            Span::new(0, 1),
            0,
        );
        assert_eq!(arena.ast_set_child(leaf, other), Ok(false));
    }

    #[test]
    fn alloc_params_preserves_order() {
        let arena = AstArena::new();
        let a = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::CHAR)), Span::new(0, 4), 1);
        let b = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(6, 9), 1);
        let params = arena.ast_alloc_params(vec![a, b]);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].id, a.id);
        assert_eq!(params[1].id, b.id);
    }

    #[test]
    fn ast_new_with_flags_stamps_decl_flags() {
        use cdeclish_types::StorageTid;

        let arena = AstArena::new();
        let flags = Type { storage: StorageTid::STATIC, ..Type::NONE };
        let n = arena.ast_new_with_flags(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 0, flags);
        assert_eq!(n.decl_flags, flags);
    }

    #[test]
    fn reset_resets_id_counter() {
        let mut arena = AstArena::new();
        arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 1), 0);
        arena.reset();
        let n = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 1), 0);
        assert_eq!(n.id, 0);
    }
}
