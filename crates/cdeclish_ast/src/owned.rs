//! An owned, arena-free mirror of [`crate::node::NodeKind`].
//!
//! The builder driven by the external parser works in the arena (`ast_new`,
//! `ast_set_child`, §4.3) because a declarator chain grows its target
//! in-place during construction. Once a command's AST reaches the
//! `DeclBuild::Complete` state (§4.9), [`freeze`] takes a snapshot into this
//! `Box`-based tree. Everything downstream — the checker, both renderers,
//! and the typedef registry's long-lived storage — works on `OwnedNode`, so
//! none of it has to thread an arena lifetime through its API, and a
//! registry entry can simply own its clone with no lifetime tied to the
//! command that defined it.

use crate::node::{Alignas as ArenaAlignas, ArraySize, Node, NodeKind, OperatorId, TagKind};
use cdeclish_base::Span;
use cdeclish_sname::SName;
use cdeclish_types::Type;

#[derive(Debug, Clone)]
pub enum OwnedAlignas {
    Bytes(u32),
    AsType(Box<OwnedNode>),
}

#[derive(Debug, Clone)]
pub struct OwnedNode {
    pub kind: OwnedKind,
    pub span: Span,
    pub alignas: Option<Box<OwnedAlignas>>,
    pub bit_field_width: Option<u32>,
    pub depth: u32,
    pub decl_flags: Type,
}

#[derive(Debug, Clone)]
pub enum OwnedKind {
    Builtin(Type),
    Typedef(SName),
    Tag {
        kind: TagKind,
        sname: SName,
        base: Option<Box<OwnedNode>>,
    },
    Pointer(Option<Box<OwnedNode>>),
    Reference(Option<Box<OwnedNode>>),
    RvalueReference(Option<Box<OwnedNode>>),
    PointerToMember {
        of_class: SName,
        to: Option<Box<OwnedNode>>,
    },
    Array {
        of: Option<Box<OwnedNode>>,
        size: ArraySize,
    },
    Function {
        ret: Option<Box<OwnedNode>>,
        params: Vec<OwnedNode>,
        qualifiers: Type,
    },
    Operator {
        op: OperatorId,
        ret: Option<Box<OwnedNode>>,
        params: Vec<OwnedNode>,
        qualifiers: Type,
    },
    Constructor {
        sname: SName,
        params: Vec<OwnedNode>,
    },
    Destructor {
        sname: SName,
    },
    UserDefinedConversion {
        to: Option<Box<OwnedNode>>,
        qualifiers: Type,
    },
    UserDefinedLiteral {
        ret: Option<Box<OwnedNode>>,
        params: Vec<OwnedNode>,
    },
    ApplBlock {
        ret: Option<Box<OwnedNode>>,
        params: Vec<OwnedNode>,
    },
    Name(SName),
}

/// Recursively copies an arena node (and everything reachable from it, via
/// `target`/`params`) into an [`OwnedNode`].
pub fn freeze<'a>(node: &'a Node<'a>) -> OwnedNode {
    let target = node.target().map(|t| Box::new(freeze(t)));
    let params: Vec<OwnedNode> = node.params().map(|p| p.iter().map(|n| freeze(n)).collect()).unwrap_or_default();

    let kind = match &node.kind {
        NodeKind::Builtin(t) => OwnedKind::Builtin(*t),
        NodeKind::Typedef(s) => OwnedKind::Typedef(s.clone()),
        NodeKind::Tag { kind, sname, .. } => OwnedKind::Tag {
            kind: *kind,
            sname: sname.clone(),
            base: target,
        },
        NodeKind::Pointer(_) => OwnedKind::Pointer(target),
        NodeKind::Reference(_) => OwnedKind::Reference(target),
        NodeKind::RvalueReference(_) => OwnedKind::RvalueReference(target),
        NodeKind::PointerToMember { of_class, .. } => OwnedKind::PointerToMember {
            of_class: of_class.clone(),
            to: target,
        },
        NodeKind::Array { size, .. } => OwnedKind::Array { of: target, size: *size },
        NodeKind::Function { qualifiers, .. } => OwnedKind::Function {
            ret: target,
            params,
            qualifiers: *qualifiers,
        },
        NodeKind::Operator { op, qualifiers, .. } => OwnedKind::Operator {
            op: *op,
            ret: target,
            params,
            qualifiers: *qualifiers,
        },
        NodeKind::Constructor { sname, .. } => OwnedKind::Constructor { sname: sname.clone(), params },
        NodeKind::Destructor { sname } => OwnedKind::Destructor { sname: sname.clone() },
        NodeKind::UserDefinedConversion { qualifiers, .. } => OwnedKind::UserDefinedConversion {
            to: target,
            qualifiers: *qualifiers,
        },
        NodeKind::UserDefinedLiteral { .. } => OwnedKind::UserDefinedLiteral { ret: target, params },
        NodeKind::ApplBlock { .. } => OwnedKind::ApplBlock { ret: target, params },
        NodeKind::Name(s) => OwnedKind::Name(s.clone()),
    };

    OwnedNode {
        kind,
        span: node.span,
        alignas: node.alignas.map(|a| {
            Box::new(match a {
                ArenaAlignas::Bytes(n) => OwnedAlignas::Bytes(n),
                ArenaAlignas::AsType(n) => OwnedAlignas::AsType(Box::new(freeze(n))),
            })
        }),
        bit_field_width: node.bit_field_width,
        depth: node.depth,
        decl_flags: node.decl_flags,
    }
}

impl OwnedNode {
    pub fn target(&self) -> Option<&OwnedNode> {
        match &self.kind {
            OwnedKind::Tag { base, .. } => base.as_deref(),
            OwnedKind::Pointer(c) | OwnedKind::Reference(c) | OwnedKind::RvalueReference(c) => c.as_deref(),
            OwnedKind::PointerToMember { to, .. } => to.as_deref(),
            OwnedKind::Array { of, .. } => of.as_deref(),
            OwnedKind::Function { ret, .. } => ret.as_deref(),
            OwnedKind::Operator { ret, .. } => ret.as_deref(),
            OwnedKind::UserDefinedConversion { to, .. } => to.as_deref(),
            OwnedKind::UserDefinedLiteral { ret, .. } => ret.as_deref(),
            OwnedKind::ApplBlock { ret, .. } => ret.as_deref(),
            OwnedKind::Builtin(_)
            | OwnedKind::Typedef(_)
            | OwnedKind::Constructor { .. }
            | OwnedKind::Destructor { .. }
            | OwnedKind::Name(_) => None,
        }
    }

    pub fn params(&self) -> Option<&[OwnedNode]> {
        match &self.kind {
            OwnedKind::Function { params, .. }
            | OwnedKind::Operator { params, .. }
            | OwnedKind::Constructor { params, .. }
            | OwnedKind::UserDefinedLiteral { params, .. }
            | OwnedKind::ApplBlock { params, .. } => Some(params),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            OwnedKind::Builtin(_) => "builtin",
            OwnedKind::Typedef(_) => "typedef",
            OwnedKind::Tag { kind, .. } => match kind {
                TagKind::Enum => "enum",
                TagKind::Class => "class",
                TagKind::Struct => "struct",
                TagKind::Union => "union",
            },
            OwnedKind::Pointer(_) => "pointer",
            OwnedKind::Reference(_) => "reference",
            OwnedKind::RvalueReference(_) => "rvalue reference",
            OwnedKind::PointerToMember { .. } => "pointer-to-member",
            OwnedKind::Array { .. } => "array",
            OwnedKind::Function { .. } => "function",
            OwnedKind::Operator { .. } => "operator",
            OwnedKind::Constructor { .. } => "constructor",
            OwnedKind::Destructor { .. } => "destructor",
            OwnedKind::UserDefinedConversion { .. } => "conversion operator",
            OwnedKind::UserDefinedLiteral { .. } => "user-defined literal",
            OwnedKind::ApplBlock { .. } => "block",
            OwnedKind::Name(_) => "name",
        }
    }
}

/// Structural equality used by property P1 (round-trip) and by the typedef
/// registry's redefinition check: two owned trees are equal when every
/// field matches, ignoring spans (source position is not part of meaning).
impl PartialEq for OwnedNode {
    fn eq(&self, other: &Self) -> bool {
        nodes_structurally_equal(self, other)
    }
}
impl Eq for OwnedNode {}

fn nodes_structurally_equal(a: &OwnedNode, b: &OwnedNode) -> bool {
    if a.decl_flags != b.decl_flags || a.bit_field_width != b.bit_field_width {
        return false;
    }
    use OwnedKind::*;
    match (&a.kind, &b.kind) {
        (Builtin(x), Builtin(y)) => x == y,
        (Typedef(x), Typedef(y)) => x == y,
        (Tag { kind: k1, sname: s1, base: b1 }, Tag { kind: k2, sname: s2, base: b2 }) => {
            k1 == k2 && s1 == s2 && options_eq(b1, b2)
        }
        (Pointer(x), Pointer(y)) => options_eq(x, y),
        (Reference(x), Reference(y)) => options_eq(x, y),
        (RvalueReference(x), RvalueReference(y)) => options_eq(x, y),
        (PointerToMember { of_class: c1, to: t1 }, PointerToMember { of_class: c2, to: t2 }) => {
            c1 == c2 && options_eq(t1, t2)
        }
        (Array { of: o1, size: s1 }, Array { of: o2, size: s2 }) => s1 == s2 && options_eq(o1, o2),
        (
            Function { ret: r1, params: p1, qualifiers: q1 },
            Function { ret: r2, params: p2, qualifiers: q2 },
        ) => q1 == q2 && options_eq(r1, r2) && vecs_eq(p1, p2),
        (
            Operator { op: op1, ret: r1, params: p1, qualifiers: q1 },
            Operator { op: op2, ret: r2, params: p2, qualifiers: q2 },
        ) => op1 == op2 && q1 == q2 && options_eq(r1, r2) && vecs_eq(p1, p2),
        (Constructor { sname: s1, params: p1 }, Constructor { sname: s2, params: p2 }) => {
            s1 == s2 && vecs_eq(p1, p2)
        }
        (Destructor { sname: s1 }, Destructor { sname: s2 }) => s1 == s2,
        (
            UserDefinedConversion { to: t1, qualifiers: q1 },
            UserDefinedConversion { to: t2, qualifiers: q2 },
        ) => q1 == q2 && options_eq(t1, t2),
        (UserDefinedLiteral { ret: r1, params: p1 }, UserDefinedLiteral { ret: r2, params: p2 }) => {
            options_eq(r1, r2) && vecs_eq(p1, p2)
        }
        (ApplBlock { ret: r1, params: p1 }, ApplBlock { ret: r2, params: p2 }) => {
            options_eq(r1, r2) && vecs_eq(p1, p2)
        }
        (Name(x), Name(y)) => x == y,
        _ => false,
    }
}

fn options_eq(a: &Option<Box<OwnedNode>>, b: &Option<Box<OwnedNode>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => nodes_structurally_equal(x, y),
        _ => false,
    }
}

fn vecs_eq(a: &[OwnedNode], b: &[OwnedNode]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| nodes_structurally_equal(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::AstArena;
    use cdeclish_types::BaseTid;

    #[test]
    fn freeze_preserves_shape() {
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let ptr = arena.ast_new(NodeKind::Pointer(Default::default()), Span::new(0, 4), 0);
        arena.ast_set_child(ptr, inner).unwrap();

        let owned = freeze(ptr);
        assert_eq!(owned.kind_name(), "pointer");
        assert_eq!(owned.target().unwrap().kind_name(), "builtin");
    }

    #[test]
    fn structural_equality_ignores_span() {
        let arena = AstArena::new();
        let a = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 0);
        let b = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(100, 103), 0);
        assert_eq!(freeze(a), freeze(b));
    }

    #[test]
    fn structural_equality_detects_difference() {
        let arena = AstArena::new();
        let a = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 0);
        let b = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::FLOAT)), Span::new(0, 3), 0);
        assert_ne!(freeze(a), freeze(b));
    }
}
