//! The AST node model (component C3): a tagged variant over declarator
//! kinds, arena-allocated, with non-owning cross-links.
//!
//! A declarator chain like `int (*x)[10]` is a nest of *parent* nodes whose
//! innermost is a [`NodeKind::Builtin`]; the chain's *target* — the single
//! child slot each wrapper kind exposes via a [`Cell`] — is where a builder
//! driven by an external parser attaches the next operator while walking
//! outside-in through the declarator. This is the declarator-inversion
//! idiom described in the design notes: the builder both prepends an
//! operator to the chain and shifts its own cursor to the new node's
//! target slot.

use cdeclish_sname::SName;
use cdeclish_types::Type;
use std::cell::Cell;

/// Stable identity for a node within one arena. Opaque; used only for
/// equality and for diagnostics, never dereferenced directly.
pub type NodeId = u32;

/// The `N` in `Array(of, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArraySize {
    /// A known, non-negative bound.
    Known(u64),
    /// `int a[]` — unspecified bound.
    None,
    /// A C99 variable-length array: `int a[n]` with `n` a runtime value.
    Variable,
    /// `int a[*]` — the C99 "unspecified VLA" in a function prototype.
    Star,
}

/// Which of the four C++ tag kinds a [`NodeKind::Tag`] node spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Enum,
    Class,
    Struct,
    Union,
}

/// Overloadable C++ operators, grouped the way the semantic checker's
/// per-operator arity table (§4.4.8) groups them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Not,
    Assign,
    Less,
    Greater,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    CaretAssign,
    AmpAssign,
    PipeAssign,
    ShiftLeft,
    ShiftRight,
    ShiftLeftAssign,
    ShiftRightAssign,
    Eq,
    NotEq,
    LessEq,
    GreaterEq,
    Spaceship,
    AndAnd,
    OrOr,
    PlusPlus,
    MinusMinus,
    Comma,
    ArrowStar,
    Arrow,
    Call,
    Subscript,
    New,
    NewArray,
    Delete,
    DeleteArray,
}

impl OperatorId {
    /// Whether this operator can only ever be unary (never binary), used by
    /// the checker to reject `operator~(int, int)`.
    pub fn unary_only(self) -> bool {
        matches!(self, OperatorId::Tilde | OperatorId::Not)
    }

    /// Whether this operator can only ever be binary.
    pub fn binary_only(self) -> bool {
        matches!(
            self,
            OperatorId::Slash
                | OperatorId::Percent
                | OperatorId::AndAnd
                | OperatorId::OrOr
                | OperatorId::ShiftLeft
                | OperatorId::ShiftRight
                | OperatorId::Eq
                | OperatorId::NotEq
                | OperatorId::LessEq
                | OperatorId::GreaterEq
                | OperatorId::Spaceship
                | OperatorId::Arrow
                | OperatorId::ArrowStar
        )
    }

    /// Whether this operator may be either unary or binary depending on
    /// arity (`+`, `-`, `*`, `&` all have unary and binary forms in C++).
    pub fn ambiguous_arity(self) -> bool {
        matches!(
            self,
            OperatorId::Plus | OperatorId::Minus | OperatorId::Star | OperatorId::Amp
        )
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            OperatorId::Assign
                | OperatorId::PlusAssign
                | OperatorId::MinusAssign
                | OperatorId::StarAssign
                | OperatorId::SlashAssign
                | OperatorId::PercentAssign
                | OperatorId::CaretAssign
                | OperatorId::AmpAssign
                | OperatorId::PipeAssign
                | OperatorId::ShiftLeftAssign
                | OperatorId::ShiftRightAssign
        )
    }
}

/// Either an explicit byte count or a type whose alignment is borrowed.
#[derive(Debug, Clone, Copy)]
pub enum Alignas<'a> {
    Bytes(u32),
    AsType(&'a Node<'a>),
}

/// A single AST node.
///
/// Every field besides `kind` is metadata shared by all kinds: the node's
/// identity, its source span, an optional `alignas` clause, an optional
/// bit-field width (struct members only), a nesting `depth`, and the
/// declaration flags (storage/attrs) it was parsed under.
pub struct Node<'a> {
    pub id: NodeId,
    pub kind: NodeKind<'a>,
    pub span: cdeclish_base::Span,
    pub alignas: Option<Alignas<'a>>,
    pub bit_field_width: Option<u32>,
    pub depth: u32,
    pub decl_flags: Type,
    parent: Cell<Option<&'a Node<'a>>>,
}

/// The tagged variant itself. Single-child wrapper kinds hold a [`Cell`] so
/// a builder can attach the child after the node already exists (the
/// declarator-inversion idiom); kinds with a fixed parameter list take it
/// at construction time since parameter lists are never re-targeted.
pub enum NodeKind<'a> {
    Builtin(Type),
    Typedef(SName),
    Tag {
        kind: TagKind,
        sname: SName,
        base: Cell<Option<&'a Node<'a>>>,
    },
    Pointer(Cell<Option<&'a Node<'a>>>),
    Reference(Cell<Option<&'a Node<'a>>>),
    RvalueReference(Cell<Option<&'a Node<'a>>>),
    PointerToMember {
        of_class: SName,
        to: Cell<Option<&'a Node<'a>>>,
    },
    Array {
        of: Cell<Option<&'a Node<'a>>>,
        size: ArraySize,
    },
    Function {
        ret: Cell<Option<&'a Node<'a>>>,
        params: &'a [&'a Node<'a>],
        qualifiers: Type,
    },
    Operator {
        op: OperatorId,
        ret: Cell<Option<&'a Node<'a>>>,
        params: &'a [&'a Node<'a>],
        qualifiers: Type,
    },
    Constructor {
        sname: SName,
        params: &'a [&'a Node<'a>],
    },
    Destructor {
        sname: SName,
    },
    UserDefinedConversion {
        to: Cell<Option<&'a Node<'a>>>,
        qualifiers: Type,
    },
    UserDefinedLiteral {
        ret: Cell<Option<&'a Node<'a>>>,
        params: &'a [&'a Node<'a>],
    },
    ApplBlock {
        ret: Cell<Option<&'a Node<'a>>>,
        params: &'a [&'a Node<'a>],
    },
    Name(SName),
}

impl<'a> Node<'a> {
    pub(crate) fn new(
        id: NodeId,
        kind: NodeKind<'a>,
        span: cdeclish_base::Span,
        depth: u32,
        decl_flags: Type,
    ) -> Self {
        Node {
            id,
            kind,
            span,
            alignas: None,
            bit_field_width: None,
            depth,
            decl_flags,
            parent: Cell::new(None),
        }
    }

    /// The node this one is attached under, if any.
    pub fn parent(&self) -> Option<&'a Node<'a>> {
        self.parent.get()
    }

    pub(crate) fn set_parent(&self, parent: &'a Node<'a>) {
        self.parent.set(Some(parent));
    }

    /// Attaches `child` as this node's declarator target, and records
    /// `self` as `child`'s parent. This is `ast_set_child` from §4.3: it is
    /// the operation the declarator-inversion builder uses to grow the
    /// chain one operator at a time.
    ///
    /// Returns `Ok(false)` (a no-op) for leaf kinds with no target slot, and
    /// `Err` if attaching would violate one of the structural shape
    /// invariants checked by [`crate::shape::check_attach`].
    pub fn attach_child(&'a self, child: &'a Node<'a>) -> Result<bool, crate::shape::ShapeError> {
        crate::shape::check_attach(self, child)?;
        let slot = match &self.kind {
            NodeKind::Tag { base, .. } => base,
            NodeKind::Pointer(c) | NodeKind::Reference(c) | NodeKind::RvalueReference(c) => c,
            NodeKind::PointerToMember { to, .. } => to,
            NodeKind::Array { of, .. } => of,
            NodeKind::Function { ret, .. } => ret,
            NodeKind::Operator { ret, .. } => ret,
            NodeKind::UserDefinedConversion { to, .. } => to,
            NodeKind::UserDefinedLiteral { ret, .. } => ret,
            NodeKind::ApplBlock { ret, .. } => ret,
            NodeKind::Builtin(_)
            | NodeKind::Typedef(_)
            | NodeKind::Constructor { .. }
            | NodeKind::Destructor { .. }
            | NodeKind::Name(_) => return Ok(false),
        };
        slot.set(Some(child));
        child.set_parent(self);
        Ok(true)
    }

    /// This node's single declarator target, if its kind has one. Returns
    /// `None` both for leaf kinds (`Builtin`, `Name`, …) and for a wrapper
    /// kind whose target has not been attached yet.
    pub fn target(&self) -> Option<&'a Node<'a>> {
        match &self.kind {
            NodeKind::Tag { base, .. } => base.get(),
            NodeKind::Pointer(c) | NodeKind::Reference(c) | NodeKind::RvalueReference(c) => c.get(),
            NodeKind::PointerToMember { to, .. } => to.get(),
            NodeKind::Array { of, .. } => of.get(),
            NodeKind::Function { ret, .. } => ret.get(),
            NodeKind::Operator { ret, .. } => ret.get(),
            NodeKind::UserDefinedConversion { to, .. } => to.get(),
            NodeKind::UserDefinedLiteral { ret, .. } => ret.get(),
            NodeKind::ApplBlock { ret, .. } => ret.get(),
            NodeKind::Builtin(_)
            | NodeKind::Typedef(_)
            | NodeKind::Constructor { .. }
            | NodeKind::Destructor { .. }
            | NodeKind::Name(_) => None,
        }
    }

    /// The fixed parameter list, for kinds that have one.
    pub fn params(&self) -> Option<&'a [&'a Node<'a>]> {
        match &self.kind {
            NodeKind::Function { params, .. }
            | NodeKind::Operator { params, .. }
            | NodeKind::Constructor { params, .. }
            | NodeKind::UserDefinedLiteral { params, .. }
            | NodeKind::ApplBlock { params, .. } => Some(params),
            _ => None,
        }
    }

    /// All direct children: the target slot (if attached) plus the
    /// parameter list (if any). Used by [`crate::visit::ast_visit`].
    pub fn children(&self) -> Vec<&'a Node<'a>> {
        let mut out = Vec::new();
        if let Some(params) = self.params() {
            out.extend_from_slice(params);
        }
        if let Some(target) = self.target() {
            out.push(target);
        }
        out
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Builtin(_) => "builtin",
            NodeKind::Typedef(_) => "typedef",
            NodeKind::Tag { kind, .. } => match kind {
                TagKind::Enum => "enum",
                TagKind::Class => "class",
                TagKind::Struct => "struct",
                TagKind::Union => "union",
            },
            NodeKind::Pointer(_) => "pointer",
            NodeKind::Reference(_) => "reference",
            NodeKind::RvalueReference(_) => "rvalue reference",
            NodeKind::PointerToMember { .. } => "pointer-to-member",
            NodeKind::Array { .. } => "array",
            NodeKind::Function { .. } => "function",
            NodeKind::Operator { .. } => "operator",
            NodeKind::Constructor { .. } => "constructor",
            NodeKind::Destructor { .. } => "destructor",
            NodeKind::UserDefinedConversion { .. } => "conversion operator",
            NodeKind::UserDefinedLiteral { .. } => "user-defined literal",
            NodeKind::ApplBlock { .. } => "block",
            NodeKind::Name(_) => "name",
        }
    }
}
