//! The declaration renderer (C6, §4.6): declarator inversion with
//! precedence-driven parenthesization, east/west const placement, and
//! digraph/trigraph rewriting.
//!
//! The declarator chain is walked outside-in, the same direction it was
//! built in (§9): starting at the outermost operator and recursing toward
//! the base type, each level wraps the string assembled so far. Array and
//! function bind tighter than pointer/reference, so a pointer or reference
//! wrapping either one must parenthesize what it wrote before recursing.

use cdeclish_ast::owned::{OwnedKind, OwnedNode};
use cdeclish_ast::{ArraySize, OperatorId, TagKind};
use cdeclish_options::{GraphMode, OptionState};
use cdeclish_types::render::{attr_tokens_pre, cv_tokens, storage_tokens, type_decl};
use cdeclish_types::{AttrTid, StorageTid, Type};

fn binds_tighter_than_indirection(kind: &OwnedKind) -> bool {
    matches!(
        kind,
        OwnedKind::Array { .. }
            | OwnedKind::Function { .. }
            | OwnedKind::Operator { .. }
            | OwnedKind::UserDefinedLiteral { .. }
            | OwnedKind::ApplBlock { .. }
    )
}

fn array_size_token(size: &ArraySize) -> String {
    match size {
        ArraySize::Known(n) => n.to_string(),
        ArraySize::None => String::new(),
        ArraySize::Variable => String::new(),
        ArraySize::Star => "*".to_string(),
    }
}

fn own_cv_suffix(node: &OwnedNode) -> String {
    let tokens = cv_tokens(node.decl_flags.attr);
    if tokens.is_empty() {
        String::new()
    } else {
        format!(" {}", tokens.join(" "))
    }
}

pub(crate) fn operator_token(op: OperatorId, alt_tokens: bool) -> &'static str {
    use OperatorId::*;
    match op {
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Percent => "%",
        Caret => {
            if alt_tokens {
                "xor"
            } else {
                "^"
            }
        }
        Amp => {
            if alt_tokens {
                "bitand"
            } else {
                "&"
            }
        }
        Pipe => {
            if alt_tokens {
                "bitor"
            } else {
                "|"
            }
        }
        Tilde => {
            if alt_tokens {
                "compl"
            } else {
                "~"
            }
        }
        Not => {
            if alt_tokens {
                "not"
            } else {
                "!"
            }
        }
        Assign => "=",
        Less => "<",
        Greater => ">",
        PlusAssign => "+=",
        MinusAssign => "-=",
        StarAssign => "*=",
        SlashAssign => "/=",
        PercentAssign => "%=",
        CaretAssign => {
            if alt_tokens {
                "xor_eq"
            } else {
                "^="
            }
        }
        AmpAssign => {
            if alt_tokens {
                "and_eq"
            } else {
                "&="
            }
        }
        PipeAssign => {
            if alt_tokens {
                "or_eq"
            } else {
                "|="
            }
        }
        ShiftLeft => "<<",
        ShiftRight => ">>",
        ShiftLeftAssign => "<<=",
        ShiftRightAssign => ">>=",
        Eq => "==",
        NotEq => {
            if alt_tokens {
                "not_eq"
            } else {
                "!="
            }
        }
        LessEq => "<=",
        GreaterEq => ">=",
        Spaceship => "<=>",
        AndAnd => {
            if alt_tokens {
                "and"
            } else {
                "&&"
            }
        }
        OrOr => {
            if alt_tokens {
                "or"
            } else {
                "||"
            }
        }
        PlusPlus => "++",
        MinusMinus => "--",
        Comma => ",",
        ArrowStar => "->*",
        Arrow => "->",
        Call => "()",
        Subscript => "[]",
        New => "new",
        NewArray => "new[]",
        Delete => "delete",
        DeleteArray => "delete[]",
    }
}

fn function_qualifier_suffix(q: Type) -> String {
    let mut parts: Vec<String> = Vec::new();
    let cv = cv_tokens(q.attr);
    if !cv.is_empty() {
        parts.push(cv.join(" "));
    }
    if q.attr.contains(AttrTid::REF) {
        parts.push("&".to_string());
    } else if q.attr.contains(AttrTid::RVALUE_REF) {
        parts.push("&&".to_string());
    }
    if q.attr.contains(AttrTid::NOEXCEPT) {
        parts.push("noexcept".to_string());
    }
    if q.storage.contains(StorageTid::OVERRIDE) {
        parts.push("override".to_string());
    }
    if q.storage.contains(StorageTid::FINAL) {
        parts.push("final".to_string());
    }
    if q.storage.contains(StorageTid::PURE) {
        parts.push("= 0".to_string());
    } else if q.storage.contains(StorageTid::DELETE_FN) {
        parts.push("= delete".to_string());
    } else if q.storage.contains(StorageTid::DEFAULT_FN) {
        parts.push("= default".to_string());
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" {}", parts.join(" "))
    }
}

fn params_decl(params: &[OwnedNode], opts: &OptionState) -> String {
    params.iter().map(|p| declarator(p, String::new(), opts)).collect::<Vec<_>>().join(", ")
}

/// Builds the declarator string for `node`, wrapping the string built so
/// far (`core`) and recursing toward the base type. `core` starts as the
/// identifier (or empty, for an abstract parameter declarator).
fn declarator(node: &OwnedNode, core: String, opts: &OptionState) -> String {
    match &node.kind {
        OwnedKind::Pointer(inner) => {
            let piece = format!("*{core}{}", own_cv_suffix(node));
            wrap_and_recurse(inner.as_deref(), piece, opts)
        }
        OwnedKind::Reference(inner) => {
            let piece = format!("&{core}{}", own_cv_suffix(node));
            wrap_and_recurse(inner.as_deref(), piece, opts)
        }
        OwnedKind::RvalueReference(inner) => {
            let piece = format!("&&{core}{}", own_cv_suffix(node));
            wrap_and_recurse(inner.as_deref(), piece, opts)
        }
        OwnedKind::PointerToMember { of_class, to } => {
            let piece = format!("{}::*{core}{}", of_class.global_name(), own_cv_suffix(node));
            wrap_and_recurse(to.as_deref(), piece, opts)
        }
        OwnedKind::Array { of, size } => {
            let piece = format!("{core}[{}]", array_size_token(size));
            match of {
                Some(of) => declarator(of, piece, opts),
                None => piece,
            }
        }
        OwnedKind::Function { ret, params, qualifiers } => {
            let piece = format!("{core}({}){}", params_decl(params, opts), function_qualifier_suffix(*qualifiers));
            match ret {
                Some(ret) => declarator(ret, piece, opts),
                None => piece,
            }
        }
        OwnedKind::Operator { op, ret, params, qualifiers } => {
            let name = format!("operator{}", operator_token(*op, opts.alt_tokens));
            let piece = format!(
                "{core}{name}({}){}",
                params_decl(params, opts),
                function_qualifier_suffix(*qualifiers)
            );
            match ret {
                Some(ret) => declarator(ret, piece, opts),
                None => piece,
            }
        }
        OwnedKind::Constructor { sname, params } => {
            format!("{}({})", sname.local_name(), params_decl(params, opts))
        }
        OwnedKind::Destructor { sname } => format!("~{}()", sname.local_name()),
        OwnedKind::UserDefinedConversion { to, qualifiers } => {
            let target = to.as_deref().map(|t| declarator(t, String::new(), opts)).unwrap_or_default();
            let target_base = to.as_deref().map(|t| base_leaf_string(t, opts)).unwrap_or_default();
            let target_full = if target.is_empty() { target_base.clone() } else { format!("{target_base} {target}") };
            format!("operator {target_full}(){}", function_qualifier_suffix(*qualifiers))
        }
        OwnedKind::UserDefinedLiteral { ret, params } => {
            let piece = format!("{core}operator\"\"({})", params_decl(params, opts));
            match ret {
                Some(ret) => declarator(ret, piece, opts),
                None => piece,
            }
        }
        OwnedKind::ApplBlock { ret, params } => {
            let piece = format!("(^{core})({})", params_decl(params, opts));
            match ret {
                Some(ret) => declarator(ret, piece, opts),
                None => piece,
            }
        }
        OwnedKind::Builtin(_) | OwnedKind::Typedef(_) | OwnedKind::Tag { .. } | OwnedKind::Name(_) => core,
    }
}

fn wrap_and_recurse(inner: Option<&OwnedNode>, piece: String, opts: &OptionState) -> String {
    match inner {
        Some(inner) if binds_tighter_than_indirection(&inner.kind) => declarator(inner, format!("({piece})"), opts),
        Some(inner) => declarator(inner, piece, opts),
        None => piece,
    }
}

fn tag_keyword(kind: TagKind) -> &'static str {
    match kind {
        TagKind::Enum => "enum",
        TagKind::Class => "class",
        TagKind::Struct => "struct",
        TagKind::Union => "union",
    }
}

fn tag_wants_keyword(kind: TagKind, explicit_ecsu: cdeclish_types::ExplicitEcsu) -> bool {
    use cdeclish_types::ExplicitEcsu as E;
    let bit = match kind {
        TagKind::Enum => E::ENUM,
        TagKind::Class => E::CLASS,
        TagKind::Struct => E::STRUCT,
        TagKind::Union => E::UNION,
    };
    explicit_ecsu.contains(bit)
}

/// Storage-class keywords (`static`, `extern`, `typedef`, ...) and leading
/// `_Atomic` don't live on the `Builtin` atom alone — a `static Foo x;` where
/// `Foo` is a typedef carries the storage class on the declaration, not on
/// the typedef name itself. Prepend them here so aliased and tagged base
/// types get the same storage-class coverage `type_decl` gives a `Builtin`.
fn prefix_storage(core: String, flags: Type) -> String {
    let mut tokens: Vec<&'static str> = storage_tokens(flags.storage);
    tokens.extend(attr_tokens_pre(flags.attr));
    if tokens.is_empty() {
        core
    } else {
        format!("{} {core}", tokens.join(" "))
    }
}

fn place_cv(core: String, flags: Type, opts: &OptionState) -> String {
    let cv = cv_tokens(flags.attr);
    if cv.is_empty() {
        core
    } else if opts.east_const {
        format!("{core} {}", cv.join(" "))
    } else {
        format!("{} {core}", cv.join(" "))
    }
}

/// The base-type string at the innermost (leaf) node of the chain:
/// `[storage] [attrs] [signedness] [width] [base]` for a `Builtin`, or the
/// (possibly keyword-prefixed) name for a typedef/tag/bare name, with its
/// own cv-qualifiers placed per the east-const policy.
fn base_leaf_string(leaf: &OwnedNode, opts: &OptionState) -> String {
    match &leaf.kind {
        OwnedKind::Builtin(t) => {
            let bare = Type { attr: t.attr - AttrTid::CONST - AttrTid::VOLATILE - AttrTid::RESTRICT, ..*t };
            let tokens = type_decl(&bare, opts.explicit_int, opts.explicit_ecsu);
            place_cv(tokens, *t, opts)
        }
        OwnedKind::Typedef(sname) | OwnedKind::Name(sname) => {
            let named = place_cv(sname.global_name(), leaf.decl_flags, opts);
            prefix_storage(named, leaf.decl_flags)
        }
        OwnedKind::Tag { kind, sname, .. } => {
            let name = sname.global_name();
            let core = if tag_wants_keyword(*kind, opts.explicit_ecsu) {
                format!("{} {name}", tag_keyword(*kind))
            } else {
                name
            };
            prefix_storage(place_cv(core, leaf.decl_flags, opts), leaf.decl_flags)
        }
        _ => String::new(),
    }
}

fn apply_graph_mode(s: String, mode: GraphMode) -> String {
    match mode {
        GraphMode::None => s,
        GraphMode::Digraphs => s
            .chars()
            .map(|c| match c {
                '{' => "<%".to_string(),
                '}' => "%>".to_string(),
                '[' => "<:".to_string(),
                ']' => ":>".to_string(),
                '#' => "%:".to_string(),
                other => other.to_string(),
            })
            .collect(),
        GraphMode::Trigraphs => s
            .chars()
            .map(|c| match c {
                '{' => "??<".to_string(),
                '}' => "??>".to_string(),
                '[' => "??(".to_string(),
                ']' => "??)".to_string(),
                '#' => "??=".to_string(),
                '|' => "??!".to_string(),
                '^' => "??'".to_string(),
                '~' => "??-".to_string(),
                '\\' => "??/".to_string(),
                other => other.to_string(),
            })
            .collect(),
    }
}

/// Finds the base-type leaf by following `target()` to the end of the chain.
fn base_leaf(node: &OwnedNode) -> &OwnedNode {
    let mut leaf = node;
    while let Some(t) = leaf.target() {
        leaf = t;
    }
    leaf
}

/// Renders `root` (an already-checked declarator chain) as a full C/C++
/// declaration of `ident`, honoring `opts`'s east-const, digraph/trigraph,
/// explicit-int/ecsu, alt-tokens, and trailing-semicolon settings.
pub fn render_decl(root: &OwnedNode, ident: &str, opts: &OptionState) -> String {
    let declarator_str = declarator(root, ident.to_string(), opts);
    let base = base_leaf_string(base_leaf(root), opts);
    let mut out = if declarator_str.is_empty() { base } else { format!("{base} {declarator_str}") };
    out = apply_graph_mode(out, opts.graph);
    if opts.semicolon {
        out.push(';');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdeclish_ast::{freeze, AstArena, NodeKind};
    use cdeclish_base::Span;
    use cdeclish_sname::SName;
    use cdeclish_types::{BaseTid, Dialect, ExplicitInt};

    fn opts() -> OptionState {
        OptionState::default()
    }

    #[test]
    fn pointer_to_array_needs_parens() {
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 2);
        let arr = arena.ast_new(NodeKind::Array { of: Default::default(), size: ArraySize::Known(10) }, Span::new(0, 4), 1);
        arena.ast_set_child(arr, inner).unwrap();
        let ptr = arena.ast_new(NodeKind::Pointer(Default::default()), Span::new(0, 4), 0);
        arena.ast_set_child(ptr, arr).unwrap();

        let owned = freeze(ptr);
        assert_eq!(render_decl(&owned, "x", &opts()), "int (*x)[10];");
    }

    #[test]
    fn array_of_pointer_has_no_parens() {
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 2);
        let ptr = arena.ast_new(NodeKind::Pointer(Default::default()), Span::new(0, 4), 1);
        arena.ast_set_child(ptr, inner).unwrap();
        let arr = arena.ast_new(NodeKind::Array { of: Default::default(), size: ArraySize::Known(10) }, Span::new(0, 4), 0);
        arena.ast_set_child(arr, ptr).unwrap();

        let owned = freeze(arr);
        assert_eq!(render_decl(&owned, "x", &opts()), "int *x[10];");
    }

    #[test]
    fn east_const_moves_const_after_the_base() {
        let t = Type { base: BaseTid::INT, attr: AttrTid::CONST, ..Type::NONE };
        let arena = AstArena::new();
        let builtin = arena.ast_new(NodeKind::Builtin(t), Span::new(0, 3), 1);
        let ptr = arena.ast_new(NodeKind::Pointer(Default::default()), Span::new(0, 4), 0);
        arena.ast_set_child(ptr, builtin).unwrap();
        let owned = freeze(ptr);

        let west = render_decl(&owned, "x", &OptionState::default());
        assert_eq!(west, "const int *x;");

        let east = render_decl(&owned, "x", &OptionState { east_const: true, ..OptionState::default() });
        assert_eq!(east, "int const *x;");
    }

    #[test]
    fn explicit_int_survives_into_the_base_string() {
        let t = Type::base(BaseTid::UNSIGNED | BaseTid::SHORT);
        let arena = AstArena::new();
        let builtin = arena.ast_new(NodeKind::Builtin(t), Span::new(0, 2), 0);
        let owned = freeze(builtin);
        let opts = OptionState { explicit_int: ExplicitInt::UNSIGNED_SHORT, ..OptionState::default() };
        assert_eq!(render_decl(&owned, "x", &opts), "unsigned short int x;");
    }

    #[test]
    fn trigraphs_rewrite_brackets() {
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let arr = arena.ast_new(NodeKind::Array { of: Default::default(), size: ArraySize::None }, Span::new(0, 4), 0);
        arena.ast_set_child(arr, inner).unwrap();
        let owned = freeze(arr);
        let opts = OptionState { graph: GraphMode::Trigraphs, ..OptionState::default() };
        assert_eq!(render_decl(&owned, "a", &opts), "int a??(??);");
    }

    #[test]
    fn pointer_to_member_of_class() {
        let (_, sname) = SName::parse("C").unwrap();
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let ptm =
            arena.ast_new(NodeKind::PointerToMember { of_class: sname, to: Default::default() }, Span::new(0, 4), 0);
        arena.ast_set_child(ptm, inner).unwrap();
        let owned = freeze(ptm);
        let opts = OptionState { dialect: Dialect::CPP20, ..OptionState::default() };
        assert_eq!(render_decl(&owned, "p", &opts), "int C::*p;");
    }
}
