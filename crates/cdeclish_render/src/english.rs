//! The English renderer (C5, §4.5): turns an already-checked AST into the
//! controlled-English declaration form, e.g. `declare f as pointer to
//! function (char, double) returning int`.
//!
//! Grammar: `english := storage* qual* kind`, where `kind` is one of array,
//! function, pointer/reference/rvalue-reference, block, or a type-literal.
//! Storage and qualifier words precede each level's kind word, the same
//! (head, target) chain the declaration renderer walks, just narrated
//! outside-in instead of inverted.

use crate::decl::operator_token;
use cdeclish_ast::owned::{OwnedKind, OwnedNode};
use cdeclish_ast::ArraySize;
use cdeclish_options::OptionState;
use cdeclish_types::render::{cv_tokens, storage_tokens, type_english};
use cdeclish_types::{AttrTid, StorageTid, Type};

fn own_prefix(flags: Type) -> String {
    let mut tokens = storage_tokens(flags.storage);
    tokens.extend(cv_tokens(flags.attr));
    if tokens.is_empty() {
        String::new()
    } else {
        format!("{} ", tokens.join(" "))
    }
}

fn array_size_phrase(size: &ArraySize) -> Option<String> {
    match size {
        ArraySize::Known(n) => Some(n.to_string()),
        ArraySize::None => None,
        ArraySize::Variable => None,
        ArraySize::Star => Some("*".to_string()),
    }
}

fn params_english(params: &[OwnedNode], opts: &OptionState) -> String {
    params.iter().map(|p| render_node(p, opts)).collect::<Vec<_>>().join(", ")
}

fn args_phrase(params: &[OwnedNode], opts: &OptionState) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!(" ({})", params_english(params, opts))
    }
}

fn returning_phrase(ret: Option<&OwnedNode>, opts: &OptionState) -> String {
    match ret {
        Some(ret) => format!(" returning {}", render_node(ret, opts)),
        None => String::new(),
    }
}

fn qualifier_words(q: Type) -> String {
    let mut parts: Vec<String> = Vec::new();
    let cv = cv_tokens(q.attr);
    if !cv.is_empty() {
        parts.push(cv.join(" "));
    }
    if q.attr.contains(AttrTid::REF) {
        parts.push("lvalue-ref-qualified".to_string());
    } else if q.attr.contains(AttrTid::RVALUE_REF) {
        parts.push("rvalue-ref-qualified".to_string());
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
        parts.push("pure".to_string());
    } else if q.storage.contains(StorageTid::DELETE_FN) {
        parts.push("deleted".to_string());
    } else if q.storage.contains(StorageTid::DEFAULT_FN) {
        parts.push("defaulted".to_string());
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

/// Renders the `kind` production for `node` — no storage/qualifier prefix,
/// that is layered on by [`render_node`].
fn render_kind(node: &OwnedNode, opts: &OptionState) -> String {
    match &node.kind {
        OwnedKind::Builtin(t) => type_english(t, opts.explicit_int),
        OwnedKind::Typedef(sname) | OwnedKind::Name(sname) => sname.global_name(),
        OwnedKind::Tag { sname, .. } => sname.global_name(),
        OwnedKind::Pointer(inner) => format!("pointer to {}", render_target(inner.as_deref(), opts)),
        OwnedKind::Reference(inner) => format!("reference to {}", render_target(inner.as_deref(), opts)),
        OwnedKind::RvalueReference(inner) => {
            format!("rvalue reference to {}", render_target(inner.as_deref(), opts))
        }
        OwnedKind::PointerToMember { of_class, to } => {
            format!("pointer to member of {} to {}", of_class.global_name(), render_target(to.as_deref(), opts))
        }
        OwnedKind::Array { of, size } => {
            let tail = render_target(of.as_deref(), opts);
            match array_size_phrase(size) {
                Some(n) => format!("array {n} of {tail}"),
                None => format!("array of {tail}"),
            }
        }
        OwnedKind::Function { ret, params, qualifiers } => format!(
            "function{}{}{}",
            args_phrase(params, opts),
            returning_phrase(ret.as_deref(), opts),
            qualifier_words(*qualifiers)
        ),
        OwnedKind::Operator { op, ret, params, qualifiers } => format!(
            "operator{}{}{}{}",
            operator_token(*op, opts.alt_tokens),
            args_phrase(params, opts),
            returning_phrase(ret.as_deref(), opts),
            qualifier_words(*qualifiers)
        ),
        OwnedKind::Constructor { sname, params } => {
            format!("constructor for {}{}", sname.local_name(), args_phrase(params, opts))
        }
        OwnedKind::Destructor { sname } => format!("destructor for {}", sname.local_name()),
        OwnedKind::UserDefinedConversion { to, qualifiers } => {
            let target = to.as_deref().map(|t| render_node(t, opts)).unwrap_or_default();
            format!("user-defined conversion to {target}{}", qualifier_words(*qualifiers))
        }
        OwnedKind::UserDefinedLiteral { ret, params } => {
            format!("user-defined literal{}{}", args_phrase(params, opts), returning_phrase(ret.as_deref(), opts))
        }
        OwnedKind::ApplBlock { ret, params } => {
            format!("block{}{}", args_phrase(params, opts), returning_phrase(ret.as_deref(), opts))
        }
    }
}

fn render_target(node: Option<&OwnedNode>, opts: &OptionState) -> String {
    match node {
        Some(node) => render_node(node, opts),
        None => String::new(),
    }
}

/// Renders `storage* qual* kind` for one node of the chain.
fn render_node(node: &OwnedNode, opts: &OptionState) -> String {
    format!("{}{}", own_prefix(node.decl_flags), render_kind(node, opts))
}

/// Renders `root` (an already-checked declarator chain) as `declare {ident}
/// as {english}` per §4.5. The renderer does not consult the dialect — by
/// the time an AST reaches here it has already passed the checker (C4).
pub fn render_english(root: &OwnedNode, ident: &str, opts: &OptionState) -> String {
    format!("declare {ident} as {}", render_node(root, opts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdeclish_base::Span;
    use cdeclish_types::BaseTid;

    fn leaf(kind: OwnedKind) -> OwnedNode {
        OwnedNode { kind, span: Span::new(0, 1), alignas: None, bit_field_width: None, depth: 0, decl_flags: Type::NONE }
    }

    fn builtin(base: BaseTid) -> OwnedNode {
        leaf(OwnedKind::Builtin(Type::base(base)))
    }

    #[test]
    fn pointer_to_function_returning_int() {
        let func = leaf(OwnedKind::Function {
            ret: Some(Box::new(builtin(BaseTid::INT))),
            params: vec![builtin(BaseTid::CHAR), builtin(BaseTid::DOUBLE)],
            qualifiers: Type::NONE,
        });
        let ptr = leaf(OwnedKind::Pointer(Some(Box::new(func))));

        let english = render_english(&ptr, "f", &OptionState::default());
        assert_eq!(english, "declare f as pointer to function (char, double) returning int");
    }

    #[test]
    fn array_of_const_int_reads_naturally() {
        let t = Type { base: BaseTid::INT, attr: AttrTid::CONST, ..Type::NONE };
        let arr = leaf(OwnedKind::Array {
            of: Some(Box::new(leaf(OwnedKind::Builtin(t)))),
            size: ArraySize::Known(10),
        });
        let english = render_english(&arr, "x", &OptionState::default());
        assert_eq!(english, "declare x as array 10 of const int");
    }

    #[test]
    fn plain_int_has_no_kind_noise() {
        let b = builtin(BaseTid::INT);
        assert_eq!(render_english(&b, "x", &OptionState::default()), "declare x as int");
    }
}
