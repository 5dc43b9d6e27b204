//! The AST semantic checker (C4, §4.4): walks an [`OwnedNode`] top-down,
//! validating type legality, declarator shape, storage-class unicity,
//! function/member constraints, scope nesting, `alignas`, and operator
//! arity for the active dialect.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::operator;
use cdeclish_ast::owned::{OwnedAlignas, OwnedKind, OwnedNode};
use cdeclish_ast::TagKind;
use cdeclish_lexicon::TypedefRegistry;
use cdeclish_options::OptionState;
use cdeclish_sname::{ScopeKind, SName};
use cdeclish_types::{type_is_legal, AttrTid, BaseTid, StorageTid, Type};

const FUNCTION_ONLY_STORAGE: StorageTid = StorageTid::VIRTUAL
    .union(StorageTid::FRIEND)
    .union(StorageTid::OVERRIDE)
    .union(StorageTid::FINAL)
    .union(StorageTid::PURE)
    .union(StorageTid::DEFAULT_FN)
    .union(StorageTid::DELETE_FN)
    .union(StorageTid::EXPLICIT);

const FUNCTION_ONLY_ATTR: AttrTid = AttrTid::NOEXCEPT.union(AttrTid::ANY_REF_QUALIFIER);

const MAX_ALIGNMENT: u32 = 1 << 29;

struct Checker<'a> {
    opts: &'a OptionState,
    registry: &'a TypedefRegistry,
    diagnostics: Vec<Diagnostic>,
}

/// `check_and_render`'s validation half: `Ok(())` if `root` obeys every
/// constraint in §4.4 under `opts.dialect`, otherwise the full list of
/// diagnostics (errors and warnings) collected along the way.
pub fn check(root: &OwnedNode, opts: &OptionState, registry: &TypedefRegistry) -> Result<(), Vec<Diagnostic>> {
    let mut checker = Checker { opts, registry, diagnostics: Vec::new() };
    checker.visit(root, false);
    let has_error = checker.diagnostics.iter().any(|d| d.severity == crate::diagnostic::Severity::Error);
    if has_error {
        Err(checker.diagnostics)
    } else {
        Ok(())
    }
}

fn is_function_like(kind: &OwnedKind) -> bool {
    matches!(
        kind,
        OwnedKind::Function { .. }
            | OwnedKind::Operator { .. }
            | OwnedKind::UserDefinedConversion { .. }
            | OwnedKind::UserDefinedLiteral { .. }
            | OwnedKind::ApplBlock { .. }
    )
}

fn is_reference_kind(kind: &OwnedKind) -> bool {
    matches!(kind, OwnedKind::Reference(_) | OwnedKind::RvalueReference(_))
}

impl<'a> Checker<'a> {
    fn visit(&mut self, node: &OwnedNode, parent_is_pointer: bool) {
        self.check_decl_flags(node);
        self.check_alignas(node);
        self.check_bitfield(node);

        match &node.kind {
            OwnedKind::Builtin(t) => self.check_type(*t, node),
            OwnedKind::Tag { sname, base, .. } => {
                self.check_sname(sname, node);
                if let Some(base) = base {
                    self.visit(base, false);
                }
            }
            OwnedKind::Pointer(inner) => {
                if let Some(inner) = inner {
                    if is_reference_kind(&inner.kind) {
                        self.diagnostics.push(Diagnostic::error(DiagnosticKind::PointerToReference, inner.span));
                    }
                    self.visit(inner, true);
                }
            }
            OwnedKind::Reference(inner) | OwnedKind::RvalueReference(inner) => {
                if let Some(inner) = inner {
                    if is_reference_kind(&inner.kind) {
                        self.diagnostics.push(Diagnostic::error(DiagnosticKind::ReferenceToReference, inner.span));
                    }
                    if matches!(&inner.kind, OwnedKind::Builtin(t) if t.base.contains(BaseTid::VOID)) {
                        self.diagnostics.push(Diagnostic::error(DiagnosticKind::ReferenceToVoid, inner.span));
                    }
                    if inner.bit_field_width.is_some() {
                        self.diagnostics.push(Diagnostic::error(DiagnosticKind::ReferenceToBitfield, inner.span));
                    }
                    self.visit(inner, false);
                }
            }
            OwnedKind::PointerToMember { of_class, to } => {
                self.check_sname(of_class, node);
                self.check_pointer_to_member_class(of_class, node);
                if let Some(to) = to {
                    if is_function_like(&to.kind) || is_reference_kind(&to.kind) {
                        self.diagnostics.push(Diagnostic::error(DiagnosticKind::ArrayOfInvalidKind, to.span));
                    }
                    self.visit(to, false);
                }
            }
            OwnedKind::Array { of, .. } => {
                if let Some(of) = of {
                    if is_function_like(&of.kind) || is_reference_kind(&of.kind) {
                        self.diagnostics.push(Diagnostic::error(DiagnosticKind::ArrayOfInvalidKind, of.span));
                    }
                    self.visit(of, false);
                }
            }
            OwnedKind::Function { ret, params, qualifiers } => {
                self.check_function_like(*qualifiers, node.span, None);
                if let Some(ret) = ret {
                    if matches!(&ret.kind, OwnedKind::Function { .. } | OwnedKind::Array { .. }) {
                        self.diagnostics
                            .push(Diagnostic::error(DiagnosticKind::FunctionReturnsFunctionOrArray, ret.span));
                    }
                    self.visit(ret, false);
                }
                for param in params {
                    self.visit(param, false);
                }
            }
            OwnedKind::Operator { op, ret, params, qualifiers } => {
                let is_member = operator::looks_like_member(*qualifiers);
                self.check_function_like(*qualifiers, node.span, Some(*op));
                if operator::must_be_member(*op) && !is_member {
                    self.diagnostics
                        .push(Diagnostic::error(DiagnosticKind::OperatorCannotBeNonMember(*op), node.span));
                }
                if let Some(expected) = operator::expected_arity(*op, is_member) {
                    if !expected.accepts(params.len()) {
                        self.diagnostics.push(Diagnostic::error(
                            DiagnosticKind::OperatorArityMismatch {
                                op: *op,
                                found: params.len(),
                                expected: expected.describe(),
                            },
                            node.span,
                        ));
                    }
                }
                if let Some(ret) = ret {
                    self.visit(ret, false);
                }
                for param in params {
                    self.visit(param, false);
                }
            }
            OwnedKind::Constructor { sname, params } => {
                self.check_sname(sname, node);
                if !node.decl_flags.base.is_empty() {
                    self.diagnostics.push(Diagnostic::error(DiagnosticKind::ConstructorHasReturnType, node.span));
                }
                for param in params {
                    self.visit(param, false);
                }
            }
            OwnedKind::Destructor { sname } => {
                self.check_sname(sname, node);
                if !node.decl_flags.base.is_empty() {
                    self.diagnostics.push(Diagnostic::error(DiagnosticKind::DestructorHasReturnType, node.span));
                }
            }
            OwnedKind::UserDefinedConversion { to, qualifiers } => {
                self.check_function_like(*qualifiers, node.span, None);
                if let Some(to) = to {
                    self.visit(to, false);
                }
            }
            OwnedKind::UserDefinedLiteral { ret, params } => {
                if let Some(ret) = ret {
                    self.visit(ret, false);
                }
                for param in params {
                    self.visit(param, false);
                }
            }
            OwnedKind::ApplBlock { ret, params } => {
                if let Some(ret) = ret {
                    self.visit(ret, false);
                }
                for param in params {
                    self.visit(param, false);
                }
            }
            OwnedKind::Typedef(sname) => {
                self.check_sname(sname, node);
                let known = self.registry.find(sname).filter(|r| r.visible_in(self.opts.dialect)).is_some();
                if !known {
                    self.diagnostics
                        .push(Diagnostic::error(DiagnosticKind::UnknownTypedef(sname.clone()), node.span));
                }
            }
            OwnedKind::Name(sname) => {
                self.check_sname(sname, node);
            }
        }

        let _ = parent_is_pointer;
    }

    fn check_type(&mut self, t: Type, node: &OwnedNode) {
        if let Err(illegality) = type_is_legal(&t, self.opts.dialect) {
            self.diagnostics.push(Diagnostic::error(DiagnosticKind::TypeIllegal(illegality), node.span));
        }
    }

    fn check_decl_flags(&mut self, node: &OwnedNode) {
        let flags = node.decl_flags;
        let storage_class_bits = (flags.storage & StorageTid::ANY_STORAGE_CLASS).bits().count_ones();
        if storage_class_bits > 1 {
            self.diagnostics.push(Diagnostic::error(DiagnosticKind::MultipleStorageClass, node.span));
        }
        if flags.attr.contains(AttrTid::RESTRICT) && !matches!(&node.kind, OwnedKind::Pointer(_)) {
            self.diagnostics.push(Diagnostic::error(DiagnosticKind::RestrictOnNonPointer, node.span));
        }
        if flags.storage.contains(StorageTid::REGISTER) {
            let removed_from = cdeclish_types::Dialect::CPP17;
            if self.opts.dialect.intersects(removed_from.and_later()) {
                self.diagnostics
                    .push(Diagnostic::error(DiagnosticKind::RegisterUnsupported(removed_from), node.span));
            }
        }
        if flags.attr.contains(AttrTid::ATOMIC_Q) && (is_function_like(&node.kind) || matches!(&node.kind, OwnedKind::Array { .. }))
        {
            self.diagnostics.push(Diagnostic::error(DiagnosticKind::AtomicOnFunctionOrArray, node.span));
        }
        if !is_function_like(&node.kind) {
            if flags.storage.intersects(FUNCTION_ONLY_STORAGE) {
                self.diagnostics.push(Diagnostic::error(DiagnosticKind::MemberQualifierOutsideClass("virtual/friend/override/final/pure/default/delete/explicit"), node.span));
            }
            if flags.attr.intersects(FUNCTION_ONLY_ATTR) {
                self.diagnostics
                    .push(Diagnostic::error(DiagnosticKind::MemberQualifierOutsideClass("noexcept/ref-qualifier"), node.span));
            }
        }
        if matches!(&node.kind, OwnedKind::Builtin(t) if t.base.contains(BaseTid::AUTO)) {
            let needs = cdeclish_types::Dialect::CPP11;
            if !self.opts.dialect.intersects(needs.and_later()) {
                self.diagnostics.push(Diagnostic::error(DiagnosticKind::AutoUnsupported(needs), node.span));
            }
        }
    }

    fn check_function_like(&mut self, qualifiers: Type, span: cdeclish_base::Span, _op: Option<cdeclish_ast::OperatorId>) {
        if let Err(illegality) = type_is_legal(&qualifiers, self.opts.dialect) {
            self.diagnostics.push(Diagnostic::error(DiagnosticKind::TypeIllegal(illegality), span));
        }
        let friend_with_member_only = qualifiers.storage.contains(StorageTid::FRIEND)
            && (qualifiers
                .storage
                .intersects(StorageTid::VIRTUAL | StorageTid::OVERRIDE | StorageTid::FINAL | StorageTid::PURE)
                || qualifiers.attr.intersects(AttrTid::CONST | AttrTid::VOLATILE | AttrTid::ANY_REF_QUALIFIER));
        if friend_with_member_only {
            self.diagnostics.push(Diagnostic::error(DiagnosticKind::MemberQualifierOutsideClass("friend"), span));
        }
    }

    fn check_alignas(&mut self, node: &OwnedNode) {
        let Some(alignas) = &node.alignas else { return };
        if let OwnedAlignas::Bytes(n) = alignas.as_ref() {
            if !n.is_power_of_two() {
                self.diagnostics.push(Diagnostic::error(DiagnosticKind::AlignasNotPowerOfTwo(*n), node.span));
            } else if *n > MAX_ALIGNMENT {
                self.diagnostics.push(Diagnostic::error(DiagnosticKind::AlignasExceedsMax(*n), node.span));
            }
        }
    }

    fn check_bitfield(&mut self, node: &OwnedNode) {
        if node.bit_field_width.is_none() {
            return;
        }
        let is_integral = match &node.kind {
            OwnedKind::Builtin(t) => {
                t.base.intersects(BaseTid::BOOL | BaseTid::CHAR | BaseTid::SHORT | BaseTid::INT | BaseTid::LONG | BaseTid::LONG_LONG)
                    || t.base.contains(BaseTid::ENUM)
            }
            OwnedKind::Tag { kind: TagKind::Enum, .. } => true,
            _ => false,
        };
        if !is_integral {
            self.diagnostics.push(Diagnostic::error(DiagnosticKind::BitfieldOnNonIntegral, node.span));
        }
    }

    /// `PointerToMember.of_class` must name a class, struct, or union (§4.3):
    /// resolves `of_class` the same way [`cdeclish_lexicon::set_all_types`]
    /// would for any other scoped name, and separately rejects a class name
    /// the registry knows to be an enum. A name the registry has never seen
    /// is left alone — nothing here requires a class to be predeclared.
    fn check_pointer_to_member_class(&mut self, of_class: &SName, node: &OwnedNode) {
        let mut resolved = of_class.clone();
        cdeclish_lexicon::set_all_types(&mut resolved, ScopeKind::Scope, self.registry, self.opts.dialect);
        let leaf_is_namespace = resolved.scopes().last().is_some_and(|s| s.kind.is_namespace());
        let leaf_is_enum = self
            .registry
            .find(of_class)
            .filter(|r| r.visible_in(self.opts.dialect))
            .is_some_and(|r| matches!(&r.ast.kind, OwnedKind::Tag { kind: TagKind::Enum, .. }));
        if leaf_is_namespace || leaf_is_enum {
            self.diagnostics
                .push(Diagnostic::error(DiagnosticKind::PointerToMemberClassInvalid(of_class.clone()), node.span));
        }
    }

    /// Standard-library scope names may only extend `std` via a small,
    /// fixed set of members in strict mode; everything else follows the
    /// ordinary nesting rules from [`SName::validate`].
    fn check_sname(&mut self, sname: &SName, node: &OwnedNode) {
        if let Err(err) = sname.validate() {
            self.diagnostics.push(Diagnostic::error(DiagnosticKind::ScopeError(err), node.span));
        }
        const PERMITTED_STD_MEMBERS: &[&str] = &[
            "string", "wstring", "vector", "map", "set", "pair", "size_t", "ptrdiff_t", "nullptr_t", "byte",
            "unique_ptr", "shared_ptr", "weak_ptr", "optional", "variant", "function", "array", "tuple",
        ];
        let scopes = sname.scopes();
        if scopes.len() >= 2 && scopes[0].name == "std" && !PERMITTED_STD_MEMBERS.contains(&scopes[1].name.as_str()) {
            self.diagnostics
                .push(Diagnostic::warning(DiagnosticKind::StdScopeRestricted(scopes[1].name.clone()), node.span));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdeclish_ast::ArraySize;
    use cdeclish_lexicon::TypedefRecord;
    use cdeclish_sname::{ScopeKind, SName};
    use cdeclish_types::Dialect;

    fn leaf(kind: OwnedKind) -> OwnedNode {
        OwnedNode { kind, span: Span::new(0, 1), alignas: None, bit_field_width: None, depth: 0, decl_flags: Type::NONE }
    }

    fn builtin(base: BaseTid) -> OwnedNode {
        leaf(OwnedKind::Builtin(Type::base(base)))
    }

    fn pointer(inner: OwnedNode) -> OwnedNode {
        leaf(OwnedKind::Pointer(Some(Box::new(inner))))
    }

    fn array_of(inner: OwnedNode) -> OwnedNode {
        leaf(OwnedKind::Array { of: Some(Box::new(inner)), size: ArraySize::None })
    }

    fn run(node: &OwnedNode, opts: &OptionState) -> Result<(), Vec<Diagnostic>> {
        check(node, opts, &TypedefRegistry::default())
    }

    #[test]
    fn pointer_to_array_of_int_is_legal() {
        let tree = pointer(array_of(builtin(BaseTid::INT)));
        assert!(run(&tree, &OptionState::default()).is_ok());
    }

    #[test]
    fn char16_t_is_illegal_before_c11() {
        let tree = builtin(BaseTid::CHAR16_T);
        let opts = OptionState { dialect: Dialect::C89, ..OptionState::default() };
        let diags = run(&tree, &opts).unwrap_err();
        assert!(diags.iter().any(|d| matches!(d.kind, DiagnosticKind::TypeIllegal(_))));
    }

    #[test]
    fn array_of_reference_is_rejected() {
        let reference = leaf(OwnedKind::Reference(Some(Box::new(builtin(BaseTid::INT)))));
        let tree = array_of(reference);
        let diags = run(&tree, &OptionState::default()).unwrap_err();
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::ArrayOfInvalidKind));
    }

    #[test]
    fn multiple_storage_classes_are_rejected() {
        let mut tree = builtin(BaseTid::INT);
        tree.decl_flags.storage = StorageTid::STATIC | StorageTid::EXTERN;
        let diags = run(&tree, &OptionState::default()).unwrap_err();
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::MultipleStorageClass));
    }

    #[test]
    fn friend_with_virtual_is_rejected() {
        let mut tree = OwnedNode {
            kind: OwnedKind::Function { ret: Some(Box::new(builtin(BaseTid::VOID))), params: Vec::new(), qualifiers: Type::NONE },
            span: Span::new(0, 1),
            alignas: None,
            bit_field_width: None,
            depth: 0,
            decl_flags: Type::NONE,
        };
        if let OwnedKind::Function { qualifiers, .. } = &mut tree.kind {
            *qualifiers = Type { storage: StorageTid::FRIEND | StorageTid::VIRTUAL, ..Type::NONE };
        }
        let diags = run(&tree, &OptionState::default()).unwrap_err();
        assert!(diags.iter().any(|d| matches!(&d.kind, DiagnosticKind::MemberQualifierOutsideClass("friend"))));
    }

    #[test]
    fn operator_tilde_with_two_params_is_an_arity_mismatch() {
        let tree = leaf(OwnedKind::Operator {
            op: cdeclish_ast::OperatorId::Tilde,
            ret: Some(Box::new(builtin(BaseTid::INT))),
            params: vec![builtin(BaseTid::INT), builtin(BaseTid::INT)],
            qualifiers: Type::NONE,
        });
        let diags = run(&tree, &OptionState::default()).unwrap_err();
        assert!(diags.iter().any(|d| matches!(d.kind, DiagnosticKind::OperatorArityMismatch { .. })));
    }

    #[test]
    fn unknown_typedef_name_is_rejected() {
        let (_, sname) = SName::parse("frobnicate_t").unwrap();
        let tree = leaf(OwnedKind::Typedef(sname));
        let diags = run(&tree, &OptionState::default()).unwrap_err();
        assert!(diags.iter().any(|d| matches!(d.kind, DiagnosticKind::UnknownTypedef(_))));
    }

    #[test]
    fn predefined_typedef_size_t_is_known() {
        let (_, sname) = SName::parse("size_t").unwrap();
        let tree = leaf(OwnedKind::Typedef(sname));
        assert!(run(&tree, &OptionState::default()).is_ok());
    }

    #[test]
    fn bitfield_on_float_is_rejected() {
        let mut tree = builtin(BaseTid::FLOAT);
        tree.bit_field_width = Some(4);
        let diags = run(&tree, &OptionState::default()).unwrap_err();
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::BitfieldOnNonIntegral));
    }

    #[test]
    fn alignas_non_power_of_two_is_rejected() {
        let mut tree = builtin(BaseTid::INT);
        tree.alignas = Some(Box::new(OwnedAlignas::Bytes(6)));
        let diags = run(&tree, &OptionState::default()).unwrap_err();
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::AlignasNotPowerOfTwo(6)));
    }

    #[test]
    fn pointer_to_member_of_enum_is_rejected() {
        let mut registry = TypedefRegistry::default();
        let (_, color) = SName::parse("Color").unwrap();
        registry.add(TypedefRecord {
            sname: color.clone(),
            ast: leaf(OwnedKind::Tag { kind: TagKind::Enum, sname: color.clone(), base: None }),
            dialects_defined_in: Dialect::ANY,
            is_predefined: false,
            is_hidden_from_show: false,
        });
        let tree = leaf(OwnedKind::PointerToMember { of_class: color, to: Some(Box::new(builtin(BaseTid::INT))) });
        let diags = check(&tree, &OptionState::default(), &registry).unwrap_err();
        assert!(diags.iter().any(|d| matches!(d.kind, DiagnosticKind::PointerToMemberClassInvalid(_))));
    }

    #[test]
    fn pointer_to_member_of_undeclared_class_is_allowed() {
        let (_, c) = SName::parse("C").unwrap();
        let tree = leaf(OwnedKind::PointerToMember { of_class: c, to: Some(Box::new(builtin(BaseTid::INT))) });
        assert!(run(&tree, &OptionState::default()).is_ok());
    }

    #[test]
    fn std_extension_outside_whitelist_is_a_warning_not_an_error() {
        let mut sname = SName::from_single("std", ScopeKind::Namespace { inline: false });
        sname.append_name("frobnicator", ScopeKind::Scope);
        let tree = leaf(OwnedKind::Name(sname));
        let result = run(&tree, &OptionState::default());
        assert!(result.is_ok());
    }
}
