//! # cdeclish-lexicon
//!
//! The typedef registry (component C7): an ordered store of user- and
//! predefined type aliases keyed by scoped name, with dialect-gated
//! visibility. See [`TypedefRegistry`] for the four operations from §4.7,
//! and [`predefined`] for the static table loaded at initialization.

pub mod predefined;

use cdeclish_ast::owned::OwnedNode;
use cdeclish_sname::{ScopeKind, SName};
use cdeclish_types::Dialect;
use std::collections::HashMap;

/// One entry: a name, the type it stands for, and the dialect mask it is
/// visible in (§4.2 of the design).
#[derive(Debug, Clone, PartialEq)]
pub struct TypedefRecord {
    pub sname: SName,
    pub ast: OwnedNode,
    pub dialects_defined_in: Dialect,
    pub is_predefined: bool,
    /// `typedef`s the user asked to keep out of `show typedefs` output.
    pub is_hidden_from_show: bool,
}

impl TypedefRecord {
    /// Whether this entry is visible when the active dialect is `dialect`.
    pub fn visible_in(&self, dialect: Dialect) -> bool {
        self.dialects_defined_in.intersects(dialect)
    }
}

/// Result of [`TypedefRegistry::add`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Inserted (or an identical redefinition of an existing entry).
    Ok,
    /// An entry already exists under this name with a structurally
    /// different type.
    Conflict(TypedefRecord),
}

/// The typedef registry (C7): an insertion-ordered store keyed by the
/// alias's fully-scoped name.
pub struct TypedefRegistry {
    entries: Vec<TypedefRecord>,
    index: HashMap<String, usize>,
}

impl TypedefRegistry {
    /// An empty registry with none of the predefined aliases loaded.
    pub fn empty() -> Self {
        TypedefRegistry { entries: Vec::new(), index: HashMap::new() }
    }

    /// A registry pre-loaded with the standard table from [`predefined`].
    pub fn with_predefined() -> Self {
        let mut registry = Self::empty();
        for record in predefined::predefined_records() {
            let outcome = registry.add(record);
            debug_assert_eq!(outcome, AddOutcome::Ok, "predefined table must not self-conflict");
        }
        registry
    }

    /// `add(td)` from §4.7: inserts `record`, or reports a conflict if a
    /// structurally different entry already exists under the same name. A
    /// redefinition with a structurally identical AST is treated as a
    /// no-op success, matching `typedef` being idempotent under repetition.
    pub fn add(&mut self, record: TypedefRecord) -> AddOutcome {
        let key = record.sname.global_name();
        if let Some(&idx) = self.index.get(&key) {
            let existing = &self.entries[idx];
            if existing.ast == record.ast {
                return AddOutcome::Ok;
            }
            return AddOutcome::Conflict(existing.clone());
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(record);
        AddOutcome::Ok
    }

    /// `find(sname)` from §4.7.
    pub fn find(&self, sname: &SName) -> Option<&TypedefRecord> {
        self.index.get(&sname.global_name()).map(|&idx| &self.entries[idx])
    }

    /// `remove(sname)` from §4.7. No-op if absent.
    pub fn remove(&mut self, sname: &SName) {
        let key = sname.global_name();
        let Some(idx) = self.index.remove(&key) else { return };
        self.entries.remove(idx);
        for value in self.index.values_mut() {
            if *value > idx {
                *value -= 1;
            }
        }
    }

    /// `iter(glob)` from §4.7: matches in insertion order, unfiltered by
    /// dialect (callers that need dialect gating should also check
    /// [`TypedefRecord::visible_in`]).
    pub fn iter<'a>(&'a self, glob: &'a str) -> impl Iterator<Item = &'a TypedefRecord> + 'a {
        self.entries.iter().filter(move |r| r.sname.matches(glob))
    }

    /// `iter(glob)` restricted to entries visible in `dialect`.
    pub fn iter_visible<'a>(&'a self, glob: &'a str, dialect: Dialect) -> impl Iterator<Item = &'a TypedefRecord> + 'a {
        self.iter(glob).filter(move |r| r.visible_in(dialect))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypedefRegistry {
    fn default() -> Self {
        Self::with_predefined()
    }
}

/// `set_all_types(sname, default_kind)` from §4.2: consults the registry to
/// adopt the scope kind of each prefix that names a known typedef whose
/// alias resolves to a tag type; unresolved prefixes take `default_kind`,
/// and the first scope named `std` is always forced to a namespace.
pub fn set_all_types(sname: &mut SName, default_kind: ScopeKind, registry: &TypedefRegistry, dialect: Dialect) {
    let scopes = sname.scopes().to_vec();
    let mut rebuilt = SName::empty();
    for (i, scope) in scopes.iter().enumerate() {
        rebuilt.append_name(scope.name.clone(), scope.kind);
        let prefix_kind = registry
            .find(&rebuilt)
            .filter(|record| record.visible_in(dialect))
            .and_then(|record| kind_of_typedef_target(record));

        let resolved = if scope.name == "std" && i == 0 {
            predefined::std_scope_kind()
        } else if let Some(kind) = prefix_kind {
            kind
        } else if scope.kind == ScopeKind::Scope {
            default_kind
        } else {
            scope.kind
        };

        rebuilt.scopes_mut()[i].kind = resolved;
    }
    rebuilt.fill_in_namespaces();
    *sname = rebuilt;
}

fn kind_of_typedef_target(record: &TypedefRecord) -> Option<ScopeKind> {
    match &record.ast.kind {
        cdeclish_ast::owned::OwnedKind::Tag { kind, .. } => Some(match kind {
            cdeclish_ast::TagKind::Class => ScopeKind::Class,
            cdeclish_ast::TagKind::Struct => ScopeKind::Struct,
            cdeclish_ast::TagKind::Union => ScopeKind::Union,
            cdeclish_ast::TagKind::Enum => ScopeKind::Class,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdeclish_ast::owned::{OwnedKind, OwnedNode};
    use cdeclish_base::Span;
    use cdeclish_types::{BaseTid, Type};

    fn int_node() -> OwnedNode {
        OwnedNode {
            kind: OwnedKind::Builtin(Type::base(BaseTid::INT)),
            span: Span::new(0, 0),
            alignas: None,
            bit_field_width: None,
            depth: 0,
            decl_flags: Type::NONE,
        }
    }

    fn float_node() -> OwnedNode {
        OwnedNode {
            kind: OwnedKind::Builtin(Type::base(BaseTid::FLOAT)),
            span: Span::new(0, 0),
            alignas: None,
            bit_field_width: None,
            depth: 0,
            decl_flags: Type::NONE,
        }
    }

    fn user_record(name: &str, ast: OwnedNode) -> TypedefRecord {
        TypedefRecord {
            sname: SName::from_single(name, ScopeKind::Scope),
            ast,
            dialects_defined_in: Dialect::ANY,
            is_predefined: false,
            is_hidden_from_show: false,
        }
    }

    #[test]
    fn predefined_table_loads_without_conflict() {
        let registry = TypedefRegistry::with_predefined();
        assert!(registry.len() >= 15);
        let size_t = SName::from_single("size_t", ScopeKind::Scope);
        assert!(registry.find(&size_t).is_some());
    }

    #[test]
    fn char16_t_hidden_before_c11() {
        let registry = TypedefRegistry::with_predefined();
        let name = SName::from_single("char16_t", ScopeKind::Scope);
        let record = registry.find(&name).unwrap();
        assert!(!record.visible_in(Dialect::C89));
        assert!(record.visible_in(Dialect::C11));
        assert!(record.visible_in(Dialect::CPP11));
    }

    #[test]
    fn add_same_type_twice_is_ok() {
        let mut registry = TypedefRegistry::empty();
        assert_eq!(registry.add(user_record("Meters", int_node())), AddOutcome::Ok);
        assert_eq!(registry.add(user_record("Meters", int_node())), AddOutcome::Ok);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_conflicting_type_is_rejected() {
        let mut registry = TypedefRegistry::empty();
        registry.add(user_record("Meters", int_node()));
        let outcome = registry.add(user_record("Meters", float_node()));
        match outcome {
            AddOutcome::Conflict(existing) => assert_eq!(existing.sname.local_name(), "Meters"),
            AddOutcome::Ok => panic!("expected a conflict"),
        }
    }

    #[test]
    fn remove_then_find_returns_none() {
        let mut registry = TypedefRegistry::empty();
        let name = SName::from_single("Meters", ScopeKind::Scope);
        registry.add(user_record("Meters", int_node()));
        registry.remove(&name);
        assert!(registry.find(&name).is_none());
    }

    #[test]
    fn remove_keeps_other_entries_findable() {
        let mut registry = TypedefRegistry::empty();
        registry.add(user_record("A", int_node()));
        registry.add(user_record("B", int_node()));
        registry.add(user_record("C", int_node()));
        registry.remove(&SName::from_single("B", ScopeKind::Scope));
        assert!(registry.find(&SName::from_single("A", ScopeKind::Scope)).is_some());
        assert!(registry.find(&SName::from_single("C", ScopeKind::Scope)).is_some());
    }

    #[test]
    fn iter_glob_matches_in_insertion_order() {
        let mut registry = TypedefRegistry::empty();
        registry.add(user_record("Widget_A", int_node()));
        registry.add(user_record("Other", int_node()));
        registry.add(user_record("Widget_B", int_node()));
        let names: Vec<&str> = registry.iter("Widget_*").map(|r| r.sname.local_name()).collect();
        assert_eq!(names, vec!["Widget_A", "Widget_B"]);
    }

    #[test]
    fn set_all_types_forces_std_namespace() {
        let registry = TypedefRegistry::with_predefined();
        let mut sname = SName::empty();
        sname.append_name("std", ScopeKind::Scope);
        sname.append_name("string", ScopeKind::Scope);
        set_all_types(&mut sname, ScopeKind::Scope, &registry, Dialect::CPP17);
        assert_eq!(sname.scopes()[0].kind, ScopeKind::Namespace { inline: false });
    }

    #[test]
    fn set_all_types_defaults_unknown_prefix() {
        let registry = TypedefRegistry::empty();
        let mut sname = SName::empty();
        sname.append_name("Outer", ScopeKind::Scope);
        sname.append_name("x", ScopeKind::Scope);
        set_all_types(&mut sname, ScopeKind::Namespace { inline: false }, &registry, Dialect::CPP17);
        assert_eq!(sname.scopes()[0].kind, ScopeKind::Namespace { inline: false });
    }
}
