//! # cdeclish-sname
//!
//! Scoped names (component C2): an ordered list of scopes from outermost to
//! innermost, e.g. `A::B::x`. The last scope is the *local* name; everything
//! before it is the *scope*.

pub mod glob;

use std::cmp::Ordering;
use std::fmt;

/// What kind of scope a name segment denotes.
///
/// `Scope` is the "unresolved" kind: the parser saw `Foo::` but has not yet
/// learned (via the typedef registry, C7) whether `Foo` is a namespace,
/// class, struct, or union. [`SName::fill_in_namespaces`] upgrades these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Class,
    Struct,
    Union,
    /// `inline namespace` when `true`.
    Namespace { inline: bool },
    /// Not yet resolved to one of the above.
    Scope,
}

impl ScopeKind {
    pub fn is_namespace(&self) -> bool {
        matches!(self, ScopeKind::Namespace { .. })
    }

    pub fn is_class_like(&self) -> bool {
        matches!(self, ScopeKind::Class | ScopeKind::Struct | ScopeKind::Union)
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Class => write!(f, "class"),
            ScopeKind::Struct => write!(f, "struct"),
            ScopeKind::Union => write!(f, "union"),
            ScopeKind::Namespace { inline: true } => write!(f, "inline namespace"),
            ScopeKind::Namespace { inline: false } => write!(f, "namespace"),
            ScopeKind::Scope => write!(f, "scope"),
        }
    }
}

/// One segment of a scoped name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub name: String,
    pub kind: ScopeKind,
}

impl Scope {
    pub fn new(name: impl Into<String>, kind: ScopeKind) -> Self {
        Scope { name: name.into(), kind }
    }
}

impl PartialOrd for Scope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scope {
    /// Lexicographic by `(name, kind)` per the design's comparison rule.
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| kind_rank(&self.kind).cmp(&kind_rank(&other.kind)))
    }
}

fn kind_rank(k: &ScopeKind) -> u8 {
    match k {
        ScopeKind::Class => 0,
        ScopeKind::Struct => 1,
        ScopeKind::Union => 2,
        ScopeKind::Namespace { inline: false } => 3,
        ScopeKind::Namespace { inline: true } => 4,
        ScopeKind::Scope => 5,
    }
}

/// A fully- or partially-scoped identifier: `A::B::x`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SName {
    scopes: Vec<Scope>,
}

/// Error returned when an [`SName`] invariant would be violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SNameError {
    /// A namespace was nested inside a class/struct/union.
    NamespaceInClassScope,
    /// `std` was used as an outermost name with a non-namespace kind.
    StdMustBeNamespace,
}

impl fmt::Display for SNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SNameError::NamespaceInClassScope => {
                write!(f, "a namespace cannot nest inside a class, struct, or union")
            }
            SNameError::StdMustBeNamespace => write!(f, "`std` must be a namespace"),
        }
    }
}

impl std::error::Error for SNameError {}

impl SName {
    /// An empty scoped name.
    pub fn empty() -> Self {
        SName { scopes: Vec::new() }
    }

    /// Parses a leading `identifier ("::" identifier)*` subsequence of `s`.
    ///
    /// Returns the number of bytes consumed and the parsed name. Every
    /// segment except the last is given [`ScopeKind::Scope`] (unresolved);
    /// the caller (or [`SName::fill_in_namespaces`]) refines these later.
    pub fn parse(s: &str) -> Option<(usize, SName)> {
        let mut scopes = Vec::new();
        let mut consumed = 0usize;
        let bytes = s.as_bytes();
        loop {
            let ident_start = consumed;
            while consumed < bytes.len() {
                let c = bytes[consumed] as char;
                if c.is_alphanumeric() || c == '_' {
                    consumed += 1;
                } else {
                    break;
                }
            }
            if consumed == ident_start {
                break;
            }
            let first = s[ident_start..consumed].chars().next().unwrap();
            if first.is_ascii_digit() {
                return if scopes.is_empty() { None } else { Some((ident_start, SName { scopes })) };
            }
            scopes.push(Scope::new(&s[ident_start..consumed], ScopeKind::Scope));

            if s[consumed..].starts_with("::") {
                consumed += 2;
                continue;
            }
            break;
        }
        if scopes.is_empty() {
            None
        } else {
            if let Some(last) = scopes.last_mut() {
                last.kind = ScopeKind::Scope;
            }
            Some((consumed, SName { scopes }))
        }
    }

    pub fn from_single(name: impl Into<String>, kind: ScopeKind) -> Self {
        SName { scopes: vec![Scope::new(name, kind)] }
    }

    pub fn count(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Mutable access to the scope list, for callers (the typedef registry's
    /// `set_all_types`) that resolve each segment's kind in place.
    pub fn scopes_mut(&mut self) -> &mut [Scope] {
        &mut self.scopes
    }

    /// The innermost (last) segment's name.
    pub fn local_name(&self) -> &str {
        self.scopes.last().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Everything before the local name, as its own `SName`.
    pub fn scope_sname(&self) -> SName {
        if self.scopes.is_empty() {
            return SName::empty();
        }
        SName { scopes: self.scopes[..self.scopes.len() - 1].to_vec() }
    }

    /// The fully-joined `A::B::x` form.
    pub fn global_name(&self) -> String {
        self.scopes
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("::")
    }

    /// Appends a bare identifier as a new innermost segment.
    pub fn append_name(&mut self, name: impl Into<String>, kind: ScopeKind) {
        self.scopes.push(Scope::new(name, kind));
    }

    /// Appends another `SName`'s segments after this one's.
    pub fn append_sname(&mut self, other: SName) {
        self.scopes.extend(other.scopes);
    }

    /// Prepends another `SName`'s segments before this one's.
    pub fn prepend_sname(&mut self, mut other: SName) {
        other.scopes.extend(self.scopes.drain(..));
        self.scopes = other.scopes;
    }

    /// Is the last scope a constructor/destructor name (matches the class
    /// it nests in, by spelling)? This is the one case where two adjacent
    /// scopes may be identical by name.
    pub fn is_ctor(&self) -> bool {
        if self.scopes.len() < 2 {
            return false;
        }
        let n = self.scopes.len();
        self.scopes[n - 1].name == self.scopes[n - 2].name
    }

    /// Upgrades unresolved (`Scope`) entries above a `Namespace` local to
    /// `Namespace` as well: once we know the innermost prefix is a
    /// namespace, everything enclosing it must be too.
    pub fn fill_in_namespaces(&mut self) {
        let namespace_from = self
            .scopes
            .iter()
            .position(|s| s.kind.is_namespace());
        if let Some(pos) = namespace_from {
            for scope in &mut self.scopes[..pos] {
                if scope.kind == ScopeKind::Scope {
                    scope.kind = ScopeKind::Namespace { inline: false };
                }
            }
        }
    }

    /// Validates the nesting invariants: namespaces may only nest inside
    /// namespaces or unresolved scopes; a class/struct/union may not
    /// contain a namespace; the outermost `std` is always a namespace.
    pub fn validate(&self) -> Result<(), SNameError> {
        for window in self.scopes.windows(2) {
            let (outer, inner) = (&window[0], &window[1]);
            if inner.kind.is_namespace() && outer.kind.is_class_like() {
                return Err(SNameError::NamespaceInClassScope);
            }
        }
        if let Some(first) = self.scopes.first() {
            if first.name == "std" && !first.kind.is_namespace() {
                return Err(SNameError::StdMustBeNamespace);
            }
        }
        Ok(())
    }

    /// Forces the outermost `std` segment, if present, to `Namespace`.
    pub fn force_std_namespace(&mut self) {
        if let Some(first) = self.scopes.first_mut() {
            if first.name == "std" {
                first.kind = ScopeKind::Namespace { inline: false };
            }
        }
    }

    /// Does `self` match the glob pattern (see [`glob`])?
    pub fn matches(&self, pattern: &str) -> bool {
        glob::matches(self, pattern)
    }
}

impl fmt::Display for SName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.global_name())
    }
}

impl PartialOrd for SName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scopes.cmp(&other.scopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_identifier() {
        let (consumed, sname) = SName::parse("foo").unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(sname.local_name(), "foo");
        assert_eq!(sname.count(), 1);
    }

    #[test]
    fn parse_scoped_name() {
        let (consumed, sname) = SName::parse("std::string rest").unwrap();
        assert_eq!(consumed, 11);
        assert_eq!(sname.global_name(), "std::string");
        assert_eq!(sname.count(), 2);
    }

    #[test]
    fn parse_stops_at_non_identifier() {
        let (consumed, sname) = SName::parse("A::B(x)").unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(sname.global_name(), "A::B");
    }

    #[test]
    fn parse_rejects_leading_digit() {
        assert!(SName::parse("123abc").is_none());
    }

    #[test]
    fn local_and_scope_sname() {
        let (_, sname) = SName::parse("A::B::x").unwrap();
        assert_eq!(sname.local_name(), "x");
        assert_eq!(sname.scope_sname().global_name(), "A::B");
    }

    #[test]
    fn append_and_prepend() {
        let mut sname = SName::from_single("x", ScopeKind::Scope);
        sname.prepend_sname(SName::from_single("A", ScopeKind::Namespace { inline: false }));
        assert_eq!(sname.global_name(), "A::x");
        sname.append_name("y", ScopeKind::Scope);
        assert_eq!(sname.global_name(), "A::x::y");
    }

    #[test]
    fn fill_in_namespaces_upgrades_prefix() {
        let mut sname = SName::empty();
        sname.append_name("A", ScopeKind::Scope);
        sname.append_name("B", ScopeKind::Namespace { inline: false });
        sname.append_name("x", ScopeKind::Scope);
        sname.fill_in_namespaces();
        assert_eq!(sname.scopes()[0].kind, ScopeKind::Namespace { inline: false });
    }

    #[test]
    fn std_outermost_must_be_namespace() {
        let mut sname = SName::empty();
        sname.append_name("std", ScopeKind::Scope);
        sname.append_name("string", ScopeKind::Scope);
        assert_eq!(sname.validate(), Err(SNameError::StdMustBeNamespace));
        sname.force_std_namespace();
        assert!(sname.validate().is_ok());
    }

    #[test]
    fn namespace_cannot_nest_in_class() {
        let mut sname = SName::empty();
        sname.append_name("C", ScopeKind::Class);
        sname.append_name("N", ScopeKind::Namespace { inline: false });
        assert_eq!(sname.validate(), Err(SNameError::NamespaceInClassScope));
    }

    #[test]
    fn is_ctor_detects_repeated_trailing_name() {
        let mut sname = SName::empty();
        sname.append_name("Widget", ScopeKind::Class);
        sname.append_name("Widget", ScopeKind::Scope);
        assert!(sname.is_ctor());
    }

    #[test]
    fn comparison_is_lexicographic() {
        let a = SName::from_single("a", ScopeKind::Scope);
        let b = SName::from_single("b", ScopeKind::Scope);
        assert!(a < b);
    }
}
