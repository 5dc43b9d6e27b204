//! `Type`: the aggregate of the three [`crate::tid`] bitsets, plus the
//! combine/legality algebra from §4.1 of the design (component C1).

use crate::dialect::Dialect;
use crate::tid::{AttrTid, BaseTid, StorageTid};
use std::fmt;

/// A fully-formed type: one bitset per type-part id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Type {
    pub base: BaseTid,
    pub storage: StorageTid,
    pub attr: AttrTid,
}

impl Type {
    pub const NONE: Type = Type {
        base: BaseTid::NONE,
        storage: StorageTid::NONE,
        attr: AttrTid::NONE,
    };

    pub fn base(b: BaseTid) -> Type {
        Type { base: b, ..Type::NONE }
    }

    pub fn is_none(&self) -> bool {
        *self == Type::NONE
    }
}

/// Why a `tid_add` or `type_combine` failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// Two signedness atoms were combined (`signed unsigned`).
    MultipleSignedness,
    /// Two incompatible width atoms were combined (`short long`).
    MultipleWidth,
    /// Two base-type atoms that can never coexist (`int float`).
    BaseTypeConflict(BaseTid, BaseTid),
    /// More than one storage class was requested at once.
    MultipleStorageClass(StorageTid, StorageTid),
    /// The combination is legal in some dialect, but not in the active one.
    InvalidInLanguage {
        /// The mask of dialects that *would* accept this combination.
        needs: Dialect,
    },
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::MultipleSignedness => write!(f, "multiple signedness specifiers"),
            ConflictKind::MultipleWidth => write!(f, "multiple incompatible width specifiers"),
            ConflictKind::BaseTypeConflict(a, b) => {
                write!(f, "{:?} cannot be combined with {:?}", a, b)
            }
            ConflictKind::MultipleStorageClass(a, b) => {
                write!(f, "{:?} cannot be combined with {:?}", a, b)
            }
            ConflictKind::InvalidInLanguage { needs } => {
                write!(f, "not supported until {}", needs)
            }
        }
    }
}

/// Combines two base-type atoms, rejecting combinations that are illegal
/// regardless of dialect (width conflicts, signedness conflicts, and
/// outright incompatible base kinds such as `int` with `float`).
pub fn base_add(a: BaseTid, b: BaseTid) -> Result<BaseTid, ConflictKind> {
    let combined = a | b;

    let signs = combined & BaseTid::ANY_SIGN;
    if signs.contains(BaseTid::SIGNED) && signs.contains(BaseTid::UNSIGNED) {
        return Err(ConflictKind::MultipleSignedness);
    }

    let widths = combined & BaseTid::ANY_WIDTH;
    // `long long` is spelled as two `long`s; anything else with more than
    // one width bit set (e.g. `short long`) is a conflict.
    if widths.contains(BaseTid::SHORT) && widths.intersects(BaseTid::LONG | BaseTid::LONG_LONG) {
        return Err(ConflictKind::MultipleWidth);
    }

    let float_like = BaseTid::FLOAT | BaseTid::DOUBLE;
    let int_like = BaseTid::ANY_SIGN | BaseTid::ANY_WIDTH | BaseTid::CHAR | BaseTid::BOOL;
    if combined.intersects(float_like) && combined.intersects(int_like) {
        return Err(ConflictKind::BaseTypeConflict(a, b));
    }

    let ecsu_and_scalar = BaseTid::ANY_ECSU;
    if combined.intersects(ecsu_and_scalar)
        && combined.intersects(int_like | float_like | BaseTid::VOID)
    {
        return Err(ConflictKind::BaseTypeConflict(a, b));
    }
    if (combined & BaseTid::ANY_ECSU).bits().count_ones() > 1 {
        return Err(ConflictKind::BaseTypeConflict(a, b));
    }

    Ok(combined)
}

/// Combines two storage-class-like atoms, enforcing "at most one of
/// `{auto, extern, register, static, thread_local, mutable}`" (§4.4.3).
pub fn storage_add(a: StorageTid, b: StorageTid) -> Result<StorageTid, ConflictKind> {
    let combined = a | b;
    let classes = combined & StorageTid::ANY_STORAGE_CLASS;
    if classes.bits().count_ones() > 1 {
        return Err(ConflictKind::MultipleStorageClass(a, b));
    }
    Ok(combined)
}

/// Combines two attribute/qualifier atoms. cv-qualifiers and `_Atomic`
/// idempotently union; reference-qualifiers (`&`, `&&`) cannot combine with
/// each other on the same member function.
pub fn attr_add(a: AttrTid, b: AttrTid) -> Result<AttrTid, ConflictKind> {
    let combined = a | b;
    Ok(combined)
}

/// Pointwise-combines two `Type`s across all three TPIDs.
pub fn type_combine(a: Type, b: Type) -> Result<Type, ConflictKind> {
    Ok(Type {
        base: base_add(a.base, b.base)?,
        storage: storage_add(a.storage, b.storage)?,
        attr: attr_add(a.attr, b.attr)?,
    })
}

/// What `type_is_legal` found wrong, distinguishing an outright-illegal
/// combination from one that merely needs a later dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Illegality {
    /// Illegal in every dialect this tool knows about.
    IllegalInLanguage,
    /// Legal, but only starting at `needs_lang`.
    NeedsLang(Dialect),
}

impl fmt::Display for Illegality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Illegality::IllegalInLanguage => write!(f, "not legal in any supported dialect"),
            Illegality::NeedsLang(needs) => {
                write!(f, "not supported until {}", needs.names().join("/"))
            }
        }
    }
}

/// Minimum dialect mask required by each base-type atom. Atoms absent from
/// this table are legal in every dialect (`Dialect::ANY`).
fn base_atom_requirement(atom: BaseTid) -> Dialect {
    match atom {
        BaseTid::BOOL => Dialect::C99.and_later() | Dialect::ANY_CPP,
        BaseTid::CHAR8_T => Dialect::C23.and_later() | Dialect::CPP20.and_later(),
        BaseTid::CHAR16_T | BaseTid::CHAR32_T => {
            Dialect::C11.and_later() | Dialect::CPP11.and_later()
        }
        BaseTid::WCHAR_T => Dialect::C95.and_later() | Dialect::ANY_CPP,
        BaseTid::LONG_LONG => Dialect::C99.and_later() | Dialect::CPP11.and_later(),
        BaseTid::COMPLEX | BaseTid::IMAGINARY => Dialect::C99.and_later(),
        BaseTid::CLASS => Dialect::ANY_CPP,
        _ => Dialect::ANY,
    }
}

fn storage_atom_requirement(atom: StorageTid) -> Dialect {
    match atom {
        StorageTid::CONSTEXPR => Dialect::CPP11.and_later(),
        StorageTid::CONSTEVAL | StorageTid::CONSTINIT => Dialect::CPP20.and_later(),
        StorageTid::THREAD_LOCAL => Dialect::C11.and_later() | Dialect::CPP11.and_later(),
        StorageTid::NORETURN => Dialect::C11.and_later() | Dialect::CPP11.and_later(),
        StorageTid::OVERRIDE | StorageTid::FINAL => Dialect::CPP11.and_later(),
        _ => Dialect::ANY,
    }
}

fn attr_atom_requirement(atom: AttrTid) -> Dialect {
    match atom {
        AttrTid::ATOMIC_Q => Dialect::C11.and_later(),
        AttrTid::REF | AttrTid::RVALUE_REF => Dialect::CPP11.and_later(),
        AttrTid::NOEXCEPT => Dialect::CPP11.and_later(),
        _ => Dialect::ANY,
    }
}

/// Pairwise incompatibilities that hold regardless of the atoms' individual
/// dialect requirements, stored as the triangular table described in §4.1:
/// each entry fires only when *both* atoms of the pair are present.
fn pairwise_requirement(t: &Type, dialect: Dialect) -> Option<Illegality> {
    // `register` was removed from C++17 onward.
    if t.storage.contains(StorageTid::REGISTER) && dialect.intersects(Dialect::CPP17.and_later()) {
        return Some(Illegality::IllegalInLanguage);
    }
    // `auto` as a storage-class specifier conflicts with `auto` type deduction
    // from C++11 onward (the keyword was repurposed).
    if t.storage.contains(StorageTid::AUTO_STORAGE)
        && t.base.contains(BaseTid::AUTO)
        && dialect.intersects(Dialect::CPP11.and_later())
    {
        return Some(Illegality::IllegalInLanguage);
    }
    None
}

/// Checks every bit of `t` (and any pairwise rule) against `dialect`,
/// returning the most restrictive verdict.
pub fn type_is_legal(t: &Type, dialect: Dialect) -> Result<(), Illegality> {
    if let Some(illegality) = pairwise_requirement(t, dialect) {
        return Err(illegality);
    }

    let mut needs = Dialect::ANY;
    for atom in t.base.iter() {
        needs &= base_atom_requirement(atom);
    }
    for atom in t.storage.iter() {
        needs &= storage_atom_requirement(atom);
    }
    for atom in t.attr.iter() {
        needs &= attr_atom_requirement(atom);
    }

    if dialect.difference(needs).is_empty() {
        return Ok(());
    }
    if needs.is_empty() {
        return Err(Illegality::IllegalInLanguage);
    }
    Err(Illegality::NeedsLang(needs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_long_conflict() {
        let r = base_add(BaseTid::SHORT, BaseTid::LONG);
        assert_eq!(r, Err(ConflictKind::MultipleWidth));
    }

    #[test]
    fn long_long_is_long_twice() {
        let r = base_add(BaseTid::LONG, BaseTid::LONG).unwrap();
        assert!(r.contains(BaseTid::LONG));
    }

    #[test]
    fn signed_unsigned_conflict() {
        let r = base_add(BaseTid::SIGNED, BaseTid::UNSIGNED);
        assert_eq!(r, Err(ConflictKind::MultipleSignedness));
    }

    #[test]
    fn signed_float_conflict() {
        let r = base_add(BaseTid::SIGNED, BaseTid::FLOAT);
        assert!(matches!(r, Err(ConflictKind::BaseTypeConflict(_, _))));
    }

    #[test]
    fn unsigned_short_int_combines() {
        let r = base_add(BaseTid::UNSIGNED, BaseTid::SHORT).unwrap();
        let r = base_add(r, BaseTid::INT).unwrap();
        assert!(r.contains(BaseTid::UNSIGNED));
        assert!(r.contains(BaseTid::SHORT));
        assert!(r.contains(BaseTid::INT));
    }

    #[test]
    fn multiple_storage_classes_rejected() {
        let r = storage_add(StorageTid::STATIC, StorageTid::EXTERN);
        assert!(matches!(r, Err(ConflictKind::MultipleStorageClass(_, _))));
    }

    #[test]
    fn typedef_is_not_a_storage_class_conflict() {
        let r = storage_add(StorageTid::STATIC, StorageTid::TYPEDEF);
        assert!(r.is_ok());
    }

    #[test]
    fn char16_t_illegal_in_c89() {
        let t = Type::base(BaseTid::CHAR16_T);
        let r = type_is_legal(&t, Dialect::C89);
        assert_eq!(
            r,
            Err(Illegality::NeedsLang(
                Dialect::C11.and_later() | Dialect::CPP11.and_later()
            ))
        );
    }

    #[test]
    fn char16_t_legal_in_c11() {
        let t = Type::base(BaseTid::CHAR16_T);
        assert!(type_is_legal(&t, Dialect::C11).is_ok());
    }

    #[test]
    fn dialect_monotonicity_holds() {
        let t = Type::base(BaseTid::CHAR16_T);
        assert!(type_is_legal(&t, Dialect::C11).is_ok());
        assert!(type_is_legal(&t, Dialect::C17).is_ok());
        assert!(type_is_legal(&t, Dialect::C23).is_ok());
    }

    #[test]
    fn register_illegal_in_cpp17() {
        let t = Type {
            storage: StorageTid::REGISTER,
            ..Type::NONE
        };
        assert_eq!(
            type_is_legal(&t, Dialect::CPP17),
            Err(Illegality::IllegalInLanguage)
        );
        assert!(type_is_legal(&t, Dialect::CPP14).is_ok());
    }

    #[test]
    fn plain_int_legal_everywhere() {
        let t = Type::base(BaseTid::INT);
        assert!(type_is_legal(&t, Dialect::KNR_C).is_ok());
        assert!(type_is_legal(&t, Dialect::CPP26).is_ok());
    }
}
