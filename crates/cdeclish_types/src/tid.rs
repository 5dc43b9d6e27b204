//! Type-part ids (TPIDs): the three disjoint bitsets a [`crate::ty::Type`] is
//! built from. Each bit lives in exactly one of these three sets, so a
//! cross-TPID combination is just "hold one of each" rather than a bit
//! collision to resolve.

use bitflags::bitflags;

bitflags! {
    /// Base-type atoms: scalar kinds, user-defined kinds, signedness, width.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BaseTid: u64 {
        const NONE      = 0;
        const VOID      = 1 << 0;
        const AUTO      = 1 << 1;
        const BOOL      = 1 << 2;
        const CHAR      = 1 << 3;
        const CHAR8_T   = 1 << 4;
        const CHAR16_T  = 1 << 5;
        const CHAR32_T  = 1 << 6;
        const WCHAR_T   = 1 << 7;
        const SHORT     = 1 << 8;
        const INT       = 1 << 9;
        const LONG      = 1 << 10;
        const LONG_LONG = 1 << 11;
        const SIGNED    = 1 << 12;
        const UNSIGNED  = 1 << 13;
        const FLOAT     = 1 << 14;
        const DOUBLE    = 1 << 15;
        const COMPLEX   = 1 << 16;
        const IMAGINARY = 1 << 17;
        const ENUM      = 1 << 18;
        const CLASS     = 1 << 19;
        const STRUCT    = 1 << 20;
        const UNION     = 1 << 21;

        /// The set of width modifiers: `short`, `long`, `long long`.
        const ANY_WIDTH = Self::SHORT.bits() | Self::LONG.bits() | Self::LONG_LONG.bits();
        /// The set of signedness modifiers.
        const ANY_SIGN = Self::SIGNED.bits() | Self::UNSIGNED.bits();
        /// The tag keywords: `enum`, `class`, `struct`, `union`.
        const ANY_ECSU = Self::ENUM.bits() | Self::CLASS.bits() | Self::STRUCT.bits() | Self::UNION.bits();
    }
}

bitflags! {
    /// Storage-class and function-qualifier-like atoms.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StorageTid: u64 {
        const NONE         = 0;
        const AUTO_STORAGE = 1 << 0;
        const EXTERN       = 1 << 1;
        const REGISTER     = 1 << 2;
        const STATIC       = 1 << 3;
        const THREAD_LOCAL = 1 << 4;
        const TYPEDEF      = 1 << 5;
        const MUTABLE      = 1 << 6;
        const VIRTUAL      = 1 << 7;
        const FRIEND       = 1 << 8;
        const EXPLICIT     = 1 << 9;
        const INLINE       = 1 << 10;
        const CONSTEXPR    = 1 << 11;
        const CONSTEVAL    = 1 << 12;
        const CONSTINIT    = 1 << 13;
        const NORETURN     = 1 << 14;
        const OVERRIDE     = 1 << 15;
        const FINAL        = 1 << 16;
        const PURE         = 1 << 17;
        const DEFAULT_FN   = 1 << 18;
        const DELETE_FN    = 1 << 19;

        /// Storage classes that are mutually exclusive per §4.4.3.
        const ANY_STORAGE_CLASS = Self::AUTO_STORAGE.bits()
            | Self::EXTERN.bits()
            | Self::REGISTER.bits()
            | Self::STATIC.bits()
            | Self::THREAD_LOCAL.bits()
            | Self::MUTABLE.bits();
    }
}

bitflags! {
    /// Qualifier and attribute atoms: cv-qualifiers, reference-qualifiers, etc.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrTid: u64 {
        const NONE       = 0;
        const CONST      = 1 << 0;
        const VOLATILE   = 1 << 1;
        const RESTRICT   = 1 << 2;
        const ATOMIC_Q   = 1 << 3;
        const REF        = 1 << 4;
        const RVALUE_REF = 1 << 5;
        const NOEXCEPT   = 1 << 6;

        const ANY_REF_QUALIFIER = Self::REF.bits() | Self::RVALUE_REF.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_group_covers_short_long_longlong() {
        assert!(BaseTid::ANY_WIDTH.contains(BaseTid::SHORT));
        assert!(BaseTid::ANY_WIDTH.contains(BaseTid::LONG));
        assert!(BaseTid::ANY_WIDTH.contains(BaseTid::LONG_LONG));
        assert!(!BaseTid::ANY_WIDTH.contains(BaseTid::INT));
    }

    #[test]
    fn storage_class_group_excludes_typedef_and_virtual() {
        assert!(!StorageTid::ANY_STORAGE_CLASS.contains(StorageTid::TYPEDEF));
        assert!(!StorageTid::ANY_STORAGE_CLASS.contains(StorageTid::VIRTUAL));
        assert!(StorageTid::ANY_STORAGE_CLASS.contains(StorageTid::STATIC));
    }

    #[test]
    fn ref_qualifier_group() {
        assert!(AttrTid::ANY_REF_QUALIFIER.contains(AttrTid::REF));
        assert!(AttrTid::ANY_REF_QUALIFIER.contains(AttrTid::RVALUE_REF));
    }
}
