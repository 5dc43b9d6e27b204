//! Rendering policy bitmasks consulted by the token emitters in [`crate::render`]
//! and (for declarator-level concerns) by `cdeclish-render`. These are the
//! type-atom-facing half of `cdeclish-options`'s `OptionState` (C8); they are
//! duplicated here, as plain bitsets, so this crate's renderers don't need a
//! dependency on the options crate.

use crate::tid::BaseTid;
use bitflags::bitflags;

bitflags! {
    /// Which signedness/width combinations must emit a redundant `int`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExplicitInt: u8 {
        const SIGNED_SHORT     = 1 << 0;
        const SIGNED_INT       = 1 << 1;
        const SIGNED_LONG      = 1 << 2;
        const SIGNED_LONG_LONG = 1 << 3;
        const UNSIGNED_SHORT     = 1 << 4;
        const UNSIGNED_INT       = 1 << 5;
        const UNSIGNED_LONG      = 1 << 6;
        const UNSIGNED_LONG_LONG = 1 << 7;
    }
}

impl ExplicitInt {
    /// True if, given the signedness/width atoms present in `base`, the
    /// policy says to spell out `int` even though it would be redundant.
    pub fn wants_explicit_int(self, base: BaseTid) -> bool {
        let signed = base.contains(BaseTid::SIGNED);
        let unsigned = base.contains(BaseTid::UNSIGNED);
        let width_flag = if base.contains(BaseTid::LONG_LONG) {
            if signed {
                ExplicitInt::SIGNED_LONG_LONG
            } else {
                ExplicitInt::UNSIGNED_LONG_LONG
            }
        } else if base.contains(BaseTid::LONG) {
            if signed {
                ExplicitInt::SIGNED_LONG
            } else {
                ExplicitInt::UNSIGNED_LONG
            }
        } else if base.contains(BaseTid::SHORT) {
            if signed {
                ExplicitInt::SIGNED_SHORT
            } else {
                ExplicitInt::UNSIGNED_SHORT
            }
        } else if signed {
            ExplicitInt::SIGNED_INT
        } else if unsigned {
            ExplicitInt::UNSIGNED_INT
        } else {
            return false;
        };
        self.contains(width_flag)
    }
}

bitflags! {
    /// Which tag keywords (`enum`/`class`/`struct`/`union`) get spelled out
    /// when rendering a C++ tag name whose kind is already implied by context.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExplicitEcsu: u8 {
        const ENUM   = 1 << 0;
        const CLASS  = 1 << 1;
        const STRUCT = 1 << 2;
        const UNION  = 1 << 3;
    }
}

impl ExplicitEcsu {
    pub fn wants_tag_keyword(self, base: BaseTid) -> bool {
        (base.contains(BaseTid::ENUM) && self.contains(ExplicitEcsu::ENUM))
            || (base.contains(BaseTid::CLASS) && self.contains(ExplicitEcsu::CLASS))
            || (base.contains(BaseTid::STRUCT) && self.contains(ExplicitEcsu::STRUCT))
            || (base.contains(BaseTid::UNION) && self.contains(ExplicitEcsu::UNION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_int_for_unsigned_short() {
        let policy = ExplicitInt::UNSIGNED_SHORT;
        let base = BaseTid::UNSIGNED | BaseTid::SHORT;
        assert!(policy.wants_explicit_int(base));
    }

    #[test]
    fn explicit_int_absent_by_default() {
        let policy = ExplicitInt::empty();
        let base = BaseTid::UNSIGNED | BaseTid::SHORT;
        assert!(!policy.wants_explicit_int(base));
    }

    #[test]
    fn explicit_int_does_not_fire_for_bare_int() {
        let policy = ExplicitInt::all();
        // Plain `int` with no signedness/width atoms is not covered by any
        // of the eight policy bits.
        assert!(!policy.wants_explicit_int(BaseTid::INT));
    }

    #[test]
    fn explicit_ecsu_for_struct() {
        let policy = ExplicitEcsu::STRUCT;
        assert!(policy.wants_tag_keyword(BaseTid::STRUCT));
        assert!(!policy.wants_tag_keyword(BaseTid::CLASS));
    }
}
