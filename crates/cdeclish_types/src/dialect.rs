//! Dialect ids: a bitset of C/C++ language versions.
//!
//! Every type atom and every pairwise legality entry in [`crate::legal`] is
//! phrased in terms of a [`Dialect`] mask. `L ⊆ L'` implication (property P3
//! of the design: dialect monotonicity) falls directly out of treating these
//! as bitflags — a wider mask can only make more combinations legal.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// A set of C/C++ standard versions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Dialect: u32 {
        const KNR_C  = 1 << 0;
        const C89    = 1 << 1;
        const C95    = 1 << 2;
        const C99    = 1 << 3;
        const C11    = 1 << 4;
        const C17    = 1 << 5;
        const C23    = 1 << 6;
        const CPP98  = 1 << 7;
        const CPP03  = 1 << 8;
        const CPP11  = 1 << 9;
        const CPP14  = 1 << 10;
        const CPP17  = 1 << 11;
        const CPP20  = 1 << 12;
        const CPP23  = 1 << 13;
        const CPP26  = 1 << 14;
    }
}

impl Dialect {
    /// All recognized C dialects, K&R through C23.
    pub const ANY_C: Dialect = Dialect::KNR_C
        .union(Dialect::C89)
        .union(Dialect::C95)
        .union(Dialect::C99)
        .union(Dialect::C11)
        .union(Dialect::C17)
        .union(Dialect::C23);

    /// All recognized C++ dialects, C++98 through C++26.
    pub const ANY_CPP: Dialect = Dialect::CPP98
        .union(Dialect::CPP03)
        .union(Dialect::CPP11)
        .union(Dialect::CPP14)
        .union(Dialect::CPP17)
        .union(Dialect::CPP20)
        .union(Dialect::CPP23)
        .union(Dialect::CPP26);

    /// Every dialect this tool knows about.
    pub const ANY: Dialect = Dialect::ANY_C.union(Dialect::ANY_CPP);

    /// `L'` such that every dialect at or after `self` in its family (C or
    /// C++) is included. Used to express "legal from C11 onward".
    pub fn and_later(self) -> Dialect {
        const C_ORDER: [Dialect; 7] = [
            Dialect::KNR_C, Dialect::C89, Dialect::C95, Dialect::C99,
            Dialect::C11, Dialect::C17, Dialect::C23,
        ];
        const CPP_ORDER: [Dialect; 8] = [
            Dialect::CPP98, Dialect::CPP03, Dialect::CPP11, Dialect::CPP14,
            Dialect::CPP17, Dialect::CPP20, Dialect::CPP23, Dialect::CPP26,
        ];
        let mut out = Dialect::empty();
        if let Some(pos) = C_ORDER.iter().position(|d| *d == self) {
            for d in &C_ORDER[pos..] {
                out |= *d;
            }
        }
        if let Some(pos) = CPP_ORDER.iter().position(|d| *d == self) {
            for d in &CPP_ORDER[pos..] {
                out |= *d;
            }
        }
        out
    }

    /// True if this is exactly one dialect (as opposed to a mask of several).
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// A short display name, used in diagnostics ("not supported until C11/C++11").
    pub fn names(self) -> Vec<&'static str> {
        let table: &[(Dialect, &str)] = &[
            (Dialect::KNR_C, "K&R C"),
            (Dialect::C89, "C89"),
            (Dialect::C95, "C95"),
            (Dialect::C99, "C99"),
            (Dialect::C11, "C11"),
            (Dialect::C17, "C17"),
            (Dialect::C23, "C23"),
            (Dialect::CPP98, "C++98"),
            (Dialect::CPP03, "C++03"),
            (Dialect::CPP11, "C++11"),
            (Dialect::CPP14, "C++14"),
            (Dialect::CPP17, "C++17"),
            (Dialect::CPP20, "C++20"),
            (Dialect::CPP23, "C++23"),
            (Dialect::CPP26, "C++26"),
        ];
        table
            .iter()
            .filter(|(d, _)| self.contains(*d))
            .map(|(_, name)| *name)
            .collect()
    }

    /// The earliest dialect(s) in this mask, for "not supported until X" messages.
    pub fn earliest(self) -> Dialect {
        let mut earliest = Dialect::empty();
        if let Some(bit) = self.intersection(Dialect::ANY_C).iter().next() {
            earliest |= bit;
        }
        if let Some(bit) = self.intersection(Dialect::ANY_CPP).iter().next() {
            earliest |= bit;
        }
        earliest
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_later_includes_successors() {
        let from_c11 = Dialect::C11.and_later();
        assert!(from_c11.contains(Dialect::C11));
        assert!(from_c11.contains(Dialect::C17));
        assert!(from_c11.contains(Dialect::C23));
        assert!(!from_c11.contains(Dialect::C99));
    }

    #[test]
    fn monotonicity_subset_preserves_membership() {
        let l = Dialect::C11;
        let l_prime = Dialect::C11 | Dialect::C17;
        assert!(l.bits() & l_prime.bits() == l.bits());
    }

    #[test]
    fn display_joins_names() {
        let d = Dialect::C11 | Dialect::CPP11;
        let s = format!("{}", d);
        assert!(s.contains("C11"));
        assert!(s.contains("C++11"));
    }

    #[test]
    fn earliest_picks_first_per_family() {
        let d = Dialect::C11.and_later() | Dialect::CPP11.and_later();
        let e = d.earliest();
        assert!(e.contains(Dialect::C11));
        assert!(e.contains(Dialect::CPP11));
        assert!(!e.contains(Dialect::C17));
    }
}
