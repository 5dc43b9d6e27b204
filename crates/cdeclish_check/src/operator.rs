//! The per-operator arity table from §4.4.8: how many declared parameters
//! an overloaded operator's declarator may take, distinguishing member from
//! non-member (free-function) form.
//!
//! The AST has no explicit "this is a member" marker on an [`OperatorId`]
//! node — a declarator is just a type. We treat the presence of a
//! cv-qualifier, ref-qualifier, or `virtual`/`override`/`final`/pure-spec on
//! the operator's own `qualifiers` as proof it is a member (only member
//! functions can carry those), and non-member otherwise.

use cdeclish_ast::OperatorId;
use cdeclish_types::{AttrTid, StorageTid, Type};

pub fn looks_like_member(qualifiers: Type) -> bool {
    qualifiers.attr.intersects(AttrTid::CONST | AttrTid::VOLATILE | AttrTid::ANY_REF_QUALIFIER)
        || qualifiers
            .storage
            .intersects(StorageTid::VIRTUAL | StorageTid::OVERRIDE | StorageTid::FINAL | StorageTid::PURE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Exact(usize),
    OneOf(&'static [usize]),
}

impl Expected {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Expected::Exact(k) => n == k,
            Expected::OneOf(ks) => ks.contains(&n),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Expected::Exact(0) => "no parameters",
            Expected::Exact(1) => "exactly one parameter",
            Expected::Exact(2) => "exactly two parameters",
            Expected::Exact(_) => "a fixed number of parameters",
            Expected::OneOf(_) => "zero or one parameter",
        }
    }
}

/// The expected arity for `op` given whether its declarator looks like a
/// member. Returns `None` for operators whose arity this table does not
/// constrain (`()`, `[]`, `new`/`delete` family: all accept a
/// caller-defined parameter list).
pub fn expected_arity(op: OperatorId, is_member: bool) -> Option<Expected> {
    if op.unary_only() {
        return Some(Expected::Exact(if is_member { 0 } else { 1 }));
    }
    if op.binary_only() {
        return Some(Expected::Exact(if is_member { 1 } else { 2 }));
    }
    if op.ambiguous_arity() {
        return Some(if is_member { Expected::OneOf(&[0, 1]) } else { Expected::OneOf(&[1, 2]) });
    }
    if op.is_assignment() {
        return Some(Expected::Exact(if is_member { 1 } else { 2 }));
    }
    match op {
        OperatorId::PlusPlus | OperatorId::MinusMinus => {
            Some(if is_member { Expected::OneOf(&[0, 1]) } else { Expected::OneOf(&[1, 2]) })
        }
        OperatorId::Comma => Some(Expected::Exact(if is_member { 1 } else { 2 })),
        OperatorId::Arrow | OperatorId::ArrowStar => Some(Expected::Exact(if is_member { 0 } else { 1 })),
        OperatorId::Call | OperatorId::Subscript => None,
        OperatorId::New | OperatorId::NewArray | OperatorId::Delete | OperatorId::DeleteArray => None,
        _ => None,
    }
}

/// Operators that C++ requires to be a non-static member (never a free
/// function): `()`, `->`, `->*`, and (pre-C++23) `[]`.
pub fn must_be_member(op: OperatorId) -> bool {
    matches!(op, OperatorId::Call | OperatorId::Arrow | OperatorId::ArrowStar | OperatorId::Assign)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_only_member_takes_zero() {
        assert_eq!(expected_arity(OperatorId::Tilde, true), Some(Expected::Exact(0)));
        assert_eq!(expected_arity(OperatorId::Tilde, false), Some(Expected::Exact(1)));
    }

    #[test]
    fn ambiguous_arity_accepts_either_form() {
        let member = expected_arity(OperatorId::Plus, true).unwrap();
        assert!(member.accepts(0));
        assert!(member.accepts(1));
        assert!(!member.accepts(2));
    }

    #[test]
    fn call_has_no_fixed_arity() {
        assert_eq!(expected_arity(OperatorId::Call, true), None);
    }

    #[test]
    fn assign_must_be_member() {
        assert!(must_be_member(OperatorId::Assign));
        assert!(!must_be_member(OperatorId::Plus));
    }
}
