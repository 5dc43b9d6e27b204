//! Ordered token emission for a bare [`crate::ty::Type`] — no declarator
//! nesting, just the atoms of one typed node. `cdeclish-render` builds the
//! full declaration/English strings on top of this by interleaving these
//! tokens with declarator syntax.

use crate::policy::{ExplicitEcsu, ExplicitInt};
use crate::tid::{AttrTid, BaseTid, StorageTid};
use crate::ty::Type;

/// Storage-class and function-linkage keywords, in declaration order.
/// Exposed (not just used internally by [`type_decl`]) because the English
/// renderer needs the same words in its own narrative order.
pub fn storage_tokens(s: StorageTid) -> Vec<&'static str> {
    let mut out = Vec::new();
    if s.contains(StorageTid::TYPEDEF) {
        out.push("typedef");
    }
    if s.contains(StorageTid::EXTERN) {
        out.push("extern");
    }
    if s.contains(StorageTid::STATIC) {
        out.push("static");
    }
    if s.contains(StorageTid::AUTO_STORAGE) {
        out.push("auto");
    }
    if s.contains(StorageTid::REGISTER) {
        out.push("register");
    }
    if s.contains(StorageTid::THREAD_LOCAL) {
        out.push("thread_local");
    }
    if s.contains(StorageTid::MUTABLE) {
        out.push("mutable");
    }
    if s.contains(StorageTid::FRIEND) {
        out.push("friend");
    }
    if s.contains(StorageTid::VIRTUAL) {
        out.push("virtual");
    }
    if s.contains(StorageTid::EXPLICIT) {
        out.push("explicit");
    }
    if s.contains(StorageTid::INLINE) {
        out.push("inline");
    }
    if s.contains(StorageTid::CONSTEXPR) {
        out.push("constexpr");
    }
    if s.contains(StorageTid::CONSTEVAL) {
        out.push("consteval");
    }
    if s.contains(StorageTid::CONSTINIT) {
        out.push("constinit");
    }
    if s.contains(StorageTid::NORETURN) {
        out.push("_Noreturn");
    }
    out
}

/// `_Atomic`-style qualifiers that precede the base atom rather than follow it.
pub fn attr_tokens_pre(a: AttrTid) -> Vec<&'static str> {
    let mut out = Vec::new();
    if a.contains(AttrTid::ATOMIC_Q) {
        out.push("_Atomic");
    }
    out
}

/// cv-qualifiers and the like, rendered separately so the declaration
/// renderer can place them before or after the atom per the east-const policy.
pub fn cv_tokens(a: AttrTid) -> Vec<&'static str> {
    let mut out = Vec::new();
    if a.contains(AttrTid::CONST) {
        out.push("const");
    }
    if a.contains(AttrTid::VOLATILE) {
        out.push("volatile");
    }
    if a.contains(AttrTid::RESTRICT) {
        out.push("restrict");
    }
    out
}

fn base_tokens(b: BaseTid, explicit_int: ExplicitInt, explicit_ecsu: ExplicitEcsu) -> Vec<&'static str> {
    let mut out = Vec::new();
    if b.contains(BaseTid::SIGNED) {
        out.push("signed");
    }
    if b.contains(BaseTid::UNSIGNED) {
        out.push("unsigned");
    }
    if b.contains(BaseTid::SHORT) {
        out.push("short");
    }
    if b.contains(BaseTid::LONG_LONG) {
        out.push("long");
        out.push("long");
    } else if b.contains(BaseTid::LONG) {
        out.push("long");
    }

    let base_without_sign_width = b - BaseTid::ANY_SIGN - BaseTid::ANY_WIDTH;
    let had_sign_or_width = !out.is_empty();
    if base_without_sign_width.contains(BaseTid::VOID) {
        out.push("void");
    } else if base_without_sign_width.contains(BaseTid::BOOL) {
        out.push("bool");
    } else if base_without_sign_width.contains(BaseTid::CHAR) {
        out.push("char");
    } else if base_without_sign_width.contains(BaseTid::CHAR8_T) {
        out.push("char8_t");
    } else if base_without_sign_width.contains(BaseTid::CHAR16_T) {
        out.push("char16_t");
    } else if base_without_sign_width.contains(BaseTid::CHAR32_T) {
        out.push("char32_t");
    } else if base_without_sign_width.contains(BaseTid::WCHAR_T) {
        out.push("wchar_t");
    } else if base_without_sign_width.contains(BaseTid::FLOAT) {
        out.push("float");
    } else if base_without_sign_width.contains(BaseTid::DOUBLE) {
        out.push("double");
    } else if base_without_sign_width.contains(BaseTid::AUTO) {
        out.push("auto");
    } else if !had_sign_or_width || explicit_int.wants_explicit_int(b) {
        // `int` is implied by a bare signedness/width modifier; only spell
        // it out when nothing else was emitted, or the explicit-int policy
        // asks for the redundant keyword.
        out.push("int");
    }

    if b.contains(BaseTid::COMPLEX) {
        out.push("_Complex");
    }
    if b.contains(BaseTid::IMAGINARY) {
        out.push("_Imaginary");
    }

    let _ = explicit_ecsu; // tag keyword emission is driven by the AST's tag node, not here
    out
}

/// Emits the ordered C/C++ declaration tokens for a bare type:
/// `[storage] [attrs] [signedness] [width] [base] [cv]`.
pub fn type_decl(t: &Type, explicit_int: ExplicitInt, explicit_ecsu: ExplicitEcsu) -> String {
    let mut tokens: Vec<String> = Vec::new();
    tokens.extend(storage_tokens(t.storage).into_iter().map(String::from));
    tokens.extend(attr_tokens_pre(t.attr).into_iter().map(String::from));
    tokens.extend(base_tokens(t.base, explicit_int, explicit_ecsu).into_iter().map(String::from));
    tokens.extend(cv_tokens(t.attr).into_iter().map(String::from));
    tokens.join(" ")
}

/// Emits the narrative English order: qualifiers/storage first, then the
/// base atom, reading naturally as "declare x as const int".
pub fn type_english(t: &Type, explicit_int: ExplicitInt) -> String {
    let mut tokens: Vec<String> = Vec::new();
    tokens.extend(storage_tokens(t.storage).into_iter().map(String::from));
    tokens.extend(cv_tokens(t.attr).into_iter().map(String::from));
    tokens.extend(base_tokens(t.base, explicit_int, ExplicitEcsu::empty()).into_iter().map(String::from));
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_int_decl() {
        let t = Type::base(BaseTid::INT);
        assert_eq!(type_decl(&t, ExplicitInt::empty(), ExplicitEcsu::empty()), "int");
    }

    #[test]
    fn unsigned_short_without_explicit_int() {
        let t = Type::base(BaseTid::UNSIGNED | BaseTid::SHORT);
        assert_eq!(
            type_decl(&t, ExplicitInt::empty(), ExplicitEcsu::empty()),
            "unsigned short"
        );
    }

    #[test]
    fn unsigned_short_with_explicit_int() {
        let t = Type::base(BaseTid::UNSIGNED | BaseTid::SHORT);
        let r = type_decl(&t, ExplicitInt::UNSIGNED_SHORT, ExplicitEcsu::empty());
        assert_eq!(r, "unsigned short int");
    }

    #[test]
    fn const_int_east_west_tokens_available_separately() {
        let t = Type {
            base: BaseTid::INT,
            attr: AttrTid::CONST,
            ..Type::NONE
        };
        // The bare token order here is west (cv emitted after base via
        // cv_tokens, but base_tokens/cv_tokens are composed by the caller);
        // the declaration renderer decides east/west placement.
        assert_eq!(type_decl(&t, ExplicitInt::empty(), ExplicitEcsu::empty()), "int const");
    }

    #[test]
    fn long_long_emits_two_long_tokens_without_redundant_int() {
        let t = Type::base(BaseTid::LONG_LONG | BaseTid::INT);
        assert_eq!(type_decl(&t, ExplicitInt::empty(), ExplicitEcsu::empty()), "long long");
    }

    #[test]
    fn signed_long_long_with_explicit_int_policy() {
        let t = Type::base(BaseTid::SIGNED | BaseTid::LONG_LONG | BaseTid::INT);
        let r = type_decl(&t, ExplicitInt::SIGNED_LONG_LONG, ExplicitEcsu::empty());
        assert_eq!(r, "signed long long int");
    }

    #[test]
    fn typedef_static_conflict_not_checked_here() {
        // render.rs does no legality checking; that is C4's job.
        let t = Type {
            storage: StorageTid::TYPEDEF | StorageTid::STATIC,
            base: BaseTid::INT,
            ..Type::NONE
        };
        let s = type_decl(&t, ExplicitInt::empty(), ExplicitEcsu::empty());
        assert!(s.contains("typedef"));
        assert!(s.contains("static"));
    }
}
