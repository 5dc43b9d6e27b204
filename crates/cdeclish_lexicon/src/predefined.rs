//! The static table of predefined type aliases loaded at initialization
//! (§4.7): every standard C/C++ type that has a name of its own, each
//! tagged with the earliest dialect mask it is visible in.

use crate::TypedefRecord;
use cdeclish_ast::owned::{OwnedKind, OwnedNode};
use cdeclish_base::Span;
use cdeclish_sname::{ScopeKind, SName};
use cdeclish_types::{BaseTid, Dialect, Type};

fn builtin(base: BaseTid) -> OwnedNode {
    OwnedNode {
        kind: OwnedKind::Builtin(Type::base(base)),
        span: Span::new(0, 0),
        alignas: None,
        bit_field_width: None,
        depth: 0,
        decl_flags: Type::NONE,
    }
}

fn pointer_to(inner: OwnedNode) -> OwnedNode {
    OwnedNode {
        kind: OwnedKind::Pointer(Some(Box::new(inner))),
        span: Span::new(0, 0),
        alignas: None,
        bit_field_width: None,
        depth: 0,
        decl_flags: Type::NONE,
    }
}

fn class_named(global: &str) -> OwnedNode {
    let (_, mut sname) = SName::parse(global).expect("predefined name must parse");
    sname.force_std_namespace();
    OwnedNode {
        kind: OwnedKind::Tag {
            kind: cdeclish_ast::TagKind::Class,
            sname,
            base: None,
        },
        span: Span::new(0, 0),
        alignas: None,
        bit_field_width: None,
        depth: 0,
        decl_flags: Type::NONE,
    }
}

fn record(name: &str, ast: OwnedNode, dialects: Dialect) -> TypedefRecord {
    let (_, mut sname) = SName::parse(name).expect("predefined name must parse");
    if sname.count() > 1 {
        sname.force_std_namespace();
    }
    TypedefRecord {
        sname,
        ast,
        dialects_defined_in: dialects,
        is_predefined: true,
        is_hidden_from_show: false,
    }
}

/// All predefined aliases, in the fixed order they are inserted at
/// registry initialization.
pub fn predefined_records() -> Vec<TypedefRecord> {
    vec![
        record("size_t", builtin(BaseTid::LONG | BaseTid::UNSIGNED), Dialect::ANY),
        record("ptrdiff_t", builtin(BaseTid::LONG), Dialect::ANY),
        record("wchar_t", builtin(BaseTid::WCHAR_T), Dialect::C95.and_later() | Dialect::ANY_CPP),
        record("int8_t", builtin(BaseTid::CHAR | BaseTid::SIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("uint8_t", builtin(BaseTid::CHAR | BaseTid::UNSIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("int16_t", builtin(BaseTid::SHORT | BaseTid::SIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("uint16_t", builtin(BaseTid::SHORT | BaseTid::UNSIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("int32_t", builtin(BaseTid::INT | BaseTid::SIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("uint32_t", builtin(BaseTid::INT | BaseTid::UNSIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("int64_t", builtin(BaseTid::LONG_LONG | BaseTid::SIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("uint64_t", builtin(BaseTid::LONG_LONG | BaseTid::UNSIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("intptr_t", builtin(BaseTid::LONG | BaseTid::SIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("uintptr_t", builtin(BaseTid::LONG | BaseTid::UNSIGNED), Dialect::C99.and_later() | Dialect::CPP11.and_later()),
        record("char16_t", builtin(BaseTid::CHAR16_T), Dialect::C11.and_later() | Dialect::CPP11.and_later()),
        record("char32_t", builtin(BaseTid::CHAR32_T), Dialect::C11.and_later() | Dialect::CPP11.and_later()),
        record("char8_t", builtin(BaseTid::CHAR8_T), Dialect::C23.and_later() | Dialect::CPP20.and_later()),
        record("nullptr_t", pointer_to(builtin(BaseTid::VOID)), Dialect::CPP11.and_later()),
        record("std::string", class_named("std::string"), Dialect::ANY_CPP),
        record("std::wstring", class_named("std::wstring"), Dialect::ANY_CPP),
        record("std::size_t", builtin(BaseTid::LONG | BaseTid::UNSIGNED), Dialect::ANY_CPP),
    ]
}

/// Whether `std` resolves to a namespace scope for the purposes of C2's
/// scope-kind resolution — used by `set_all_types` to seed the first scope.
pub fn std_scope_kind() -> ScopeKind {
    ScopeKind::Namespace { inline: false }
}
