//! Diagnostics produced by the checker (§4.4, §7): a severity, a typed
//! message (so a future localization layer has something sturdier than a
//! format string to key off of), and the span of the offending node.

use cdeclish_ast::OperatorId;
use cdeclish_base::Span;
use cdeclish_sname::{SName, SNameError};
use cdeclish_types::{ConflictKind, Dialect, Illegality};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// The typed message a [`Diagnostic`] carries. Each variant corresponds to
/// one of the rule groups in §4.4 or an error kind from §7's taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    TypeIllegal(Illegality),
    TypeConflict(ConflictKind),
    ArrayOfInvalidKind,
    ReferenceToReference,
    PointerToReference,
    ReferenceToVoid,
    ReferenceToBitfield,
    BitfieldOnNonIntegral,
    RestrictOnNonPointer,
    RegisterUnsupported(Dialect),
    AtomicOnFunctionOrArray,
    AutoUnsupported(Dialect),
    MultipleStorageClass,
    FunctionReturnsFunctionOrArray,
    MemberQualifierOutsideClass(&'static str),
    ConstructorHasReturnType,
    DestructorHasReturnType,
    ConversionOperatorHasExplicitParams,
    ScopeError(SNameError),
    StdScopeRestricted(String),
    AlignasNotPowerOfTwo(u32),
    AlignasExceedsMax(u32),
    OperatorArityMismatch { op: OperatorId, found: usize, expected: &'static str },
    OperatorCannotBeNonMember(OperatorId),
    UnknownTypedef(SName),
    PointerToMemberClassInvalid(SName),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::TypeIllegal(illegality) => write!(f, "{illegality}"),
            DiagnosticKind::TypeConflict(conflict) => write!(f, "{conflict}"),
            DiagnosticKind::ArrayOfInvalidKind => {
                write!(f, "array of function, reference, or rvalue reference is not allowed")
            }
            DiagnosticKind::ReferenceToReference => write!(f, "reference to reference is not allowed"),
            DiagnosticKind::PointerToReference => write!(f, "pointer to reference is not allowed"),
            DiagnosticKind::ReferenceToVoid => write!(f, "reference to void is not allowed"),
            DiagnosticKind::ReferenceToBitfield => write!(f, "reference to bit-field is not allowed"),
            DiagnosticKind::BitfieldOnNonIntegral => {
                write!(f, "bit-field width is only allowed on an integral type")
            }
            DiagnosticKind::RestrictOnNonPointer => write!(f, "`restrict` is only allowed on a pointer"),
            DiagnosticKind::RegisterUnsupported(since) => {
                write!(f, "`register` is not supported from {} onward", since.names().join("/"))
            }
            DiagnosticKind::AtomicOnFunctionOrArray => {
                write!(f, "`_Atomic` is not allowed on a function or array")
            }
            DiagnosticKind::AutoUnsupported(needs) => {
                write!(f, "`auto` type deduction is not supported until {}", needs.names().join("/"))
            }
            DiagnosticKind::MultipleStorageClass => {
                write!(f, "at most one storage class may be given")
            }
            DiagnosticKind::FunctionReturnsFunctionOrArray => {
                write!(f, "a function may not return a function or array")
            }
            DiagnosticKind::MemberQualifierOutsideClass(what) => {
                write!(f, "`{what}` is only allowed on a member function")
            }
            DiagnosticKind::ConstructorHasReturnType => write!(f, "a constructor has no return type"),
            DiagnosticKind::DestructorHasReturnType => write!(f, "a destructor has no return type"),
            DiagnosticKind::ConversionOperatorHasExplicitParams => {
                write!(f, "a conversion operator takes no explicit parameter list")
            }
            DiagnosticKind::ScopeError(err) => write!(f, "{err}"),
            DiagnosticKind::StdScopeRestricted(name) => {
                write!(f, "`std::{name}` is not a permitted extension of `std` in strict mode")
            }
            DiagnosticKind::AlignasNotPowerOfTwo(n) => write!(f, "alignas({n}) is not a power of two"),
            DiagnosticKind::AlignasExceedsMax(n) => {
                write!(f, "alignas({n}) exceeds the implementation's maximum alignment")
            }
            DiagnosticKind::OperatorArityMismatch { op, found, expected } => {
                write!(f, "operator{op:?} takes {expected}, found {found} parameter(s)")
            }
            DiagnosticKind::OperatorCannotBeNonMember(op) => {
                write!(f, "operator{op:?} cannot be declared outside a class")
            }
            DiagnosticKind::UnknownTypedef(sname) => write!(f, "`{sname}` is not a known type in this dialect"),
            DiagnosticKind::PointerToMemberClassInvalid(sname) => {
                write!(f, "`{sname}` is not a class, struct, or union")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic { severity: Severity::Error, kind, span }
    }

    pub fn warning(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic { severity: Severity::Warning, kind, span }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{label} at {}:{}: {}", self.span.start, self.span.end, self.kind)
    }
}
