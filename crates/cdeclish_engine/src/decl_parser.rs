//! The hand-rolled C/C++ declaration-string parser: `explain`, `typedef`,
//! and a `cast` target's declarator all start here.
//!
//! This is the "external collaborator" the design deliberately leaves
//! unspecified beyond the `ast_new`/`ast_set_child` interface it drives
//! (§1, §4.3). It supports the declarator vocabulary a `cdecl`-style tool's
//! users actually type: storage classes, cv-qualifiers, the scalar and
//! tag base types, pointers, references/rvalue references, arrays, and
//! function parameter lists, nested and parenthesized arbitrarily deep.
//! It deliberately does NOT parse from text: pointer-to-member
//! declarators, function trailing ref-qualifiers/`noexcept`/
//! `override`/`final`/`= 0`/`= delete`/`= default`, user-defined literals,
//! conversion operators, constructors, destructors, or operator overloads —
//! every one of those AST shapes is fully supported by the checker and both
//! renderers, just unreachable from this parser's grammar. A construct
//! needing one of those is built directly against [`cdeclish_ast::AstArena`]
//! by a caller, the same way a richer front-end grammar would.
//!
//! Declarator inversion (§9): a declarator's suffixes (`[]`, `()`) bind
//! tighter than a pointer/reference prefix, and parenthesization overrides
//! that. The textbook recursive-descent grammar handles this directly —
//! `declarator := ptr_prefix direct_declarator`,
//! `direct_declarator := identifier suffixes | '(' declarator ')' suffixes`
//! — so this parser collects an outer-to-inner list of operators by
//! walking that grammar, then [`build_chain`] applies them innermost-first
//! against the arena, the same order the declarator-inversion idiom in
//! [`cdeclish_ast::node`] describes.

use crate::error::ParseError;
use crate::lexer::Cursor;
use cdeclish_ast::{ArraySize, AstArena, Node, NodeKind, ShapeError, TagKind};
use cdeclish_base::Span;
use cdeclish_sname::SName;
use cdeclish_types::{attr_add, base_add, storage_add, AttrTid, BaseTid, StorageTid, Type};

pub(crate) fn storage_keyword(word: &str) -> Option<StorageTid> {
    Some(match word {
        "typedef" => StorageTid::TYPEDEF,
        "extern" => StorageTid::EXTERN,
        "static" => StorageTid::STATIC,
        "register" => StorageTid::REGISTER,
        "thread_local" | "_Thread_local" => StorageTid::THREAD_LOCAL,
        "mutable" => StorageTid::MUTABLE,
        "virtual" => StorageTid::VIRTUAL,
        "friend" => StorageTid::FRIEND,
        "explicit" => StorageTid::EXPLICIT,
        "inline" => StorageTid::INLINE,
        "constexpr" => StorageTid::CONSTEXPR,
        "consteval" => StorageTid::CONSTEVAL,
        "constinit" => StorageTid::CONSTINIT,
        "_Noreturn" | "noreturn" => StorageTid::NORETURN,
        _ => return None,
    })
}

pub(crate) fn cv_keyword(word: &str) -> Option<AttrTid> {
    Some(match word {
        "const" => AttrTid::CONST,
        "volatile" => AttrTid::VOLATILE,
        "restrict" | "__restrict" | "__restrict__" => AttrTid::RESTRICT,
        "_Atomic" => AttrTid::ATOMIC_Q,
        _ => return None,
    })
}

/// Base-type keywords other than `long`, which needs the stateful
/// single-`long`-vs-`long long` handling in [`DeclParser::parse_base`].
pub(crate) fn base_keyword(word: &str) -> Option<BaseTid> {
    Some(match word {
        "void" => BaseTid::VOID,
        "auto" => BaseTid::AUTO,
        "bool" | "_Bool" => BaseTid::BOOL,
        "char" => BaseTid::CHAR,
        "char8_t" => BaseTid::CHAR8_T,
        "char16_t" => BaseTid::CHAR16_T,
        "char32_t" => BaseTid::CHAR32_T,
        "wchar_t" => BaseTid::WCHAR_T,
        "short" => BaseTid::SHORT,
        "int" => BaseTid::INT,
        "signed" => BaseTid::SIGNED,
        "unsigned" => BaseTid::UNSIGNED,
        "float" => BaseTid::FLOAT,
        "double" => BaseTid::DOUBLE,
        "_Complex" | "complex" => BaseTid::COMPLEX,
        "_Imaginary" | "imaginary" => BaseTid::IMAGINARY,
        _ => return None,
    })
}

pub(crate) fn tag_keyword(word: &str) -> Option<TagKind> {
    Some(match word {
        "struct" => TagKind::Struct,
        "class" => TagKind::Class,
        "union" => TagKind::Union,
        "enum" => TagKind::Enum,
        _ => return None,
    })
}

/// The declaration-specifier sequence, resolved to one of a bare builtin
/// atom, a tag (`struct`/`class`/`union`/`enum` name), or a typedef
/// reference — each carrying whatever storage-class and cv-qualifier words
/// preceded or interleaved with it.
pub(crate) enum BaseSpec {
    Builtin(Type),
    Tag { kind: TagKind, sname: SName, flags: Type },
    Typedef { sname: SName, flags: Type },
}

/// One declarator operator, outer-to-inner order within a `Vec<Op>`.
pub(crate) enum Op {
    Pointer(AttrTid),
    PointerToMember(SName),
    Reference,
    RvalueReference,
    Array(ArraySize),
    Function(Vec<ParamDecl>),
}

pub(crate) struct ParamDecl {
    pub(crate) base: BaseSpec,
    pub(crate) ops: Vec<Op>,
}

fn syntax(message: impl Into<String>, pos: usize) -> ParseError {
    ParseError::Syntactic { message: message.into(), pos, suggestion: None }
}

struct DeclParser<'a> {
    cur: Cursor<'a>,
}

impl<'a> DeclParser<'a> {
    fn parse_sname(&mut self) -> Result<SName, ParseError> {
        self.cur.skip_ws();
        match SName::parse(self.cur.rest()) {
            Some((consumed, sname)) => {
                self.cur.pos += consumed;
                Ok(sname)
            }
            None => Err(syntax("expected an identifier", self.cur.pos)),
        }
    }

    fn parse_base(&mut self) -> Result<BaseSpec, ParseError> {
        let mut storage = StorageTid::NONE;
        let mut attr = AttrTid::NONE;
        let mut base = BaseTid::NONE;
        let mut tag: Option<(TagKind, SName)> = None;
        let mut typedef_name: Option<SName> = None;

        loop {
            self.cur.skip_ws();
            if !self.cur.peek_is_ident_start() {
                break;
            }
            let word = self.cur.peek_word().expect("peek_is_ident_start implies a word follows");

            if word == "long" {
                self.cur.eat_word();
                base = if base.contains(BaseTid::LONG) {
                    base_add(base - BaseTid::LONG, BaseTid::LONG_LONG)
                } else {
                    base_add(base, BaseTid::LONG)
                }
                .map_err(ParseError::TypeCombination)?;
                continue;
            }
            if let Some(bits) = storage_keyword(word) {
                self.cur.eat_word();
                storage = storage_add(storage, bits).map_err(ParseError::TypeCombination)?;
                continue;
            }
            if let Some(bits) = cv_keyword(word) {
                self.cur.eat_word();
                attr = attr_add(attr, bits).map_err(ParseError::TypeCombination)?;
                continue;
            }
            if tag.is_none() && typedef_name.is_none() {
                if let Some(bits) = base_keyword(word) {
                    self.cur.eat_word();
                    base = base_add(base, bits).map_err(ParseError::TypeCombination)?;
                    continue;
                }
                if let Some(kind) = tag_keyword(word) {
                    self.cur.eat_word();
                    let sname = self.parse_sname()?;
                    tag = Some((kind, sname));
                    continue;
                }
            }
            if base.is_empty() && tag.is_none() && typedef_name.is_none() {
                // Not a recognized keyword: the first unrecognized word is
                // the base type's own name (a typedef reference), the only
                // place an arbitrary identifier may stand in for a builtin.
                typedef_name = Some(self.parse_sname()?);
                continue;
            }
            // An identifier here, with the base type already settled, is
            // the declarator's own name — leave it for parse_declarator.
            break;
        }

        let flags = Type { base: BaseTid::NONE, storage, attr };
        if let Some((kind, sname)) = tag {
            return Ok(BaseSpec::Tag { kind, sname, flags });
        }
        if let Some(sname) = typedef_name {
            return Ok(BaseSpec::Typedef { sname, flags });
        }
        if base.is_empty() {
            return Err(syntax("expected a type specifier", self.cur.pos));
        }
        Ok(BaseSpec::Builtin(Type { base, storage, attr }))
    }

    fn parse_ptr_prefix(&mut self) -> Result<Vec<Op>, ParseError> {
        let mut out = Vec::new();
        loop {
            self.cur.skip_ws();
            if self.cur.eat_str("&&") {
                out.push(Op::RvalueReference);
            } else if self.cur.eat_char('&') {
                out.push(Op::Reference);
            } else if self.cur.eat_char('*') {
                let mut cv = AttrTid::NONE;
                loop {
                    self.cur.skip_ws();
                    match self.cur.peek_word().and_then(cv_keyword) {
                        Some(bits) => {
                            self.cur.eat_word();
                            cv = attr_add(cv, bits).map_err(ParseError::TypeCombination)?;
                        }
                        None => break,
                    }
                }
                out.push(Op::Pointer(cv));
            } else {
                break;
            }
        }
        Ok(out)
    }

    fn parse_declarator(&mut self) -> Result<(Vec<Op>, Option<String>), ParseError> {
        let prefix = self.parse_ptr_prefix()?;
        let (mut ops, ident) = self.parse_direct_declarator()?;
        ops.extend(prefix.into_iter().rev());
        Ok((ops, ident))
    }

    /// `'(' declarator ')' suffixes` (the grouped form, transparent to
    /// inversion) or `identifier? suffixes` (the bare form).
    fn parse_direct_declarator(&mut self) -> Result<(Vec<Op>, Option<String>), ParseError> {
        self.cur.skip_ws();
        if self.cur.peek_char() == Some('(') {
            self.cur.eat_char('(');
            let (inner_ops, ident) = self.parse_declarator()?;
            if !self.cur.eat_char(')') {
                return Err(syntax("expected `)`", self.cur.pos));
            }
            let mut ops = inner_ops;
            ops.extend(self.parse_suffixes()?);
            Ok((ops, ident))
        } else {
            let ident = self.cur.eat_word().map(str::to_string);
            let ops = self.parse_suffixes()?;
            Ok((ops, ident))
        }
    }

    fn parse_suffixes(&mut self) -> Result<Vec<Op>, ParseError> {
        let mut out = Vec::new();
        loop {
            self.cur.skip_ws();
            if self.cur.eat_char('[') {
                let size = if self.cur.eat_char('*') {
                    ArraySize::Star
                } else if let Some(n) = self.cur.eat_number() {
                    ArraySize::Known(n)
                } else {
                    ArraySize::None
                };
                if !self.cur.eat_char(']') {
                    return Err(syntax("expected `]`", self.cur.pos));
                }
                out.push(Op::Array(size));
            } else if self.cur.eat_char('(') {
                let params = self.parse_params()?;
                if !self.cur.eat_char(')') {
                    return Err(syntax("expected `)`", self.cur.pos));
                }
                out.push(Op::Function(params));
            } else {
                break;
            }
        }
        Ok(out)
    }

    fn parse_params(&mut self) -> Result<Vec<ParamDecl>, ParseError> {
        self.cur.skip_ws();
        if self.cur.peek_char() == Some(')') {
            return Ok(Vec::new());
        }
        let save = self.cur.pos;
        if self.cur.eat_keyword("void") {
            self.cur.skip_ws();
            if self.cur.peek_char() == Some(')') {
                return Ok(Vec::new());
            }
            self.cur.pos = save;
        }
        let mut out = Vec::new();
        loop {
            let base = self.parse_base()?;
            let (ops, _ident) = self.parse_declarator()?;
            out.push(ParamDecl { base, ops });
            self.cur.skip_ws();
            if self.cur.eat_char(',') {
                continue;
            }
            break;
        }
        Ok(out)
    }
}

pub(crate) fn build_base_node<'a>(arena: &'a AstArena, base: &BaseSpec, depth: u32) -> &'a Node<'a> {
    let span = Span::new(0, 0);
    match base {
        BaseSpec::Builtin(t) => arena.ast_new(NodeKind::Builtin(*t), span, depth),
        BaseSpec::Tag { kind, sname, flags } => arena.ast_new_with_flags(
            NodeKind::Tag { kind: *kind, sname: sname.clone(), base: Default::default() },
            span,
            depth,
            *flags,
        ),
        BaseSpec::Typedef { sname, flags } => {
            arena.ast_new_with_flags(NodeKind::Typedef(sname.clone()), span, depth, *flags)
        }
    }
}

pub(crate) fn build_op_node<'a>(
    arena: &'a AstArena,
    op: &Op,
    depth: u32,
    child: &'a Node<'a>,
) -> Result<&'a Node<'a>, ShapeError> {
    let span = Span::new(0, 0);
    let node = match op {
        Op::Pointer(cv) => {
            arena.ast_new_with_flags(NodeKind::Pointer(Default::default()), span, depth, Type { attr: *cv, ..Type::NONE })
        }
        Op::PointerToMember(of_class) => {
            arena.ast_new(NodeKind::PointerToMember { of_class: of_class.clone(), to: Default::default() }, span, depth)
        }
        Op::Reference => arena.ast_new(NodeKind::Reference(Default::default()), span, depth),
        Op::RvalueReference => arena.ast_new(NodeKind::RvalueReference(Default::default()), span, depth),
        Op::Array(size) => arena.ast_new(NodeKind::Array { of: Default::default(), size: *size }, span, depth),
        Op::Function(params) => {
            let mut built = Vec::with_capacity(params.len());
            for p in params {
                built.push(build_chain(arena, &p.base, &p.ops)?);
            }
            let slice = arena.ast_alloc_params(built);
            arena.ast_new(NodeKind::Function { ret: Default::default(), params: slice, qualifiers: Type::NONE }, span, depth)
        }
    };
    arena.ast_set_child(node, child)?;
    Ok(node)
}

/// Builds the arena chain for `(base, ops)`, applying `ops` innermost-first
/// (the reverse of their outer-to-inner list order) so the last one built
/// is the outermost node — the head the caller freezes.
pub(crate) fn build_chain<'a>(arena: &'a AstArena, base: &BaseSpec, ops: &[Op]) -> Result<&'a Node<'a>, ShapeError> {
    let mut depth = ops.len() as u32;
    let mut cur = build_base_node(arena, base, depth);
    for op in ops.iter().rev() {
        depth -= 1;
        cur = build_op_node(arena, op, depth, cur)?;
    }
    Ok(cur)
}

/// Parses a full declaration string (e.g. `int (*f)(char, double)`, `static
/// const unsigned long x`) into `arena`, returning the chain's head and the
/// declared identifier (`None` for an abstract declarator, as appears
/// inside a parameter list or a bare type given to `cast`).
pub fn parse_declaration<'a>(arena: &'a AstArena, input: &str) -> Result<(&'a Node<'a>, Option<String>), ParseError> {
    let mut parser = DeclParser { cur: Cursor::new(input) };
    let base = parser.parse_base()?;
    let (ops, ident) = parser.parse_declarator()?;
    parser.cur.skip_ws();
    parser.cur.eat_char(';');
    parser.cur.skip_ws();
    if !parser.cur.is_at_end() {
        return Err(syntax(format!("unexpected trailing input `{}`", parser.cur.rest().trim()), parser.cur.pos));
    }
    let node = build_chain(arena, &base, &ops)
        .map_err(|e| syntax(e.to_string(), parser.cur.pos))?;
    Ok((node, ident))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdeclish_ast::freeze;
    use cdeclish_options::OptionState;
    use cdeclish_render::render_decl;

    fn roundtrip(input: &str, ident: &str) -> String {
        let arena = AstArena::new();
        let (node, parsed_ident) = parse_declaration(&arena, input).unwrap();
        assert_eq!(parsed_ident.as_deref(), Some(ident));
        let owned = freeze(node);
        render_decl(&owned, ident, &OptionState::default())
    }

    #[test]
    fn pointer_to_array_of_int() {
        assert_eq!(roundtrip("int *x[10]", "x"), "int *x[10];");
    }

    #[test]
    fn pointer_to_function_returning_int() {
        assert_eq!(roundtrip("int (*f)(char, double)", "f"), "int (*f)(char, double);");
    }

    #[test]
    fn pointer_to_const_pointer_to_char() {
        assert_eq!(roundtrip("char * const * p", "p"), "char *const *p;");
    }

    #[test]
    fn function_returning_pointer_to_function_returning_pointer_to_int() {
        assert_eq!(roundtrip("int *(*f)(char)", "f"), "int *(*f)(char);");
    }

    #[test]
    fn storage_class_and_cv_on_typedef_base() {
        let arena = AstArena::new();
        let (node, ident) = parse_declaration(&arena, "static const MyType x").unwrap();
        assert_eq!(ident.as_deref(), Some("x"));
        let owned = freeze(node);
        assert_eq!(render_decl(&owned, "x", &OptionState::default()), "static const MyType x;");
    }

    #[test]
    fn long_long_collapses_to_one_pair() {
        let arena = AstArena::new();
        let (node, _) = parse_declaration(&arena, "long long x").unwrap();
        let owned = freeze(node);
        assert_eq!(render_decl(&owned, "x", &OptionState::default()), "long long x;");
    }

    #[test]
    fn conflicting_signedness_is_rejected() {
        let arena = AstArena::new();
        let err = parse_declaration(&arena, "signed unsigned x").unwrap_err();
        assert!(matches!(err, ParseError::TypeCombination(_)));
    }

    #[test]
    fn struct_tag_base() {
        let arena = AstArena::new();
        let (node, ident) = parse_declaration(&arena, "struct Point p").unwrap();
        assert_eq!(ident.as_deref(), Some("p"));
        let owned = freeze(node);
        let opts = OptionState { explicit_ecsu: cdeclish_types::ExplicitEcsu::all(), ..OptionState::default() };
        assert_eq!(render_decl(&owned, "p", &opts), "struct Point p;");
    }
}
