//! The controlled-English parser: the inverse of
//! [`cdeclish_render::render_english`]'s `declare {ident} as {english}`
//! grammar (`english := storage* qual* kind`).
//!
//! Shares [`crate::decl_parser`]'s base-type keyword tables and
//! arena-building helpers (`BaseSpec`, `Op`, `build_chain`) — the two
//! parsers invert the same AST, just through different surface grammars,
//! so the part that turns a resolved specifier/operator list into arena
//! nodes belongs to neither one exclusively. Also mirrors that parser's
//! scope: no operator, constructor/destructor, conversion, or
//! user-defined-literal phrase is recognized from text, since English's own
//! vocabulary for a tag never distinguishes it from a typedef reference
//! (`english.rs` renders both as a bare name) — every bare identifier this
//! parser sees is read back as a typedef reference. `pointer to member of
//! <sname> to english` (§4.5) is recognized, with an optional
//! `class`/`struct`/`union`/`enum` keyword tolerated and discarded before
//! `<sname>` for readability.

use crate::decl_parser::{base_keyword, build_chain, cv_keyword, storage_keyword, tag_keyword, BaseSpec, Op, ParamDecl};
use crate::error::ParseError;
use crate::lexer::Cursor;
use cdeclish_ast::{ArraySize, AstArena, Node};
use cdeclish_sname::SName;
use cdeclish_types::{attr_add, base_add, storage_add, AttrTid, BaseTid, StorageTid, Type};

fn syntax(message: impl Into<String>, pos: usize) -> ParseError {
    ParseError::Syntactic { message: message.into(), pos, suggestion: None }
}

struct EnglishParser<'a> {
    cur: Cursor<'a>,
}

impl<'a> EnglishParser<'a> {
    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.cur.eat_keyword(word) {
            Ok(())
        } else {
            Err(syntax(format!("expected `{word}`"), self.cur.pos))
        }
    }

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

    /// `storage* qual*`, accumulated without committing to a base type yet
    /// — a prefix that precedes a wrapping `kind` word belongs to that
    /// level's own declarator flags; a prefix right before a base-type
    /// word or identifier belongs to the leaf.
    fn parse_prefix(&mut self) -> Result<Type, ParseError> {
        let mut storage = StorageTid::NONE;
        let mut attr = AttrTid::NONE;
        loop {
            self.cur.skip_ws();
            let word = match self.cur.peek_word() {
                Some(w) => w,
                None => break,
            };
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
            break;
        }
        Ok(Type { base: BaseTid::NONE, storage, attr })
    }

    /// `english := storage* qual* kind`. Returns the declarator ops
    /// (outer-to-inner, matching [`crate::decl_parser`]'s convention) and
    /// the base type the chain bottoms out at.
    fn parse_english(&mut self) -> Result<(Vec<Op>, BaseSpec), ParseError> {
        let flags = self.parse_prefix()?;
        self.cur.skip_ws();

        if self.cur.eat_keyword("pointer") {
            self.expect_word("to")?;
            self.cur.skip_ws();
            if self.cur.peek_word() == Some("member") {
                self.cur.eat_word();
                self.expect_word("of")?;
                self.cur.skip_ws();
                if self.cur.peek_word().is_some_and(|w| tag_keyword(w).is_some()) {
                    self.cur.eat_word();
                }
                let of_class = self.parse_sname()?;
                self.expect_word("to")?;
                let (mut ops, base) = self.parse_english()?;
                ops.push(Op::PointerToMember(of_class));
                return Ok((ops, base));
            }
            let (mut ops, base) = self.parse_english()?;
            ops.push(Op::Pointer(flags.attr));
            return Ok((ops, base));
        }
        if self.cur.eat_keyword("reference") {
            self.expect_word("to")?;
            let (mut ops, base) = self.parse_english()?;
            ops.push(Op::Reference);
            return Ok((ops, base));
        }
        if self.cur.eat_keyword("rvalue") {
            self.expect_word("reference")?;
            self.expect_word("to")?;
            let (mut ops, base) = self.parse_english()?;
            ops.push(Op::RvalueReference);
            return Ok((ops, base));
        }
        if self.cur.eat_keyword("array") {
            let size = if let Some(n) = self.cur.eat_number() {
                ArraySize::Known(n)
            } else if self.cur.eat_char('*') {
                ArraySize::Star
            } else {
                ArraySize::None
            };
            self.expect_word("of")?;
            let (mut ops, base) = self.parse_english()?;
            ops.push(Op::Array(size));
            return Ok((ops, base));
        }
        if self.cur.eat_keyword("function") {
            self.cur.skip_ws();
            let params = if self.cur.eat_char('(') {
                let params = self.parse_param_list()?;
                if !self.cur.eat_char(')') {
                    return Err(syntax("expected `)`", self.cur.pos));
                }
                params
            } else {
                Vec::new()
            };
            let (mut ops, base) = if self.cur.eat_keyword("returning") {
                self.parse_english()?
            } else {
                (Vec::new(), BaseSpec::Builtin(Type::base(BaseTid::VOID)))
            };
            ops.push(Op::Function(params));
            return Ok((ops, base));
        }

        self.parse_base_literal(flags)
    }

    fn parse_param_list(&mut self) -> Result<Vec<ParamDecl>, ParseError> {
        self.cur.skip_ws();
        if self.cur.peek_char() == Some(')') {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        loop {
            let (ops, base) = self.parse_english()?;
            out.push(ParamDecl { base, ops });
            self.cur.skip_ws();
            if self.cur.eat_char(',') {
                continue;
            }
            break;
        }
        Ok(out)
    }

    /// The `kind` production's leaf case: a builtin type phrase (continuing
    /// to accumulate onto `prefix`) or, failing that, a bare identifier
    /// read as a typedef reference.
    fn parse_base_literal(&mut self, prefix: Type) -> Result<(Vec<Op>, BaseSpec), ParseError> {
        let mut base = BaseTid::NONE;
        let mut storage = prefix.storage;
        let mut attr = prefix.attr;
        loop {
            self.cur.skip_ws();
            let word = match self.cur.peek_word() {
                Some(w) => w,
                None => break,
            };
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
            if let Some(bits) = base_keyword(word) {
                self.cur.eat_word();
                base = base_add(base, bits).map_err(ParseError::TypeCombination)?;
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
            break;
        }
        if !base.is_empty() {
            return Ok((Vec::new(), BaseSpec::Builtin(Type { base, storage, attr })));
        }
        let sname = self.parse_sname()?;
        Ok((Vec::new(), BaseSpec::Typedef { sname, flags: Type { base: BaseTid::NONE, storage, attr } }))
    }
}

/// Parses the bare `english` phrase (no `declare ... as` wrapper), the form
/// `cast`'s target type is given in.
pub fn parse_phrase<'a>(arena: &'a AstArena, input: &str) -> Result<&'a Node<'a>, ParseError> {
    let mut parser = EnglishParser { cur: Cursor::new(input) };
    let (ops, base) = parser.parse_english()?;
    parser.cur.skip_ws();
    if !parser.cur.is_at_end() {
        return Err(syntax(format!("unexpected trailing input `{}`", parser.cur.rest().trim()), parser.cur.pos));
    }
    build_chain(arena, &base, &ops).map_err(|e| syntax(e.to_string(), parser.cur.pos))
}

/// Parses a full `declare IDENT as ENGLISH` sentence, returning the
/// declared identifier alongside the chain.
pub fn parse_declare_sentence<'a>(arena: &'a AstArena, input: &str) -> Result<(&'a Node<'a>, String), ParseError> {
    let mut parser = EnglishParser { cur: Cursor::new(input) };
    parser.expect_word("declare")?;
    let ident = parser
        .cur
        .eat_word()
        .map(str::to_string)
        .ok_or_else(|| syntax("expected an identifier", parser.cur.pos))?;
    parser.expect_word("as")?;
    let (ops, base) = parser.parse_english()?;
    parser.cur.skip_ws();
    if !parser.cur.is_at_end() {
        return Err(syntax(format!("unexpected trailing input `{}`", parser.cur.rest().trim()), parser.cur.pos));
    }
    let node = build_chain(arena, &base, &ops).map_err(|e| syntax(e.to_string(), parser.cur.pos))?;
    Ok((node, ident))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdeclish_ast::freeze;
    use cdeclish_options::OptionState;
    use cdeclish_render::render_english;

    #[test]
    fn pointer_to_function_returning_int() {
        let arena = AstArena::new();
        let (node, ident) =
            parse_declare_sentence(&arena, "declare f as pointer to function (char, double) returning int").unwrap();
        assert_eq!(ident, "f");
        let owned = freeze(node);
        assert_eq!(
            render_english(&owned, "f", &OptionState::default()),
            "declare f as pointer to function (char, double) returning int"
        );
    }

    #[test]
    fn array_of_const_int() {
        let arena = AstArena::new();
        let node = parse_phrase(&arena, "array 10 of const int").unwrap();
        let owned = freeze(node);
        assert_eq!(render_english(&owned, "x", &OptionState::default()), "declare x as array 10 of const int");
    }

    #[test]
    fn plain_int_has_no_kind_noise() {
        let arena = AstArena::new();
        let node = parse_phrase(&arena, "int").unwrap();
        let owned = freeze(node);
        assert_eq!(render_english(&owned, "x", &OptionState::default()), "declare x as int");
    }

    #[test]
    fn typedef_reference_round_trips() {
        let arena = AstArena::new();
        let node = parse_phrase(&arena, "pointer to MyType").unwrap();
        let owned = freeze(node);
        assert_eq!(render_english(&owned, "p", &OptionState::default()), "declare p as pointer to MyType");
    }

    #[test]
    fn pointer_to_member_round_trips() {
        let arena = AstArena::new();
        let (node, ident) = parse_declare_sentence(&arena, "declare p as pointer to member of C to int").unwrap();
        assert_eq!(ident, "p");
        let owned = freeze(node);
        assert_eq!(
            render_english(&owned, "p", &OptionState::default()),
            "declare p as pointer to member of C to int"
        );
    }

    #[test]
    fn pointer_to_member_tolerates_a_leading_tag_keyword() {
        let arena = AstArena::new();
        let node = parse_phrase(&arena, "pointer to member of class C to int").unwrap();
        let owned = freeze(node);
        assert_eq!(render_english(&owned, "p", &OptionState::default()), "declare p as pointer to member of C to int");
    }

    #[test]
    fn unknown_trailing_word_is_rejected() {
        let arena = AstArena::new();
        assert!(parse_phrase(&arena, "int garbage").is_err());
    }
}
