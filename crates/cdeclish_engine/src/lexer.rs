//! Position-tracking scan primitives shared by [`crate::decl_parser`] and
//! [`crate::english_parser`]. Not a tokenizer that produces a `Vec<Token>`
//! up front: both parsers read directly off the source string so that
//! [`cdeclish_sname::SName::parse`] (which wants a `&str` slice, not a
//! token stream) can be called inline wherever a scoped name may appear.

/// Cursor over a source string. Every parser in this crate wraps one of
/// these and advances `pos` as it recognizes specifiers, keywords, and
/// punctuation.
pub struct Cursor<'a> {
    pub src: &'a str,
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.skip_preview_ws().is_empty()
    }

    fn skip_preview_ws(&self) -> &'a str {
        self.rest().trim_start()
    }

    /// Advances past any leading whitespace.
    pub fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    /// Peeks the next non-whitespace byte without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.skip_preview_ws().chars().next()
    }

    /// Consumes `ch` (after skipping whitespace) if it is next, reporting
    /// failure otherwise.
    pub fn eat_char(&mut self, ch: char) -> bool {
        self.skip_ws();
        if self.rest().starts_with(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes a fixed multi-character punctuator (`"&&"`, `"::"`) if
    /// present.
    pub fn eat_str(&mut self, s: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Peeks whether an identifier (keyword or name) starts here, without
    /// consuming it.
    pub fn peek_is_ident_start(&self) -> bool {
        matches!(self.peek_char(), Some(c) if c.is_alphabetic() || c == '_')
    }

    /// Consumes one `[A-Za-z_][A-Za-z0-9_]*` word, after skipping
    /// whitespace. Returns `None` if the next non-whitespace byte doesn't
    /// start an identifier.
    pub fn eat_word(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_alphabetic() || c == '_' => {}
            _ => return None,
        }
        let mut end = rest.len();
        for (i, c) in chars {
            if !(c.is_alphanumeric() || c == '_') {
                end = i;
                break;
            }
        }
        self.pos += end;
        Some(&rest[..end])
    }

    /// Like [`Self::eat_word`], but only consumes if the word matches
    /// `keyword` exactly (case-sensitive, as every keyword this project
    /// recognizes is lowercase or a reserved `_Capitalized` form).
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        let save = self.pos;
        match self.eat_word() {
            Some(w) if w == keyword => true,
            _ => {
                self.pos = save;
                false
            }
        }
    }

    /// Peeks the next word without consuming it.
    pub fn peek_word(&self) -> Option<&'a str> {
        let mut probe = Cursor { src: self.src, pos: self.pos };
        probe.eat_word()
    }

    /// Consumes a run of ASCII digits as a `u64`.
    pub fn eat_number(&mut self) -> Option<u64> {
        self.skip_ws();
        let rest = self.rest();
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        self.pos += digits.len();
        digits.parse().ok()
    }
}
