//! The cursor-driven lexer.
//!
//! # Dispatch
//!
//! [`Lexer::next_token`] consumes one codepoint and dispatches on it:
//!
//! | Leading codepoint          | Result                                  |
//! |----------------------------|-----------------------------------------|
//! | end of input               | `EndOfFile` (empty lexeme), repeatable  |
//! | whitespace                 | one `Whitespace` run                    |
//! | `//`                       | `LineComment` up to the newline         |
//! | alphabetic or `_`          | `Identifier` or keyword                 |
//! | digit                      | `Integer` / `Real`                      |
//! | `"`                        | `String`                                |
//! | operator character         | longest operator in the table           |
//! | anything else              | `BadCodepoint` error                    |
//!
//! Every call consumes at least one byte unless it returns `EndOfFile`.
//!
//! # Number literals
//!
//! `0x`, `0o` and `0b` select base 16, 8 and 2. Decimal literals become
//! `Real` only when a `.` is followed by a digit, so `3.` lexes as `3` then
//! `.`. An `_` after the first digit is a separator; literals containing one
//! are staged without separators in a scratch arena region before conversion.

use kielo_lexer_core::utf8::{self, Utf8Iterator};
use kielo_lexer_core::TokenKind;
use kielo_mem::{AllocError, Allocator, Arena};

use crate::keywords;
use crate::lex_error::LexError;
use crate::options::LexerOptions;
use crate::token::{Token, TokenValue};

/// Lexer over a source byte buffer.
///
/// `'src` is the source lifetime (tokens borrow from it); the scratch arena
/// is borrowed mutably for `'a`.
pub struct Lexer<'src, 'a, 'buf> {
    source: &'src [u8],
    current: usize,
    previous: usize,
    scratch: &'a mut Arena<'buf>,
    options: LexerOptions,
    /// Results yielded through `Iterator`.
    yielded: usize,
    limit_reported: bool,
    finished: bool,
}

impl<'src, 'a, 'buf> Lexer<'src, 'a, 'buf> {
    /// Create a lexer with default options.
    pub fn new(source: &'src [u8], scratch: &'a mut Arena<'buf>) -> Self {
        Self::with_options(source, scratch, LexerOptions::default())
    }

    pub fn with_options(
        source: &'src [u8],
        scratch: &'a mut Arena<'buf>,
        options: LexerOptions,
    ) -> Self {
        Self {
            source,
            current: 0,
            previous: 0,
            scratch,
            options,
            yielded: 0,
            limit_reported: false,
            finished: false,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    // === Cursor ===

    /// Consume one codepoint.
    ///
    /// Invalid sequences yield `U+FFFD` and advance one byte. Returns `None`
    /// at end of input without moving.
    pub fn advance(&mut self) -> Option<char> {
        let rest = &self.source[self.current..];
        if rest.is_empty() {
            return None;
        }
        let decoded = utf8::decode(rest);
        self.previous = self.current;
        self.current += decoded.len;
        Some(decoded.as_char())
    }

    /// Consume the next codepoint only if it is `expected`.
    pub fn advance_matching(&mut self, expected: char) -> bool {
        if self.peek(0) == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Undo the last [`advance`](Self::advance). Only one level is kept.
    pub fn rewind(&mut self) {
        self.current = self.previous;
    }

    /// Look `delta` codepoints past the next unconsumed one without moving.
    pub fn peek(&self, delta: usize) -> Option<char> {
        Utf8Iterator::at(self.source, self.current)
            .nth(delta)
            .map(|decoded| decoded.as_char())
    }

    fn peek_is(&self, delta: usize, pred: impl FnOnce(char) -> bool) -> bool {
        self.peek(delta).is_some_and(pred)
    }

    fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.peek(0).is_some_and(&mut pred) {
            self.advance();
        }
    }

    // === Dispatch ===

    /// Produce the next token or lexical error.
    ///
    /// After the input is exhausted every call returns `EndOfFile`.
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        let start = self.current;
        let Some(first) = self.advance() else {
            return Ok(self.token(TokenKind::EndOfFile, start));
        };

        let result = match first {
            c if c.is_whitespace() => {
                self.eat_while(char::is_whitespace);
                Ok(self.token(TokenKind::Whitespace, start))
            }
            '/' if self.advance_matching('/') => {
                self.eat_while(|c| c != '\n');
                Ok(self.token(TokenKind::LineComment, start))
            }
            c if is_ident_start(c) => Ok(self.identifier(start)),
            '0'..='9' => self.number(start, first),
            '"' => self.string(start),
            _ => self.operator(start, first),
        };

        match &result {
            Ok(token) => tracing::trace!(
                kind = %token.kind,
                offset = token.offset,
                len = token.lexeme.len(),
                "token"
            ),
            Err(err) => tracing::debug!(
                file = %err.file,
                offset = err.offset,
                kind = ?err.kind,
                "{}",
                err.message
            ),
        }
        result
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'src> {
        self.token_with(kind, start, TokenValue::None)
    }

    fn token_with(&self, kind: TokenKind, start: usize, value: TokenValue<'src>) -> Token<'src> {
        Token {
            lexeme: &self.source[start..self.current],
            kind,
            offset: start,
            value,
        }
    }

    fn file(&self) -> &str {
        &self.options.file_name
    }

    fn identifier(&mut self, start: usize) -> Token<'src> {
        self.eat_while(is_ident_continue);
        let text = &self.source[start..self.current];
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Identifier);
        self.token(kind, start)
    }

    fn string(&mut self, start: usize) -> Result<Token<'src>, LexError> {
        loop {
            match self.advance() {
                None => return Err(LexError::unterminated_string(self.file(), start)),
                Some('"') => break,
                Some('\\') => {
                    // The escaped codepoint is skipped, not interpreted.
                    self.advance();
                }
                Some(_) => {}
            }
        }
        let text = &self.source[start + 1..self.current - 1];
        Ok(self.token_with(TokenKind::String, start, TokenValue::Text(text)))
    }

    /// Longest match over the operator table.
    fn operator(&mut self, start: usize, first: char) -> Result<Token<'src>, LexError> {
        let kind = match first {
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            '[' => TokenKind::SquareOpen,
            ']' => TokenKind::SquareClose,
            '{' => TokenKind::CurlyOpen,
            '}' => TokenKind::CurlyClose,

            '+' => self.or_assign(TokenKind::Plus, TokenKind::PlusAssign),
            '-' => {
                if self.advance_matching('>') {
                    TokenKind::ArrowRight
                } else {
                    self.or_assign(TokenKind::Minus, TokenKind::MinusAssign)
                }
            }
            '*' => self.or_assign(TokenKind::Star, TokenKind::StarAssign),
            '/' => self.or_assign(TokenKind::Slash, TokenKind::SlashAssign),
            '%' => self.or_assign(TokenKind::Mod, TokenKind::ModAssign),

            '&' => {
                if self.advance_matching('&') {
                    TokenKind::LogicAnd
                } else {
                    self.or_assign(TokenKind::And, TokenKind::AndAssign)
                }
            }
            '|' => {
                if self.advance_matching('|') {
                    TokenKind::LogicOr
                } else {
                    self.or_assign(TokenKind::Or, TokenKind::OrAssign)
                }
            }
            '~' => TokenKind::Tilde,
            '^' => TokenKind::Caret,

            '!' => self.or_assign(TokenKind::LogicNot, TokenKind::NotEqual),
            '=' => self.or_assign(TokenKind::Assign, TokenKind::Equal),
            '<' => {
                if self.advance_matching('<') {
                    TokenKind::ShiftLeft
                } else {
                    self.or_assign(TokenKind::Less, TokenKind::LessEqual)
                }
            }
            '>' => {
                if self.advance_matching('>') {
                    TokenKind::ShiftRight
                } else {
                    self.or_assign(TokenKind::Greater, TokenKind::GreaterEqual)
                }
            }

            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,

            _ => return Err(self.bad_codepoint(start, first)),
        };
        Ok(self.token(kind, start))
    }

    /// `base`, or `with_eq` when followed by `=`.
    fn or_assign(&mut self, base: TokenKind, with_eq: TokenKind) -> TokenKind {
        if self.advance_matching('=') {
            with_eq
        } else {
            base
        }
    }

    #[cold]
    fn bad_codepoint(&self, start: usize, found: char) -> LexError {
        let decoded = utf8::decode(&self.source[start..]);
        if decoded.valid {
            LexError::unexpected_char(self.file(), start, found)
        } else {
            LexError::invalid_utf8(self.file(), start, self.source[start])
        }
    }

    // === Numbers ===

    fn number(&mut self, start: usize, first: char) -> Result<Token<'src>, LexError> {
        if first == '0' {
            if let Some(selector) = self.peek(0).filter(char::is_ascii_alphabetic) {
                self.advance();
                let radix = match selector {
                    'x' => 16,
                    'o' => 8,
                    'b' => 2,
                    _ => {
                        self.eat_while(is_ident_continue);
                        return Err(LexError::invalid_base(self.file(), start, selector));
                    }
                };
                return self.radix_integer(start, radix);
            }
        }
        self.decimal(start)
    }

    /// Digits after an explicit base prefix. The whole alphanumeric run is
    /// consumed so a bad digit does not split the literal.
    fn radix_integer(&mut self, start: usize, radix: u32) -> Result<Token<'src>, LexError> {
        let digits_start = self.current;
        self.eat_while(is_ident_continue);
        let digits = &self.source[digits_start..self.current];

        if digits.is_empty() {
            return Err(LexError::missing_digits(self.file(), start, radix));
        }
        for (index, &byte) in digits.iter().enumerate() {
            let valid = if byte == b'_' {
                index > 0
            } else {
                char::from(byte).is_digit(radix)
            };
            if !valid {
                let offset = digits_start + index;
                let found = utf8::decode(&self.source[offset..]).as_char();
                return Err(LexError::invalid_digit(self.file(), offset, found, radix));
            }
        }

        let parsed = self
            .with_staged_digits(digits, |text| i64::from_str_radix(text, radix))
            .map_err(|err| LexError::scratch_exhausted(self.file(), start, err))?;
        let value = parsed.map_err(|_| LexError::integer_overflow(self.file(), start))?;
        Ok(self.token_with(TokenKind::Integer, start, TokenValue::Integer(value)))
    }

    fn decimal(&mut self, start: usize) -> Result<Token<'src>, LexError> {
        self.eat_while(is_digit_or_separator);

        let is_real = self.peek(0) == Some('.') && self.peek_is(1, |c| c.is_ascii_digit());
        if is_real {
            self.advance();
            self.eat_while(is_digit_or_separator);
        }

        let digits = &self.source[start..self.current];
        if is_real {
            let parsed = self
                .with_staged_digits(digits, str::parse::<f64>)
                .map_err(|err| LexError::scratch_exhausted(self.file(), start, err))?;
            let value = parsed.map_err(|_| LexError::malformed_real(self.file(), start))?;
            Ok(self.token_with(TokenKind::Real, start, TokenValue::Real(value)))
        } else {
            let parsed = self
                .with_staged_digits(digits, str::parse::<i64>)
                .map_err(|err| LexError::scratch_exhausted(self.file(), start, err))?;
            let value = parsed.map_err(|_| LexError::integer_overflow(self.file(), start))?;
            Ok(self.token_with(TokenKind::Integer, start, TokenValue::Integer(value)))
        }
    }

    /// Run `convert` over `digits` with `_` separators removed.
    ///
    /// Separator-free literals convert straight from the source. Others are
    /// copied into a scratch region that is released before returning.
    fn with_staged_digits<T>(
        &mut self,
        digits: &[u8],
        convert: impl FnOnce(&str) -> T,
    ) -> Result<T, AllocError> {
        if !digits.contains(&b'_') {
            return Ok(convert(ascii_str(digits)));
        }

        let kept = || digits.iter().copied().filter(|&byte| byte != b'_');
        let mut region = self.scratch.region();
        let block = region.alloc(kept().count(), 1)?;
        for (slot, byte) in region.bytes_mut(&block).iter_mut().zip(kept()) {
            *slot = byte;
        }
        let converted = convert(ascii_str(region.bytes(&block)));
        region.end();
        Ok(converted)
    }
}

impl<'src> Iterator for Lexer<'src, '_, '_> {
    type Item = Result<Token<'src>, LexError>;

    /// Yields `EndOfFile` once, then `None`.
    ///
    /// With a token limit, the result after the limit is a single
    /// `TokenLimitExceeded` error followed by `EndOfFile`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some(limit) = self.options.token_limit {
            if self.yielded >= limit {
                if !self.limit_reported {
                    self.limit_reported = true;
                    let err = LexError::token_limit_exceeded(self.file(), self.current, limit);
                    tracing::debug!(file = %err.file, limit, "token limit reached");
                    return Some(Err(err));
                }
                self.finished = true;
                let end = self.source.len();
                return Some(Ok(Token {
                    lexeme: &self.source[end..],
                    kind: TokenKind::EndOfFile,
                    offset: end,
                    value: TokenValue::None,
                }));
            }
        }

        self.yielded += 1;
        let result = self.next_token();
        if matches!(&result, Ok(token) if token.is_eof()) {
            self.finished = true;
        }
        Some(result)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_digit_or_separator(c: char) -> bool {
    c.is_ascii_digit() || c == '_'
}

/// Digit runs are ASCII by construction.
fn ascii_str(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or_default()
}
