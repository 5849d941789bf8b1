//! Tokens produced by the lexer.

use kielo_lexer_core::TokenKind;

/// Decoded value carried by literal tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TokenValue<'src> {
    #[default]
    None,
    Integer(i64),
    Real(f64),
    /// Raw bytes between the quotes of a string literal. Escapes are not
    /// interpreted.
    Text(&'src [u8]),
}

impl<'src> TokenValue<'src> {
    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            TokenValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match *self {
            TokenValue::Real(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'src [u8]> {
        match *self {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A lexeme with its kind, position, and decoded value.
///
/// Borrows from the source buffer; tokens are cheap to copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token<'src> {
    /// The exact source bytes of the token.
    pub lexeme: &'src [u8],
    pub kind: TokenKind,
    /// Byte offset of the first lexeme byte.
    pub offset: usize,
    pub value: TokenValue<'src>,
}

impl<'src> Token<'src> {
    /// Byte offset one past the lexeme.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.lexeme.len()
    }

    /// The lexeme as text, when it is valid UTF-8.
    pub fn text(&self) -> Option<&'src str> {
        std::str::from_utf8(self.lexeme).ok()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }
}
