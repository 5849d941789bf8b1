//! Reserved keyword resolution.
//!
//! Keywords are 2-8 bytes long, so the identifier length is used as a
//! first-pass filter before comparing against the keywords of that length.
//! Only an exact match of the whole identifier is a keyword: `fnord` stays an
//! identifier.

use kielo_lexer_core::TokenKind;

/// Look up a reserved keyword by its source bytes.
#[inline]
pub(crate) fn lookup(text: &[u8]) -> Option<TokenKind> {
    if !(2..=8).contains(&text.len()) {
        return None;
    }

    match text.len() {
        2 => match text {
            b"fn" => Some(TokenKind::Fn),
            b"if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            b"for" => Some(TokenKind::For),
            b"let" => Some(TokenKind::Let),
            _ => None,
        },
        4 => match text {
            b"else" => Some(TokenKind::Else),
            b"true" => Some(TokenKind::True),
            _ => None,
        },
        5 => match text {
            b"break" => Some(TokenKind::Break),
            b"const" => Some(TokenKind::Const),
            b"false" => Some(TokenKind::False),
            b"match" => Some(TokenKind::Match),
            _ => None,
        },
        6 => match text {
            b"return" => Some(TokenKind::Return),
            b"struct" => Some(TokenKind::Struct),
            _ => None,
        },
        8 => match text {
            b"continue" => Some(TokenKind::Continue),
            _ => None,
        },
        _ => None,
    }
}
