//! Lexical error values.
//!
//! A [`LexError`] records WHERE (`file`, `offset`), WHAT (`kind`) and a
//! rendered `message`. Errors are ordinary values: the lexer reports one and
//! carries on from the next byte.

use kielo_mem::AllocError;

/// A lexical error with its location.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{file}:{offset}: {message}")]
pub struct LexError {
    /// Source name from [`LexerOptions::file_name`](crate::LexerOptions).
    pub file: String,
    /// Byte offset where the problem was found.
    pub offset: usize,
    pub kind: LexErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// What kind of lexical error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// A byte sequence that is not valid UTF-8, or a character that starts
    /// no token.
    BadCodepoint,
    /// `0` followed by a letter other than `x`, `o` or `b`, or a base prefix
    /// with no digits after it.
    InvalidBase,
    /// A digit outside the literal's radix (e.g. `0b12`).
    InvalidDigit,
    /// Integer literal does not fit in `i64`.
    IntegerOverflow,
    /// Missing closing `"`.
    UnterminatedString,
    /// The scratch arena had no room to stage a literal.
    ScratchExhausted,
    /// The caller's token limit was reached.
    TokenLimitExceeded,
}

impl LexError {
    fn new(file: &str, offset: usize, kind: LexErrorKind, message: String) -> Self {
        Self {
            file: file.to_owned(),
            offset,
            kind,
            message,
        }
    }

    /// Create an error for a character that starts no token.
    #[cold]
    pub fn unexpected_char(file: &str, offset: usize, found: char) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::BadCodepoint,
            format!("unexpected character {found:?}"),
        )
    }

    /// Create an error for a byte the UTF-8 decoder rejected.
    #[cold]
    pub fn invalid_utf8(file: &str, offset: usize, byte: u8) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::BadCodepoint,
            format!("invalid UTF-8 byte 0x{byte:02X}"),
        )
    }

    /// Create an error for an unknown base selector such as `0z`.
    #[cold]
    pub fn invalid_base(file: &str, offset: usize, selector: char) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::InvalidBase,
            format!("unknown number base `0{selector}`, expected `0x`, `0o` or `0b`"),
        )
    }

    /// Create an error for a base prefix not followed by any digit.
    #[cold]
    pub fn missing_digits(file: &str, offset: usize, radix: u32) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::InvalidBase,
            format!("expected base-{radix} digits after the prefix"),
        )
    }

    /// Create an error for a digit that is not valid in `radix`.
    #[cold]
    pub fn invalid_digit(file: &str, offset: usize, digit: char, radix: u32) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::InvalidDigit,
            format!("invalid digit {digit:?} in base-{radix} literal"),
        )
    }

    /// Create an error for a real literal the float parser refused.
    #[cold]
    pub fn malformed_real(file: &str, offset: usize) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::InvalidDigit,
            "malformed real literal".to_owned(),
        )
    }

    /// Create an integer overflow error.
    #[cold]
    pub fn integer_overflow(file: &str, offset: usize) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::IntegerOverflow,
            "integer literal does not fit in 64 bits".to_owned(),
        )
    }

    /// Create an unterminated string error.
    #[cold]
    pub fn unterminated_string(file: &str, offset: usize) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::UnterminatedString,
            "unterminated string literal, add a closing `\"`".to_owned(),
        )
    }

    /// Create an error for a literal the scratch arena could not stage.
    #[cold]
    pub fn scratch_exhausted(file: &str, offset: usize, cause: AllocError) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::ScratchExhausted,
            format!("scratch arena exhausted while reading literal: {cause}"),
        )
    }

    /// Create the error reported once the token limit is reached.
    #[cold]
    pub fn token_limit_exceeded(file: &str, offset: usize, limit: usize) -> Self {
        Self::new(
            file,
            offset,
            LexErrorKind::TokenLimitExceeded,
            format!("token limit of {limit} exceeded"),
        )
    }
}
