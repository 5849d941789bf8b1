//! The fixed set of token kinds.

use std::fmt;

/// Token kinds for Kielo.
///
/// Discriminants follow declaration order and fit in a `u8`. Groups are kept
/// contiguous so category checks are range comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    Unknown = 0,

    // === Delimiters ===
    ParenOpen,
    ParenClose,
    SquareOpen,
    SquareClose,
    CurlyOpen,
    CurlyClose,

    // === Literals ===
    Identifier,
    String,
    Real,
    Integer,

    // === Arithmetic ===
    Plus,
    Minus,
    Star,
    Slash,
    Mod,

    // === Bitwise ===
    And,
    Or,
    Tilde,
    ShiftRight,
    ShiftLeft,

    // === Logic ===
    LogicAnd,
    LogicOr,
    LogicNot,

    // === Comparison ===
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Equal,
    NotEqual,

    // === Punctuation ===
    Assign,
    ArrowRight,
    Dot,
    Caret,
    Colon,
    Semicolon,
    Comma,

    // === Compound assignment ===
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    ModAssign,
    AndAssign,
    OrAssign,

    // === Keywords ===
    True,
    False,
    Fn,
    Let,
    Const,
    Struct,
    If,
    Else,
    Return,
    For,
    Break,
    Continue,
    Match,

    // === Trivia ===
    Whitespace,
    LineComment,

    EndOfFile,
}

impl TokenKind {
    /// Number of token kinds.
    pub const COUNT: usize = TokenKind::EndOfFile as usize + 1;

    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; TokenKind::COUNT] = [
        TokenKind::Unknown,
        TokenKind::ParenOpen,
        TokenKind::ParenClose,
        TokenKind::SquareOpen,
        TokenKind::SquareClose,
        TokenKind::CurlyOpen,
        TokenKind::CurlyClose,
        TokenKind::Identifier,
        TokenKind::String,
        TokenKind::Real,
        TokenKind::Integer,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Mod,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Tilde,
        TokenKind::ShiftRight,
        TokenKind::ShiftLeft,
        TokenKind::LogicAnd,
        TokenKind::LogicOr,
        TokenKind::LogicNot,
        TokenKind::Greater,
        TokenKind::Less,
        TokenKind::GreaterEqual,
        TokenKind::LessEqual,
        TokenKind::Equal,
        TokenKind::NotEqual,
        TokenKind::Assign,
        TokenKind::ArrowRight,
        TokenKind::Dot,
        TokenKind::Caret,
        TokenKind::Colon,
        TokenKind::Semicolon,
        TokenKind::Comma,
        TokenKind::PlusAssign,
        TokenKind::MinusAssign,
        TokenKind::StarAssign,
        TokenKind::SlashAssign,
        TokenKind::ModAssign,
        TokenKind::AndAssign,
        TokenKind::OrAssign,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Fn,
        TokenKind::Let,
        TokenKind::Const,
        TokenKind::Struct,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::Return,
        TokenKind::For,
        TokenKind::Break,
        TokenKind::Continue,
        TokenKind::Match,
        TokenKind::Whitespace,
        TokenKind::LineComment,
        TokenKind::EndOfFile,
    ];

    /// Canonical display string.
    ///
    /// Fixed-text tokens display as their text; literal classes use short
    /// names (`Id`, `Str`, `Real`, `Int`).
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Unknown => "<Unknown>",

            TokenKind::ParenOpen => "(",
            TokenKind::ParenClose => ")",
            TokenKind::SquareOpen => "[",
            TokenKind::SquareClose => "]",
            TokenKind::CurlyOpen => "{",
            TokenKind::CurlyClose => "}",

            TokenKind::Identifier => "Id",
            TokenKind::String => "Str",
            TokenKind::Real => "Real",
            TokenKind::Integer => "Int",

            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Mod => "%",
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Tilde => "~",
            TokenKind::ShiftRight => ">>",
            TokenKind::ShiftLeft => "<<",

            TokenKind::LogicAnd => "&&",
            TokenKind::LogicOr => "||",
            TokenKind::LogicNot => "!",

            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEqual => ">=",
            TokenKind::LessEqual => "<=",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",

            TokenKind::Assign => "=",
            TokenKind::ArrowRight => "->",
            TokenKind::Dot => ".",
            TokenKind::Caret => "^",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",

            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::StarAssign => "*=",
            TokenKind::SlashAssign => "/=",
            TokenKind::ModAssign => "%=",
            TokenKind::AndAssign => "&=",
            TokenKind::OrAssign => "|=",

            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Fn => "fn",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::Struct => "struct",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Match => "match",

            TokenKind::Whitespace => " ",
            TokenKind::LineComment => "Comment",

            TokenKind::EndOfFile => "<EOF>",
        }
    }

    /// Reserved words (`true` through `match`).
    #[inline]
    pub fn is_keyword(self) -> bool {
        (TokenKind::True..=TokenKind::Match).contains(&self)
    }

    /// Whitespace and comments.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::LineComment)
    }

    /// Identifiers and literal values.
    #[inline]
    pub fn is_literal(self) -> bool {
        (TokenKind::Identifier..=TokenKind::Integer).contains(&self)
    }

    /// Operators and punctuation with fixed text.
    #[inline]
    pub fn is_operator(self) -> bool {
        (TokenKind::Plus..=TokenKind::OrAssign).contains(&self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
