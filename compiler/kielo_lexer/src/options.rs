/// Caller-supplied lexer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerOptions {
    /// Name copied into every [`LexError`](crate::LexError).
    pub file_name: String,
    /// Maximum number of results the [`Lexer`](crate::Lexer) iterator yields
    /// before reporting [`TokenLimitExceeded`](crate::LexErrorKind::TokenLimitExceeded).
    /// `None` means unlimited.
    pub token_limit: Option<usize>,
}

impl LexerOptions {
    /// Options for a named file, without a token limit.
    pub fn for_file(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_token_limit(mut self, limit: usize) -> Self {
        self.token_limit = Some(limit);
        self
    }
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            file_name: "<No file>".to_owned(),
            token_limit: None,
        }
    }
}
