//! Lexer for the Kielo language.
//!
//! [`Lexer`] turns a source byte buffer into [`Token`]s, one per call, reading
//! codepoints through [`kielo_lexer_core::utf8`]. Lexical errors are
//! [`LexError`] values; the lexer resynchronises after each one, so the
//! caller decides whether to stop at the first error or collect them all.
//!
//! ```text
//! source bytes -> utf8::decode -> Lexer dispatch -> Result<Token, LexError>
//!                                      |
//!                                scratch Arena (digit staging)
//! ```

mod keywords;
mod lex_error;
mod lexer;
mod options;
mod token;

use std::sync::Once;

pub use kielo_lexer_core::TokenKind;
pub use lex_error::{LexError, LexErrorKind};
pub use lexer::Lexer;
pub use options::LexerOptions;
pub use token::{Token, TokenValue};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=kielo_lexer=debug` for
/// lexical errors or `RUST_LOG=kielo_lexer=trace` for every token and
/// scratch region.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
