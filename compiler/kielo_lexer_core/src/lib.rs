//! Low-level building blocks for the Kielo lexer.
//!
//! - [`utf8`]: allocation-free UTF-8 encoding/decoding and a bidirectional
//!   byte cursor
//! - [`TokenKind`]: the fixed token enumeration and its display names
//!
//! This crate has no dependencies so tooling can share it with the compiler.

mod token_kind;
pub mod utf8;

pub use token_kind::TokenKind;
pub use utf8::{Utf8Decoded, Utf8Encoded, Utf8Iterator};
