//! Syntax highlighting for COOL, the Classroom Object Oriented Language.
//!

pub mod lexer;

#[cfg(feature = "render")]
pub mod highlight;
#[cfg(feature = "render")]
pub mod render;

pub use lexer::{tokenize, tokenize_all, LexError, Token, TokenKind};
