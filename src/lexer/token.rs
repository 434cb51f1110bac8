//! Token values produced by the tokenizer.

use std::fmt;

/// The lexical class of a token.
///
/// The set is closed; every kind maps to exactly one [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Comment,
    Keyword,
    BooleanLiteral,
    TypeName,
    Identifier,
    IntegerLiteral,
    StringLiteral,
    AssignOp,
    ComparisonOp,
    ArithmeticOp,
    Punctuation,
    TypeOrAccessSeparator,
    OtherOperator,
    Whitespace,
}

impl TokenKind {
    pub const ALL: [TokenKind; 14] = [
        TokenKind::Comment,
        TokenKind::Keyword,
        TokenKind::BooleanLiteral,
        TokenKind::TypeName,
        TokenKind::Identifier,
        TokenKind::IntegerLiteral,
        TokenKind::StringLiteral,
        TokenKind::AssignOp,
        TokenKind::ComparisonOp,
        TokenKind::ArithmeticOp,
        TokenKind::Punctuation,
        TokenKind::TypeOrAccessSeparator,
        TokenKind::OtherOperator,
        TokenKind::Whitespace,
    ];

    /// The display category a renderer should use for this kind.
    pub fn category(self) -> Category {
        match self {
            TokenKind::Comment => Category::Comment,
            TokenKind::Keyword => Category::Keyword,
            TokenKind::BooleanLiteral => Category::Constant,
            TokenKind::TypeName => Category::TypeName,
            TokenKind::Identifier => Category::Variable,
            TokenKind::IntegerLiteral => Category::Number,
            TokenKind::StringLiteral => Category::String,
            TokenKind::AssignOp
            | TokenKind::ComparisonOp
            | TokenKind::ArithmeticOp
            | TokenKind::OtherOperator => Category::Operator,
            TokenKind::Punctuation => Category::Punctuation,
            TokenKind::TypeOrAccessSeparator => Category::Text,
            TokenKind::Whitespace => Category::Whitespace,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Rendering category: what a highlighter styles, as opposed to what the lexer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Comment,
    Keyword,
    Constant,
    TypeName,
    Variable,
    Number,
    String,
    Operator,
    Punctuation,
    Text,
    Whitespace,
}

/// Where a token starts in its source.
///
/// `offset` is in bytes; `line` and `column` are 1-indexed, with columns counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub(super) fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The position just past `text`, assuming `text` starts here.
    pub(super) fn advance(self, text: &str) -> Self {
        let (lines, columns) = cursor_distance(text);
        Position {
            offset: self.offset + text.len(),
            line: self.line + lines,
            column: if lines > 0 {
                columns + 1
            } else {
                self.column + columns
            },
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Returns the (lines, columns) the cursor moves by walking over `s`.
/// After a newline, the column count restarts from the beginning of the line.
fn cursor_distance(s: &str) -> (usize, usize) {
    match s.rfind('\n') {
        None => (0, s.chars().count()),
        Some(last) => {
            let lines = s.bytes().filter(|&b| b == b'\n').count();
            (lines, s[last + 1..].chars().count())
        }
    }
}

/// A classified slice of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: Position,
}

impl<'a> Token<'a> {
    /// Byte offset just past the end of this token.
    pub fn end(&self) -> usize {
        self.position.offset + self.text.len()
    }

    pub fn into_owned(self) -> OwnedToken {
        OwnedToken {
            kind: self.kind,
            text: self.text.to_owned(),
            position: self.position,
        }
    }
}

/// A token that owns its text, for use after the source is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedToken {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl From<Token<'_>> for OwnedToken {
    fn from(value: Token<'_>) -> Self {
        value.into_owned()
    }
}
