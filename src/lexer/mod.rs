//! Tokenizer for COOL source text.
//!
//! The tokenizer partitions its input into classified tokens using the ordered
//! table in [`rules`]. Nothing is discarded: whitespace and comments are tokens
//! too, so concatenating the text of every token gives back the input exactly.
//!
//! Scanning is lazy. [`tokenize`] returns an iterator that holds only the
//! current position; each call to `next` commits to one token and never backtracks.

use std::iter::FusedIterator;

use thiserror::Error;

pub mod rules;
mod token;


pub use token::{Category, OwnedToken, Position, Token, TokenKind};

use rules::Scan;

/// Error type for a scan that cannot continue.
///
/// All errors are fatal to the scan that produced them; the tokenizer yields nothing after one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{position}: unterminated block comment")]
    UnterminatedComment { position: Position },
    #[error("{position}: unterminated string literal")]
    UnterminatedString { position: Position },
    #[error("{position}: unrecognized character {character:?}")]
    UnrecognizedCharacter { position: Position, character: char },
}

impl LexError {
    /// Where the offending comment, string, or character starts.
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedComment { position }
            | LexError::UnterminatedString { position }
            | LexError::UnrecognizedCharacter { position, .. } => *position,
        }
    }

    pub fn offset(&self) -> usize {
        self.position().offset
    }
}

/// A lexing error annotated with the name of the input it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}:{error}")]
pub struct SourceError {
    pub name: String,
    #[source]
    pub error: LexError,
}

impl LexError {
    /// Add the input's display name to the error.
    pub fn annotate(self, name: impl Into<String>) -> SourceError {
        SourceError {
            name: name.into(),
            error: self,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;

/// Lazy scanner over one source string.
///
/// Cloning a tokenizer forks the scan at its current position.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    position: Position,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Tokenizer {
            source,
            position: Position::start(),
            failed: false,
        }
    }

    /// The position of the next token to be produced.
    pub fn position(&self) -> Position {
        self.position
    }

    fn fail(&mut self, error: LexError) -> Option<LexResult<Token<'a>>> {
        tracing::debug!("tokenizing stopped: {error}");
        self.failed = true;
        Some(Err(error))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position.offset >= self.source.len() {
            return None;
        }
        let position = self.position;
        let rest = &self.source[position.offset..];

        match rules::scan(rest) {
            Scan::Matched(kind, len) => {
                let text = &rest[..len];
                self.position = position.advance(text);
                tracing::trace!("{position}: {kind} {text:?}");
                Some(Ok(Token {
                    kind,
                    text,
                    position,
                }))
            }
            Scan::Unterminated(TokenKind::Comment) => {
                self.fail(LexError::UnterminatedComment { position })
            }
            Scan::Unterminated(_) => self.fail(LexError::UnterminatedString { position }),
            Scan::NoMatch => {
                // The remainder is non-empty, so it has a first character.
                let character = rest.chars().next().unwrap_or_default();
                self.fail(LexError::UnrecognizedCharacter {
                    position,
                    character,
                })
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Split the input into its constituent tokens, lazily.
pub fn tokenize(source: &str) -> Tokenizer<'_> {
    Tokenizer::new(source)
}

/// Split the input into its constituent tokens, stopping at the first error.
pub fn tokenize_all(source: &str) -> LexResult<Vec<Token<'_>>> {
    tokenize(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize_all(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    /// Kinds and text, with whitespace tokens left out.
    fn significant(input: &str) -> Vec<(TokenKind, &str)> {
        tokenize_all(input)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokenize("").next(), None);
    }

    #[test]
    fn keywords_ignore_case() {
        for input in ["class", "Class", "CLASS", "cLaSs"] {
            let tokens = tokenize_all(input).unwrap();
            assert_eq!(tokens.len(), 1, "for {input:?}");
            assert_eq!(tokens[0].kind, TokenKind::Keyword, "for {input:?}");
            assert_eq!(tokens[0].text, input);
        }
    }

    #[test]
    fn booleans_ignore_case() {
        assert_eq!(kinds("true"), [TokenKind::BooleanLiteral]);
        assert_eq!(kinds("FALSE"), [TokenKind::BooleanLiteral]);
        assert_eq!(kinds("truest"), [TokenKind::Identifier]);
    }

    #[test]
    fn keywords_are_whole_words() {
        assert_eq!(significant("classify"), [(TokenKind::Identifier, "classify")]);
        assert_eq!(significant("Classy"), [(TokenKind::TypeName, "Classy")]);
        assert_eq!(significant("if_x"), [(TokenKind::Identifier, "if_x")]);
        assert_eq!(significant("fi2"), [(TokenKind::Identifier, "fi2")]);
    }

    #[test]
    fn type_names_and_identifiers() {
        assert_eq!(kinds("Int"), [TokenKind::TypeName]);
        assert_eq!(kinds("int"), [TokenKind::Identifier]);
        assert_eq!(kinds("_tmp"), [TokenKind::Identifier]);
        assert_eq!(kinds("SELF_TYPE"), [TokenKind::TypeName]);
    }

    #[test]
    fn minus_is_not_a_comment() {
        assert_eq!(
            significant("a - b"),
            [
                (TokenKind::Identifier, "a"),
                (TokenKind::ArithmeticOp, "-"),
                (TokenKind::Identifier, "b"),
            ]
        );
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        assert_eq!(
            significant("a -- b\nc"),
            [
                (TokenKind::Identifier, "a"),
                (TokenKind::Comment, "-- b"),
                (TokenKind::Identifier, "c"),
            ]
        );
        assert_eq!(
            significant("a -- b"),
            [(TokenKind::Identifier, "a"), (TokenKind::Comment, "-- b")]
        );
    }

    #[test]
    fn block_comment_spans_lines() {
        let tokens = tokenize_all("(* one\ntwo *)x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "(* one\ntwo *)");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].position.line, 2);
        assert_eq!(tokens[1].position.column, 7);
    }

    #[test]
    fn block_comments_do_not_nest() {
        let tokens: Vec<_> = tokenize_all("(* (* *) *)")
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect();
        assert_eq!(
            tokens,
            [
                (TokenKind::Comment, "(* (* *)"),
                (TokenKind::Whitespace, " "),
                (TokenKind::ArithmeticOp, "*"),
                (TokenKind::Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            significant("x <- y <= z => w < v > u"),
            [
                (TokenKind::Identifier, "x"),
                (TokenKind::AssignOp, "<-"),
                (TokenKind::Identifier, "y"),
                (TokenKind::ComparisonOp, "<="),
                (TokenKind::Identifier, "z"),
                (TokenKind::ComparisonOp, "=>"),
                (TokenKind::Identifier, "w"),
                (TokenKind::ComparisonOp, "<"),
                (TokenKind::Identifier, "v"),
                (TokenKind::ComparisonOp, ">"),
                (TokenKind::Identifier, "u"),
            ]
        );
        assert_eq!(
            kinds("~@=.:;,{}()[]+*/"),
            [
                TokenKind::OtherOperator,
                TokenKind::OtherOperator,
                TokenKind::OtherOperator,
                TokenKind::TypeOrAccessSeparator,
                TokenKind::TypeOrAccessSeparator,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::ArithmeticOp,
                TokenKind::ArithmeticOp,
                TokenKind::ArithmeticOp,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        let input = r#"out_string("say \"hi\"\n\\")"#;
        assert_eq!(
            significant(input),
            [
                (TokenKind::Identifier, "out_string"),
                (TokenKind::Punctuation, "("),
                (TokenKind::StringLiteral, r#""say \"hi\"\n\\""#),
                (TokenKind::Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn string_may_contain_escaped_newline() {
        let tokens = tokenize_all("\"a\\\nb\" x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "\"a\\\nb\"");
        assert_eq!(tokens[2].position.line, 2);
    }

    #[test]
    fn error_on_unterminated_string() {
        let err = tokenize_all("\"abc").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }), "{err:?}");
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn error_on_unterminated_comment() {
        let err = tokenize_all("x <- 1;\n  (* no end").unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedComment {
                position: Position {
                    offset: 10,
                    line: 2,
                    column: 3
                }
            }
        );
    }

    #[test]
    fn error_on_unrecognized_character() {
        let err = tokenize_all("a <- b # c").unwrap_err();
        assert_eq!(
            err,
            LexError::UnrecognizedCharacter {
                position: Position {
                    offset: 7,
                    line: 1,
                    column: 8
                },
                character: '#',
            }
        );
        assert_eq!(err.to_string(), "1:8: unrecognized character '#'");
    }

    #[test]
    fn integers_are_whole_words() {
        assert_eq!(kinds("42"), [TokenKind::IntegerLiteral]);
        let err = tokenize_all("42abc").unwrap_err();
        assert!(
            matches!(err, LexError::UnrecognizedCharacter { character: '4', .. }),
            "{err:?}"
        );
    }

    #[test]
    fn error_names_the_non_ascii_letter() {
        let mut tokens = tokenize("xé");
        let x = tokens.next().unwrap().unwrap();
        assert_eq!((x.kind, x.text), (TokenKind::Identifier, "x"));
        assert_eq!(
            tokens.next(),
            Some(Err(LexError::UnrecognizedCharacter {
                position: Position {
                    offset: 1,
                    line: 1,
                    column: 2
                },
                character: 'é',
            }))
        );

        let err = tokenize_all("1é").unwrap_err();
        assert_eq!(err.offset(), 1);
        assert!(
            matches!(err, LexError::UnrecognizedCharacter { character: 'é', .. }),
            "{err:?}"
        );

        let err = tokenize_all("héllo wörld ").unwrap_err();
        assert_eq!(err.offset(), 1);
        assert!(
            matches!(err, LexError::UnrecognizedCharacter { character: 'é', .. }),
            "{err:?}"
        );
    }

    #[test]
    fn star_paren_does_not_close_its_own_opener() {
        let err = tokenize_all("x (*) y").unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedComment {
                position: Position {
                    offset: 2,
                    line: 1,
                    column: 3
                }
            }
        );
        // A later closer ends it.
        assert_eq!(significant("(*) *)"), [(TokenKind::Comment, "(*) *)")]);
    }

    #[test]
    fn tokenizer_position_tracks_token_ends() {
        let input = "let s : String <- \"a\nb\" in s";
        let mut tokens = tokenize(input);
        assert_eq!(tokens.position(), Position::start());
        while let Some(token) = tokens.next() {
            let token = token.unwrap();
            assert_eq!(tokens.position().offset, token.end());
            assert_eq!(&input[token.position.offset..token.end()], token.text);
        }
        assert_eq!(tokens.position().offset, input.len());
        assert_eq!(tokens.position().line, 2);
    }

    #[test]
    fn stops_after_error() {
        let mut tokens = tokenize("a $ b");
        assert!(matches!(tokens.next(), Some(Ok(_))));
        assert!(matches!(tokens.next(), Some(Ok(_))));
        assert!(matches!(tokens.next(), Some(Err(_))));
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn restartable() {
        let input = "class Main { main() : Int { 0 }; };";
        let first: Vec<_> = tokenize(input).collect();
        let second: Vec<_> = tokenize(input).collect();
        assert_eq!(first, second);

        let mut scan = tokenize(input);
        scan.next();
        let fork = scan.clone();
        assert_eq!(scan.collect::<Vec<_>>(), fork.collect::<Vec<_>>());
    }

    #[test]
    fn annotated_error() {
        let err = tokenize_all("\"abc").unwrap_err().annotate("hello.cl");
        assert_eq!(err.to_string(), "hello.cl:1:1: unterminated string literal");
    }

    #[test]
    fn tokens_outlive_source_when_owned() {
        let owned: Vec<OwnedToken> = {
            let source = String::from("let x : Int <- 3 in x");
            tokenize_all(&source)
                .unwrap()
                .into_iter()
                .map(OwnedToken::from)
                .collect()
        };
        assert_eq!(owned[0].kind, TokenKind::Keyword);
        assert_eq!(owned.last().unwrap().text, "x");
    }

    #[test]
    fn program() {
        let input = r#"class Main inherits IO {
    main() : Object {
        if not isvoid self then out_int(3 * 4) else abort() fi
    };
};
"#;
        let tokens = tokenize_all(input).unwrap();
        let text: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(text, input);

        let keywords: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Keyword)
            .map(|t| t.text)
            .collect();
        assert_eq!(
            keywords,
            ["class", "inherits", "if", "not", "isvoid", "then", "else", "fi"]
        );
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::TypeName && t.text == "IO"));
    }
}
