//! The ordered rule table.
//!
//! Rules are tried top to bottom at each scan position, and the first rule
//! that matches a non-empty prefix wins. This is priority order, not
//! longest-match: comments must come before operators (so `--` is not two
//! minus signs), and keywords before identifiers (so `class` is not a variable).
//!
//! Every pattern is anchored with `\A` and run against the unscanned remainder,
//! so a match always starts at the scan position. Word rules end at an ASCII
//! word boundary: only `[A-Za-z0-9_]` continues a word, so a non-ASCII letter
//! right after one is left for the next scan.

use std::sync::OnceLock;

use regex::Regex;

use super::TokenKind;

/// One entry of the table: a pattern and the kind it produces.
///
/// A rule with an `opener` recognizes a delimited token. If the remainder starts
/// with the opener but the full pattern does not match, the delimiter was never closed.
pub struct Rule {
    pub kind: TokenKind,
    pub pattern: &'static str,
    pub opener: Option<&'static str>,
}

const fn rule(kind: TokenKind, pattern: &'static str) -> Rule {
    Rule {
        kind,
        pattern,
        opener: None,
    }
}

const fn delimited(kind: TokenKind, pattern: &'static str, opener: &'static str) -> Rule {
    Rule {
        kind,
        pattern,
        opener: Some(opener),
    }
}

pub const RULES: &[Rule] = &[
    // `.` stops at a newline.
    rule(TokenKind::Comment, r"\A--.*"),
    // Non-greedy: closes at the nearest `*)`, so block comments do not nest.
    delimited(TokenKind::Comment, r"\A\(\*(?s:.)*?\*\)", "(*"),
    rule(
        TokenKind::Keyword,
        r"\A(?i-u:class|inherits|let|in|while|loop|pool|then|else|fi|done|new|isvoid|not|case|of|esac|if)(?-u:\b)",
    ),
    rule(TokenKind::BooleanLiteral, r"\A(?i-u:true|false)(?-u:\b)"),
    rule(TokenKind::TypeName, r"\A[A-Z][A-Za-z0-9_]*(?-u:\b)"),
    rule(TokenKind::Identifier, r"\A[a-z_][A-Za-z0-9_]*(?-u:\b)"),
    rule(TokenKind::IntegerLiteral, r"\A[0-9]+(?-u:\b)"),
    delimited(TokenKind::StringLiteral, r#"\A"(?:[^"\\]|\\(?s:.))*""#, "\""),
    rule(TokenKind::AssignOp, r"\A<-"),
    rule(TokenKind::ComparisonOp, r"\A(?:<=|=>|<|>)"),
    rule(TokenKind::ArithmeticOp, r"\A[+\-*/]"),
    rule(TokenKind::TypeOrAccessSeparator, r"\A[:.]"),
    rule(TokenKind::OtherOperator, r"\A[=~@]"),
    rule(TokenKind::Punctuation, r"\A[(){}\[\],;]"),
    rule(TokenKind::Whitespace, r"\A\s+"),
];

fn compiled() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| {
                Regex::new(rule.pattern).unwrap_or_else(|err| {
                    panic!("could not compile regex for {}: {err}", rule.kind)
                })
            })
            .collect()
    })
}

/// Outcome of trying the table at one position.
#[derive(Debug, PartialEq, Eq)]
pub enum Scan {
    /// The winning rule's kind and the length in bytes of its match.
    Matched(TokenKind, usize),
    /// The remainder starts a delimited token of this kind that is never closed.
    Unterminated(TokenKind),
    NoMatch,
}

/// Try every rule, in order, against the start of `rest`.
pub fn scan(rest: &str) -> Scan {
    for (rule, regex) in RULES.iter().zip(compiled()) {
        if let Some(m) = regex.find(rest) {
            if !m.is_empty() {
                return Scan::Matched(rule.kind, m.end());
            }
        }
        if let Some(opener) = rule.opener {
            if rest.starts_with(opener) {
                return Scan::Unterminated(rule.kind);
            }
        }
    }
    Scan::NoMatch
}
