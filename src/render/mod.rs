//! Render tokenized COOL source as a standalone HTML document.
//!
//! Each token is wrapped in a `span` whose class names its [`Category`];
//! colors come from a [`Theme`] passed in by the caller.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::lexer::{tokenize_all, Category, SourceError, Token};

const STYLE: &str = include_str!("style.css");

/// Colors for a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub line_numbers: String,
    pub comment: String,
    pub keyword: String,
    pub constant: String,
    pub type_name: String,
    pub variable: String,
    pub number: String,
    pub string: String,
    pub operator: String,
    pub punctuation: String,
}

impl Default for Theme {
    /// Monokai, with comments in a lighter grey than usual.
    fn default() -> Self {
        Theme {
            background: "#272822".to_owned(),
            text: "#f8f8f2".to_owned(),
            line_numbers: "#75715e".to_owned(),
            comment: "#999999".to_owned(),
            keyword: "#66d9ef".to_owned(),
            constant: "#66d9ef".to_owned(),
            type_name: "#a6e22e".to_owned(),
            variable: "#f8f8f2".to_owned(),
            number: "#ae81ff".to_owned(),
            string: "#e6db74".to_owned(),
            operator: "#f92672".to_owned(),
            punctuation: "#f8f8f2".to_owned(),
        }
    }
}

impl Theme {
    /// The color for a category, or None if it inherits the text color.
    pub fn color(&self, category: Category) -> Option<&str> {
        let color = match category {
            Category::Comment => &self.comment,
            Category::Keyword => &self.keyword,
            Category::Constant => &self.constant,
            Category::TypeName => &self.type_name,
            Category::Variable => &self.variable,
            Category::Number => &self.number,
            Category::String => &self.string,
            Category::Operator => &self.operator,
            Category::Punctuation => &self.punctuation,
            Category::Text | Category::Whitespace => return None,
        };
        Some(color)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub theme: Theme,
    pub line_numbers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            theme: Theme::default(),
            line_numbers: true,
        }
    }
}

const STYLED: &[Category] = &[
    Category::Comment,
    Category::Keyword,
    Category::Constant,
    Category::TypeName,
    Category::Variable,
    Category::Number,
    Category::String,
    Category::Operator,
    Category::Punctuation,
];

/// Short class name for a category's spans.
/// Text and whitespace are emitted without a span.
pub fn css_class(category: Category) -> Option<&'static str> {
    match category {
        Category::Comment => Some("c"),
        Category::Keyword => Some("k"),
        Category::Constant => Some("kc"),
        Category::TypeName => Some("nc"),
        Category::Variable => Some("nv"),
        Category::Number => Some("mi"),
        Category::String => Some("s"),
        Category::Operator => Some("o"),
        Category::Punctuation => Some("p"),
        Category::Text | Category::Whitespace => None,
    }
}

/// CSS rules for the theme's colors, scoped to the `.source` block.
pub fn stylesheet(theme: &Theme) -> String {
    let mut css = format!(
        ".code-section {{ background: {}; }}\n\
         .source {{ color: {}; }}\n\
         .source .linenos {{ color: {}; }}\n",
        theme.background, theme.text, theme.line_numbers
    );
    for &category in STYLED {
        if let (Some(class), Some(color)) = (css_class(category), theme.color(category)) {
            css.push_str(&format!(".source .{class} {{ color: {color}; }}\n"));
        }
    }
    css.push_str(".source .c { font-style: italic; }\n");
    css
}

/// Number of lines a viewer would show for this source.
fn line_count(source: &str) -> usize {
    let newlines = source.matches('\n').count();
    if source.is_empty() || source.ends_with('\n') {
        newlines.max(1)
    } else {
        newlines + 1
    }
}

fn render_tokens(tokens: &[Token]) -> Markup {
    html!(
        @for token in tokens {
            @match css_class(token.kind.category()) {
                Some(class) => { span class=(class) { (token.text) } }
                None => { (token.text) }
            }
        }
    )
}

/// Render just the highlighted code block.
pub fn render_code(tokens: &[Token], line_count: usize, options: &RenderOptions) -> Markup {
    let code = render_tokens(tokens);
    html!(
        div class="source" {
            @if options.line_numbers {
                table class="sourcetable" {
                    tr {
                        td class="linenos" {
                            pre { @for n in 1..=line_count { (n) "\n" } }
                        }
                        td class="code" { pre { (code) } }
                    }
                }
            } @else {
                pre { (code) }
            }
        }
    )
}

/// Render `source` as a complete HTML document titled `name`.
///
/// Fails if the source cannot be tokenized; nothing is rendered in that case.
pub fn render_document(
    name: &str,
    source: &str,
    options: &RenderOptions,
) -> Result<Markup, SourceError> {
    let tokens = tokenize_all(source).map_err(|err| err.annotate(name))?;
    tracing::debug!("rendering {} tokens from {name}", tokens.len());

    let css = format!("{STYLE}{}", stylesheet(&options.theme));
    let code = render_code(&tokens, line_count(source), options);

    Ok(html!(
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (name) }
                style type="text/css" { (PreEscaped(css)) }
            }
            body {
                div class="container" {
                    h1 { (name) }
                    div class="code-section" { (code) }
                }
            }
        }
    ))
}
