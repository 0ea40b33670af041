//! Error types for parsing, and ariadne rendering shared by every diagnostic

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let label = if expected.is_empty() {
                    message.clone()
                } else {
                    format!("{}\nExpected: {}", message, expected.join(", "))
                };
                render_report(source, filename, span, message, &label, None)
            }
        }
    }
}

/// Render one error report against its source
pub(crate) fn render_report(
    source: &str,
    filename: &str,
    span: &Span,
    message: &str,
    label: &str,
    help: Option<String>,
) -> String {
    let mut report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span.clone()))
                .with_message(label)
                .with_color(Color::Red),
        );
    if let Some(help) = help {
        report = report.with_help(help);
    }

    let mut buf = Vec::new();
    match report
        .finish()
        .write((filename, Source::from(source)), &mut buf)
    {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => format!("error: {}", message),
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let found_token = err.found().cloned();
        let keyword = found_token.as_ref().and_then(keyword_text);

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match keyword {
                // Keywords are only usable as names between angle brackets
                Some(keyword) => format!(
                    "Cannot use '{}' as a name - it's a reserved keyword (write <{}> instead)",
                    keyword, keyword
                ),
                None => {
                    let found_str = match found {
                        Some(tok) => format_token(tok),
                        None => "end of input".to_string(),
                    };
                    format!("Unexpected {}", found_str)
                }
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        // Format expected tokens nicely
        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

fn keyword_text(tok: &Token) -> Option<&'static str> {
    match tok {
        Token::Text => Some("text"),
        Token::Macro => Some("macro"),
        Token::NoEol => Some("no_eol"),
        Token::From => Some("from"),
        Token::Insert => Some("insert"),
        Token::Expand => Some("expand"),
        Token::Slot => Some("slot"),
        Token::Eol => Some("eol"),
        Token::Indent => Some("indent"),
        _ => None,
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    if let Some(keyword) = keyword_text(tok) {
        return format!("keyword '{}'", keyword);
    }
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::RichIdent(s) => format!("identifier '<{}>'", s),
        Token::String(s) => format!("string \"{}\"", s.escape_debug()),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Question => "'?'".to_string(),
        _ => format!("{:?}", tok),
    }
}
