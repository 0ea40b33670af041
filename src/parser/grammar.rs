//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse a definition source into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Plain and `<rich>` names are interchangeable wherever a name is expected
    let name = select! {
        Token::Ident(s) => Identifier::new(s),
        Token::RichIdent(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let string_literal = select! {
        Token::String(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    // name | name from source
    let param = name
        .clone()
        .then(just(Token::From).ignore_then(name.clone()).or_not())
        .map_with(|(name, source), e| {
            Spanned::new(ParamDecl { name, source }, span_range(&e.span()))
        });

    let param_list = param
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
        .or_not()
        .map(|params| params.unwrap_or_default());

    let argument = choice((
        string_literal.clone().map(|s| ArgumentExpr::Literal(s.node)),
        name.clone().map(ArgumentExpr::Param),
    ));

    let argument_list = argument
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
        .or_not()
        .map(|args| args.unwrap_or_default());

    // [key: "value", ...]
    let slot_option = name
        .clone()
        .then_ignore(just(Token::Colon))
        .then(string_literal.clone())
        .map_with(|(key, value), e| Spanned::new(SlotOption { key, value }, span_range(&e.span())));

    let slot_options = slot_option
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
        .or_not()
        .map(|options| options.unwrap_or_default());

    let insert_item = just(Token::Insert)
        .ignore_then(name.clone())
        .then(just(Token::Question).or_not())
        .map(|(name, optional)| BodyItem::Insert {
            name,
            optional: optional.is_some(),
        });

    let expand_item = just(Token::Expand)
        .ignore_then(name.clone())
        .then(argument_list)
        .map(|(target, args)| BodyItem::Expand { target, args });

    let slot_item = just(Token::Slot)
        .ignore_then(
            name.clone()
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .then(slot_options)
        .map(|(targets, options)| BodyItem::Slot { targets, options });

    // Keyword-led items come before the bare name, which is a parameter reference
    let body_item = recursive(|body_item| {
        let indent_item = just(Token::Indent)
            .ignore_then(string_literal.clone())
            .then(
                body_item
                    .repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
            )
            .map(|(prefix, body)| BodyItem::Indent { prefix, body });

        choice((
            string_literal.clone().map(|s| BodyItem::Text(s.node)),
            just(Token::Eol).map(|_| BodyItem::Eol),
            insert_item,
            expand_item,
            slot_item,
            indent_item,
            name.clone().map(BodyItem::Var),
        ))
        .map_with(|item, e| Spanned::new(item, span_range(&e.span())))
    });

    let kind = choice((
        just(Token::Text).map(|_| DeclKind::Text),
        just(Token::Macro).map(|_| DeclKind::Macro),
    ));

    let definition = kind
        .then(name)
        .then(param_list)
        .then(just(Token::NoEol).or_not())
        .then(
            body_item
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
        )
        .map_with(|((((kind, name), params), no_eol), body), e| {
            Spanned::new(
                DefinitionDecl {
                    kind,
                    name,
                    params,
                    no_eol: no_eol.is_some(),
                    body,
                },
                span_range(&e.span()),
            )
        });

    definition
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|definitions| Document { definitions })
}
