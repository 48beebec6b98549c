//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse scene source code into an AST
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
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let number = select! {
        Token::Number(n) => n,
    };

    let modifier_key = identifier
        .clone()
        .map(|id| Spanned::new(ModifierKey::from_name(id.node.as_str()), id.span));

    let modifier_value = choice((
        // Numbers (including negative via Minus token)
        just(Token::Minus)
            .or_not()
            .then(number)
            .map(|(neg, n)| ModifierValue::Number(if neg.is_some() { -n } else { n })),
        just(Token::True).to(ModifierValue::Bool(true)),
        just(Token::False).to(ModifierValue::Bool(false)),
        select! { Token::HexColor(c) => ModifierValue::Color(c) },
        identifier
            .clone()
            .map(|id| ModifierValue::Identifier(id.node)),
    ))
    .map_with(|v, e| Spanned::new(v, span_range(&e.span())));

    let modifier = modifier_key
        .then_ignore(just(Token::Colon))
        .then(modifier_value)
        .map_with(|(key, value), e| Spanned::new(Modifier { key, value }, span_range(&e.span())));

    let modifier_block = modifier
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let container_keyword = choice((
        just(Token::Frame).to(ElementKeyword::Frame),
        just(Token::Section).to(ElementKeyword::Section),
        just(Token::Row).to(ElementKeyword::Row),
        just(Token::Col).to(ElementKeyword::Col),
    ))
    .map_with(|k, e| Spanned::new(k, span_range(&e.span())));

    // Recursive element parser
    let element = recursive(|element| {
        // Leaf element: `rect name [modifiers]` (no child block)
        let rect_decl = just(Token::Rect)
            .map_with(|_, e| Spanned::new(ElementKeyword::Rect, span_range(&e.span())))
            .then(identifier.clone().or_not())
            .then(modifier_block.clone().or_not())
            .map(|((keyword, name), modifiers)| ElementDecl {
                keyword,
                name,
                modifiers: modifiers.unwrap_or_default(),
                children: vec![],
            });

        // Container element with an optional child block
        let container_decl = container_keyword
            .clone()
            .then(identifier.clone().or_not())
            .then(modifier_block.clone().or_not())
            .then(
                element
                    .clone()
                    .repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
                    .or_not(),
            )
            .map(|(((keyword, name), modifiers), children)| ElementDecl {
                keyword,
                name,
                modifiers: modifiers.unwrap_or_default(),
                children: children.unwrap_or_default(),
            });

        choice((rect_decl, container_decl))
            .map_with(|decl, e| Spanned::new(decl, span_range(&e.span())))
            .boxed()
    });

    // Document is a list of top-level elements
    element
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|elements| Document { elements })
}
