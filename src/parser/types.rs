//! Datatype and parameter-list parsing.
//!
//! Datatypes are single keyword tokens; nullability comes from the
//! declaration's `nullable` modifier rather than from the type itself.

use crate::{
    ast::{
        statements::ParameterNode,
        types::{Datatype, Modifier},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

/// Resolves a datatype keyword, with nullability taken from `modifiers`.
pub fn parse_datatype(parser: &mut Parser, token: &Token, modifiers: &[Token]) -> Option<Datatype> {
    let nullable = Modifier::all_of(modifiers).contains(&Modifier::Nullable);
    match Datatype::of_token(token, nullable) {
        Some(datatype) => Some(datatype),
        None => {
            parser.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("a datatype"),
                    found: token.value.clone(),
                },
                token,
            );
            None
        }
    }
}

/// The keyword token that spells `datatype`, used when a `?` declaration's
/// type is inferred.
pub fn type_token(datatype: Datatype) -> Option<Token> {
    let kind = datatype.kind.token_kind()?;
    Some(Token::synthetic(kind, datatype.kind.name()))
}

/// Parses `MODS TYPE NAME, MODS TYPE NAME, ...` between a function's parentheses.
pub fn parse_parameters(parser: &mut Parser, tokens: &[Token]) -> Option<Vec<ParameterNode>> {
    if tokens.is_empty() {
        return Some(vec![]);
    }

    let mut parameters = vec![];
    for segment in tokens.split(|token| token.kind == TokenKind::Comma) {
        let split = segment.iter().take_while(|token| token.kind.is_modifier()).count();
        let (modifiers, rest) = segment.split_at(split);

        if let Some(invalid) = modifiers
            .iter()
            .find(|token| Modifier::of(token.kind).is_some_and(|modifier| modifier.is_visibility()))
        {
            parser.error(
                ErrorImpl::InvalidModifier {
                    target: String::from("parameter"),
                    modifier: invalid.value.clone(),
                },
                invalid,
            );
            return None;
        }

        let (datatype, identifier) = match rest {
            [datatype, identifier] => (datatype, identifier),
            _ => {
                let at = rest
                    .get(2)
                    .or(rest.first())
                    .or(segment.last())
                    .unwrap_or(&tokens[tokens.len() - 1]);
                parser.error(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: at.value.clone(),
                        message: String::from("expected `MODIFIERS TYPE NAME` as function parameter"),
                    },
                    at,
                );
                return None;
            }
        };

        if !datatype.kind.is_datatype() || datatype.kind == TokenKind::Void {
            parser.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("a parameter datatype"),
                    found: datatype.value.clone(),
                },
                datatype,
            );
            return None;
        }
        if identifier.kind != TokenKind::Identifier || identifier.value.contains('.') {
            parser.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("a parameter name"),
                    found: identifier.value.clone(),
                },
                identifier,
            );
            return None;
        }

        parameters.push(ParameterNode {
            modifiers: modifiers.to_vec(),
            datatype: datatype.clone(),
            identifier: identifier.clone(),
        });
    }

    Some(parameters)
}

/// Datatypes of parsed parameters, with each one's nullability applied.
pub fn parameter_types(parameters: &[ParameterNode]) -> Vec<Datatype> {
    parameters
        .iter()
        .filter_map(|param| {
            let nullable = Modifier::all_of(&param.modifiers).contains(&Modifier::Nullable);
            Datatype::of_token(&param.datatype, nullable)
        })
        .collect()
}
