use crate::{
    ast::{
        expressions::{
            AssignmentExpr, BinaryExpr, CallExpr, CastExpr, Expr, LiteralExpr, PrefixExpr, TypedExpr,
            VariableExpr,
        },
        types::{Datatype, PrimitiveKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::{Parser, VariableSlot},
};

/// Parses and type checks a complete expression, reporting the first error.
pub fn parse_expression(parser: &mut Parser, tokens: &[Token], context: &Token) -> Option<TypedExpr> {
    match try_parse_expression(parser, tokens, context) {
        Ok(expr) => Some(expr),
        Err(error) => {
            parser.report(error);
            None
        }
    }
}

/// Like [`parse_expression`], but hands the error back instead of reporting it.
pub fn try_parse_expression(parser: &mut Parser, tokens: &[Token], context: &Token) -> Result<TypedExpr, Error> {
    if tokens.is_empty() {
        return Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from("an expression"),
                found: context.value.clone(),
            },
            context.span.end.clone(),
        ));
    }

    parser.load_expression(tokens, context);
    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::EOF {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }
    Ok(expr)
}

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<TypedExpr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            let token = parser.current_token();
            let error = if token_kind == TokenKind::EOF {
                ErrorImpl::ExpectedToken {
                    expected: String::from("an expression"),
                    found: token.value.clone(),
                }
            } else {
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                }
            };
            return Err(Error::new(error, parser.get_position()));
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_bp() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };

        left = led(parser, left, parser.current_bp())?;
    }

    Ok(left)
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<TypedExpr, Error> {
    let token = parser.advance();

    let valid = match token.kind {
        TokenKind::IntegerLiteral => token.value.parse::<i32>().is_ok(),
        TokenKind::LongLiteral => token.value.parse::<i64>().is_ok(),
        TokenKind::DoubleLiteral => token.value.parse::<f64>().is_ok(),
        TokenKind::FloatLiteral => token.value.parse::<f32>().is_ok(),
        TokenKind::CharLiteral => token.value.chars().count() == 1,
        _ => true,
    };
    if !valid {
        return Err(Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        ));
    }

    match Datatype::of_literal(token.kind) {
        Some(datatype) => Ok(TypedExpr::new(datatype, Expr::Literal(LiteralExpr { value: token }))),
        None => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )),
    }
}

/// A variable read, a call `NAME(ARGS)` or an assignment `NAME OP value`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<TypedExpr, Error> {
    let identifier = parser.advance();

    match parser.current_token_kind() {
        TokenKind::OpenParen => parse_call_expr(parser, identifier),
        kind if kind.is_assignment() => {
            let operator = parser.advance();
            let value = parse_expr(parser, BindingPower::Default)?;
            let datatype = parser.assign(&identifier, &operator, &value)?;

            Ok(TypedExpr::new(
                datatype,
                Expr::Assignment(AssignmentExpr {
                    assignee: identifier,
                    operator,
                    value: Box::new(value),
                }),
            ))
        }
        _ => {
            let resolved = parser.find_variable(&identifier)?;
            if matches!(resolved.slot, VariableSlot::Local(_)) && !resolved.variable.initialized {
                return Err(Error::new(
                    ErrorImpl::VariableNotInitialized {
                        variable: identifier.value.clone(),
                    },
                    identifier.span.start.clone(),
                ));
            }

            Ok(TypedExpr::new(
                resolved.variable.datatype,
                Expr::Variable(VariableExpr { identifier }),
            ))
        }
    }
}

fn parse_call_expr(parser: &mut Parser, callee: Token) -> Result<TypedExpr, Error> {
    parser.expect(TokenKind::OpenParen, "`(`")?;

    let mut arguments = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);
            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                continue;
            }
            break;
        }
    }
    parser.expect(TokenKind::CloseParen, "`)`")?;

    let datatype = parser.resolve_call(&callee, &arguments)?;
    Ok(TypedExpr::new(datatype, Expr::Call(CallExpr { callee, arguments })))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<TypedExpr, Error> {
    let operator = parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    let datatype = Datatype::prefix_result(operator.kind, right.datatype).ok_or_else(|| {
        Error::new(
            ErrorImpl::OperatorTypeError {
                operator: operator.value.clone(),
                operands: right.datatype.to_string(),
            },
            operator.span.start.clone(),
        )
    })?;

    Ok(TypedExpr::new(
        datatype,
        Expr::Prefix(PrefixExpr {
            operator,
            right: Box::new(right),
        }),
    ))
}

/// `( expr )`, or a cast when the parentheses hold only a datatype.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<TypedExpr, Error> {
    parser.advance();

    let is_cast = parser.current_token_kind().is_datatype()
        && parser.peek(1).is_some_and(|token| token.kind == TokenKind::CloseParen);
    if is_cast {
        let target = parser.advance();
        parser.advance();
        return parse_cast_expr(parser, target);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "`)`")?;

    Ok(expr)
}

fn parse_cast_expr(parser: &mut Parser, target: Token) -> Result<TypedExpr, Error> {
    let value = parse_expr(parser, BindingPower::Unary)?;

    let datatype = match Datatype::of_token(&target, false) {
        Some(datatype) if datatype.kind != PrimitiveKind::Void => datatype,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: target.value.clone(),
                    message: String::from("cannot cast to void"),
                },
                target.span.start.clone(),
            ))
        }
    };
    if !Datatype::can_cast(value.datatype, datatype) {
        return Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: format!("a value castable to {}", datatype),
                received: value.datatype.to_string(),
            },
            value.get_span().start.clone(),
        ));
    }

    Ok(TypedExpr::new(
        datatype,
        Expr::Cast(CastExpr {
            target,
            value: Box::new(value),
        }),
    ))
}

pub fn parse_binary_expr(parser: &mut Parser, left: TypedExpr, bp: BindingPower) -> Result<TypedExpr, Error> {
    let operator = parser.advance();

    let right = parse_expr(parser, bp)?;

    let datatype = Datatype::binary_result(operator.kind, left.datatype, right.datatype).ok_or_else(|| {
        Error::new(
            ErrorImpl::OperatorTypeError {
                operator: operator.value.clone(),
                operands: format!("{} and {}", left.datatype, right.datatype),
            },
            operator.span.start.clone(),
        )
    })?;

    Ok(TypedExpr::new(
        datatype,
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }),
    ))
}
