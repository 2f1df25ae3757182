//! Expression grammar with the type checks fused into the descent.
//!
//! Each precedence level returns `Ok(None)` when no expression starts at
//! the cursor, `Ok(Some(ret))` with the type and value category of the
//! parsed expression, and `Err` for a violation found after the level
//! committed. Binary levels are left associative loops; once an operator
//! token is consumed the right operand is mandatory.

use crate::{
    errors::errors::{Error, ErrorKind},
    lexer::tokens::TokenKind,
    symbols::symbols::{Ret, SymbolKind, Type},
};

use super::parser::Parser;

/// `expr ::= exprLogic`
pub fn parse_expr(parser: &mut Parser) -> Result<Option<Ret>, Error> {
    parse_expr_logic(parser)
}

/// `exprLogic ::= exprAssign ( ( AND | OR ) exprAssign )*`
///
/// Operands must agree in type and must not be str; the result is an
/// int rvalue.
fn parse_expr_logic(parser: &mut Parser) -> Result<Option<Ret>, Error> {
    let mut left = match parse_expr_assign(parser)? {
        Some(ret) => ret,
        None => return Ok(None),
    };

    while let Some(op) = parser
        .consume(TokenKind::And)
        .or_else(|| parser.consume(TokenKind::Or))
    {
        let op_text = operator_text(op.kind);
        let right = require_operand(parser, parse_expr_assign, op_text)?;
        check_operands(&left, &right, op_text, op.line)?;
        left = Ret::rval(Type::Int);
    }

    Ok(Some(left))
}

/// `exprAssign ::= ID ASSIGN exprComp | exprComp`
///
/// The only rule that backtracks: a lone ID is handed back to the
/// comparison level by resetting the cursor. Once the `=` is consumed
/// the destination is checked before the right side is even parsed, so
/// an unknown name is reported on the ID rather than on some token
/// inside the value.
fn parse_expr_assign(parser: &mut Parser) -> Result<Option<Ret>, Error> {
    let start = parser.mark();

    if let Some(name_token) = parser.consume(TokenKind::Id) {
        if let Some(assign_token) = parser.consume(TokenKind::Assign) {
            let name = name_token.text().to_string();
            let destination = match parser.symbols.lookup_visible(&name) {
                Some(id) => id,
                None => {
                    return Err(Error::new(
                        ErrorKind::SymbolNotDeclared { name },
                        name_token.line,
                    ));
                }
            };
            if parser.symbols.symbol(destination).is_function() {
                return Err(Error::new(
                    ErrorKind::AssignToFunction { name },
                    name_token.line,
                ));
            }
            let expected = parser.symbols.symbol(destination).ty;

            let value = require_operand(parser, parse_expr_comp, "=")?;
            if value.ty != expected {
                return Err(Error::new(
                    ErrorKind::TypeMatchError {
                        expected: expected.to_string(),
                        received: value.ty.to_string(),
                    },
                    assign_token.line,
                ));
            }
            return Ok(Some(Ret::rval(expected)));
        }
        parser.reset(start);
    }

    parse_expr_comp(parser)
}

/// `exprComp ::= exprAdd ( ( LESS | EQUAL ) exprAdd )?`
///
/// At most one comparison per level: `a < b < c` does not chain.
/// Operands must agree in type, str included; the result is an int
/// rvalue.
fn parse_expr_comp(parser: &mut Parser) -> Result<Option<Ret>, Error> {
    let left = match parse_expr_add(parser)? {
        Some(ret) => ret,
        None => return Ok(None),
    };

    if let Some(op) = parser
        .consume(TokenKind::Less)
        .or_else(|| parser.consume(TokenKind::Equal))
    {
        let op_text = operator_text(op.kind);
        let right = require_operand(parser, parse_expr_add, op_text)?;
        if left.ty != right.ty {
            return Err(Error::new(
                ErrorKind::OperandTypeMismatch {
                    op: op_text.to_string(),
                    left: left.ty.to_string(),
                    right: right.ty.to_string(),
                },
                op.line,
            ));
        }
        return Ok(Some(Ret::rval(Type::Int)));
    }

    Ok(Some(left))
}

/// `exprAdd ::= exprMul ( ( ADD | SUB ) exprMul )*`
fn parse_expr_add(parser: &mut Parser) -> Result<Option<Ret>, Error> {
    let mut left = match parse_expr_mul(parser)? {
        Some(ret) => ret,
        None => return Ok(None),
    };

    while let Some(op) = parser
        .consume(TokenKind::Add)
        .or_else(|| parser.consume(TokenKind::Sub))
    {
        let op_text = operator_text(op.kind);
        let right = require_operand(parser, parse_expr_mul, op_text)?;
        let ty = check_operands(&left, &right, op_text, op.line)?;
        left = Ret::rval(ty);
    }

    Ok(Some(left))
}

/// `exprMul ::= exprPrefix ( ( MUL | DIV ) exprPrefix )*`
fn parse_expr_mul(parser: &mut Parser) -> Result<Option<Ret>, Error> {
    let mut left = match parse_expr_prefix(parser)? {
        Some(ret) => ret,
        None => return Ok(None),
    };

    while let Some(op) = parser
        .consume(TokenKind::Mul)
        .or_else(|| parser.consume(TokenKind::Div))
    {
        let op_text = operator_text(op.kind);
        let right = require_operand(parser, parse_expr_prefix, op_text)?;
        let ty = check_operands(&left, &right, op_text, op.line)?;
        left = Ret::rval(ty);
    }

    Ok(Some(left))
}

/// `exprPrefix ::= ( SUB | NOT )? factor`
///
/// `-` keeps the operand type, `!` always yields int; neither accepts a
/// str operand. Both produce rvalues.
fn parse_expr_prefix(parser: &mut Parser) -> Result<Option<Ret>, Error> {
    if let Some(op) = parser
        .consume(TokenKind::Sub)
        .or_else(|| parser.consume(TokenKind::Not))
    {
        let op_text = operator_text(op.kind);
        let operand = require_operand(parser, parse_factor, op_text)?;
        if operand.ty == Type::Str {
            return Err(Error::new(
                ErrorKind::StrOperand {
                    op: op_text.to_string(),
                },
                op.line,
            ));
        }
        let ty = if op.kind == TokenKind::Not {
            Type::Int
        } else {
            operand.ty
        };
        return Ok(Some(Ret::rval(ty)));
    }

    parse_factor(parser)
}

/// `factor ::= INT | REAL | STR | LPAR expr RPAR | ID LPAR ( expr ( COMMA expr )* )? RPAR | ID`
fn parse_factor(parser: &mut Parser) -> Result<Option<Ret>, Error> {
    if parser.consume(TokenKind::Int).is_some() {
        return Ok(Some(Ret::rval(Type::Int)));
    }
    if parser.consume(TokenKind::Real).is_some() {
        return Ok(Some(Ret::rval(Type::Real)));
    }
    if parser.consume(TokenKind::Str).is_some() {
        return Ok(Some(Ret::rval(Type::Str)));
    }

    if parser.consume(TokenKind::LPar).is_some() {
        // parentheses pass the inner result through unchanged, value
        // category included
        let inner = require_operand(parser, parse_expr, "(")?;
        parser.expect(TokenKind::RPar)?;
        return Ok(Some(inner));
    }

    if let Some(name_token) = parser.consume(TokenKind::Id) {
        let name = name_token.text().to_string();

        if parser.consume(TokenKind::LPar).is_some() {
            return parse_call(parser, name, name_token.line).map(Some);
        }

        let id = match parser.symbols.lookup_visible(&name) {
            Some(id) => id,
            None => {
                return Err(Error::new(
                    ErrorKind::SymbolNotDeclared { name },
                    name_token.line,
                ));
            }
        };
        let symbol = parser.symbols.symbol(id);
        if symbol.is_function() {
            return Err(Error::new(
                ErrorKind::FunctionAsValue { name },
                name_token.line,
            ));
        }
        return Ok(Some(Ret::lval(symbol.ty)));
    }

    Ok(None)
}

/// Call arguments and their checks, entered with `ID LPAR` consumed.
///
/// The callee is resolved first, then the argument count, then each
/// argument type in order. Count errors point at the callee, type
/// errors at the first token of the offending argument.
fn parse_call(parser: &mut Parser, name: String, line: u32) -> Result<Ret, Error> {
    let id = match parser.symbols.lookup_visible(&name) {
        Some(id) => id,
        None => {
            return Err(Error::new(ErrorKind::SymbolNotDeclared { name }, line));
        }
    };

    let symbol = parser.symbols.symbol(id);
    let (param_types, ret_ty): (Vec<Type>, Type) = match &symbol.kind {
        SymbolKind::Function { params } => {
            (params.iter().map(|param| param.ty).collect(), symbol.ty)
        }
        _ => {
            return Err(Error::new(ErrorKind::NotAFunction { name }, line));
        }
    };

    let mut args: Vec<(Type, u32)> = Vec::new();
    let argument_line = parser.current_line();
    if let Some(arg) = parse_expr(parser)? {
        args.push((arg.ty, argument_line));
        while parser.consume(TokenKind::Comma).is_some() {
            let argument_line = parser.current_line();
            let arg = require_operand(parser, parse_expr, ",")?;
            args.push((arg.ty, argument_line));
        }
    }
    parser.expect(TokenKind::RPar)?;

    if args.len() != param_types.len() {
        return Err(Error::new(
            ErrorKind::ArgumentCountMismatch {
                function: name,
                expected: param_types.len(),
                received: args.len(),
            },
            line,
        ));
    }
    for (expected, (received, argument_line)) in param_types.iter().zip(&args) {
        if received != expected {
            return Err(Error::new(
                ErrorKind::ArgumentTypeMatchError {
                    function: name,
                    expected: expected.to_string(),
                    received: received.to_string(),
                },
                *argument_line,
            ));
        }
    }

    Ok(Ret::rval(ret_ty))
}

/// Runs `rule` and turns a silent miss into a fatal error, used for
/// operands that became mandatory once an operator or keyword committed.
pub(super) fn require_operand(
    parser: &mut Parser,
    rule: fn(&mut Parser) -> Result<Option<Ret>, Error>,
    after: &str,
) -> Result<Ret, Error> {
    if let Some(ret) = rule(parser)? {
        return Ok(ret);
    }
    let token = parser.current_token();
    Err(Error::new(
        ErrorKind::UnexpectedTokenDetailed {
            token: token.to_string(),
            message: format!("expected an expression after '{}'", after),
        },
        token.line,
    ))
}

/// Shared checks of the arithmetic and logic levels: operands agree in
/// type and neither is a str. Agreement is checked first so `1 + "a"`
/// reports the mismatch, not the str.
fn check_operands(left: &Ret, right: &Ret, op: &str, line: u32) -> Result<Type, Error> {
    if left.ty != right.ty {
        return Err(Error::new(
            ErrorKind::OperandTypeMismatch {
                op: op.to_string(),
                left: left.ty.to_string(),
                right: right.ty.to_string(),
            },
            line,
        ));
    }
    if left.ty == Type::Str {
        return Err(Error::new(
            ErrorKind::StrOperands { op: op.to_string() },
            line,
        ));
    }
    Ok(left.ty)
}

fn operator_text(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Add => "+",
        TokenKind::Sub => "-",
        TokenKind::Mul => "*",
        TokenKind::Div => "/",
        TokenKind::And => "&&",
        TokenKind::Or => "||",
        TokenKind::Not => "!",
        TokenKind::Less => "<",
        TokenKind::Equal => "==",
        TokenKind::Assign => "=",
        _ => "",
    }
}
