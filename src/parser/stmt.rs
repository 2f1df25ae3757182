//! Statement-level grammar rules.
//!
//! One function per nonterminal, from the top `program` rule down to
//! single instructions. Every rule returns `Ok(false)` when its
//! alternative is not taken (cursor untouched), `Ok(true)` on a match,
//! and `Err` once the alternative has committed and a required
//! continuation is missing. An alternative commits at its leading
//! keyword; semantic state is only mutated after that point.

use crate::{
    errors::errors::{Error, ErrorKind},
    gen::gen::c_type,
    lexer::tokens::TokenKind,
    symbols::symbols::{SymbolKind, Type},
};

use super::{
    expr::{parse_expr, require_operand},
    parser::Parser,
};

/// `program ::= ( defVar | defFunc | block )* FINISH`
pub fn parse_program(parser: &mut Parser) -> Result<(), Error> {
    loop {
        if parse_def_var(parser)? {
            continue;
        }
        if parse_def_func(parser)? {
            continue;
        }
        if parse_block(parser)? {
            continue;
        }
        break;
    }

    parser.expect(TokenKind::Finish)?;
    Ok(())
}

/// `defVar ::= VAR ID COLON baseType SEMICOLON`
///
/// At program level the variable is global; inside a function body it is
/// local to that function. The declaration is also written to the
/// variable sink of the current context.
pub fn parse_def_var(parser: &mut Parser) -> Result<bool, Error> {
    if parser.consume(TokenKind::Var).is_none() {
        return Ok(false);
    }

    let error = Error::new(
        ErrorKind::UnexpectedTokenDetailed {
            token: parser.current_token().to_string(),
            message: String::from("expected an identifier after 'var'"),
        },
        parser.current_line(),
    );
    let name_token = parser.expect_error(TokenKind::Id, Some(error))?;
    let name = name_token.text().to_string();

    if parser.symbols.lookup_local(&name).is_some() {
        return Err(Error::new(
            ErrorKind::SymbolAlreadyDeclared { name },
            name_token.line,
        ));
    }

    parser.expect(TokenKind::Colon)?;
    let ty = parse_base_type(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    let is_local = parser.current_fn.is_some();
    parser.symbols.declare(&name, ty, SymbolKind::Variable { is_local });
    parser.emitter.vars().add(&format!("{} {};\n", c_type(ty), name));

    Ok(true)
}

/// `defFunc ::= FUNCTION ID LPAR funcParams? RPAR COLON baseType defVar* block END`
///
/// The function symbol (owning its parameter list) is declared in the
/// enclosing domain before the body is parsed, so the body can call it
/// recursively. The parameters are then redeclared inside the freshly
/// opened function domain, where locals may not reuse their names.
pub fn parse_def_func(parser: &mut Parser) -> Result<bool, Error> {
    if parser.consume(TokenKind::Function).is_none() {
        return Ok(false);
    }

    let error = Error::new(
        ErrorKind::UnexpectedTokenDetailed {
            token: parser.current_token().to_string(),
            message: String::from("expected an identifier after 'function'"),
        },
        parser.current_line(),
    );
    let name_token = parser.expect_error(TokenKind::Id, Some(error))?;
    let name = name_token.text().to_string();

    if parser.symbols.lookup_local(&name).is_some() {
        return Err(Error::new(
            ErrorKind::SymbolAlreadyDeclared { name },
            name_token.line,
        ));
    }

    parser.expect(TokenKind::LPar)?;

    // the header is assembled in the scratch buffer because the return
    // type is only known after the parameter list
    parser.emitter.fn_header.clear();
    parser.emitter.fn_header.add(&format!("{}(", name));

    let params = parse_func_params(parser)?;
    parser.expect(TokenKind::RPar)?;
    parser.emitter.fn_header.add(")");

    parser.expect(TokenKind::Colon)?;
    let ret_ty = parse_base_type(parser)?;

    let function = parser
        .symbols
        .declare(&name, ret_ty, SymbolKind::Function { params: Vec::new() });
    for (param_name, param_ty, _) in &params {
        parser.symbols.attach_param(function, param_name, *param_ty);
    }

    parser.current_fn = Some(function);
    parser.symbols.open_scope();
    for (param_name, param_ty, _) in &params {
        parser.symbols.declare(param_name, *param_ty, SymbolKind::Parameter);
    }

    parser.emitter.enter_function();
    let header = format!("{} {}{{\n", c_type(ret_ty), parser.emitter.fn_header.as_str());
    parser.emitter.code().add(&header);

    while parse_def_var(parser)? {}

    if !parse_block(parser)? {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorKind::UnexpectedTokenDetailed {
                token: token.to_string(),
                message: String::from("expected an instruction in the function body"),
            },
            token.line,
        ));
    }

    parser.expect(TokenKind::End)?;

    parser.emitter.code().add("}\n\n");
    parser.emitter.leave_function();
    parser.symbols.close_scope();
    parser.current_fn = None;

    Ok(true)
}

/// `funcParams ::= funcParam ( COMMA funcParam )*`
///
/// Optional as a whole, but once a comma is consumed the next parameter
/// is mandatory. Duplicate names are checked against the parameters
/// already parsed.
fn parse_func_params(parser: &mut Parser) -> Result<Vec<(String, Type, u32)>, Error> {
    let mut params: Vec<(String, Type, u32)> = Vec::new();

    match parse_func_param(parser)? {
        Some(param) => params.push(param),
        None => return Ok(params),
    }

    while parser.consume(TokenKind::Comma).is_some() {
        parser.emitter.fn_header.add(",");
        let param = match parse_func_param(parser)? {
            Some(param) => param,
            None => {
                let token = parser.current_token();
                return Err(Error::new(
                    ErrorKind::UnexpectedTokenDetailed {
                        token: token.to_string(),
                        message: String::from("expected a parameter after ','"),
                    },
                    token.line,
                ));
            }
        };
        if params.iter().any(|(name, _, _)| *name == param.0) {
            return Err(Error::new(
                ErrorKind::SymbolAlreadyDeclared { name: param.0 },
                param.2,
            ));
        }
        params.push(param);
    }

    Ok(params)
}

/// `funcParam ::= ID COLON baseType`
fn parse_func_param(parser: &mut Parser) -> Result<Option<(String, Type, u32)>, Error> {
    let name_token = match parser.consume(TokenKind::Id) {
        Some(token) => token,
        None => return Ok(None),
    };

    parser.expect(TokenKind::Colon)?;
    let ty = parse_base_type(parser)?;

    parser
        .emitter
        .fn_header
        .add(&format!("{} {}", c_type(ty), name_token.text()));

    Ok(Some((name_token.text().to_string(), ty, name_token.line)))
}

/// `baseType ::= TYPE_INT | TYPE_REAL | TYPE_STR`
///
/// Only reached after a ':' has committed a declaration, so a missing
/// type name is always fatal.
pub fn parse_base_type(parser: &mut Parser) -> Result<Type, Error> {
    if parser.consume(TokenKind::TypeInt).is_some() {
        return Ok(Type::Int);
    }
    if parser.consume(TokenKind::TypeReal).is_some() {
        return Ok(Type::Real);
    }
    if parser.consume(TokenKind::TypeStr).is_some() {
        return Ok(Type::Str);
    }

    let token = parser.current_token();
    Err(Error::new(
        ErrorKind::UnexpectedTokenDetailed {
            token: token.to_string(),
            message: String::from("expected a type name"),
        },
        token.line,
    ))
}

/// `block ::= instr+`
///
/// At least one instruction; an empty block is a parse failure, not an
/// empty success.
pub fn parse_block(parser: &mut Parser) -> Result<bool, Error> {
    if !parse_instr(parser)? {
        return Ok(false);
    }
    while parse_instr(parser)? {}
    Ok(true)
}

/// `instr ::= WHILE LPAR expr RPAR block END`
/// `       | IF LPAR expr RPAR block ( ELSE block )? END`
/// `       | RETURN expr SEMICOLON`
/// `       | expr SEMICOLON`
/// `       | SEMICOLON`
pub fn parse_instr(parser: &mut Parser) -> Result<bool, Error> {
    if parser.consume(TokenKind::While).is_some() {
        parser.expect(TokenKind::LPar)?;
        let condition_line = parser.current_line();
        let condition = require_operand(parser, parse_expr, "(")?;
        if condition.ty == Type::Str {
            return Err(Error::new(
                ErrorKind::ConditionTypeError { construct: "while" },
                condition_line,
            ));
        }
        parser.expect(TokenKind::RPar)?;
        require_block(parser, "expected an instruction in the 'while' body")?;
        parser.expect(TokenKind::End)?;
        return Ok(true);
    }

    if parser.consume(TokenKind::If).is_some() {
        parser.expect(TokenKind::LPar)?;
        let condition_line = parser.current_line();
        let condition = require_operand(parser, parse_expr, "(")?;
        if condition.ty == Type::Str {
            return Err(Error::new(
                ErrorKind::ConditionTypeError { construct: "if" },
                condition_line,
            ));
        }
        parser.expect(TokenKind::RPar)?;
        require_block(parser, "expected an instruction in the 'if' body")?;
        if parser.consume(TokenKind::Else).is_some() {
            require_block(parser, "expected an instruction in the 'else' body")?;
        }
        parser.expect(TokenKind::End)?;
        return Ok(true);
    }

    if let Some(return_token) = parser.consume(TokenKind::Return) {
        let function = match parser.current_fn {
            Some(function) => function,
            None => {
                return Err(Error::new(
                    ErrorKind::ReturnOutsideFunction,
                    return_token.line,
                ));
            }
        };
        let value_line = parser.current_line();
        let value = require_operand(parser, parse_expr, "return")?;
        let expected = parser.symbols.symbol(function).ty;
        if value.ty != expected {
            return Err(Error::new(
                ErrorKind::ReturnTypeMatchError {
                    expected: expected.to_string(),
                    received: value.ty.to_string(),
                },
                value_line,
            ));
        }
        parser.expect(TokenKind::Semicolon)?;
        return Ok(true);
    }

    // no other alternative can begin with an expression, so a parsed
    // expression commits the trailing ';'
    if parse_expr(parser)?.is_some() {
        parser.expect(TokenKind::Semicolon)?;
        return Ok(true);
    }

    if parser.consume(TokenKind::Semicolon).is_some() {
        return Ok(true);
    }

    Ok(false)
}

fn require_block(parser: &mut Parser, message: &str) -> Result<(), Error> {
    if parse_block(parser)? {
        return Ok(());
    }
    let token = parser.current_token();
    Err(Error::new(
        ErrorKind::UnexpectedTokenDetailed {
            token: token.to_string(),
            message: String::from(message),
        },
        token.line,
    ))
}
