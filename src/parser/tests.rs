//! Unit tests for the parser module.
//!
//! This module contains tests for parsing and checking various language
//! constructs including:
//! - Variable and function definitions
//! - Control flow instructions
//! - Expression type checking
//! - Symbol visibility and shadowing
//! - C skeleton emission
//! - Error cases and their reported lines

use crate::lexer::lexer::tokenize;
use crate::symbols::symbols::Type;
use super::parser::parse;

#[test]
fn test_parse_empty_program() {
    let source = "".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_global_variable() {
    let source = "var x: int;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_global_symbols() {
    let source = "var g: int;\nvar h: real;".to_string();
    let tokens = tokenize(source).unwrap();
    let analysis = parse(tokens).unwrap();

    let globals = analysis.symbols.current_domain();
    assert_eq!(globals.len(), 5); // puti, putr, puts, g, h
    assert_eq!(globals[3].name, "g");
    assert_eq!(globals[3].ty, Type::Int);
    assert_eq!(globals[4].name, "h");
    assert_eq!(globals[4].ty, Type::Real);
}

#[test]
fn test_parse_global_variable_emission() {
    let source = "var g: int;\nvar s: str;".to_string();
    let tokens = tokenize(source).unwrap();
    let analysis = parse(tokens).unwrap();

    assert_eq!(
        analysis.emitter.begin.as_str(),
        "#include \"quick.h\"\n\nint g;\nstr s;\n"
    );
}

#[test]
fn test_parse_function_declaration() {
    let source = "function add(a: int, b: int): int return a + b; end".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_function_emission() {
    let source = "function f(a: int, b: real): int var t: int; return a; end".to_string();
    let tokens = tokenize(source).unwrap();
    let analysis = parse(tokens).unwrap();

    // locals land inside the function body, after the header
    assert_eq!(
        analysis.emitter.functions.as_str(),
        "int f(int a,double b){\nint t;\n}\n\n"
    );
}

#[test]
fn test_parse_if_else() {
    let source = "var x: int;\nif(x < 10)\nx = 1;\nelse\nx = 2;\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_while_loop() {
    let source = "var x: int;\nwhile(x < 10)\nx = x + 1;\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_assignment() {
    let source = "var x: real;\nx = 1.5 * 2.0;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_assignment_type_mismatch() {
    let source = "var x: int;\nx = 1.5;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: types do not match: expected int, received real"
    );
}

#[test]
fn test_parse_assignment_backtracks_to_comparison() {
    // `x ==` must not commit the assignment alternative
    let source = "var x: int;\nx == 1;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_chained_assignment_rejected() {
    let source = "var x: int;\nvar y: int;\nx = y = 1;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    // the right side of '=' is a comparison, not another assignment
    assert!(result.is_err());
}

#[test]
fn test_parse_nested_assignment_in_parentheses() {
    // parentheses reach the assignment level again through `expr`
    let source = "var x: int;\nvar y: int;\ny = (x = 1);".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_parenthesized_assignment_target_rejected() {
    // only a bare ID before '=' commits the assignment alternative
    let source = "var x: int;\n(x) = 1;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: expected Semicolon but found \"Assign\""
    );
}

#[test]
fn test_parse_undeclared_symbol() {
    let source = "x = 1;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(error.to_string(), "error in line 1: symbol \"x\" not declared");
}

#[test]
fn test_parse_redeclared_symbol() {
    let source = "var x: int;\nvar x: real;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: symbol \"x\" already declared"
    );
}

#[test]
fn test_parse_shadowing_global() {
    let source =
        "var x: int;\nfunction f(): real\nvar x: real;\nx = 1.5;\nreturn x;\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    // the local wins inside the function body
    assert!(result.is_ok());
}

#[test]
fn test_parse_local_redeclaring_parameter() {
    let source = "function f(a: int): int\nvar a: int;\nreturn a;\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: symbol \"a\" already declared"
    );
}

#[test]
fn test_parse_duplicate_parameters() {
    let source = "function f(a: int, a: real): int return 0; end".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: symbol \"a\" already declared"
    );
}

#[test]
fn test_parse_arithmetic_operand_mismatch() {
    let source = "1 + 1.5;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: both operands of \"+\" must have the same type: int and real"
    );
}

#[test]
fn test_parse_str_arithmetic_rejected() {
    let source = "\"a\" + \"b\";".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: the operands of \"+\" cannot be of type str"
    );
}

#[test]
fn test_parse_str_comparison_allowed() {
    let source = "var x: int;\nx = \"abc\" < \"abd\";".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    // comparisons accept str operands and yield int
    assert!(result.is_ok());
}

#[test]
fn test_parse_comparison_operand_mismatch() {
    let source = "1 < \"a\";".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: both operands of \"<\" must have the same type: int and str"
    );
}

#[test]
fn test_parse_comparison_does_not_chain() {
    let source = "1 < 2 < 3;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_err());
}

#[test]
fn test_parse_logic_expression() {
    let source = "var x: int;\nx = 1 && 0 || 2;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_logic_yields_int() {
    // real operands, int result
    let source = "var x: int;\nx = (1.5 && 2.5);".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_str_logic_rejected() {
    let source = "\"a\" && \"b\";".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: the operands of \"&&\" cannot be of type str"
    );
}

#[test]
fn test_parse_unary_not_yields_int() {
    let source = "var x: int;\nx = !1.5;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_unary_minus_keeps_type() {
    let source = "var x: int;\nx = -1.5;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: types do not match: expected int, received real"
    );
}

#[test]
fn test_parse_unary_str_rejected() {
    let source = "-\"a\";".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: the operand of \"-\" cannot be of type str"
    );
}

#[test]
fn test_parse_if_condition_str_rejected() {
    let source = "if(\"a\")\n1;\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: the if condition must not be of type str"
    );
}

#[test]
fn test_parse_while_condition_str_rejected() {
    let source = "while(\"a\")\n1;\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: the while condition must not be of type str"
    );
}

#[test]
fn test_parse_while_body_required() {
    let source = "while(1)\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: unexpected token (expected an instruction in the 'while' body): \"End\""
    );
}

#[test]
fn test_parse_builtin_call() {
    let source = "puti(42);\nputr(1.5);\nputs(\"hi\");".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_call_wrong_argument_count() {
    let source = "puti(1, 2);".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: wrong number of arguments in call of \"puti\": expected 1, received 2"
    );
}

#[test]
fn test_parse_call_wrong_argument_type() {
    let source = "puti(1.5);".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: argument types do not match in call of \"puti\": expected int, received real"
    );
}

#[test]
fn test_parse_call_of_non_function() {
    let source = "var x: int;\nx(1);".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(error.to_string(), "error in line 2: \"x\" is not a function");
}

#[test]
fn test_parse_function_as_value() {
    let source = "var x: int;\nx = puti;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: function \"puti\" can only be called"
    );
}

#[test]
fn test_parse_assign_to_function() {
    let source = "puti = 1;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: cannot assign to function \"puti\""
    );
}

#[test]
fn test_parse_return_outside_function() {
    let source = "return 1;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: return used outside of a function"
    );
}

#[test]
fn test_parse_return_type_mismatch() {
    let source = "function f(): int\nreturn 1.5;\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: the return type does not match the function type: expected int, received real"
    );
}

#[test]
fn test_parse_recursive_call() {
    let source = "function fact(n: int): int\nreturn fact(n - 1);\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    // the function symbol is visible inside its own body
    assert!(result.is_ok());
}

#[test]
fn test_parse_call_before_declaration() {
    let source = "f(1);\nfunction f(a: int): int return a; end".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    // single pass: a function only exists once its header was parsed
    assert_eq!(error.to_string(), "error in line 1: symbol \"f\" not declared");
}

#[test]
fn test_parse_nested_function_rejected() {
    let source = "function f(): int\nfunction g(): int return 0; end\nreturn 0;\nend".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 2: unexpected token (expected an instruction in the function body): \"Function\""
    );
}

#[test]
fn test_parse_parenthesized_expression() {
    let source = "var x: int;\nx = (1 + 2) * 3;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_missing_semicolon() {
    let source = "var x: int".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: expected Semicolon but found \"Finish\""
    );
}

#[test]
fn test_parse_missing_identifier_after_var() {
    let source = "var : int;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: unexpected token (expected an identifier after 'var'): \"Colon\""
    );
}

#[test]
fn test_parse_missing_type_name() {
    let source = "var x: 1;".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    assert_eq!(
        error.to_string(),
        "error in line 1: unexpected token (expected a type name): \"Int:1\""
    );
}

#[test]
fn test_parse_empty_instruction() {
    let source = ";;;".to_string();
    let tokens = tokenize(source).unwrap();
    let result = parse(tokens);

    assert!(result.is_ok());
}

#[test]
fn test_parse_trailing_tokens_rejected() {
    let source = "var x: int;\n)".to_string();
    let tokens = tokenize(source).unwrap();
    let error = parse(tokens).unwrap_err();

    // the whole stream must be consumed, up to the end marker
    assert_eq!(
        error.to_string(),
        "error in line 2: expected Finish but found \"RPar\""
    );
}
