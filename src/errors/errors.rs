use std::fmt::Display;

use thiserror::Error;

/// A fatal analysis error, tagged with the source line it was detected on.
///
/// Errors are values: every phase returns `Result<_, Error>` and the first
/// error unwinds the whole pipeline. Formatting follows the fatal report
/// shape `error in line {line}: {message}`.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    line: u32,
}

impl Error {
    pub fn new(kind: ErrorKind, line: u32) -> Self {
        Error { kind, line }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error in line {}: {}", self.line, self.kind)
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorKind {
    // scanning
    #[error("invalid character {character:?}")]
    InvalidCharacter { character: char },
    #[error("string not ended")]
    StringNotEnded,
    #[error("malformed number: {literal:?}")]
    MalformedNumber { literal: String },
    #[error("too many tokens (limit {limit})")]
    TooManyTokens { limit: usize },

    // syntax
    #[error("expected {expected} but found {token:?}")]
    UnexpectedToken { expected: String, token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },

    // semantics
    #[error("symbol {name:?} already declared")]
    SymbolAlreadyDeclared { name: String },
    #[error("symbol {name:?} not declared")]
    SymbolNotDeclared { name: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("both operands of {op:?} must have the same type: {left} and {right}")]
    OperandTypeMismatch {
        op: String,
        left: String,
        right: String,
    },
    #[error("the operands of {op:?} cannot be of type str")]
    StrOperands { op: String },
    #[error("the operand of {op:?} cannot be of type str")]
    StrOperand { op: String },
    #[error("wrong number of arguments in call of {function:?}: expected {expected}, received {received}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument types do not match in call of {function:?}: expected {expected}, received {received}")]
    ArgumentTypeMatchError {
        function: String,
        expected: String,
        received: String,
    },
    #[error("{name:?} is not a function")]
    NotAFunction { name: String },
    #[error("function {name:?} can only be called")]
    FunctionAsValue { name: String },
    #[error("cannot assign to function {name:?}")]
    AssignToFunction { name: String },
    #[error("return used outside of a function")]
    ReturnOutsideFunction,
    #[error("the return type does not match the function type: expected {expected}, received {received}")]
    ReturnTypeMatchError { expected: String, received: String },
    #[error("the {construct} condition must not be of type str")]
    ConditionTypeError { construct: &'static str },
}
