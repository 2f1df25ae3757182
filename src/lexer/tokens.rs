use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("function", TokenKind::Function);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("end", TokenKind::End);
        map.insert("return", TokenKind::Return);
        map.insert("int", TokenKind::TypeInt);
        map.insert("real", TokenKind::TypeReal);
        map.insert("str", TokenKind::TypeStr);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Id,

    // keywords
    Var,
    Function,
    If,
    Else,
    While,
    End,
    Return,
    TypeInt,
    TypeReal,
    TypeStr,

    // literals
    Int,
    Real,
    Str,

    // delimiters
    Comma,
    Colon,
    Semicolon,
    LPar,
    RPar,
    Finish,

    // operators
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Not,
    Assign,  // =
    Equal,   // ==
    NotEq,   // !=
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The literal payload of a token. Identifiers and string literals carry
/// their text, numeric literals their parsed value, everything else nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Text(String),
    Int(i64),
    Real(f64),
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::None => Ok(()),
            TokenValue::Text(text) => write!(f, "{}", text),
            TokenValue::Int(i) => write!(f, "{}", i),
            TokenValue::Real(r) => write!(f, "{:.5}", r),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{}", self.kind),
            value => write!(f, "{}:{}", self.kind, value),
        }
    }
}

impl Token {
    /// The text payload of an identifier or string token, or `""` for
    /// tokens without a text payload.
    pub fn text(&self) -> &str {
        match &self.value {
            TokenValue::Text(text) => text,
            _ => "",
        }
    }

    /// Prints the token in the scanner dump format: `line kind[:payload]`.
    pub fn debug(&self) {
        println!("{} {}", self.line, self);
    }
}
