use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorKind},
    MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, TokenValue, RESERVED_LOOKUP};

/// Capacity of the token stream. Exceeding it is a fatal scanning error.
pub const MAX_TOKENS: usize = 4096;

pub type RegexHandler = fn(&mut Lexer, Regex) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
}

impl Lexer {
    pub fn new(source: String) -> Lexer {
        Lexer {
            pos: 0,
            line: 1,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new("[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\"[^\"]*\"").unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new("#.*").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LPar, "(") },
                RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RPar, ")") },
                RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equal, "==") },
                RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "=") },
                RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEq, "!=") },
                RegexPattern { regex: Regex::new("!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
                RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEq, "<=") },
                RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
                RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEq, ">=") },
                RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
                RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
                RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
                RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
                RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
                RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Add, "+") },
                RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Sub, "-") },
                RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Mul, "*") },
                RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Div, "/") },
                // a lone quote means the closing one is missing
                RegexPattern { regex: Regex::new("\"").unwrap(), handler: unterminated_string_handler },
            ],
            source,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) -> Result<(), Error> {
        if self.tokens.len() == MAX_TOKENS {
            return Err(Error::new(
                ErrorKind::TooManyTokens { limit: MAX_TOKENS },
                self.line,
            ));
        }
        self.tokens.push(token);
        Ok(())
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn symbol_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let text = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let length = text.len();

    if let Some(kind) = RESERVED_LOOKUP.get(text.as_str()) {
        lexer.push(MK_TOKEN!(*kind, TokenValue::None, lexer.line))?;
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Id, TokenValue::Text(text), lexer.line))?;
    }

    lexer.advance_n(length);
    Ok(())
}

fn number_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let length = matched.len();

    if matched.contains('.') {
        match matched.parse::<f64>() {
            Ok(r) => lexer.push(MK_TOKEN!(TokenKind::Real, TokenValue::Real(r), lexer.line))?,
            Err(_) => {
                return Err(Error::new(
                    ErrorKind::MalformedNumber { literal: matched },
                    lexer.line,
                ))
            }
        }
    } else {
        match matched.parse::<i64>() {
            Ok(i) => lexer.push(MK_TOKEN!(TokenKind::Int, TokenValue::Int(i), lexer.line))?,
            Err(_) => {
                return Err(Error::new(
                    ErrorKind::MalformedNumber { literal: matched },
                    lexer.line,
                ))
            }
        }
    }

    lexer.advance_n(length);
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).unwrap();
    let newlines = matched.as_str().matches('\n').count() as u32;
    let length = matched.end();

    lexer.line += newlines;
    lexer.advance_n(length);
    Ok(())
}

fn string_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    // the surrounding quotes are dropped; the chars are kept verbatim
    let literal = {
        let matched = regex.find(lexer.remainder()).unwrap().as_str();
        matched[1..matched.len() - 1].to_string()
    };
    let length = literal.len() + 2;
    let newlines = literal.matches('\n').count() as u32;

    lexer.push(MK_TOKEN!(TokenKind::Str, TokenValue::Text(literal), lexer.line))?;
    lexer.advance_n(length);
    lexer.line += newlines;
    Ok(())
}

fn unterminated_string_handler(lexer: &mut Lexer, _regex: Regex) -> Result<(), Error> {
    Err(Error::new(ErrorKind::StringNotEnded, lexer.line))
}

pub fn tokenize(source: String) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let mut matched = false;

        for index in 0..lex.patterns.len() {
            let match_here = lex.patterns[index]
                .regex
                .find(lex.remainder())
                .map(|found| found.start());

            if match_here == Some(0) {
                let handler = lex.patterns[index].handler;
                let regex = lex.patterns[index].regex.clone();
                handler(&mut lex, regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorKind::InvalidCharacter { character: lex.at() },
                lex.line,
            ));
        }
    }

    lex.push(MK_TOKEN!(TokenKind::Finish, TokenValue::None, lex.line))?;
    Ok(lex.tokens)
}
