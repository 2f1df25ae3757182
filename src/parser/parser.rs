//! Parser context and the analysis entry point.
//!
//! This module contains the Parser struct that is threaded through every
//! grammar rule. It owns the token cursor, the symbol table, the emission
//! buffers and the current-function marker, and provides the token
//! operations the rules are built from:
//!
//! - `consume` probes an optional token and never fails
//! - `expect`/`expect_error` demand a committed continuation
//! - `mark`/`reset` save and restore the cursor for backtracking
//!
//! `reset` restores the cursor and nothing else: declared symbols, open
//! scopes and emitted text are never rolled back. Rules only mutate them
//! after their alternative has committed, so an abandoned alternative
//! leaves no trace.

use crate::{
    errors::errors::{Error, ErrorKind},
    gen::gen::Emitter,
    lexer::tokens::{Token, TokenKind},
    symbols::symbols::{SymbolId, SymbolTable},
    Analysis,
};

use super::stmt::parse_program;

/// The parse state threaded through the grammar rules.
///
/// The token cursor is private and only moved through `advance`, `consume`
/// and `reset`, which keeps all backtracking behind the mark/reset
/// contract. The semantic state (symbol table, emission buffers, the
/// current-function marker) is public: the rules read and mutate it
/// directly, and it is deliberately outside that contract.
pub struct Parser {
    /// The token stream under analysis
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The scope stack with every declaration parsed so far
    pub symbols: SymbolTable,
    /// The output buffers receiving generated fragments
    pub emitter: Emitter,
    /// The function whose body is being parsed, if any
    pub current_fn: Option<SymbolId>,
}

impl Parser {
    /// Creates a new Parser instance over a token stream.
    ///
    /// The stream must not be empty; the scanner always appends a
    /// `Finish` token, even for empty input.
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens.is_empty(), "token stream without an end marker");
        Parser {
            tokens,
            pos: 0,
            symbols: SymbolTable::new(),
            emitter: Emitter::new(),
            current_fn: None,
        }
    }

    /// Returns the current token without advancing. The cursor saturates
    /// at the end marker, which no rule consumes before the top rule
    /// finishes.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the source line of the current token.
    pub fn current_line(&self) -> u32 {
        self.current_token().line
    }

    /// Advances to the next token and returns the consumed one.
    pub fn advance(&mut self) -> &Token {
        self.pos += 1;
        &self.tokens[self.pos - 1]
    }

    /// Saves the cursor so a speculative alternative can be abandoned.
    pub fn mark(&self) -> usize {
        self.pos
    }

    /// Restores the cursor to a previously saved mark. Only the cursor:
    /// semantic state mutated since the mark stays as it is.
    pub fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    /// Consumes the current token if it has the given kind.
    ///
    /// This is the probing step of an optional alternative: on a kind
    /// mismatch nothing is consumed and the caller tries something else.
    pub fn consume(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current_token_kind() == kind {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// This is the committed counterpart of `consume`: the rule has
    /// already committed to its alternative, so a mismatch is fatal.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return on a mismatch
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorKind::UnexpectedToken {
                        expected: expected_kind.to_string(),
                        token: token.to_string(),
                    },
                    token.line,
                )),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with the default error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }
}

/// Runs the grammar over a token stream.
///
/// This is the main entry point for analysis. It opens the program-level
/// domain, seeds the predefined functions and the output prologue, and
/// drives the top grammar rule over the whole stream.
///
/// # Arguments
///
/// * `tokens` - The token stream, ending with a `Finish` token
///
/// # Returns
///
/// On success, the `Analysis` result: the symbol table with the program
/// domain still open and every global declaration resolved, plus the
/// emission buffers. The first violated rule produces an `Err` instead
/// and the run stops there.
pub fn parse(tokens: Vec<Token>) -> Result<Analysis, Error> {
    let mut parser = Parser::new(tokens);

    parser.symbols.open_scope();
    parser.symbols.add_builtins();
    parser.emitter.begin.add("#include \"quick.h\"\n\n");

    parse_program(&mut parser)?;

    Ok(Analysis {
        symbols: parser.symbols,
        emitter: parser.emitter,
    })
}
