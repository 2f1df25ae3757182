#![allow(clippy::module_inception)]

use crate::{errors::errors::Error, gen::gen::Emitter, symbols::symbols::SymbolTable};

pub mod errors;
pub mod gen;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;

extern crate regex;

/// The result of analyzing a source file: the global domain of the
/// symbol table and the emission buffers, ready to be assembled into
/// the output C file.
#[derive(Debug)]
pub struct Analysis {
    pub symbols: SymbolTable,
    pub emitter: Emitter,
}

/// Runs the whole front end on `source`: scanning, then the fused
/// parse/check/emit pass.
pub fn analyze(source: String) -> Result<Analysis, Error> {
    let tokens = lexer::lexer::tokenize(source)?;
    parser::parser::parse(tokens)
}
