//! Recursive descent parser with fused type checking and C emission.
//!
//! The grammar is split across two modules: [`stmt`] holds the
//! program-level and instruction rules, [`expr`] the precedence climb
//! for expressions. Both drive the shared [`parser::Parser`] state.

pub mod expr;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
