//! Symbol table and type descriptors for the front end.
//!
//! This module contains the scope manager used during analysis. It handles:
//!
//! - The static types of the language and their display names
//! - Symbols (variables, parameters, functions) stored in an arena
//! - A stack of lexical domains with scope-aware lookup
//! - The value descriptor returned by expression rules
//!
//! Domains are opened on entering the program or a function body and
//! closed on leaving it, releasing every symbol they own.

pub mod symbols;
