//! Target-code emission buffers.
//!
//! This module contains the growable text sinks that receive generated C
//! fragments during parsing. It handles:
//!
//! - A dynamic text buffer type
//! - The output buffers (header, global code, functions, scratch header)
//! - Switching the current sinks between global and function context
//! - Assembly of the final output file content
//!
//! Emission covers variable declarations and function headers; statement
//! and expression bodies are not generated.

pub mod gen;

#[cfg(test)]
mod tests;
