//! Error types and error handling for the front end.
//!
//! This module defines the error values used throughout the analysis
//! pipeline. It includes:
//!
//! - An error structure carrying the source line of the failure
//! - Specific error variants for scanning, syntax and semantic checks
//! - The single-line fatal report formatting used by the driver
//!
//! Analysis stops at the first error; there is no recovery.

pub mod errors;
