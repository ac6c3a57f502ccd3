//! Error types for the Rill language
//!
//! Diagnostics are printed where a failure is detected (compiler or VM);
//! the error value classifies the failure for the caller, which maps it
//! to an exit status.

use std::fmt;

/// The two fatal outcomes of an `interpret` call. Neither is fatal to the
/// process: the caller may interpret again with the same VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretError {
    /// A lexical or syntactic problem, including constant-pool overflow
    Compile,
    /// A type check or stack limit failed at execution time
    Runtime,
}

impl fmt::Display for InterpretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpretError::Compile => write!(f, "compile error"),
            InterpretError::Runtime => write!(f, "runtime error"),
        }
    }
}

impl std::error::Error for InterpretError {}

/// Result type for Rill operations
pub type Result<T> = std::result::Result<T, InterpretError>;
