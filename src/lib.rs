//! Rill - a small dynamically-typed expression language
//!
//! Source text is scanned, compiled in a single pass into bytecode, and
//! executed on a stack-based virtual machine.

pub mod token;
pub mod scanner;
pub mod value;
pub mod object;
pub mod table;
pub mod chunk;
pub mod compiler;
pub mod error;
pub mod vm;

pub use error::{InterpretError, Result};
pub use value::Value;
pub use vm::Vm;

/// Convenience function to evaluate one expression with a throwaway VM
pub fn interpret(source: &str) -> Result<Value> {
    let mut vm = Vm::new();
    vm.interpret(source)
}

/// Version of the Rill language
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
