//! Compiler for the Bat programming language, targeting a small 8-bit
//! machine with eight general purpose registers and a flat memory space.
#[macro_use]
extern crate pest_derive;

pub mod asm;
pub mod ast;
pub mod compiler;
pub mod typechecker;
