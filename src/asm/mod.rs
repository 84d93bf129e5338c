//! Model of the target machine: registers, memory layout, and the textual
//! instruction forms understood by its assembler.
mod reg;

use std::fmt::Display;

pub use self::reg::*;

/// End of the heap region. Static memory starts right above it.
pub const HEAP_END: u8 = 128;

/// Number of bytes reserved for static variables.
pub const STATIC_MEMORY_SIZE: u8 = 64;

/// First address past the static region. The machine stack lives above this
/// boundary and grows downward; a stack pointer below it has overflowed.
pub const STACK_END: u8 = HEAP_END + STATIC_MEMORY_SIZE;

/// Label of a user-defined function.
pub fn user_label(name: &str) -> String {
    format!(".user_{name}")
}

/// Label of a symbol owned by the runtime preamble.
pub fn batc_label(name: &str) -> String {
    format!(".batc_{name}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Reg),
    Immediate(u8),
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{reg}"),
            Operand::Immediate(value) => write!(f, "#{value}"),
        }
    }
}

/// Condition codes accepted by `jmp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Equal,
    Less,
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Condition::Equal => "eq",
            Condition::Less => "less",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// A label definition. The assembler expects it on a line of its own,
    /// without a trailing colon.
    Label(String),
    Ldi(Reg, u8),
    Mov(Reg, Reg),
    /// `mld rD, rB, #off`: rD <- mem[rB + off]
    Mld(Reg, Reg, i8),
    /// `mst rB, #off, rS`: mem[rB + off] <- rS
    Mst(Reg, i8, Reg),
    Adi(Reg, i8),
    Cmp(Reg, Operand),
    Jmp(Option<Condition>, String),
    Cal(String),
    Pld(Reg, u8),
    Pst(Reg, u8),
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Label(label) => write!(f, "{label}"),
            Instruction::Ldi(target, value) => write!(f, "ldi {target}, #{value}"),
            Instruction::Mov(target, source) => write!(f, "mov {target}, {source}"),
            Instruction::Mld(target, base, offset) => write!(f, "mld {target}, {base}, #{offset}"),
            Instruction::Mst(base, offset, source) => write!(f, "mst {base}, #{offset}, {source}"),
            Instruction::Adi(target, value) => write!(f, "adi {target}, #{value}"),
            Instruction::Cmp(target, operand) => write!(f, "cmp {target}, {operand}"),
            Instruction::Jmp(Some(condition), label) => write!(f, "jmp {condition} {label}"),
            Instruction::Jmp(None, label) => write!(f, "jmp {label}"),
            Instruction::Cal(label) => write!(f, "cal {label}"),
            Instruction::Pld(target, port) => write!(f, "pld {target}, #{port}"),
            Instruction::Pst(source, port) => write!(f, "pst {source}, #{port}"),
        }
    }
}
