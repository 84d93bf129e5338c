use std::fmt::Display;

/// The general purpose registers of the target machine.
///
/// r0 and r1 are scratch registers for the runtime, r6 is the stack pointer
/// and r7 the base pointer. Only r2 through r5 are handed out by the
/// register pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

pub const STACK_POINTER: Reg = Reg::R6;
pub const BASE_POINTER: Reg = Reg::R7;

impl Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Reg::R0 => "r0",
            Reg::R1 => "r1",
            Reg::R2 => "r2",
            Reg::R3 => "r3",
            Reg::R4 => "r4",
            Reg::R5 => "r5",
            Reg::R6 => "r6",
            Reg::R7 => "r7",
        })
    }
}
