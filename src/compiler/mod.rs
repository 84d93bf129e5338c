//! Code generator for the Bat programming language.
//!
//! This module emits assembly for type correct Bat programs. Therefore, you
//! should utilize the type checker beforehand.
//!
//! Every expression is lowered into a destination: a bare register, a memory
//! slot relative to a base register, or an absolute address in static
//! memory. The expression arranges for its value to be present at the
//! destination on completion, using only registers that are currently free.
mod error;
mod registers;

use std::{cell::RefCell, rc::Rc};

use crate::{
    asm::{
        batc_label, user_label, Condition, Instruction, Operand, Reg, BASE_POINTER, STACK_END,
        STACK_POINTER,
    },
    ast::{
        Ast, Block, Call, Deref, ElseBranch, Equality, Expression, Func, Ident, If, Position,
        Statement, TopLevel, Var,
    },
    typechecker::{ScopeArena, ScopeId, Storage},
};

pub use self::error::CompileError;
use self::registers::{RegisterLease, RegisterPool};

/// The runtime preamble prepended to every program. It owns all `.batc_*`
/// symbols and falls through into the emitted top level code.
const RUNTIME: &str = include_str!("../runtime.asm");

type CResult<T> = Result<T, CompileError>;

/// Where an expression has to deliver its value.
#[derive(Debug, Clone, Copy)]
enum Destination {
    /// A bare register.
    Register(Reg),
    /// A memory slot relative to a base register (r7 for locals, r6 for
    /// outgoing call arguments).
    Frame(Reg, i8),
    /// An absolute address in static memory.
    Memory(u8),
}

pub struct Compiler {
    ast: Ast<ScopeId>,
    scopes: ScopeArena,
    registers: Rc<RefCell<RegisterPool>>,
    instructions: Vec<Instruction>,
    labels: usize,
}

impl Compiler {
    pub fn from_ast(ast: Ast<ScopeId>, scopes: ScopeArena) -> Self {
        Self {
            ast,
            scopes,
            registers: Rc::new(RefCell::new(RegisterPool::new())),
            instructions: vec![],
            labels: 0,
        }
    }

    /// Emit the whole program: the runtime preamble followed by every top
    /// level item in source order.
    pub fn compile_program(mut self) -> CResult<String> {
        for top_level in self.ast.top_levels() {
            match &top_level {
                TopLevel::Func(func) => self.compile_func(func)?,
                TopLevel::Var(var) => self.compile_var(var)?,
            }
            debug_assert!(self.registers.borrow().is_full());
        }

        let mut output = String::from(RUNTIME);
        for instruction in &self.instructions {
            output.push_str(&instruction.to_string());
            output.push('\n');
        }

        Ok(output)
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// A fresh number for compiler generated local labels.
    fn next_label(&mut self) -> usize {
        let label = self.labels;
        self.labels += 1;
        label
    }

    fn alloc_register(&self, position: &Position) -> CResult<RegisterLease> {
        registers::alloc_register(&self.registers).ok_or_else(|| CompileError {
            message: "Out of registers".to_owned(),
            position: position.clone(),
        })
    }

    /// Validate a memory offset against the signed 6-bit range the assembler
    /// accepts.
    fn offset(value: i64, position: &Position) -> CResult<i8> {
        if !(-32..=31).contains(&value) {
            return Err(CompileError {
                message: format!("Offset {value} out of range"),
                position: position.clone(),
            });
        }

        Ok(value as i8)
    }

    fn truncate(value: i64) -> u8 {
        (value & 0xFF) as u8
    }

    fn compile_func(&mut self, func: &Func<ScopeId>) -> CResult<()> {
        self.emit(Instruction::Label(user_label(&func.ident.value)));
        self.compile_block(&func.body)
    }

    fn compile_var(&mut self, var: &Var<ScopeId>) -> CResult<()> {
        let Some(value) = &var.value else {
            // the slot is reserved but stays uninitialized
            return Ok(());
        };

        let destination = self.variable_destination(&var.ident)?;
        self.compile_expression_into(value, destination)
    }

    fn variable_destination(&self, ident: &Ident<ScopeId>) -> CResult<Destination> {
        let Some(storage) = self.scopes.storage(ident.scope, &ident.value) else {
            unreachable!("no storage for '{}'", ident.value);
        };

        Ok(match storage {
            Storage::Static(address) => Destination::Memory(address),
            Storage::Frame(offset) => {
                Destination::Frame(BASE_POINTER, Self::offset(offset, &ident.position)?)
            }
        })
    }

    fn compile_block(&mut self, block: &Block<ScopeId>) -> CResult<()> {
        for statement in &block.statements {
            self.compile_statement(statement)?;
        }

        Ok(())
    }

    fn compile_statement(&mut self, statement: &Statement<ScopeId>) -> CResult<()> {
        match statement {
            Statement::Var(var) => self.compile_var(var),
            Statement::If(if_statement) => self.compile_if(if_statement, None),
            Statement::Block(block) => self.compile_block(block),
            Statement::Expression(expression) => {
                // a bare expression lowers into a sink register that is
                // released right after the statement
                let sink = self.alloc_register(&expression.position())?;
                self.compile_expression_into(expression, Destination::Register(sink.reg()))
            }
        }
    }

    fn compile_if(&mut self, if_statement: &If<ScopeId>, end_label: Option<String>) -> CResult<()> {
        let label = self.next_label();
        let end = end_label
            .clone()
            .unwrap_or_else(|| format!(".L{label}_end"));
        let else_label = format!(".L{label}_else");

        let condition = self.alloc_register(&if_statement.condition.position())?;
        self.compile_expression_into(
            &if_statement.condition,
            Destination::Register(condition.reg()),
        )?;
        self.emit(Instruction::Cmp(condition.reg(), Operand::Immediate(0)));
        drop(condition);

        self.emit(Instruction::Jmp(
            Some(Condition::Equal),
            if if_statement.else_branch.is_some() {
                else_label.clone()
            } else {
                end.clone()
            },
        ));

        self.compile_block(&if_statement.then_block)?;

        if let Some(else_branch) = &if_statement.else_branch {
            self.emit(Instruction::Jmp(None, end.clone()));
            self.emit(Instruction::Label(else_label));

            match else_branch {
                ElseBranch::Block(block) => self.compile_block(block)?,
                // every arm of an else-if chain jumps to the same end label
                ElseBranch::If(inner) => self.compile_if(inner, Some(end.clone()))?,
            }
        }

        if end_label.is_none() {
            self.emit(Instruction::Label(end));
        }

        Ok(())
    }

    fn compile_expression_into(
        &mut self,
        expression: &Expression<ScopeId>,
        destination: Destination,
    ) -> CResult<()> {
        match expression {
            Expression::Integer(integer) => {
                self.compile_immediate_into(
                    Self::truncate(integer.value),
                    &integer.position,
                    destination,
                )
            }
            Expression::Character(character) => self.compile_immediate_into(
                character.value as u8,
                &character.position,
                destination,
            ),
            Expression::Str(string) => Err(CompileError {
                message: format!("Cannot compile string literal \"{}\"", string.value),
                position: string.position.clone(),
            }),
            Expression::Ident(ident) => self.compile_ident_into(ident, destination),
            Expression::Deref(deref) => self.compile_deref_into(deref, destination),
            Expression::Equality(equality) => self.compile_equality_into(equality, destination),
            Expression::Call(call) => self.compile_call(call, destination),
        }
    }

    fn compile_immediate_into(
        &mut self,
        value: u8,
        position: &Position,
        destination: Destination,
    ) -> CResult<()> {
        match destination {
            Destination::Register(reg) => self.emit(Instruction::Ldi(reg, value)),
            Destination::Frame(base, offset) => {
                let reg = self.alloc_register(position)?;
                self.emit(Instruction::Ldi(reg.reg(), value));
                self.emit(Instruction::Mst(base, offset, reg.reg()));
            }
            Destination::Memory(address) => {
                let value_reg = self.alloc_register(position)?;
                let address_reg = self.alloc_register(position)?;
                self.emit(Instruction::Ldi(value_reg.reg(), value));
                self.emit(Instruction::Ldi(address_reg.reg(), address));
                self.emit(Instruction::Mst(address_reg.reg(), 0, value_reg.reg()));
            }
        }

        Ok(())
    }

    /// Load the value of a declared variable into `target`.
    fn load_variable(
        &mut self,
        ident: &Ident<ScopeId>,
        target: Reg,
    ) -> CResult<()> {
        let Some(storage) = self.scopes.storage(ident.scope, &ident.value) else {
            unreachable!("no storage for '{}'", ident.value);
        };

        match storage {
            Storage::Frame(offset) => {
                let offset = Self::offset(offset, &ident.position)?;
                self.emit(Instruction::Mld(target, BASE_POINTER, offset));
            }
            Storage::Static(address) => {
                self.emit(Instruction::Ldi(target, address));
                self.emit(Instruction::Mld(target, target, 0));
            }
        }

        Ok(())
    }

    /// Move a value that is already in `source` to `destination`.
    fn store_register(
        &mut self,
        destination: Destination,
        source: Reg,
        position: &Position,
    ) -> CResult<()> {
        match destination {
            Destination::Register(reg) => {
                if reg != source {
                    self.emit(Instruction::Mov(reg, source));
                }
            }
            Destination::Frame(base, offset) => {
                self.emit(Instruction::Mst(base, offset, source));
            }
            Destination::Memory(address) => {
                let address_reg = self.alloc_register(position)?;
                self.emit(Instruction::Ldi(address_reg.reg(), address));
                self.emit(Instruction::Mst(address_reg.reg(), 0, source));
            }
        }

        Ok(())
    }

    fn compile_ident_into(
        &mut self,
        ident: &Ident<ScopeId>,
        destination: Destination,
    ) -> CResult<()> {
        match destination {
            Destination::Register(reg) => self.load_variable(ident, reg),
            other => {
                let reg = self.alloc_register(&ident.position)?;
                self.load_variable(ident, reg.reg())?;
                self.store_register(other, reg.reg(), &ident.position)
            }
        }
    }

    fn compile_deref_into(
        &mut self,
        deref: &Deref<ScopeId>,
        destination: Destination,
    ) -> CResult<()> {
        match destination {
            Destination::Register(reg) => {
                self.compile_expression_into(&deref.expression, Destination::Register(reg))?;
                self.emit(Instruction::Mld(reg, reg, 0));
                Ok(())
            }
            other => {
                let reg = self.alloc_register(&deref.position)?;
                self.compile_expression_into(
                    &deref.expression,
                    Destination::Register(reg.reg()),
                )?;
                self.emit(Instruction::Mld(reg.reg(), reg.reg(), 0));
                self.store_register(other, reg.reg(), &deref.position)
            }
        }
    }

    fn compile_equality_into(
        &mut self,
        equality: &Equality<ScopeId>,
        destination: Destination,
    ) -> CResult<()> {
        let lhs = self.alloc_register(&equality.position)?;
        let rhs = self.alloc_register(&equality.position)?;

        self.compile_expression_into(&equality.lhs, Destination::Register(lhs.reg()))?;
        self.compile_expression_into(&equality.rhs, Destination::Register(rhs.reg()))?;

        self.emit(Instruction::Cmp(lhs.reg(), Operand::Register(rhs.reg())));
        drop(rhs);

        // the machine has no set-from-flag instruction, so the boolean is
        // materialized through a branch
        let label = self.next_label();
        let true_label = format!(".L{label}_true");
        let end_label = format!(".L{label}_end");

        self.emit(Instruction::Jmp(Some(Condition::Equal), true_label.clone()));
        self.emit(Instruction::Ldi(lhs.reg(), 0));
        self.emit(Instruction::Jmp(None, end_label.clone()));
        self.emit(Instruction::Label(true_label));
        self.emit(Instruction::Ldi(lhs.reg(), 1));
        self.emit(Instruction::Label(end_label));

        self.store_register(destination, lhs.reg(), &equality.position)
    }

    fn compile_call(&mut self, call: &Call<ScopeId>, destination: Destination) -> CResult<()> {
        match call.ident.value.as_str() {
            "write_port" => return self.compile_write_port(call),
            "read_port" => return self.compile_read_port(call, destination),
            _ => {}
        }

        let args = call.args.len() as i64;

        let old_base = self.alloc_register(&call.position)?;
        self.emit(Instruction::Mov(old_base.reg(), BASE_POINTER));
        self.emit(Instruction::Mov(BASE_POINTER, STACK_POINTER));
        self.emit(Instruction::Adi(
            STACK_POINTER,
            Self::offset(-(args + 1), &call.position)?,
        ));
        self.emit(Instruction::Cmp(
            STACK_POINTER,
            Operand::Immediate(STACK_END),
        ));
        self.emit(Instruction::Jmp(
            Some(Condition::Less),
            batc_label("stack_overflow"),
        ));
        self.emit(Instruction::Mst(
            STACK_POINTER,
            Self::offset(args, &call.position)?,
            old_base.reg(),
        ));

        for (index, arg) in call.args.iter().enumerate() {
            let slot = Self::offset(index as i64, &arg.position())?;
            self.compile_expression_into(arg, Destination::Frame(STACK_POINTER, slot))?;
        }

        self.emit(Instruction::Cal(user_label(&call.ident.value)));
        self.emit(Instruction::Mld(
            BASE_POINTER,
            STACK_POINTER,
            Self::offset(args, &call.position)?,
        ));
        self.emit(Instruction::Adi(
            STACK_POINTER,
            Self::offset(args + 1, &call.position)?,
        ));

        // TODO: move the return value into `destination` once the frame
        // layout reserves a slot for it

        Ok(())
    }

    fn compile_write_port(&mut self, call: &Call<ScopeId>) -> CResult<()> {
        // the port has to be a compile time constant
        let Expression::Integer(port) = &call.args[0] else {
            return Err(CompileError {
                message: "Port argument must be a literal".to_owned(),
                position: call.args[0].position(),
            });
        };

        let value = self.alloc_register(&call.position)?;
        self.compile_expression_into(&call.args[1], Destination::Register(value.reg()))?;
        self.emit(Instruction::Pst(value.reg(), Self::truncate(port.value)));

        Ok(())
    }

    fn compile_read_port(&mut self, call: &Call<ScopeId>, destination: Destination) -> CResult<()> {
        let Expression::Integer(port) = &call.args[0] else {
            return Err(CompileError {
                message: "Port argument must be a literal".to_owned(),
                position: call.args[0].position(),
            });
        };

        match destination {
            Destination::Register(reg) => {
                self.emit(Instruction::Pld(reg, Self::truncate(port.value)));
            }
            other => {
                let reg = self.alloc_register(&call.position)?;
                self.emit(Instruction::Pld(reg.reg(), Self::truncate(port.value)));
                self.store_register(other, reg.reg(), &call.position)?;
            }
        }

        Ok(())
    }
}
