use std::{cell::RefCell, collections::BTreeSet, rc::Rc};

use crate::asm::Reg;

/// The registers the code generator may hand out. r0/r1 belong to the
/// runtime, r6/r7 are the stack and base pointer.
const FREE_REGISTERS: [Reg; 4] = [Reg::R2, Reg::R3, Reg::R4, Reg::R5];

/// The free set of general purpose registers. Each register is either free
/// or held by exactly one [`RegisterLease`].
#[derive(Debug)]
pub struct RegisterPool {
    free: BTreeSet<Reg>,
}

impl RegisterPool {
    pub fn new() -> RegisterPool {
        RegisterPool {
            free: BTreeSet::from(FREE_REGISTERS),
        }
    }

    fn acquire(&mut self) -> Option<Reg> {
        let reg = *self.free.iter().next()?;
        self.free.remove(&reg);
        Some(reg)
    }

    fn release(&mut self, reg: Reg) {
        // releasing a register twice is a compiler bug, not a user error
        assert!(self.free.insert(reg), "register {reg} released twice");
    }

    /// Whether every register is back in the pool.
    pub fn is_full(&self) -> bool {
        self.free.len() == FREE_REGISTERS.len()
    }
}

/// Scoped acquisition of a register: dropping the lease returns the register
/// to the pool, on every exit path of the emitting region.
#[derive(Debug)]
pub struct RegisterLease {
    reg: Reg,
    pool: Rc<RefCell<RegisterPool>>,
}

impl RegisterLease {
    pub fn reg(&self) -> Reg {
        self.reg
    }
}

impl Drop for RegisterLease {
    fn drop(&mut self) {
        self.pool.borrow_mut().release(self.reg);
    }
}

/// Take the lowest numbered free register out of `pool`, or `None` if the
/// pool is exhausted.
pub fn alloc_register(pool: &Rc<RefCell<RegisterPool>>) -> Option<RegisterLease> {
    let reg = pool.borrow_mut().acquire()?;

    Some(RegisterLease {
        reg,
        pool: Rc::clone(pool),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_takes_the_lowest_register() {
        let pool = Rc::new(RefCell::new(RegisterPool::new()));

        let first = alloc_register(&pool).unwrap();
        let second = alloc_register(&pool).unwrap();

        assert_eq!(first.reg(), Reg::R2);
        assert_eq!(second.reg(), Reg::R3);
    }

    #[test]
    fn dropping_a_lease_returns_the_register() {
        let pool = Rc::new(RefCell::new(RegisterPool::new()));

        {
            let _leases: Vec<_> = (0..4).map(|_| alloc_register(&pool).unwrap()).collect();
            assert!(alloc_register(&pool).is_none());
        }

        assert!(pool.borrow().is_full());
        assert_eq!(alloc_register(&pool).unwrap().reg(), Reg::R2);
    }

    #[test]
    #[should_panic(expected = "released twice")]
    fn double_release_is_a_bug() {
        let mut pool = RegisterPool::new();

        let reg = pool.acquire().unwrap();
        pool.release(reg);
        pool.release(reg);
    }
}
