use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::asm::{HEAP_END, STACK_END};
use crate::ast::{Position, Type};

use super::error::TypeError;

/// Functions every program can call without declaring them.
static BUILTINS: Lazy<Vec<(&str, Vec<Type>, Type)>> = Lazy::new(|| {
    vec![
        ("write_port", vec![Type::U8, Type::U8], Type::Void),
        ("read_port", vec![Type::U8], Type::U8),
    ]
});

/// Reference to a scope inside a [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Clone)]
pub enum Symbol {
    Variable(Type),
    Function {
        params: Vec<Type>,
        return_type: Type,
    },
}

/// Where a declared variable lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// An absolute address in static memory. Root scope only.
    Static(u8),
    /// A slot relative to the base pointer.
    Frame(i64),
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    symbols: HashMap<String, Symbol>,
    storage: HashMap<String, Storage>,
    offset: i64,
}

/// Owner of all scopes of a program. Scopes refer to their parent by index,
/// so the graph has single ownership and no cycles. The tables are grown by
/// the declaration pass and read-only afterwards.
#[derive(Debug)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> ScopeArena {
        let mut root = Scope::default();

        for (name, params, return_type) in BUILTINS.iter() {
            root.symbols.insert(
                (*name).to_owned(),
                Symbol::Function {
                    params: params.clone(),
                    return_type: return_type.clone(),
                },
            );
        }

        ScopeArena { scopes: vec![root] }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Create a fresh scope below `parent`. A nested frame scope continues
    /// its parent's slot numbering, so a declaration inside a branch can not
    /// alias a slot already handed out in the enclosing scope.
    pub fn push_child(&mut self, parent: ScopeId) -> ScopeId {
        let offset = if parent == self.root() {
            0
        } else {
            self.scopes[parent.0].offset
        };

        self.scopes.push(Scope {
            parent: Some(parent),
            offset,
            ..Scope::default()
        });

        ScopeId(self.scopes.len() - 1)
    }

    /// Declare a variable and assign its storage slot. Storage is assigned
    /// exactly once, here, and never moves.
    pub fn declare_variable(
        &mut self,
        id: ScopeId,
        name: &str,
        type_: Type,
        position: &Position,
    ) -> Result<(), TypeError> {
        let root = self.root();
        let scope = &mut self.scopes[id.0];

        if scope.symbols.contains_key(name) {
            return Err(TypeError {
                message: format!("Redefinition of symbol '{name}'"),
                position: position.clone(),
            });
        }

        let storage = if id == root {
            let address = STACK_END as i64 - 1 - scope.offset;
            if address <= HEAP_END as i64 {
                return Err(TypeError {
                    message: format!("Out of static memory while declaring '{name}'"),
                    position: position.clone(),
                });
            }
            Storage::Static(address as u8)
        } else {
            Storage::Frame(scope.offset)
        };

        scope.symbols.insert(name.to_owned(), Symbol::Variable(type_));
        scope.storage.insert(name.to_owned(), storage);
        scope.offset += 1;

        Ok(())
    }

    pub fn declare_function(
        &mut self,
        id: ScopeId,
        name: &str,
        params: Vec<Type>,
        return_type: Type,
        position: &Position,
    ) -> Result<(), TypeError> {
        let root = self.root();
        let scope = &mut self.scopes[id.0];

        if id != root {
            return Err(TypeError {
                message: format!("Function '{name}' can only be declared at the top level"),
                position: position.clone(),
            });
        }

        if scope.symbols.contains_key(name) {
            return Err(TypeError {
                message: format!("Redefinition of symbol '{name}'"),
                position: position.clone(),
            });
        }

        scope.symbols.insert(
            name.to_owned(),
            Symbol::Function {
                params,
                return_type,
            },
        );

        Ok(())
    }

    /// Find a symbol by walking the scope chain towards the root.
    pub fn symbol(&self, id: ScopeId, name: &str) -> Option<&Symbol> {
        let mut current = Some(id);

        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }

        None
    }

    /// Find the storage of a variable by walking the scope chain.
    pub fn storage(&self, id: ScopeId, name: &str) -> Option<Storage> {
        let mut current = Some(id);

        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(storage) = scope.storage.get(name) {
                return Some(*storage);
            }
            current = scope.parent;
        }

        None
    }
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> Position {
        ("test.bat".to_owned(), 1, 1)
    }

    #[test]
    fn static_slots_grow_downward() {
        let mut scopes = ScopeArena::new();
        let root = scopes.root();

        scopes
            .declare_variable(root, "a", Type::U8, &position())
            .unwrap();
        scopes
            .declare_variable(root, "b", Type::U8, &position())
            .unwrap();

        assert_eq!(scopes.storage(root, "a"), Some(Storage::Static(191)));
        assert_eq!(scopes.storage(root, "b"), Some(Storage::Static(190)));
    }

    #[test]
    fn static_memory_is_bounded() {
        let mut scopes = ScopeArena::new();
        let root = scopes.root();

        for i in 0..63 {
            scopes
                .declare_variable(root, &format!("v{i}"), Type::U8, &position())
                .unwrap();
        }

        let error = scopes
            .declare_variable(root, "overflow", Type::U8, &position())
            .unwrap_err();
        assert!(error.message.contains("Out of static memory"));
    }

    #[test]
    fn redefinition_is_rejected() {
        let mut scopes = ScopeArena::new();
        let root = scopes.root();

        scopes
            .declare_variable(root, "x", Type::U8, &position())
            .unwrap();
        let error = scopes
            .declare_variable(root, "x", Type::I8, &position())
            .unwrap_err();
        assert!(error.message.contains("Redefinition of symbol 'x'"));
    }

    #[test]
    fn frame_slots_continue_in_nested_scopes() {
        let mut scopes = ScopeArena::new();
        let body = scopes.push_child(scopes.root());

        scopes
            .declare_variable(body, "a", Type::U8, &position())
            .unwrap();

        let branch = scopes.push_child(body);
        scopes
            .declare_variable(branch, "b", Type::U8, &position())
            .unwrap();

        assert_eq!(scopes.storage(body, "a"), Some(Storage::Frame(0)));
        assert_eq!(scopes.storage(branch, "b"), Some(Storage::Frame(1)));
    }

    #[test]
    fn lookup_walks_the_scope_chain() {
        let mut scopes = ScopeArena::new();
        let root = scopes.root();
        scopes
            .declare_variable(root, "x", Type::Bool, &position())
            .unwrap();

        let mid = scopes.push_child(root);
        let inner = scopes.push_child(mid);
        assert!(matches!(
            scopes.symbol(inner, "x"),
            Some(Symbol::Variable(Type::Bool))
        ));
        assert!(scopes.symbol(inner, "write_port").is_some());
        assert!(scopes.symbol(inner, "y").is_none());
    }

    #[test]
    fn functions_only_at_the_top_level() {
        let mut scopes = ScopeArena::new();
        let body = scopes.push_child(scopes.root());

        let error = scopes
            .declare_function(body, "f", vec![], Type::Void, &position())
            .unwrap_err();
        assert!(error.message.contains("top level"));
    }
}
