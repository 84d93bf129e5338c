//! Type checker for Bat.
//!
//! Checking happens in two passes over the AST. The declaration pass walks
//! top-down, builds the scope graph, registers every name, and assigns each
//! variable its storage slot; it turns an `Ast<()>` into an `Ast<ScopeId>`.
//! The check pass walks bottom-up over the annotated tree and verifies type
//! compatibility at every use site without touching the scope graph.
mod error;
mod scope;
mod types;

pub use self::error::TypeError;
pub use self::scope::{ScopeArena, ScopeId, Storage, Symbol};
pub use self::types::ExprType;

use log::warn;

use crate::ast::{
    Ast, Block, Call, Character, Deref, ElseBranch, Equality, Expression, Func, Ident, If,
    Integer, Param, Statement, Str, TopLevel, Type, Var,
};

/// Result of type checking a node within the AST.
type TResult<T> = Result<T, TypeError>;

/// Struct for running both analysis passes over an AST.
pub struct Typechecker {
    ast: Ast<()>,
}

impl Typechecker {
    pub fn from_ast(ast: Ast<()>) -> Self {
        Self { ast }
    }

    /// Run the declaration pass and the check pass. Returns the scope
    /// annotated AST together with the arena owning all scopes.
    ///
    /// The passes consume the parsed AST, so declaring the same tree twice
    /// is unrepresentable; every run starts from a fresh scope graph.
    pub fn check(self) -> Result<(Ast<ScopeId>, ScopeArena), TypeError> {
        let mut scopes = ScopeArena::new();
        let root = scopes.root();

        let mut top_levels = vec![];
        for top_level in self.ast.top_levels() {
            top_levels.push(Self::declare_top_level(top_level, root, &mut scopes)?);
        }
        let ast = Ast::from_top_levels(top_levels);

        for top_level in ast.top_levels() {
            Self::check_top_level(&top_level, &scopes)?;
        }

        Ok((ast, scopes))
    }

    fn declare_top_level(
        top_level: TopLevel<()>,
        scope: ScopeId,
        scopes: &mut ScopeArena,
    ) -> TResult<TopLevel<ScopeId>> {
        Ok(match top_level {
            TopLevel::Func(func) => TopLevel::Func(Self::declare_func(func, scope, scopes)?),
            TopLevel::Var(var) => TopLevel::Var(Self::declare_var(var, scope, scopes)?),
        })
    }

    fn declare_func(func: Func<()>, scope: ScopeId, scopes: &mut ScopeArena) -> TResult<Func<ScopeId>> {
        let param_types = func
            .params
            .iter()
            .map(|param| param.type_annotation.value.clone())
            .collect();

        scopes.declare_function(
            scope,
            &func.ident.value,
            param_types,
            func.return_type.value.clone(),
            &func.position,
        )?;

        // parameters live in the body's scope
        let body_scope = scopes.push_child(scope);

        let mut params = vec![];
        for param in func.params {
            scopes.declare_variable(
                body_scope,
                &param.ident.value,
                param.type_annotation.value.clone(),
                &param.position,
            )?;
            params.push(Param {
                ident: Self::annotate_ident(param.ident, body_scope),
                type_annotation: param.type_annotation,
                position: param.position,
                scope: body_scope,
            });
        }

        let body = Self::declare_block(func.body, body_scope, scopes)?;

        Ok(Func {
            ident: Self::annotate_ident(func.ident, scope),
            params,
            return_type: func.return_type,
            body,
            position: func.position,
            scope,
        })
    }

    fn declare_var(var: Var<()>, scope: ScopeId, scopes: &mut ScopeArena) -> TResult<Var<ScopeId>> {
        scopes.declare_variable(
            scope,
            &var.ident.value,
            var.type_annotation.value.clone(),
            &var.position,
        )?;

        let value = var.value.map(|value| Self::declare_expression(value, scope));

        Ok(Var {
            ident: Self::annotate_ident(var.ident, scope),
            type_annotation: var.type_annotation,
            value,
            position: var.position,
            scope,
        })
    }

    fn declare_block(
        block: Block<()>,
        scope: ScopeId,
        scopes: &mut ScopeArena,
    ) -> TResult<Block<ScopeId>> {
        let mut statements = vec![];

        for statement in block.statements {
            statements.push(Self::declare_statement(statement, scope, scopes)?);
        }

        Ok(Block {
            statements,
            position: block.position,
            scope,
        })
    }

    fn declare_statement(
        statement: Statement<()>,
        scope: ScopeId,
        scopes: &mut ScopeArena,
    ) -> TResult<Statement<ScopeId>> {
        Ok(match statement {
            Statement::Var(var) => Statement::Var(Self::declare_var(var, scope, scopes)?),
            Statement::Expression(expression) => {
                Statement::Expression(Self::declare_expression(expression, scope))
            }
            Statement::If(if_statement) => {
                Statement::If(Self::declare_if(if_statement, scope, scopes)?)
            }
            Statement::Block(block) => {
                // a bare block is its own scope-introducing site
                let child = scopes.push_child(scope);
                Statement::Block(Self::declare_block(block, child, scopes)?)
            }
        })
    }

    fn declare_if(if_statement: If<()>, scope: ScopeId, scopes: &mut ScopeArena) -> TResult<If<ScopeId>> {
        let condition = Self::declare_expression(if_statement.condition, scope);

        let then_scope = scopes.push_child(scope);
        let then_block = Self::declare_block(if_statement.then_block, then_scope, scopes)?;

        let else_branch = match if_statement.else_branch {
            Some(ElseBranch::Block(block)) => {
                let else_scope = scopes.push_child(scope);
                Some(ElseBranch::Block(Self::declare_block(block, else_scope, scopes)?))
            }
            Some(ElseBranch::If(inner)) => {
                let else_scope = scopes.push_child(scope);
                Some(ElseBranch::If(Box::new(Self::declare_if(
                    *inner, else_scope, scopes,
                )?)))
            }
            None => None,
        };

        Ok(If {
            condition,
            then_block,
            else_branch,
            position: if_statement.position,
            scope,
        })
    }

    /// Expressions never declare anything, they only propagate the scope
    /// they are analyzed in down to their leaves.
    fn declare_expression(expression: Expression<()>, scope: ScopeId) -> Expression<ScopeId> {
        match expression {
            Expression::Integer(Integer {
                value, position, ..
            }) => Expression::Integer(Integer {
                value,
                position,
                scope,
            }),
            Expression::Str(Str {
                value, position, ..
            }) => Expression::Str(Str {
                value,
                position,
                scope,
            }),
            Expression::Character(Character {
                value, position, ..
            }) => Expression::Character(Character {
                value,
                position,
                scope,
            }),
            Expression::Ident(ident) => Expression::Ident(Self::annotate_ident(ident, scope)),
            Expression::Call(call) => Expression::Call(Call {
                ident: Self::annotate_ident(call.ident, scope),
                args: call
                    .args
                    .into_iter()
                    .map(|arg| Self::declare_expression(arg, scope))
                    .collect(),
                position: call.position,
                scope,
            }),
            Expression::Deref(deref) => Expression::Deref(Deref {
                expression: Box::new(Self::declare_expression(*deref.expression, scope)),
                position: deref.position,
                scope,
            }),
            Expression::Equality(equality) => Expression::Equality(Equality {
                lhs: Box::new(Self::declare_expression(*equality.lhs, scope)),
                rhs: Box::new(Self::declare_expression(*equality.rhs, scope)),
                position: equality.position,
                scope,
            }),
        }
    }

    fn annotate_ident(ident: Ident<()>, scope: ScopeId) -> Ident<ScopeId> {
        Ident {
            value: ident.value,
            position: ident.position,
            scope,
        }
    }

    fn check_top_level(top_level: &TopLevel<ScopeId>, scopes: &ScopeArena) -> TResult<()> {
        match top_level {
            TopLevel::Func(func) => Self::check_block(&func.body, scopes),
            TopLevel::Var(var) => Self::check_var(var, scopes),
        }
    }

    fn check_var(var: &Var<ScopeId>, scopes: &ScopeArena) -> TResult<()> {
        let Some(value) = &var.value else {
            // the slot exists but stays uninitialized
            return Ok(());
        };

        let value_type = Self::expression_type(value, scopes)?;

        if matches!(value, Expression::Call(_)) {
            // calls do not materialize their return value yet, so there is
            // no value whose type could disagree with the annotation
            return Ok(());
        }

        if !value_type.coerces_to(&var.type_annotation.value) {
            return Err(TypeError {
                message: format!(
                    "Cannot assign value of type '{}' to '{}'",
                    value_type.type_, var.type_annotation.value
                ),
                position: var.position.clone(),
            });
        }

        Ok(())
    }

    fn check_block(block: &Block<ScopeId>, scopes: &ScopeArena) -> TResult<()> {
        for statement in &block.statements {
            Self::check_statement(statement, scopes)?;
        }

        Ok(())
    }

    fn check_statement(statement: &Statement<ScopeId>, scopes: &ScopeArena) -> TResult<()> {
        match statement {
            Statement::Var(var) => Self::check_var(var, scopes),
            Statement::Expression(expression) => {
                Self::expression_type(expression, scopes).map(|_| ())
            }
            Statement::If(if_statement) => Self::check_if(if_statement, scopes),
            Statement::Block(block) => Self::check_block(block, scopes),
        }
    }

    fn check_if(if_statement: &If<ScopeId>, scopes: &ScopeArena) -> TResult<()> {
        // any condition type is accepted, the machine compares against zero
        Self::expression_type(&if_statement.condition, scopes)?;

        Self::check_block(&if_statement.then_block, scopes)?;

        match &if_statement.else_branch {
            Some(ElseBranch::Block(block)) => Self::check_block(block, scopes),
            Some(ElseBranch::If(inner)) => Self::check_if(inner, scopes),
            None => Ok(()),
        }
    }

    /// Compute the type of an expression bottom-up, verifying compatibility
    /// at every use site on the way.
    fn expression_type(expression: &Expression<ScopeId>, scopes: &ScopeArena) -> TResult<ExprType> {
        match expression {
            Expression::Integer(Integer { value, .. }) => {
                if !(-128..=255).contains(value) {
                    warn!("Integer literal {value} out of range, will be truncated to 8 bits");
                }

                if *value < 0 {
                    Ok(ExprType::known(Type::I8, *value))
                } else {
                    Ok(ExprType::known(Type::U8, *value))
                }
            }
            Expression::Str(_) => Ok(ExprType::of(Type::Pointer(Box::new(Type::Char)))),
            Expression::Character(character) => {
                if character.value as u32 > 0xFF {
                    return Err(TypeError {
                        message: format!(
                            "Char literal '{}' does not fit in a byte",
                            character.value
                        ),
                        position: character.position.clone(),
                    });
                }
                Ok(ExprType::of(Type::Char))
            }
            Expression::Ident(ident) => match scopes.symbol(ident.scope, &ident.value) {
                Some(Symbol::Variable(type_)) => Ok(ExprType::of(type_.clone())),
                Some(Symbol::Function { .. }) => Err(TypeError {
                    message: format!("Symbol '{}' is not a variable", ident.value),
                    position: ident.position.clone(),
                }),
                None => Err(TypeError {
                    message: format!("Symbol '{}' not declared", ident.value),
                    position: ident.position.clone(),
                }),
            },
            Expression::Call(call) => Self::check_call(call, scopes),
            Expression::Deref(deref) => {
                let inner = Self::expression_type(&deref.expression, scopes)?;

                match inner.type_ {
                    Type::Pointer(pointee) => Ok(ExprType::of(*pointee)),
                    type_ => Err(TypeError {
                        message: format!("Cannot dereference expression of type '{type_}'"),
                        position: deref.position.clone(),
                    }),
                }
            }
            Expression::Equality(equality) => {
                let lhs = Self::expression_type(&equality.lhs, scopes)?;
                let rhs = Self::expression_type(&equality.rhs, scopes)?;

                if !lhs.coerces_to(&rhs.type_) && !rhs.coerces_to(&lhs.type_) {
                    return Err(TypeError {
                        message: format!("Cannot compare '{}' to '{}'", lhs.type_, rhs.type_),
                        position: equality.position.clone(),
                    });
                }

                Ok(ExprType::of(Type::Bool))
            }
        }
    }

    fn check_call(call: &Call<ScopeId>, scopes: &ScopeArena) -> TResult<ExprType> {
        let mut arg_types = vec![];
        for arg in &call.args {
            arg_types.push(Self::expression_type(arg, scopes)?);
        }

        let name = &call.ident.value;

        let (params, return_type) = match scopes.symbol(call.scope, name) {
            Some(Symbol::Function {
                params,
                return_type,
            }) => (params, return_type),
            Some(Symbol::Variable(_)) => {
                return Err(TypeError {
                    message: format!("Symbol '{name}' is not a function"),
                    position: call.position.clone(),
                })
            }
            None => {
                return Err(TypeError {
                    message: format!("Function '{name}' not declared"),
                    position: call.position.clone(),
                })
            }
        };

        if params.len() != call.args.len() {
            return Err(TypeError {
                message: format!(
                    "Function '{name}' expects {} arguments, got {}",
                    params.len(),
                    call.args.len()
                ),
                position: call.position.clone(),
            });
        }

        for ((arg, arg_type), param) in call.args.iter().zip(&arg_types).zip(params) {
            if !arg_type.coerces_to(param) {
                return Err(TypeError {
                    message: format!(
                        "Cannot pass argument of type '{}' to parameter of type '{param}'",
                        arg_type.type_
                    ),
                    position: arg.position(),
                });
            }
        }

        Ok(ExprType::of(return_type.clone()))
    }
}
