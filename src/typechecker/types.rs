use crate::ast::Type;

/// The type of an expression, together with its compile time value where one
/// is known. Only integer literals carry a known value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprType {
    pub type_: Type,
    pub value: Option<i64>,
}

impl ExprType {
    pub fn of(type_: Type) -> ExprType {
        ExprType { type_, value: None }
    }

    pub fn known(type_: Type, value: i64) -> ExprType {
        ExprType {
            type_,
            value: Some(value),
        }
    }

    /// Whether this type implicitly converts to `target`: identity, or an
    /// in-range narrowing of a known constant integer.
    pub fn coerces_to(&self, target: &Type) -> bool {
        if let Some(value) = self.value {
            match target {
                Type::U8 if (0..=255).contains(&value) => return true,
                Type::I8 if (-128..=127).contains(&value) => return true,
                _ => {}
            }
        }

        self.type_ == *target
    }
}
