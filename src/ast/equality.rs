use super::{Expression, Position};

/// An `a == b` comparison. Chains fold left-associatively, so `a == b == c`
/// compares the boolean result of `a == b` against `c`.
#[derive(Debug, Clone)]
pub struct Equality<T> {
    pub lhs: Box<Expression<T>>,
    pub rhs: Box<Expression<T>>,
    pub position: Position,
    pub scope: T,
}
