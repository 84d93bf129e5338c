use pest::iterators::Pair;

use super::{Expression, Position, Rule};

#[derive(Debug, Clone)]
pub struct Deref<T> {
    pub expression: Box<Expression<T>>,
    pub position: Position,
    pub scope: T,
}

impl Deref<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Deref<()> {
        assert_eq!(pair.as_rule(), Rule::deref);

        let (line, col) = pair.line_col();

        let expression = Expression::from_pair(pair.into_inner().next().unwrap(), file);

        Deref {
            expression: Box::new(expression),
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
