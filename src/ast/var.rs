use pest::iterators::Pair;

use super::{Expression, Ident, Position, Rule, TypeAnnotation};

#[derive(Debug, Clone)]
pub struct Var<T> {
    pub ident: Ident<T>,
    pub type_annotation: TypeAnnotation,
    pub value: Option<Expression<T>>,
    pub position: Position,
    pub scope: T,
}

impl Var<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Var<()> {
        assert_eq!(pair.as_rule(), Rule::var);

        let (line, col) = pair.line_col();

        let mut inner = pair.into_inner();

        let ident = Ident::from_pair(inner.next().unwrap(), file);
        let type_annotation = TypeAnnotation::from_pair(inner.next().unwrap(), file);
        let value = inner.next().map(|value| Expression::from_pair(value, file));

        Var {
            ident,
            type_annotation,
            value,
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
