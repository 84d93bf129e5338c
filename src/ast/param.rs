use pest::iterators::Pair;

use super::{Ident, Position, Rule, TypeAnnotation};

#[derive(Debug, Clone)]
pub struct Param<T> {
    pub ident: Ident<T>,
    pub type_annotation: TypeAnnotation,
    pub position: Position,
    pub scope: T,
}

impl Param<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Param<()> {
        assert_eq!(pair.as_rule(), Rule::parameter);

        let (line, col) = pair.line_col();

        let mut inner = pair.into_inner();

        let ident = Ident::from_pair(inner.next().unwrap(), file);
        let type_annotation = TypeAnnotation::from_pair(inner.next().unwrap(), file);

        Param {
            ident,
            type_annotation,
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
