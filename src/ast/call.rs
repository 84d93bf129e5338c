use pest::iterators::Pair;

use super::{Expression, Ident, Position, Rule};

#[derive(Debug, Clone)]
pub struct Call<T> {
    pub ident: Ident<T>,
    pub args: Vec<Expression<T>>,
    pub position: Position,
    pub scope: T,
}

impl Call<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Call<()> {
        assert_eq!(pair.as_rule(), Rule::call);

        let (line, col) = pair.line_col();

        let mut inner = pair.into_inner();

        let ident = Ident::from_pair(inner.next().unwrap(), file);

        let mut args = vec![];

        for arg in inner {
            args.push(Expression::from_pair(arg, file));
        }

        Call {
            ident,
            args,
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
