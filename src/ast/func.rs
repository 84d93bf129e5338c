use pest::iterators::Pair;

use super::{Block, Ident, Param, Position, Rule, TypeAnnotation};

#[derive(Debug, Clone)]
pub struct Func<T> {
    pub ident: Ident<T>,
    pub params: Vec<Param<T>>,
    pub return_type: TypeAnnotation,
    pub body: Block<T>,
    pub position: Position,
    pub scope: T,
}

impl Func<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Func<()> {
        assert_eq!(pair.as_rule(), Rule::func);

        let (line, col) = pair.line_col();

        let mut inner = pair.into_inner();

        let ident = Ident::from_pair(inner.next().unwrap(), file);

        let mut params = vec![];
        let mut return_type = None;
        let mut body = None;

        for pair in inner {
            match pair.as_rule() {
                Rule::parameter => params.push(Param::from_pair(pair, file)),
                Rule::type_name => return_type = Some(TypeAnnotation::from_pair(pair, file)),
                Rule::block => body = Some(Block::from_pair(pair, file)),
                _ => unreachable!(),
            }
        }

        Func {
            ident,
            params,
            return_type: return_type.unwrap(),
            body: body.unwrap(),
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
