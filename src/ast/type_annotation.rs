use pest::iterators::Pair;

use super::{Position, Rule, Type};

#[derive(Debug, Clone)]
pub struct TypeAnnotation {
    pub value: Type,
    pub position: Position,
}

impl TypeAnnotation {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> TypeAnnotation {
        assert_eq!(pair.as_rule(), Rule::type_name);

        let (line, col) = pair.line_col();

        TypeAnnotation {
            value: Type::from_pair(pair),
            position: (file.to_owned(), line, col),
        }
    }
}
