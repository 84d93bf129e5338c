use log::error;
use pest::iterators::Pair;

use super::{Call, Character, Deref, Equality, Ident, Integer, Position, Rule, Str};

#[derive(Debug, Clone)]
pub enum Expression<T> {
    Integer(Integer<T>),
    Str(Str<T>),
    Character(Character<T>),
    Ident(Ident<T>),
    Call(Call<T>),
    Deref(Deref<T>),
    Equality(Equality<T>),
}

impl Expression<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Expression<()> {
        match pair.as_rule() {
            Rule::equality => {
                let (line, col) = pair.line_col();

                let mut inner = pair.into_inner();

                let mut expression = Expression::from_pair(inner.next().unwrap(), file);

                for operand in inner {
                    expression = Expression::Equality(Equality {
                        lhs: Box::new(expression),
                        rhs: Box::new(Expression::from_pair(operand, file)),
                        position: (file.to_owned(), line, col),
                        scope: (),
                    });
                }

                expression
            }
            Rule::integer => Expression::Integer(Integer::from_pair(pair, file)),
            Rule::string => Expression::Str(Str::from_pair(pair, file)),
            Rule::character => Expression::Character(Character::from_pair(pair, file)),
            Rule::ident => Expression::Ident(Ident::from_pair(pair, file)),
            Rule::call => Expression::Call(Call::from_pair(pair, file)),
            Rule::deref => Expression::Deref(Deref::from_pair(pair, file)),
            _ => {
                error!(
                    "Unexpected expression '{}' at {}:{}",
                    pair.as_str(),
                    pair.line_col().0,
                    pair.line_col().1
                );
                std::process::exit(-1)
            }
        }
    }
}

impl<T> Expression<T> {
    pub fn position(&self) -> Position {
        match self {
            Expression::Integer(Integer { position, .. })
            | Expression::Str(Str { position, .. })
            | Expression::Character(Character { position, .. })
            | Expression::Ident(Ident { position, .. })
            | Expression::Call(Call { position, .. })
            | Expression::Deref(Deref { position, .. })
            | Expression::Equality(Equality { position, .. }) => position.to_owned(),
        }
    }
}

impl<T> Expression<T>
where
    T: Clone,
{
    pub fn scope(&self) -> T {
        match self {
            Expression::Integer(Integer { scope, .. })
            | Expression::Str(Str { scope, .. })
            | Expression::Character(Character { scope, .. })
            | Expression::Ident(Ident { scope, .. })
            | Expression::Call(Call { scope, .. })
            | Expression::Deref(Deref { scope, .. })
            | Expression::Equality(Equality { scope, .. }) => scope.clone(),
        }
    }
}
