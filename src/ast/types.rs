use std::fmt::Display;

use pest::iterators::Pair;

use super::Rule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Void,
    I8,
    U8,
    Char,
    Bool,
    Pointer(Box<Type>),
}

impl Type {
    pub fn from_pair(pair: Pair<Rule>) -> Type {
        match pair.as_rule() {
            Rule::type_name => Type::from_pair(pair.into_inner().next().unwrap()),
            Rule::pointer => Type::Pointer(Box::new(Type::from_pair(
                pair.into_inner().next().unwrap(),
            ))),
            Rule::primitive => match pair.as_str() {
                "void" => Type::Void,
                "i8" => Type::I8,
                "u8" => Type::U8,
                "char" => Type::Char,
                "bool" => Type::Bool,
                _ => unreachable!(),
            },
            _ => unreachable!(),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::I8 => f.write_str("i8"),
            Type::U8 => f.write_str("u8"),
            Type::Char => f.write_str("char"),
            Type::Bool => f.write_str("bool"),
            Type::Pointer(inner) => write!(f, "*{inner}"),
        }
    }
}
