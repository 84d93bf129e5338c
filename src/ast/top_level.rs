use pest::iterators::Pair;

use super::{Func, Rule, Var};

#[derive(Debug, Clone)]
pub enum TopLevel<T> {
    Func(Func<T>),
    Var(Var<T>),
}

impl TopLevel<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> TopLevel<()> {
        match pair.as_rule() {
            Rule::func => TopLevel::Func(Func::from_pair(pair, file)),
            Rule::var => TopLevel::Var(Var::from_pair(pair, file)),
            rule => unreachable!("Can not parse rule {rule:?} as top level"),
        }
    }
}
