use pest::iterators::Pair;

use super::{Block, Expression, If, Rule, Var};

#[derive(Debug, Clone)]
pub enum Statement<T> {
    Var(Var<T>),
    Expression(Expression<T>),
    If(If<T>),
    Block(Block<T>),
}

impl Statement<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Statement<()> {
        match pair.as_rule() {
            Rule::var => Statement::Var(Var::from_pair(pair, file)),
            Rule::if_statement => Statement::If(If::from_pair(pair, file)),
            Rule::block => Statement::Block(Block::from_pair(pair, file)),
            _ => Statement::Expression(Expression::from_pair(pair, file)),
        }
    }
}
