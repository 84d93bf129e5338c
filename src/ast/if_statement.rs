use pest::iterators::Pair;

use super::{Block, Expression, Position, Rule};

#[derive(Debug, Clone)]
pub struct If<T> {
    pub condition: Expression<T>,
    pub then_block: Block<T>,
    pub else_branch: Option<ElseBranch<T>>,
    pub position: Position,
    pub scope: T,
}

/// The `else` side of an [`If`]: either a plain block or another `if`,
/// forming an `else if` chain.
#[derive(Debug, Clone)]
pub enum ElseBranch<T> {
    Block(Block<T>),
    If(Box<If<T>>),
}

impl If<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> If<()> {
        assert_eq!(pair.as_rule(), Rule::if_statement);

        let (line, col) = pair.line_col();

        let mut inner = pair.into_inner();

        let condition = Expression::from_pair(inner.next().unwrap(), file);
        let then_block = Block::from_pair(inner.next().unwrap(), file);

        let else_branch = inner.next().map(|branch| match branch.as_rule() {
            Rule::block => ElseBranch::Block(Block::from_pair(branch, file)),
            Rule::if_statement => ElseBranch::If(Box::new(If::from_pair(branch, file))),
            _ => unreachable!(),
        });

        If {
            condition,
            then_block,
            else_branch,
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
