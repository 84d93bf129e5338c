use pest::iterators::Pair;

use super::{Position, Rule, Statement};

#[derive(Debug, Clone)]
pub struct Block<T> {
    pub statements: Vec<Statement<T>>,
    pub position: Position,
    pub scope: T,
}

impl Block<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Block<()> {
        assert_eq!(pair.as_rule(), Rule::block);

        let (line, col) = pair.line_col();

        let mut statements = vec![];

        for statement in pair.into_inner() {
            statements.push(Statement::from_pair(statement, file));
        }

        Block {
            statements,
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
