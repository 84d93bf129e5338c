use log::error;
use pest::iterators::Pair;

use super::{Position, Rule};

#[derive(Debug, Clone)]
pub struct Integer<T> {
    pub value: i64,
    pub position: Position,
    pub scope: T,
}

impl Integer<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Integer<()> {
        assert_eq!(pair.as_rule(), Rule::integer);

        let (line, col) = pair.line_col();
        let source = pair.as_str();

        let (negative, digits) = match source.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, source),
        };

        let magnitude = match digits.strip_prefix("0x") {
            Some(hex) => i64::from_str_radix(hex, 16),
            None => digits.parse::<i64>(),
        };

        let Ok(magnitude) = magnitude else {
            error!("Invalid integer literal '{source}' at {line}:{col}");
            std::process::exit(-1);
        };

        Integer {
            value: if negative { -magnitude } else { magnitude },
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
