use log::error;
use pest::iterators::Pair;
use unescape::unescape;

use super::{Position, Rule};

#[derive(Debug, Clone)]
pub struct Character<T> {
    pub value: char,
    pub position: Position,
    pub scope: T,
}

impl Character<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Character<()> {
        assert_eq!(pair.as_rule(), Rule::character);

        let (line, col) = pair.line_col();
        let raw = pair.into_inner().next().unwrap().as_str();

        let Some(decoded) = unescape(raw) else {
            error!("Invalid escape sequence in char literal '{raw}' at {line}:{col}");
            std::process::exit(-1);
        };

        let mut chars = decoded.chars();
        let value = match (chars.next(), chars.next()) {
            (Some(value), None) => value,
            _ => {
                error!("Char literal '{raw}' must be exactly one character at {line}:{col}");
                std::process::exit(-1);
            }
        };

        Character {
            value,
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
