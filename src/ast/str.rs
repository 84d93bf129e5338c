use log::error;
use pest::iterators::Pair;
use unescape::unescape;

use super::{Position, Rule};

#[derive(Debug, Clone)]
pub struct Str<T> {
    pub value: String,
    pub position: Position,
    pub scope: T,
}

impl Str<()> {
    pub fn from_pair(pair: Pair<Rule>, file: &str) -> Str<()> {
        assert_eq!(pair.as_rule(), Rule::string);

        let (line, col) = pair.line_col();
        let raw = pair.into_inner().next().unwrap().as_str();

        let Some(value) = unescape(raw) else {
            error!("Invalid escape sequence in string literal \"{raw}\" at {line}:{col}");
            std::process::exit(-1);
        };

        Str {
            value,
            position: (file.to_owned(), line, col),
            scope: (),
        }
    }
}
