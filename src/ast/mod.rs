//! Module for parsing Bat programs.
//!
//! It contains all structs for the internal representation of Bat (i.e., the AST).
mod block;
mod call;
mod character;
mod deref;
mod equality;
mod expression;
mod func;
mod ident;
mod if_statement;
mod integer;
mod param;
mod parser;
mod statement;
mod str;
mod top_level;
mod type_annotation;
mod types;
mod var;

pub use self::block::*;
pub use self::call::*;
pub use self::character::*;
pub use self::deref::*;
pub use self::equality::*;
pub use self::expression::*;
pub use self::func::*;
pub use self::ident::*;
pub use self::if_statement::*;
pub use self::integer::*;
pub use self::param::*;
pub use self::parser::*;
pub use self::statement::*;
pub use self::str::*;
pub use self::top_level::*;
pub use self::type_annotation::*;
pub use self::types::*;
pub use self::var::*;

use pest::iterators::Pairs;

/// A position within a file (i.e., file name, line, and column).
pub type Position = (String, usize, usize);

/// AST, representing a single Bat program.
///
/// The type parameter is the scope annotation of each node: `()` fresh from
/// the parser, a scope reference once the declaration pass has run.
#[derive(Default, Debug, Clone)]
pub struct Ast<T> {
    top_levels: Vec<TopLevel<T>>,
}

impl Ast<()> {
    /// Create a new AST from the pairs of a parsed program.
    /// Note: This AST is neither scoped nor type-correct by default.
    pub fn from_program(program: Pairs<Rule>, file: &str) -> Ast<()> {
        let mut top_levels = vec![];

        for pair in program {
            if pair.as_rule() != Rule::EOI {
                top_levels.push(TopLevel::from_pair(pair, file));
            }
        }

        Self { top_levels }
    }
}

impl<T> Ast<T>
where
    T: Clone,
{
    pub fn from_top_levels(top_levels: Vec<TopLevel<T>>) -> Ast<T> {
        Self { top_levels }
    }

    pub fn top_levels(&self) -> Vec<TopLevel<T>> {
        self.top_levels.clone()
    }
}
