#![allow(dead_code)]

use std::error::Error;

use batc::{
    ast::{Ast, BatParser},
    compiler::Compiler,
    typechecker::Typechecker,
};

pub fn parse(source: &str) -> Ast<()> {
    Ast::from_program(BatParser::parse_program(source), "test.bat")
}

/// Run the whole pipeline on `source` and return the assembly text.
pub fn compile(source: &str) -> Result<String, Box<dyn Error>> {
    let (ast, scopes) = Typechecker::from_ast(parse(source)).check()?;
    let assembly = Compiler::from_ast(ast, scopes).compile_program()?;
    Ok(assembly)
}

/// The instructions emitted for `source`, without the runtime preamble.
pub fn emitted(source: &str) -> Vec<String> {
    let assembly = compile(source).unwrap();
    let body = assembly
        .split(".batc_start\n")
        .nth(1)
        .expect("output misses the runtime preamble");
    body.lines().map(|line| line.to_owned()).collect()
}

/// Assert that `lines` contains `expected` as a subsequence, in order.
pub fn assert_sequence(lines: &[String], expected: &[&str]) {
    let mut lines = lines.iter();

    for needle in expected {
        assert!(
            lines.any(|line| line == needle),
            "did not find '{needle}' (in order) in:\n{}",
            lines.as_slice().join("\n")
        );
    }
}
