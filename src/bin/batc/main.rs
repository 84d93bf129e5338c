//! # batc
//!
//! This binary is the compiler of Bat. It combines parser, type checker, and
//! code generator into a single application.
mod cli;

use cli::*;

use std::{error::Error, fs};

use batc::{
    ast::{Ast, BatParser},
    compiler::Compiler,
    typechecker::Typechecker,
};
use log::{error, info};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let source = fs::read_to_string(&args.file)?;
    let file_name = args.file.to_string_lossy();

    let pairs = BatParser::parse_program(&source);
    let ast = Ast::from_program(pairs, &file_name);

    if args.dump_parsed {
        info!("Parsed AST:\n{ast:#?}");
    }

    let (ast, scopes) = match Typechecker::from_ast(ast).check() {
        Ok(checked) => checked,
        Err(type_error) => {
            error!("{type_error}");
            std::process::exit(-1);
        }
    };

    let assembly = match Compiler::from_ast(ast, scopes).compile_program() {
        Ok(assembly) => assembly,
        Err(compile_error) => {
            error!("{compile_error}");
            std::process::exit(-1);
        }
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.file.with_extension("asm"));

    info!("Writing assembly to '{}'", output.to_string_lossy());
    fs::write(&output, assembly)?;

    Ok(())
}
