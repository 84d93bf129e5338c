mod common;

use common::compile;

#[test]
fn redefinition_in_the_same_scope_fails() {
    let error = compile("var x: u8\nvar x: u8").unwrap_err();
    assert!(error.to_string().contains("Redefinition of symbol 'x'"));

    let error = compile("func f(a: u8, a: u8) -> void {\n}").unwrap_err();
    assert!(error.to_string().contains("Redefinition of symbol 'a'"));
}

#[test]
fn inner_scopes_may_shadow_outer_names() {
    assert!(compile("var x: u8 = 1\nfunc f() -> void {\nvar x: u8 = 2\n}").is_ok());
}

#[test]
fn lookups_walk_the_scope_chain() {
    assert!(compile("var x: u8 = 1\nfunc f() -> void {\nvar y: u8 = x\n}").is_ok());
}

#[test]
fn undeclared_identifiers_are_rejected() {
    let error = compile("var y: u8 = x").unwrap_err();
    assert!(error.to_string().contains("Symbol 'x' not declared"));
}

#[test]
fn branch_locals_are_invisible_outside_their_branch() {
    let error = compile(
        "func main() -> void {\nvar c: u8\nif c {\nvar inner: u8 = 1\n}\nvar y: u8 = inner\n}",
    )
    .unwrap_err();
    assert!(error.to_string().contains("Symbol 'inner' not declared"));
}

#[test]
fn function_names_are_not_values() {
    let error = compile("func f() -> void {\n}\nvar x: u8 = f").unwrap_err();
    assert!(error.to_string().contains("Symbol 'f' is not a variable"));
}

#[test]
fn a_variable_initializer_may_reference_earlier_globals() {
    assert!(compile("var a: u8 = 1\nvar b: u8 = a").is_ok());
}

#[test]
fn globals_resolve_even_before_their_definition() {
    // the check pass runs after the whole declaration pass, so a top level
    // initializer may name a global that is declared further down (its slot
    // is simply still uninitialized at that point)
    assert!(compile("var b: u8 = a\nvar a: u8 = 1").is_ok());
}
