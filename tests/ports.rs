mod common;

use common::{compile, emitted};

#[test]
fn write_port_lowers_the_value_and_uses_the_port_immediate() {
    let lines = emitted("func main() -> void {\nwrite_port(5, 0xA5)\n}");

    assert_eq!(lines, vec![".user_main", "ldi r3, #165", "pst r3, #5"]);
}

#[test]
fn write_port_accepts_a_computed_value() {
    let lines = emitted("var x: u8 = 1\nfunc main() -> void {\nwrite_port(2, x)\n}");

    common::assert_sequence(&lines, &["ldi r3, #191", "mld r3, r3, #0", "pst r3, #2"]);
}

#[test]
fn read_port_stores_into_the_destination() {
    let lines = emitted("var x: u8 = read_port(3)");

    assert_eq!(lines, vec!["pld r2, #3", "ldi r3, #191", "mst r3, #0, r2"]);
}

#[test]
fn the_port_must_be_a_literal() {
    let error = compile("func main() -> void {\nvar p: u8 = 1\nwrite_port(p, 2)\n}")
        .unwrap_err();
    assert!(error.to_string().contains("Port argument must be a literal"));

    let error = compile("func main() -> void {\nvar p: u8 = 1\nvar x: u8 = read_port(p)\n}")
        .unwrap_err();
    assert!(error.to_string().contains("Port argument must be a literal"));
}

#[test]
fn builtin_signatures_are_checked() {
    let error = compile("func main() -> void {\nread_port(1, 2)\n}").unwrap_err();
    assert!(error
        .to_string()
        .contains("Function 'read_port' expects 1 arguments, got 2"));

    let error = compile("func main() -> void {\nwrite_port(-1, 1)\n}").unwrap_err();
    assert!(error.to_string().contains("Cannot pass argument"));
}

#[test]
fn builtins_can_not_be_redefined() {
    let error = compile("var write_port: u8").unwrap_err();
    assert!(error.to_string().contains("Redefinition of symbol 'write_port'"));
}
