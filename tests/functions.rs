mod common;

use common::{compile, emitted};

#[test]
fn call_with_two_args_follows_the_convention() {
    let lines = emitted("func add(a: u8, b: u8) -> u8 {\na == b\n}\nvar r: bool = add(1, 2)");

    assert_eq!(lines[0], ".user_add");

    // parameters are frame slots 0 and 1
    common::assert_sequence(&lines, &["mld r3, r7, #0", "mld r4, r7, #1", "cmp r3, r4"]);

    // the call site: save the base pointer, open the frame, check for
    // overflow, store the saved base and both arguments, call, restore
    let start = lines.iter().position(|line| line == "mov r2, r7").unwrap();
    let call: Vec<&str> = lines[start..].iter().map(String::as_str).collect();
    assert_eq!(
        call,
        vec![
            "mov r2, r7",
            "mov r7, r6",
            "adi r6, #-3",
            "cmp r6, #192",
            "jmp less .batc_stack_overflow",
            "mst r6, #2, r2",
            "ldi r3, #1",
            "mst r6, #0, r3",
            "ldi r3, #2",
            "mst r6, #1, r3",
            "cal .user_add",
            "mld r7, r6, #2",
            "adi r6, #3",
        ]
    );
}

#[test]
fn argument_slots_are_filled_in_source_order() {
    let lines = emitted(
        "func f(a: u8, b: u8, c: u8) -> void {\n}\nfunc main() -> void {\nf(7, 8, 9)\n}",
    );

    common::assert_sequence(
        &lines,
        &[
            "adi r6, #-4",
            "mst r6, #3, r3",
            "ldi r4, #7",
            "mst r6, #0, r4",
            "ldi r4, #8",
            "mst r6, #1, r4",
            "ldi r4, #9",
            "mst r6, #2, r4",
            "cal .user_f",
            "adi r6, #4",
        ],
    );
}

#[test]
fn arity_mismatch_is_rejected() {
    let error = compile("func f(a: u8) -> void {\n}\nfunc main() -> void {\nf(1, 2)\n}")
        .unwrap_err();
    assert!(error.to_string().contains("expects 1 arguments, got 2"));
}

#[test]
fn argument_types_must_coerce() {
    let error = compile("func f(a: i8) -> void {\n}\nfunc main() -> void {\nf(200)\n}")
        .unwrap_err();
    assert!(error.to_string().contains("Cannot pass argument"));
}

#[test]
fn calling_an_undeclared_function_fails() {
    let error = compile("func main() -> void {\nmissing()\n}").unwrap_err();
    assert!(error.to_string().contains("Function 'missing' not declared"));
}

#[test]
fn calling_a_variable_fails() {
    let error = compile("var x: u8\nfunc main() -> void {\nx()\n}").unwrap_err();
    assert!(error.to_string().contains("'x' is not a function"));
}

#[test]
fn function_redefinition_is_rejected() {
    let error = compile("func f() -> void {\n}\nfunc f() -> void {\n}").unwrap_err();
    assert!(error.to_string().contains("Redefinition of symbol 'f'"));
}

#[test]
fn locals_are_addressed_through_the_base_pointer() {
    let lines = emitted("func f(a: u8) -> void {\nvar b: u8 = a\n}");

    common::assert_sequence(&lines, &[".user_f", "mld r2, r7, #0", "mst r7, #1, r2"]);
}

#[test]
fn register_pressure_is_an_error() {
    // every active call site holds the caller's base pointer in a register,
    // so deeply nested calls exhaust the pool (there is no spilling)
    let source = "func h(a: u8) -> u8 {\n}\n\
                  func g(a: u8) -> u8 {\n}\n\
                  func f(a: u8) -> u8 {\n}\n\
                  func main() -> void {\nf(g(h(1)))\n}";

    let error = compile(source).unwrap_err();
    assert!(error.to_string().contains("Out of registers"));
}
