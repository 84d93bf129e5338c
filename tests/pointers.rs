mod common;

use common::{compile, emitted};

#[test]
fn deref_round_trip() {
    let lines = emitted("var p: *u8\nvar y: u8 = *p");

    // materialize p's address, load p's value, load through it, store to y
    assert_eq!(
        lines,
        vec![
            "ldi r2, #191",
            "mld r2, r2, #0",
            "mld r2, r2, #0",
            "ldi r3, #190",
            "mst r3, #0, r2",
        ]
    );
}

#[test]
fn deref_requires_a_pointer() {
    let error = compile("var x: u8 = 1\nvar y: u8 = *x").unwrap_err();
    assert!(error.to_string().contains("Cannot dereference"));
}

#[test]
fn deref_yields_the_pointee_type() {
    assert!(compile("var p: *char\nvar c: char = *p").is_ok());
    assert!(compile("var p: *char\nvar c: u8 = *p").is_err());
}

#[test]
fn nested_deref_loads_through_every_level() {
    let lines = emitted("var p: **u8\nvar y: u8 = **p");

    assert_eq!(
        lines,
        vec![
            "ldi r2, #191",
            "mld r2, r2, #0",
            "mld r2, r2, #0",
            "mld r2, r2, #0",
            "ldi r3, #190",
            "mst r3, #0, r2",
        ]
    );
}
