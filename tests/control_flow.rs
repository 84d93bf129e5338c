mod common;

use common::emitted;

#[test]
fn if_without_else_jumps_straight_to_the_end() {
    let lines = emitted("func main() -> void {\nvar x: u8\nif x {\nvar y: u8 = 1\n}\n}");

    common::assert_sequence(
        &lines,
        &["mld r2, r7, #0", "cmp r2, #0", "jmp eq .L0_end", ".L0_end"],
    );
    assert!(!lines.iter().any(|line| line.contains("_else")));
}

#[test]
fn if_else_emits_two_arms_and_one_end() {
    let lines = emitted(
        "func main() -> void {\nvar x: u8\nif x {\nvar a: u8 = 1\n} else {\nvar b: u8 = 2\n}\n}",
    );

    common::assert_sequence(
        &lines,
        &[
            "cmp r2, #0",
            "jmp eq .L0_else",
            "mst r7, #1, r2",
            "jmp .L0_end",
            ".L0_else",
            "mst r7, #1, r2",
            ".L0_end",
        ],
    );
}

#[test]
fn else_if_chains_share_a_single_end_label() {
    let lines = emitted(
        "func main() -> void {\nvar x: u8\nif x == 0 {\n} else if x == 1 {\n} else {\n}\n}",
    );

    // two conditional tests with distinct else labels
    assert!(lines.contains(&"jmp eq .L0_else".to_owned()));
    assert!(lines.contains(&"jmp eq .L2_else".to_owned()));

    // both taken arms leave through the same end label, emitted once
    let end_jumps = lines.iter().filter(|line| *line == "jmp .L0_end").count();
    assert_eq!(end_jumps, 2);
    let end_labels = lines.iter().filter(|line| *line == ".L0_end").count();
    assert_eq!(end_labels, 1);
    assert!(!lines.contains(&".L2_end".to_owned()));
}

#[test]
fn condition_type_is_unrestricted() {
    // the machine compares the condition value against zero, any type goes
    assert!(common::compile("func main() -> void {\nvar c: char = 'x'\nif c {\n}\n}").is_ok());
}

#[test]
fn branch_locals_do_not_alias_enclosing_slots() {
    let lines = emitted("func main() -> void {\nvar a: u8 = 1\nif a {\nvar b: u8 = 2\n}\n}");

    // a sits at r7+0, b must take the next slot
    common::assert_sequence(&lines, &["mst r7, #0, r2", "mst r7, #1, r2"]);
}

#[test]
fn bare_blocks_open_a_fresh_scope() {
    assert!(
        common::compile("func main() -> void {\nvar x: u8 = 1\n{\nvar x: u8 = 2\n}\n}").is_ok()
    );
}
