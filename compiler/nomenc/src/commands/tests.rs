use pretty_assertions::assert_eq;

use super::*;
use crate::load_str;

const APP: &str = r#"
[[module]]
name = "Units"

[[module.decl]]
kind = "type"
name = "Meters"
type = "Builtin.Int64"

[[module.decl]]
kind = "func"
name = "scale"
type = "(Meters) -> Meters"

[[module.decl]]
kind = "extension"
extends = "Meters"
members = [
    { kind = "func", name = "double", type = "() -> Meters" },
    { kind = "func", name = "half", type = "() -> Meters" },
]

[[module]]
name = "Main"
imports = [{ module = "Units" }, { module = "Builtin" }]

[[module.decl]]
kind = "func"
name = "scale"
type = "() -> ()"

[[module.decl]]
kind = "func"
name = "scale"
type = "(Builtin.Int64) -> ()"

[[module.decl]]
kind = "extension"
extends = "Meters"
members = [{ kind = "func", name = "double", type = "() -> Meters" }]
"#;

fn program() -> Program {
    match load_str(APP) {
        Ok(program) => program,
        Err(e) => panic!("manifest should load: {e}"),
    }
}

#[test]
fn value_reports_local_overloads_in_order() {
    let mut program = program();
    let lines = lookup_value(&mut program, "Main", "scale", LookupKind::Unqualified);

    assert_eq!(
        lines.ok(),
        Some(vec![
            "Main.scale : func () -> ()".to_owned(),
            "Main.scale : func (Builtin.Int64) -> ()".to_owned(),
        ])
    );
}

#[test]
fn type_falls_through_to_imports() {
    let mut program = program();
    let lines = lookup_type(&mut program, "Main", "Meters", LookupKind::Unqualified);

    assert_eq!(
        lines.ok(),
        Some(vec!["Units.Meters : type = Builtin.Int64".to_owned()])
    );
}

#[test]
fn builtins_need_a_qualified_lookup() {
    let mut program = program();

    let unqualified = lookup_type(&mut program, "Main", "Int64", LookupKind::Unqualified);
    assert_eq!(unqualified.ok(), Some(vec![]));

    let qualified = lookup_value(&mut program, "Main", "add_Int64", LookupKind::Qualified);
    assert_eq!(
        qualified.ok(),
        Some(vec![
            "Builtin.add_Int64 : func (Builtin.Int64, Builtin.Int64) -> Builtin.Int64".to_owned()
        ])
    );
}

#[test]
fn methods_prefer_local_extensions() {
    let mut program = program();

    let double = lookup_methods(&mut program, "Main", "Meters", "double");
    assert_eq!(
        double.ok(),
        Some(vec!["Main.double : func () -> Meters".to_owned()])
    );

    let half = lookup_methods(&mut program, "Main", "Builtin.Int64", "half");
    assert_eq!(half.ok(), Some(vec!["Units.half : func () -> Meters".to_owned()]));
}

#[test]
fn extensions_lists_local_blocks() {
    let mut program = program();
    let lines = lookup_extensions(&mut program, "Units", "Meters");

    assert_eq!(
        lines.ok(),
        Some(vec!["Units.extension Meters { double, half }".to_owned()])
    );
}

#[test]
fn unknown_module_and_type_are_errors() {
    let mut program = program();

    let missing = lookup_value(&mut program, "Nowhere", "x", LookupKind::Qualified);
    assert!(matches!(missing, Err(CommandError::UnknownModule(name)) if name == "Nowhere"));

    let bad_type = lookup_methods(&mut program, "Main", "Feet", "double");
    let Err(err) = bad_type else {
        panic!("Feet is not a type");
    };
    assert_eq!(err.to_string(), "'Feet' does not name a type visible from 'Main'");
}

#[test]
fn dump_lists_everything() {
    let program = program();
    let lines = dump(&program);

    assert_eq!(lines[0], "module Builtin (builtin, 1 synthesized)");
    assert_eq!(lines[1], "module Units (Parsed)");
    assert!(lines.contains(&"  import Units".to_owned()));
    assert!(lines.contains(&"  Units.scale : func (Meters) -> Meters".to_owned()));
    assert!(lines.contains(&"  Main.extension Meters { double }".to_owned()));
}

const SAME_SPELLING: &str = r#"
[[module]]
name = "A"

[[module.decl]]
kind = "struct"
name = "Point"

[[module.decl]]
kind = "extension"
extends = "Point"
members = [{ kind = "func", name = "norm" }]

[[module]]
name = "B"

[[module.decl]]
kind = "struct"
name = "Point"

[[module]]
name = "Main"
imports = [{ module = "B" }, { module = "A" }]
"#;

#[test]
fn extensions_stay_with_the_module_that_declared_the_type() {
    let mut program = match load_str(SAME_SPELLING) {
        Ok(program) => program,
        Err(e) => panic!("manifest should load: {e}"),
    };

    let point = lookup_type(&mut program, "Main", "Point", LookupKind::Unqualified);
    assert_eq!(point.ok(), Some(vec!["B.Point : type".to_owned()]));

    let through_b = lookup_methods(&mut program, "Main", "Point", "norm");
    assert_eq!(through_b.ok(), Some(vec![]));

    let in_a = lookup_methods(&mut program, "A", "Point", "norm");
    assert_eq!(in_a.ok(), Some(vec!["A.norm : func ()".to_owned()]));
}
