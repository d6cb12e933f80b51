use nomen_ir::{SharedInterner, Span};
use pretty_assertions::assert_eq;

use crate::{Decl, Import, TranslationUnit, ValueKind};

use super::*;

fn session() -> Session {
    Session::new(SharedInterner::new())
}

fn value(s: &mut Session, name: &str) -> DeclId {
    let name = s.intern(name);
    s.alloc_decl(Decl::value(name, ValueKind::Func, Idx::UNIT, Span::DUMMY))
}

fn type_decl(s: &mut Session, owner: &str, name: &str) -> DeclId {
    let owner = s.intern(owner);
    let name = s.intern(name);
    let ty = s.types_mut().nominal(owner, name);
    s.alloc_decl(Decl::type_decl(name, ty, Span::DUMMY))
}

fn unit(s: &mut Session, name: &str, items: Vec<DeclId>, imports: Vec<Import>) -> ModuleId {
    let name = s.intern(name);
    s.add_translation_unit(
        TranslationUnit::new(name)
            .with_items(items)
            .with_imports(imports),
    )
}

#[test]
fn local_values_shadow_imports() {
    let mut s = session();
    let imported = value(&mut s, "x");
    let a = unit(&mut s, "A", vec![imported], vec![]);
    let local = value(&mut s, "x");
    let main = unit(&mut s, "Main", vec![local], vec![Import::whole(a)]);

    let x = s.intern("x");
    assert_eq!(s.lookup_global_value(main, x, LookupKind::Unqualified), vec![local]);
}

#[test]
fn first_import_wins() {
    let mut s = session();
    let a_first = value(&mut s, "x");
    let a_second = value(&mut s, "x");
    let a = unit(&mut s, "A", vec![a_first, a_second], vec![]);
    let b_x = value(&mut s, "x");
    let b_t = type_decl(&mut s, "B", "T");
    let b = unit(&mut s, "B", vec![b_x, b_t], vec![]);
    let a_t = type_decl(&mut s, "A2", "T");
    let a2 = unit(&mut s, "A2", vec![a_t], vec![]);
    let main = unit(
        &mut s,
        "Main",
        vec![],
        vec![Import::whole(a), Import::whole(b), Import::whole(a2)],
    );

    let x = s.intern("x");
    let t = s.intern("T");
    assert_eq!(
        s.lookup_global_value(main, x, LookupKind::Unqualified),
        vec![a_first, a_second]
    );
    assert_eq!(s.lookup_global_type(main, t, LookupKind::Unqualified), Some(b_t));
}

#[test]
fn later_import_answers_when_earlier_misses() {
    let mut s = session();
    let a = unit(&mut s, "A", vec![], vec![]);
    let y = value(&mut s, "y");
    let b = unit(&mut s, "B", vec![y], vec![]);
    let main = unit(&mut s, "Main", vec![], vec![Import::whole(a), Import::whole(b)]);

    let name = s.intern("y");
    assert_eq!(s.lookup_global_value(main, name, LookupKind::Unqualified), vec![y]);
}

#[test]
fn imports_are_followed_one_level_only() {
    let mut s = session();
    let deep = value(&mut s, "deep");
    let c = unit(&mut s, "C", vec![deep], vec![]);
    let b = unit(&mut s, "B", vec![], vec![Import::whole(c)]);
    let main = unit(&mut s, "Main", vec![], vec![Import::whole(b)]);

    let name = s.intern("deep");
    assert!(s.lookup_global_value(main, name, LookupKind::Unqualified).is_empty());
    assert_eq!(s.lookup_global_value(b, name, LookupKind::Unqualified), vec![deep]);
}

#[test]
fn scoped_import_admits_only_its_symbol() {
    let mut s = session();
    let foo = type_decl(&mut s, "N", "Foo");
    let bar = type_decl(&mut s, "N", "Bar");
    let n = unit(&mut s, "N", vec![foo, bar], vec![]);
    let foo_name = s.intern("Foo");
    let main = unit(
        &mut s,
        "Main",
        vec![],
        vec![Import::scoped(n, AccessPath::single(foo_name, Span::new(10, 13)))],
    );

    let bar_name = s.intern("Bar");
    assert_eq!(s.lookup_global_type(main, foo_name, LookupKind::Unqualified), Some(foo));
    assert_eq!(s.lookup_global_type(main, bar_name, LookupKind::Unqualified), None);
}

#[test]
fn builtins_are_reached_through_qualified_imports() {
    let mut s = session();
    let builtin_name = s.intern("Builtin");
    let builtin = s.add_builtin_module(builtin_name);
    let main = unit(&mut s, "Main", vec![], vec![Import::whole(builtin)]);
    let int64 = s.intern("Int64");
    let add = s.intern("add_Int64");

    assert_eq!(s.lookup_global_type(main, int64, LookupKind::Unqualified), None);
    assert!(s.lookup_global_value(main, add, LookupKind::Unqualified).is_empty());

    let ty = s.lookup_global_type(main, int64, LookupKind::Qualified);
    assert!(ty.is_some());
    assert_eq!(s.lookup_global_value(main, add, LookupKind::Qualified).len(), 1);
    assert_eq!(s.lookup_global_type(builtin, int64, LookupKind::Qualified), ty);
}

#[test]
fn global_value_into_fills_buffer() {
    let mut s = session();
    let f = value(&mut s, "f");
    let main = unit(&mut s, "Main", vec![f], vec![]);
    let name = s.intern("f");

    let mut result = Vec::new();
    s.lookup_global_value_into(main, name, LookupKind::Unqualified, &mut result);
    assert_eq!(result, vec![f]);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "empty result buffer")]
fn global_value_into_rejects_dirty_buffer() {
    let mut s = session();
    let main = unit(&mut s, "Main", vec![], vec![]);
    let name = s.intern("f");

    let mut result = vec![DeclId::from_raw(0)];
    s.lookup_global_value_into(main, name, LookupKind::Unqualified, &mut result);
}

// Extensions

struct Extended {
    session: Session,
    int: Idx,
    meters: Idx,
}

fn extended() -> Extended {
    let mut session = session();
    let owner = session.intern("Main");
    let int_name = session.intern("Int");
    let meters_name = session.intern("Meters");
    let int = session.types_mut().nominal(owner, int_name);
    let meters = session.types_mut().alias(meters_name, int);
    Extended {
        session,
        int,
        meters,
    }
}

fn extension(s: &mut Session, ty: Idx, members: Vec<DeclId>) -> DeclId {
    s.alloc_decl(Decl::extension(ty, members, Span::DUMMY))
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "empty result buffer")]
fn global_extension_methods_into_rejects_dirty_buffer() {
    let Extended { session: mut s, int, .. } = extended();
    let main = unit(&mut s, "Main", vec![], vec![]);
    let name = s.intern("double");

    let mut result = vec![DeclId::from_raw(0)];
    s.lookup_global_extension_methods_into(main, int, name, &mut result);
}

#[test]
fn all_local_extensions_contribute() {
    let Extended {
        session: mut s,
        int,
        meters,
    } = extended();
    let first = value(&mut s, "double");
    let second = value(&mut s, "double");
    let other = value(&mut s, "half");
    let on_int = extension(&mut s, int, vec![first, other]);
    let on_meters = extension(&mut s, meters, vec![second]);
    let main = unit(&mut s, "Main", vec![on_int, on_meters], vec![]);

    let double = s.intern("double");
    assert_eq!(
        s.lookup_global_extension_methods(main, int, double),
        vec![first, second]
    );
}

#[test]
fn local_extension_members_shadow_imports() {
    let Extended { session: mut s, int, .. } = extended();
    let imported = value(&mut s, "double");
    let imported_ext = extension(&mut s, int, vec![imported]);
    let a = unit(&mut s, "A", vec![imported_ext], vec![]);
    let local = value(&mut s, "double");
    let local_ext = extension(&mut s, int, vec![local]);
    let main = unit(&mut s, "Main", vec![local_ext], vec![Import::whole(a)]);

    let double = s.intern("double");
    assert_eq!(s.lookup_global_extension_methods(main, int, double), vec![local]);
}

#[test]
fn first_import_with_extension_members_wins() {
    let Extended { session: mut s, int, meters } = extended();
    let unrelated = value(&mut s, "triple");
    let unrelated_ext = extension(&mut s, int, vec![unrelated]);
    let a = unit(&mut s, "A", vec![unrelated_ext], vec![]);
    let from_b = value(&mut s, "double");
    let b_ext = extension(&mut s, meters, vec![from_b]);
    let b = unit(&mut s, "B", vec![b_ext], vec![]);
    let from_c = value(&mut s, "double");
    let c_ext = extension(&mut s, int, vec![from_c]);
    let c = unit(&mut s, "C", vec![c_ext], vec![]);
    let main = unit(
        &mut s,
        "Main",
        vec![],
        vec![Import::whole(a), Import::whole(b), Import::whole(c)],
    );

    let double = s.intern("double");
    assert_eq!(s.lookup_global_extension_methods(main, int, double), vec![from_b]);
}

#[test]
fn access_paths_do_not_filter_extension_members() {
    let Extended { session: mut s, int, .. } = extended();
    let member = value(&mut s, "double");
    let ext = extension(&mut s, int, vec![member]);
    let a = unit(&mut s, "A", vec![ext], vec![]);
    let unrelated = s.intern("Unrelated");
    let main = unit(
        &mut s,
        "Main",
        vec![],
        vec![Import::scoped(a, AccessPath::single(unrelated, Span::DUMMY))],
    );

    let double = s.intern("double");
    assert_eq!(s.lookup_global_extension_methods(main, int, double), vec![member]);
}

#[test]
fn nested_types_are_not_extension_methods() {
    let Extended { session: mut s, int, .. } = extended();
    let nested = type_decl(&mut s, "Main", "Unit");
    let ext = extension(&mut s, int, vec![nested]);
    let main = unit(&mut s, "Main", vec![ext], vec![]);

    let name = s.intern("Unit");
    assert!(s.lookup_global_extension_methods(main, int, name).is_empty());
}

#[test]
fn builtin_module_has_no_extension_methods() {
    let Extended { session: mut s, int, .. } = extended();
    let builtin_name = s.intern("Builtin");
    let builtin = s.add_builtin_module(builtin_name);
    let name = s.intern("add_Int64");

    let mut result = Vec::new();
    s.lookup_global_extension_methods_into(builtin, int, name, &mut result);
    assert!(result.is_empty());
}
