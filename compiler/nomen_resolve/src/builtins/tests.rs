use std::cell::Cell;

use nomen_ir::{SharedInterner, StringInterner};
use nomen_types::Pool;
use pretty_assertions::assert_eq;

use super::*;
use crate::{DeclArena, ValueKind};

/// Synthesizer that knows one type (`Word`) and one value (`zero`) and
/// counts how often it is asked.
#[derive(Default)]
struct CountingSynth {
    type_calls: Cell<usize>,
    value_calls: Cell<usize>,
}

impl SynthesizeBuiltin for CountingSynth {
    fn builtin_type(&self, name: Name, cx: &mut SynthCx<'_>) -> Option<Idx> {
        self.type_calls.set(self.type_calls.get() + 1);
        (cx.interner.lookup(name) == "Word").then(|| cx.types.builtin(name))
    }

    fn builtin_value(&self, name: Name, cx: &mut SynthCx<'_>) -> Option<Decl> {
        self.value_calls.set(self.value_calls.get() + 1);
        (cx.interner.lookup(name) == "zero")
            .then(|| Decl::value(name, ValueKind::Let, Idx::UNIT, Span::DUMMY))
    }
}

struct Fixture {
    interner: SharedInterner,
    types: Pool,
    decls: DeclArena,
    synth: CountingSynth,
    cache: BuiltinCache,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            interner: SharedInterner::new(),
            types: Pool::new(),
            decls: DeclArena::new(),
            synth: CountingSynth::default(),
            cache: BuiltinCache::default(),
        }
    }

    fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    fn lookup_type(&mut self, name: Name, kind: LookupKind) -> Option<DeclId> {
        let interner: &StringInterner = &self.interner;
        let mut cx = LookupCx {
            interner,
            types: &mut self.types,
            decls: &mut self.decls,
            builtins: &self.synth,
        };
        self.cache.lookup_type(name, kind, &mut cx)
    }

    fn lookup_value(&mut self, name: Name, kind: LookupKind) -> Vec<DeclId> {
        let interner: &StringInterner = &self.interner;
        let mut cx = LookupCx {
            interner,
            types: &mut self.types,
            decls: &mut self.decls,
            builtins: &self.synth,
        };
        let mut result = Vec::new();
        self.cache.lookup_value(name, kind, &mut cx, &mut result);
        result
    }
}

#[test]
fn unqualified_lookups_never_synthesize() {
    let mut fx = Fixture::new();
    let word = fx.name("Word");
    let zero = fx.name("zero");

    assert_eq!(fx.lookup_type(word, LookupKind::Unqualified), None);
    assert!(fx.lookup_value(zero, LookupKind::Unqualified).is_empty());
    assert_eq!(fx.synth.type_calls.get(), 0);
    assert_eq!(fx.synth.value_calls.get(), 0);
    assert!(fx.decls.is_empty());
}

#[test]
fn synthesized_type_is_memoized() {
    let mut fx = Fixture::new();
    let word = fx.name("Word");

    let first = fx.lookup_type(word, LookupKind::Qualified);
    let second = fx.lookup_type(word, LookupKind::Qualified);

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(fx.synth.type_calls.get(), 1);
    assert_eq!(fx.decls.len(), 1);
    assert_eq!(fx.cache.len(), 1);

    let decl = &fx.decls[first.unwrap_or_else(|| panic!("Word should resolve"))];
    assert_eq!(decl.name, word);
    assert!(decl.span.is_dummy());
    assert!(decl.is_type());
}

#[test]
fn synthesized_value_is_appended_once() {
    let mut fx = Fixture::new();
    let zero = fx.name("zero");

    let first = fx.lookup_value(zero, LookupKind::Qualified);
    let second = fx.lookup_value(zero, LookupKind::Qualified);

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
    assert_eq!(fx.synth.value_calls.get(), 1);
}

#[test]
fn misses_are_not_memoized() {
    let mut fx = Fixture::new();
    let missing = fx.name("Missing");

    assert_eq!(fx.lookup_type(missing, LookupKind::Qualified), None);
    assert_eq!(fx.lookup_type(missing, LookupKind::Qualified), None);
    assert_eq!(fx.synth.type_calls.get(), 2);
    assert_eq!(fx.cache.len(), 0);
}

#[test]
fn types_and_values_share_one_table() {
    let mut fx = Fixture::new();
    let word = fx.name("Word");
    let zero = fx.name("zero");

    assert!(fx.lookup_type(word, LookupKind::Qualified).is_some());
    // `Word` is memoized as a type, so the value side never synthesizes it.
    assert!(fx.lookup_value(word, LookupKind::Qualified).is_empty());
    assert_eq!(fx.synth.value_calls.get(), 0);

    assert_eq!(fx.lookup_value(zero, LookupKind::Qualified).len(), 1);
    assert_eq!(fx.lookup_type(zero, LookupKind::Qualified), None);
    assert_eq!(fx.synth.type_calls.get(), 1);
}
