use super::*;

#[test]
fn intern_and_lookup() {
    let interner = StringInterner::new();

    let run = interner.intern("run");
    let call = interner.intern("call");
    let run2 = interner.intern("run");

    assert_eq!(run, run2);
    assert_ne!(run, call);

    assert_eq!(interner.lookup(run), "run");
    assert_eq!(interner.lookup(call), "call");
}

#[test]
fn empty_string_is_name_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn common_names_pre_interned() {
    let interner = StringInterner::new();
    let before = interner.len();

    let to_string = interner.intern("toString");
    assert_eq!(interner.lookup(to_string), "toString");
    assert_eq!(interner.len(), before);
}

#[test]
fn get_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("neverSeen"), None);

    let seen = interner.intern("seen");
    assert_eq!(interner.get("seen"), Some(seen));
}

#[test]
fn foreign_name_lookup_is_placeholder() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "<unknown>");
}

#[test]
fn shared_interner_clones_see_same_table() {
    let interner = SharedInterner::new();
    let interner2 = interner.clone();

    let name = interner.intern("apply");
    assert_eq!(interner2.lookup(name), "apply");
    assert_eq!(interner2.intern("apply"), name);
}

#[test]
fn concurrent_interning_is_consistent() {
    let interner = SharedInterner::new();

    let names: Vec<Name> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let interner = interner.clone();
                scope.spawn(move || interner.intern("contended"))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(Name::EMPTY))
            .collect()
    });

    assert!(names.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(interner.lookup(names[0]), "contended");
}
