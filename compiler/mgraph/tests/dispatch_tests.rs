//! End-to-end dispatch resolution through the public API.
//!
//! Each test builds a small hierarchy with `HierarchyBuilder`, fabricates the
//! graph of one type and checks what `resolve`, `resolve_default` and
//! `invokable_methods` report.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use mgraph::{
    Candidate, DefaultScope, DescriptorKeyFactory, Fabricator, FabricatorConfig, GraphError,
    MethodGraph, NodeSort, PackageScopedKeyFactory, Resolution, SignatureKey,
};
use mgraph_ir::{
    HierarchyBuilder, MethodFlags, SharedInterner, TypeId, TypeTable, Visibility,
};
use pretty_assertions::assert_eq;

struct World {
    table: TypeTable,
    interner: SharedInterner,
}

impl World {
    fn new(h: HierarchyBuilder) -> Self {
        let (table, interner) = h.finish().expect("valid hierarchy");
        World { table, interner }
    }

    fn graph(&self, ty: TypeId) -> MethodGraph {
        Fabricator::new().fabricate(&self.table, ty).expect("graph")
    }

    fn key(&self, name: &str, params: &[TypeId]) -> SignatureKey {
        SignatureKey::new(self.interner.intern(name), params.iter().copied())
    }

    fn run(&self) -> SignatureKey {
        self.key("run", &[])
    }
}

fn winner(resolution: &Resolution) -> Option<TypeId> {
    resolution.as_method().map(Candidate::declaring_type)
}

// -- Precedence --

#[test]
fn class_beats_interface_default() {
    let mut h = HierarchyBuilder::new();
    let i = h.interface("p.I").default_method("run", &[]).build().unwrap();
    let c = h.class("p.C").concrete("run", &[]).build().unwrap();
    let d = h.class("p.D").extends(c).implements(i).build().unwrap();
    let w = World::new(h);

    assert_eq!(winner(&w.graph(d).resolve(&w.run())), Some(c));
}

#[test]
fn sub_interface_beats_super_interface() {
    let mut h = HierarchyBuilder::new();
    let a = h.interface("p.A").default_method("run", &[]).build().unwrap();
    let b = h
        .interface("p.B")
        .implements(a)
        .default_method("run", &[])
        .build()
        .unwrap();
    let c = h.class("p.C").implements(a).implements(b).build().unwrap();
    let w = World::new(h);

    assert_eq!(winner(&w.graph(c).resolve(&w.run())), Some(b));
}

#[test]
fn true_diamond_is_illegal_until_overridden() {
    let mut h = HierarchyBuilder::new();
    let a = h.interface("p.A").default_method("run", &[]).build().unwrap();
    let b = h.interface("p.B").default_method("run", &[]).build().unwrap();
    let c = h.class("p.C").implements(a).implements(b).build().unwrap();
    let d = h
        .class("p.D")
        .implements(a)
        .implements(b)
        .concrete("run", &[])
        .build()
        .unwrap();
    let w = World::new(h);

    let graph = w.graph(c);
    assert_eq!(graph.resolve(&w.run()), Resolution::Illegal);
    assert_eq!(
        graph.locate(&w.run()).map(|n| n.sort()),
        Some(NodeSort::Ambiguous)
    );
    assert!(graph.invokable_methods().is_empty());

    assert_eq!(winner(&w.graph(d).resolve(&w.run())), Some(d));
}

#[test]
fn own_abstract_declaration_wins() {
    let mut h = HierarchyBuilder::new();
    let i = h.interface("p.I").default_method("run", &[]).build().unwrap();
    let c = h
        .class("p.C")
        .implements(i)
        .abstract_method("run", &[])
        .build()
        .unwrap();
    let w = World::new(h);

    let graph = w.graph(c);
    assert_eq!(graph.resolve(&w.run()), Resolution::Illegal);
    let node = graph.locate(&w.run()).unwrap();
    assert_eq!(node.sort(), NodeSort::Abstract);
    assert_eq!(node.representative().map(Candidate::declaring_type), Some(c));
}

#[test]
fn inherited_abstract_class_method_blocks_interface_default() {
    let mut h = HierarchyBuilder::new();
    let i = h.interface("p.I").default_method("run", &[]).build().unwrap();
    let base = h
        .class("p.Base")
        .abstract_method("run", &[])
        .build()
        .unwrap();
    let c = h.class("p.C").extends(base).implements(i).build().unwrap();
    let w = World::new(h);

    let graph = w.graph(c);
    assert_eq!(graph.resolve(&w.run()), Resolution::Illegal);
    assert_eq!(
        graph.resolve_default(i, &w.run()).map(|r| winner(&r)),
        Ok(Some(i))
    );
}

#[test]
fn ancestor_body_fills_abstract_redeclaration() {
    let mut h = HierarchyBuilder::new();
    let a = h.class("p.A").concrete("run", &[]).build().unwrap();
    let b = h
        .class("p.B")
        .extends(a)
        .abstract_method("run", &[])
        .build()
        .unwrap();
    let c = h.class("p.C").extends(b).build().unwrap();
    let w = World::new(h);

    let graph = w.graph(c);
    assert_eq!(winner(&graph.resolve(&w.run())), Some(a));
    assert_eq!(graph.invokable_methods().len(), 1);

    let own = w.graph(b);
    assert_eq!(winner(&own.resolve(&w.run())), None);
    assert_eq!(own.locate(&w.run()).map(|n| n.sort()), Some(NodeSort::Abstract));
}

// -- Default tables --

#[test]
fn resolve_default_ignores_siblings_and_class() {
    let mut h = HierarchyBuilder::new();
    let x = h.interface("p.X").default_method("run", &[]).build().unwrap();
    let y = h.interface("p.Y").default_method("run", &[]).build().unwrap();
    let c = h
        .class("p.C")
        .implements(x)
        .implements(y)
        .concrete("run", &[])
        .build()
        .unwrap();
    let w = World::new(h);

    let graph = w.graph(c);
    assert_eq!(winner(&graph.resolve(&w.run())), Some(c));
    assert_eq!(graph.resolve_default(x, &w.run()).map(|r| winner(&r)), Ok(Some(x)));
    assert_eq!(graph.resolve_default(y, &w.run()).map(|r| winner(&r)), Ok(Some(y)));
}

#[test]
fn resolve_default_on_unimplemented_interface_fails_fast() {
    let mut h = HierarchyBuilder::new();
    let x = h.interface("p.X").default_method("run", &[]).build().unwrap();
    let z = h.interface("p.Z").default_method("run", &[]).build().unwrap();
    let c = h.class("p.C").implements(x).build().unwrap();
    let w = World::new(h);

    let graph = w.graph(c);
    assert_eq!(
        graph.resolve_default(z, &w.run()),
        Err(GraphError::NotADefaultInterface {
            target: c,
            interface: z
        })
    );
    assert_eq!(
        graph.resolve_default(x, &w.key("missing", &[])),
        Ok(Resolution::Illegal)
    );
}

#[test]
fn direct_scope_rejects_inherited_interfaces() {
    let mut h = HierarchyBuilder::new();
    let top = h.interface("p.Top").default_method("run", &[]).build().unwrap();
    let mid = h.interface("p.Mid").implements(top).build().unwrap();
    let c = h.class("p.C").implements(mid).build().unwrap();
    let w = World::new(h);

    let graph = Fabricator::new()
        .with_config(FabricatorConfig::new().with_default_scope(DefaultScope::Direct))
        .fabricate(&w.table, c)
        .unwrap();
    assert_eq!(graph.resolve_default(mid, &w.run()).map(|r| winner(&r)), Ok(Some(top)));
    assert!(matches!(
        graph.resolve_default(top, &w.run()),
        Err(GraphError::NotADefaultInterface { .. })
    ));
}

// -- Invokable methods --

#[test]
fn invokable_methods_in_discovery_order() {
    let mut h = HierarchyBuilder::new();
    let i = h
        .interface("p.I")
        .default_method("fromI", &[])
        .abstract_method("pending", &[])
        .build()
        .unwrap();
    let j = h.interface("p.J").default_method("fromI", &[]).build().unwrap();
    let base = h
        .class("p.Base")
        .concrete("fromBase", &[])
        .concrete("own", &[])
        .build()
        .unwrap();
    let c = h
        .class("p.C")
        .extends(base)
        .implements(i)
        .implements(j)
        .concrete("own", &[])
        .concrete("own", &[TypeId::INT])
        .build()
        .unwrap();
    let w = World::new(h);

    let graph = w.graph(c);
    let names: Vec<&str> = graph
        .invokable_methods()
        .iter()
        .map(|m| w.interner.lookup(m.method().name))
        .collect();
    assert_eq!(names, vec!["own", "own", "fromBase"]);
    assert_eq!(graph.invokable_methods()[1].method().parameters.as_slice(), &[TypeId::INT]);
    assert!(graph
        .invokable_methods()
        .iter()
        .all(|m| m.declaring_type() != i && m.declaring_type() != j));
}

#[test]
fn fabricate_is_deterministic() {
    let mut h = HierarchyBuilder::new();
    let top = h.interface("p.Top").default_method("a", &[]).build().unwrap();
    let left = h
        .interface("p.Left")
        .implements(top)
        .default_method("b", &[])
        .build()
        .unwrap();
    let right = h
        .interface("p.Right")
        .implements(top)
        .default_method("b", &[])
        .default_method("a", &[])
        .build()
        .unwrap();
    let base = h.class("p.Base").concrete("c", &[]).build().unwrap();
    let c = h
        .class("p.C")
        .extends(base)
        .implements(left)
        .implements(right)
        .build()
        .unwrap();
    let w = World::new(h);

    let first = w.graph(c);
    for _ in 0..8 {
        assert_eq!(w.graph(c), first);
    }
    assert_eq!(winner(&first.resolve(&w.key("a", &[]))), Some(right));
    assert_eq!(first.resolve(&w.key("b", &[])), Resolution::Illegal);
}

// -- Key policies --

#[test]
fn descriptor_keys_keep_bridges_apart() {
    let mut h = HierarchyBuilder::new();
    let object = h.class("java.lang.Object").build().unwrap();
    let string = h.class("java.lang.String").extends(object).build().unwrap();
    let c = h
        .class("p.C")
        .extends(object)
        .method(
            "get",
            &[],
            object,
            MethodFlags::BRIDGE | MethodFlags::SYNTHETIC,
            Visibility::Public,
        )
        .method("get", &[], string, MethodFlags::empty(), Visibility::Public)
        .build()
        .unwrap();
    let w = World::new(h);

    let java = w.graph(c);
    let get = w.key("get", &[]);
    let node = java.locate(&get).unwrap();
    assert_eq!(node.method_types().len(), 2);
    assert!(!node.is_bridge());

    let descriptor = Fabricator::with_keys(DescriptorKeyFactory)
        .fabricate(&w.table, c)
        .unwrap();
    assert_eq!(descriptor.nodes().len(), 2);
    assert!(descriptor.nodes().iter().any(|n| n.is_bridge()));
    assert_eq!(descriptor.resolve(&get), Resolution::Illegal);
}

#[test]
fn package_private_methods_stay_in_their_package() {
    let mut h = HierarchyBuilder::new();
    let base = h
        .class("a.Base")
        .method(
            "hook",
            &[],
            TypeId::VOID,
            MethodFlags::empty(),
            Visibility::PackagePrivate,
        )
        .build()
        .unwrap();
    let sub = h
        .class("b.Sub")
        .extends(base)
        .method(
            "hook",
            &[],
            TypeId::VOID,
            MethodFlags::empty(),
            Visibility::PackagePrivate,
        )
        .build()
        .unwrap();
    let w = World::new(h);

    let java = w.graph(sub);
    assert_eq!(java.nodes().len(), 1);

    let scoped = Fabricator::with_keys(PackageScopedKeyFactory)
        .fabricate(&w.table, sub)
        .unwrap();
    assert_eq!(scoped.nodes().len(), 2);
    assert_eq!(scoped.invokable_methods().len(), 2);
}

// -- Malformed input --

#[test]
fn unknown_type_is_an_error() {
    let mut h = HierarchyBuilder::new();
    h.class("p.C").build().unwrap();
    let w = World::new(h);

    let ghost = TypeId::from_raw(TypeId::FIRST_DYNAMIC + 1000);
    assert_eq!(
        Fabricator::new().fabricate(&w.table, ghost),
        Err(GraphError::UnknownType(ghost))
    );
}

#[test]
fn illegal_resolution_refuses_extraction() {
    let mut h = HierarchyBuilder::new();
    let c = h.class("p.C").build().unwrap();
    let w = World::new(h);

    let resolution = w.graph(c).resolve(&w.run());
    assert!(!resolution.is_resolved());
    assert_eq!(resolution.method(), Err(GraphError::IllegalResolution));
}
