//! Reconciliation contracts: idempotence, identity-key stability, positional
//! semantics, protocol precedence, and the work-restriction hint.

use perch_dom::{Component, Handler, Mutation, NodeAddress, Props, RenderContext, tags};

/// Opt-in reconciliation traces via RUST_LOG when debugging a failure.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn panel_props() -> Props {
    Props::new()
        .attr("width", 120)
        .style("color", "blue")
        .content("intro")
        .child_set([
            ("head", tags::h1(Props::new().content("Title"))),
            ("body", tags::p(Props::new().content("Body"))),
        ])
}

#[test]
fn test_control_is_idempotent() {
    init_tracing();
    let mut ctx = RenderContext::new();
    let mut root = tags::div(panel_props());
    root.generate(&mut ctx, NodeAddress::root("app"), false, true)
        .unwrap();
    let node = root.node().unwrap();

    root.control(&mut ctx, panel_props()).unwrap();
    let first_pass = ctx.document.take_mutations();
    let before = ctx.document.outer_html(node);

    root.control(&mut ctx, panel_props()).unwrap();
    let second_pass = ctx.document.take_mutations();
    let after = ctx.document.outer_html(node);

    assert!(first_pass.is_empty());
    assert!(second_pass.is_empty());
    assert_eq!(before, after);
}

#[test]
fn test_keyed_reorder_keeps_nodes_in_place() {
    let mut ctx = RenderContext::new();
    let mut root = tags::ul(Props::new().child_set([
        ("a", tags::li(Props::new().content("A"))),
        ("b", tags::li(Props::new().content("B"))),
    ]));
    root.generate(&mut ctx, NodeAddress::root("list"), false, true)
        .unwrap();
    let parent = root.node().unwrap();
    let a_node = root.child_by_key("a").unwrap().node().unwrap();
    let b_node = root.child_by_key("b").unwrap().node().unwrap();
    ctx.document.take_mutations();

    // Same keys, reordered map. No instance is destroyed or recreated and
    // document order stays first-insertion order.
    root.control(
        &mut ctx,
        Props::new().child_set([
            ("b", tags::li(Props::new().content("B"))),
            ("a", tags::li(Props::new().content("A"))),
        ]),
    )
    .unwrap();

    assert!(ctx.document.take_mutations().is_empty());
    assert_eq!(root.child_by_key("a").unwrap().node(), Some(a_node));
    assert_eq!(root.child_by_key("b").unwrap().node(), Some(b_node));
    assert_eq!(
        ctx.document.get(parent).unwrap().children().to_vec(),
        vec![a_node, b_node]
    );
}

#[test]
fn test_keyed_add_inserts_exactly_one_child() {
    let mut ctx = RenderContext::new();
    let mut root = tags::ul(
        Props::new().child_set([("a", tags::li(Props::new().content("A")))]),
    );
    root.generate(&mut ctx, NodeAddress::root("list"), false, true)
        .unwrap();
    let parent = root.node().unwrap();
    let a_node = root.child_by_key("a").unwrap().node().unwrap();
    ctx.document.take_mutations();

    root.control(
        &mut ctx,
        Props::new().child_set([
            ("a", tags::li(Props::new().content("A"))),
            ("c", tags::li(Props::new().content("C"))),
        ]),
    )
    .unwrap();

    let c_node = root.child_by_key("c").unwrap().node().unwrap();
    assert_eq!(
        ctx.document.take_mutations(),
        vec![Mutation::InsertChild {
            parent,
            index: 1,
            child: c_node
        }]
    );
    assert_eq!(root.child_by_key("a").unwrap().node(), Some(a_node));
}

#[test]
fn test_keyed_insert_lands_between_siblings() {
    let mut ctx = RenderContext::new();
    let mut root = tags::ul(Props::new().child_set([
        ("a", tags::li(Props::new().content("A"))),
        ("b", tags::li(Props::new().content("B"))),
    ]));
    root.generate(&mut ctx, NodeAddress::root("list"), false, true)
        .unwrap();
    let parent = root.node().unwrap();
    ctx.document.take_mutations();

    root.control(
        &mut ctx,
        Props::new().child_set([
            ("a", tags::li(Props::new().content("A"))),
            ("mid", tags::li(Props::new().content("M"))),
            ("b", tags::li(Props::new().content("B"))),
        ]),
    )
    .unwrap();

    let mid_node = root.child_by_key("mid").unwrap().node().unwrap();
    assert_eq!(
        ctx.document.take_mutations(),
        vec![Mutation::InsertChild {
            parent,
            index: 1,
            child: mid_node
        }]
    );
}

#[test]
fn test_keyed_remove_unmounts_and_unregisters() {
    let mut ctx = RenderContext::new();
    let mut root = tags::ul(Props::new().child_set([
        ("a", tags::li(Props::new().content("A"))),
        (
            "c",
            tags::li(Props::new().content("C").on("click", Handler::new(|_| {}))),
        ),
    ]));
    root.generate(&mut ctx, NodeAddress::root("list"), false, true)
        .unwrap();
    let parent = root.node().unwrap();
    let c_node = root.child_by_key("c").unwrap().node().unwrap();
    let c_at = NodeAddress::root("list").child("c");
    assert!(ctx.events.handlers_at(&c_at).is_some());
    ctx.document.take_mutations();

    root.control(
        &mut ctx,
        Props::new().child_set([("a", tags::li(Props::new().content("A")))]),
    )
    .unwrap();

    assert_eq!(
        ctx.document.take_mutations(),
        vec![Mutation::RemoveChild { parent, index: 1 }]
    );
    assert!(root.child_by_key("c").is_none());
    assert!(ctx.document.get(c_node).is_none());
    assert!(ctx.document.node_at(&c_at).is_none());
    assert!(ctx.events.handlers_at(&c_at).is_none());
}

#[test]
fn test_array_growth_appends_at_tail() {
    let mut ctx = RenderContext::new();
    let mut root = tags::ol(Props::new().child_list([
        tags::li(Props::new().content("x")),
        tags::li(Props::new().content("y")),
    ]));
    root.generate(&mut ctx, NodeAddress::root("list"), false, true)
        .unwrap();
    let parent = root.node().unwrap();
    ctx.document.take_mutations();

    root.control(
        &mut ctx,
        Props::new().child_list([
            tags::li(Props::new().content("x")),
            tags::li(Props::new().content("y")),
            tags::li(Props::new().content("z")),
        ]),
    )
    .unwrap();

    let z_node = root.child_at(2).unwrap().node().unwrap();
    assert_eq!(
        ctx.document.take_mutations(),
        vec![Mutation::InsertChild {
            parent,
            index: 2,
            child: z_node
        }]
    );
}

#[test]
fn test_array_shrink_is_positional() {
    let mut ctx = RenderContext::new();
    let mut root = tags::ol(Props::new().child_list([
        tags::li(Props::new().content("x")),
        tags::li(Props::new().content("y")),
        tags::li(Props::new().content("z")),
    ]));
    root.generate(&mut ctx, NodeAddress::root("list"), false, true)
        .unwrap();
    let parent = root.node().unwrap();
    let second_node = root.child_at(1).unwrap().node().unwrap();
    ctx.document.take_mutations();

    // [x, y, z] -> [x, z]: index 1 now holds what was z; the tail is removed.
    root.control(
        &mut ctx,
        Props::new().child_list([
            tags::li(Props::new().content("x")),
            tags::li(Props::new().content("z")),
        ]),
    )
    .unwrap();

    assert_eq!(root.child_count(), 2);
    assert_eq!(root.child_at(1).unwrap().node(), Some(second_node));
    assert_eq!(
        ctx.document.get(second_node).unwrap().text.as_deref(),
        Some("z")
    );
    assert_eq!(
        ctx.document.take_mutations(),
        vec![
            Mutation::SetText {
                node: second_node,
                value: "z".to_string()
            },
            Mutation::RemoveChild { parent, index: 2 },
        ]
    );
}

#[test]
fn test_child_set_precedence_over_child_list() {
    let mut ctx = RenderContext::new();
    let mut root = tags::div(Props::new());
    root.generate(&mut ctx, NodeAddress::root("app"), false, true)
        .unwrap();

    root.control(
        &mut ctx,
        Props::new()
            .child_set([("only", tags::span(Props::new()))])
            .child_list([tags::div(Props::new()), tags::div(Props::new())]),
    )
    .unwrap();

    // The keyed protocol wins outright; the list is not merged in.
    assert_eq!(root.child_count(), 1);
    assert!(root.child_by_key("only").is_some());
}

#[test]
fn test_only_control_keys_restricts_work() {
    let mut ctx = RenderContext::new();
    let mut root = tags::ul(Props::new().child_set([
        ("a", tags::li(Props::new().content("1"))),
        ("b", tags::li(Props::new().content("2"))),
    ]));
    root.generate(&mut ctx, NodeAddress::root("list"), false, true)
        .unwrap();
    let a_node = root.child_by_key("a").unwrap().node().unwrap();
    let b_node = root.child_by_key("b").unwrap().node().unwrap();
    ctx.document.take_mutations();

    root.control(
        &mut ctx,
        Props::new()
            .child_set([
                ("a", tags::li(Props::new().content("9"))),
                ("b", tags::li(Props::new().content("9"))),
            ])
            .only_control_keys(["a"]),
    )
    .unwrap();

    assert_eq!(
        ctx.document.take_mutations(),
        vec![Mutation::SetText {
            node: a_node,
            value: "9".to_string()
        }]
    );
    assert_eq!(ctx.document.get(b_node).unwrap().text.as_deref(), Some("2"));
}

#[test]
fn test_only_control_keys_shields_removal() {
    let mut ctx = RenderContext::new();
    let mut root = tags::ul(Props::new().child_set([
        ("a", tags::li(Props::new().content("1"))),
        ("b", tags::li(Props::new().content("2"))),
    ]));
    root.generate(&mut ctx, NodeAddress::root("list"), false, true)
        .unwrap();
    ctx.document.take_mutations();

    // b is absent from the new set but outside the allow-list: untouched.
    root.control(
        &mut ctx,
        Props::new()
            .child_set([("a", tags::li(Props::new().content("1")))])
            .only_control_keys(["a"]),
    )
    .unwrap();

    assert!(ctx.document.take_mutations().is_empty());
    assert_eq!(root.child_count(), 2);
    assert!(root.child_by_key("b").is_some());
}

#[test]
fn test_switching_protocols_rebuilds_children() {
    init_tracing();
    let mut ctx = RenderContext::new();
    let mut root = tags::div(Props::new().child_set([
        (
            "a",
            tags::p(Props::new().content("A").on("click", Handler::new(|_| {}))),
        ),
        ("b", tags::p(Props::new().content("B"))),
    ]));
    root.generate(&mut ctx, NodeAddress::root("app"), false, true)
        .unwrap();
    let parent = root.node().unwrap();
    let a_at = NodeAddress::root("app").child("a");
    ctx.document.take_mutations();

    root.control(
        &mut ctx,
        Props::new().child_list([tags::span(Props::new().content("S"))]),
    )
    .unwrap();

    // Old keyed children torn down wholesale, list built fresh.
    assert!(root.child_by_key("a").is_none());
    assert_eq!(root.child_count(), 1);
    assert_eq!(root.child_at(0).unwrap().tag_name(), "span");
    assert_eq!(ctx.document.child_count(parent), 1);
    assert!(ctx.events.handlers_at(&a_at).is_none());

    let mutations = ctx.document.take_mutations();
    let removals = mutations
        .iter()
        .filter(|m| matches!(m, Mutation::RemoveChild { .. }))
        .count();
    let inserts = mutations
        .iter()
        .filter(|m| matches!(m, Mutation::InsertChild { .. }))
        .count();
    assert_eq!(removals, 2);
    assert_eq!(inserts, 1);
}

#[test]
fn test_removal_releases_nested_registrations() {
    let mut ctx = RenderContext::new();
    let mut root = tags::div(Props::new().child_set([(
        "card",
        tags::div(
            Props::new()
                .on("click", Handler::new(|_| {}))
                .child_set([(
                    "close",
                    tags::button(Props::new().on("click", Handler::new(|_| {}))),
                )]),
        ),
    )]));
    root.generate(&mut ctx, NodeAddress::root("app"), false, true)
        .unwrap();
    let card_at = NodeAddress::root("app").child("card");
    let close_at = card_at.child("close");
    let close_node = ctx.document.node_at(&close_at).unwrap();
    assert!(ctx.events.handlers_at(&close_at).is_some());

    let empty: Vec<(&str, Component)> = Vec::new();
    root.control(&mut ctx, Props::new().child_set(empty)).unwrap();

    // The whole subtree is gone: nodes, address bindings, handler bindings.
    assert_eq!(root.child_count(), 0);
    assert!(ctx.document.get(close_node).is_none());
    assert!(ctx.document.node_at(&card_at).is_none());
    assert!(ctx.document.node_at(&close_at).is_none());
    assert!(ctx.events.handlers_at(&card_at).is_none());
    assert!(ctx.events.handlers_at(&close_at).is_none());
}

#[test]
fn test_implicit_children_reconcile_by_name() {
    let mut ctx = RenderContext::new();
    let mut root = tags::div(
        Props::new()
            .attr("width", 10)
            .child("header", tags::h1(Props::new().content("old")))
            .child("footer", tags::p(Props::new().content("keep"))),
    );
    root.generate(&mut ctx, NodeAddress::root("app"), false, true)
        .unwrap();
    let header_node = root.child_by_key("header").unwrap().node().unwrap();
    let footer_node = root.child_by_key("footer").unwrap().node().unwrap();
    ctx.document.take_mutations();

    // Same names: matched as keys. Dropping a name removes that child.
    root.control(
        &mut ctx,
        Props::new()
            .attr("width", 10)
            .child("header", tags::h1(Props::new().content("new"))),
    )
    .unwrap();

    assert_eq!(root.child_by_key("header").unwrap().node(), Some(header_node));
    assert!(root.child_by_key("footer").is_none());
    assert!(ctx.document.get(footer_node).is_none());
    let mutations = ctx.document.take_mutations();
    assert!(mutations.contains(&Mutation::SetText {
        node: header_node,
        value: "new".to_string()
    }));
    assert!(mutations
        .iter()
        .any(|m| matches!(m, Mutation::RemoveChild { .. })));
    assert_eq!(mutations.len(), 2);
}
