//! Reconciliation strategies: single-node control, identity-keyed child
//! reconciliation, and positional child reconciliation.
//!
//! All three mutate the live document and the handler registry to match the
//! new description, touching only what differs. Keyed reconciliation never
//! physically reorders surviving siblings; document order stays
//! first-insertion order.

use crate::component::{ChildKey, Component, Mount, Props, RenderedChildren, Result};
use crate::context::RenderContext;
use crate::address::NodeAddress;
use crate::document::NodeId;
use indexmap::IndexMap;

/// Diff `next` against `prev` and patch the node's attributes, style, and
/// text content in place. Returns the node handle the component should hold
/// afterwards; the current strategy patches in place and never replaces the
/// node, but callers must adopt the returned handle either way.
pub(crate) fn control_single_node(
    ctx: &mut RenderContext,
    node: NodeId,
    at: &NodeAddress,
    next: &Props,
    prev: &Props,
) -> NodeId {
    let old_attrs = prev.rendered_attrs();
    let new_attrs = next.rendered_attrs();
    for (name, value) in &new_attrs {
        if old_attrs.get(name) != Some(value) {
            ctx.document.set_attribute(node, name, value);
        }
    }
    for name in old_attrs.keys() {
        if !new_attrs.contains_key(name) {
            ctx.document.remove_attribute(node, name);
        }
    }

    for (name, value) in &next.style {
        if prev.style.get(name) != Some(value) {
            ctx.document.set_style_property(node, name, value);
        }
    }
    for name in prev.style.keys() {
        if !next.style.contains_key(name) {
            ctx.document.remove_style_property(node, name);
        }
    }

    if next.content != prev.content {
        ctx.document.set_text(node, next.content.as_deref());
    }
    tracing::trace!(address = %at, "controlled node in place");
    node
}

/// Reconcile the rendered children against `new_children`, matching by
/// identity key. Serves both the `child_set` protocol and the implicit
/// named-children protocol.
///
/// Keys present only in the old set are unmounted; keys present in both are
/// controlled in place; new keys are generated and inserted after the
/// previously processed sibling. When `only` is supplied, keys outside the
/// list are left completely untouched.
pub(crate) fn reconcile_children_by_key(
    ctx: &mut RenderContext,
    mount: &mut Mount,
    new_children: IndexMap<ChildKey, Component>,
    only: Option<&[ChildKey]>,
) -> Result<()> {
    if !matches!(mount.children, RenderedChildren::Keyed(_)) {
        // Protocol switch: tear down wholesale, never merge across shapes.
        clear_children(ctx, &mut mount.children);
        mount.children = RenderedChildren::Keyed(IndexMap::new());
    }
    let parent_node = mount.node;
    let parent_at = &mount.address;
    let RenderedChildren::Keyed(existing) = &mut mount.children else {
        unreachable!("store shape established above");
    };
    let allowed = |key: &str| only.is_none_or(|keys| keys.iter().any(|k| k.as_str() == key));

    let removed: Vec<ChildKey> = existing
        .keys()
        .filter(|key| !new_children.contains_key(*key) && allowed(key.as_str()))
        .cloned()
        .collect();
    for key in removed {
        if let Some(mut child) = existing.shift_remove(&key) {
            tracing::debug!(key = key.as_str(), "removing keyed child");
            child.unmount(ctx);
        }
    }

    let mut last_sibling: Option<NodeId> = None;
    for (key, incoming) in new_children {
        if !allowed(key.as_str()) {
            if let Some(kept) = existing.get(&key) {
                last_sibling = kept.node();
            }
            continue;
        }
        if existing.contains_key(&key) {
            let child = existing.get_mut(&key).expect("presence checked above");
            child.control(ctx, incoming.props)?;
            last_sibling = child.node();
        } else {
            let mut incoming = incoming;
            incoming.generate(ctx, parent_at.child(&key), false, true)?;
            let child_node = incoming.node().expect("generated child has a node");
            let index = last_sibling
                .and_then(|sibling| ctx.document.index_of(parent_node, sibling))
                .map(|i| i + 1)
                .unwrap_or(0);
            tracing::debug!(key = key.as_str(), index, "inserting keyed child");
            ctx.document.insert_child(parent_node, index, child_node);
            last_sibling = Some(child_node);
            existing.insert(key, incoming);
        }
    }
    Ok(())
}

/// Reconcile the rendered children against `new_list`, matching by position.
/// The shared prefix is controlled index-by-index, growth is appended at the
/// tail, shrinkage removes from the tail.
pub(crate) fn reconcile_children_by_array(
    ctx: &mut RenderContext,
    mount: &mut Mount,
    new_list: Vec<Component>,
) -> Result<()> {
    if !matches!(mount.children, RenderedChildren::Ordered(_)) {
        clear_children(ctx, &mut mount.children);
        mount.children = RenderedChildren::Ordered(Vec::new());
    }
    let parent_node = mount.node;
    let parent_at = &mount.address;
    let RenderedChildren::Ordered(existing) = &mut mount.children else {
        unreachable!("store shape established above");
    };

    let new_len = new_list.len();
    for (index, incoming) in new_list.into_iter().enumerate() {
        if index < existing.len() {
            existing[index].control(ctx, incoming.props)?;
        } else {
            let mut incoming = incoming;
            incoming.generate(ctx, parent_at.child_index(index), false, true)?;
            let child_node = incoming.node().expect("generated child has a node");
            let tail = ctx.document.child_count(parent_node);
            tracing::debug!(index, "appending positional child");
            ctx.document.insert_child(parent_node, tail, child_node);
            existing.push(incoming);
        }
    }
    while existing.len() > new_len {
        let mut child = existing.pop().expect("length checked above");
        tracing::debug!(index = existing.len(), "removing positional child");
        child.unmount(ctx);
    }
    Ok(())
}

fn clear_children(ctx: &mut RenderContext, children: &mut RenderedChildren) {
    match children {
        RenderedChildren::Keyed(map) => {
            for (_, mut child) in map.drain(..) {
                child.unmount(ctx);
            }
        }
        RenderedChildren::Ordered(list) => {
            for mut child in list.drain(..) {
                child.unmount(ctx);
            }
        }
    }
}
