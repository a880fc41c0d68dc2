//! One-time node and markup generation.
//!
//! Generation materializes the live node for a component, binds its position
//! identifier, registers requested handlers, and recurses over the selected
//! child protocol, deriving each child's address from the parent address plus
//! the child key (or index). The markup string is serialized from the
//! materialized subtree, so markup and live tree cannot drift apart.

use crate::component::{ChildSpec, Component, Mount, RenderedChildren, Result};
use crate::context::RenderContext;
use crate::address::NodeAddress;
use indexmap::IndexMap;
use smartstring::{LazyCompact, SmartString};

pub(crate) fn generate_node_and_children(
    component: &mut Component,
    ctx: &mut RenderContext,
    at: NodeAddress,
    emit_markup: bool,
    emit_handlers: bool,
) -> Result<Option<String>> {
    let node = ctx
        .document
        .create_node(component.tag.name, component.tag.tag_text);
    ctx.document.bind_address(&at, node);
    {
        let live = ctx.document.get_mut(node).expect("node just created");
        live.attrs
            .insert("id".into(), SmartString::<LazyCompact>::from(at.to_string()));
        for (name, value) in component.props.rendered_attrs() {
            live.attrs.insert(name, value);
        }
        for (name, value) in &component.props.style {
            live.style.insert(name.clone(), value.clone());
        }
        live.text = component.props.content.clone();
    }
    if emit_handlers {
        ctx.events.register_handlers(&at, &component.props.handlers);
        ctx.events
            .register_handlers(&at, &component.props.dynamic_handlers);
    }
    tracing::trace!(address = %at, tag = component.tag.name, "generated node");

    let children = match ChildSpec::take_from(&mut component.props)? {
        ChildSpec::Keyed(map) | ChildSpec::Implicit(map) => {
            let mut rendered = IndexMap::with_capacity(map.len());
            for (key, mut child) in map {
                child.generate(ctx, at.child(&key), false, emit_handlers)?;
                let child_node = child.node().expect("generated child has a node");
                ctx.document.append_child(node, child_node);
                rendered.insert(key, child);
            }
            RenderedChildren::Keyed(rendered)
        }
        ChildSpec::Ordered(list) => {
            let mut rendered = Vec::with_capacity(list.len());
            for (index, mut child) in list.into_iter().enumerate() {
                child.generate(ctx, at.child_index(index), false, emit_handlers)?;
                let child_node = child.node().expect("generated child has a node");
                ctx.document.append_child(node, child_node);
                rendered.push(child);
            }
            RenderedChildren::Ordered(rendered)
        }
    };

    component.mount = Some(Mount {
        address: at,
        node,
        children,
    });
    Ok(emit_markup.then(|| ctx.document.outer_html(node)))
}
