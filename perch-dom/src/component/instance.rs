use crate::address::NodeAddress;
use crate::context::RenderContext;
use crate::document::NodeId;
use crate::{generation, mutation};
use indexmap::IndexMap;
use std::fmt;

use super::child_spec::ChildSpec;
use super::props::{ChildKey, Props};
use super::{DomError, Result};

/// Static definition of a native tag: its name and an optional raw fragment
/// injected into the opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDef {
    pub name: &'static str,
    pub tag_text: Option<&'static str>,
}

impl TagDef {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            tag_text: None,
        }
    }

    pub const fn with_tag_text(name: &'static str, tag_text: &'static str) -> Self {
        Self {
            name,
            tag_text: Some(tag_text),
        }
    }
}

/// Rendered children of an attached component. The store shape follows the
/// child protocol last applied; switching protocols rebuilds the store.
pub(crate) enum RenderedChildren {
    Keyed(IndexMap<ChildKey, Component>),
    Ordered(Vec<Component>),
}

impl RenderedChildren {
    pub(crate) fn len(&self) -> usize {
        match self {
            RenderedChildren::Keyed(map) => map.len(),
            RenderedChildren::Ordered(list) => list.len(),
        }
    }

    pub(crate) fn components_mut(&mut self) -> Box<dyn Iterator<Item = &mut Component> + '_> {
        match self {
            RenderedChildren::Keyed(map) => Box::new(map.values_mut()),
            RenderedChildren::Ordered(list) => Box::new(list.iter_mut()),
        }
    }
}

/// Attachment state of a generated component. The address is assigned once
/// and never changes; the node handle may be replaced by a control pass.
pub(crate) struct Mount {
    pub(crate) address: NodeAddress,
    pub(crate) node: NodeId,
    pub(crate) children: RenderedChildren,
}

/// A native tag component instance.
///
/// Freshly constructed instances are unattached descriptors: a tag plus a
/// property tree. `generate` attaches the instance to a live node exactly
/// once; from then on `control` reconciles the node and its subtree against
/// each new property tree, mutating only what differs.
pub struct Component {
    pub(crate) tag: TagDef,
    pub(crate) props: Props,
    pub(crate) mount: Option<Mount>,
}

impl Component {
    /// Construct an unattached component. No side effects.
    pub fn new(tag: TagDef, props: Props) -> Self {
        Self {
            tag,
            props,
            mount: None,
        }
    }

    pub fn tag_name(&self) -> &'static str {
        self.tag.name
    }

    pub fn is_attached(&self) -> bool {
        self.mount.is_some()
    }

    /// Position identifier, defined once the component is attached.
    pub fn address(&self) -> Option<&NodeAddress> {
        self.mount.as_ref().map(|m| &m.address)
    }

    /// Live node handle, defined once the component is attached.
    pub fn node(&self) -> Option<NodeId> {
        self.mount.as_ref().map(|m| m.node)
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Generate the live node and, recursively, the children, binding the
    /// position identifier `at` and registering requested handlers.
    ///
    /// Returns the subtree markup when `emit_markup` is set. May run once per
    /// instance; a second call fails with `GenerateWithBackingNode`.
    pub fn generate(
        &mut self,
        ctx: &mut RenderContext,
        at: NodeAddress,
        emit_markup: bool,
        emit_handlers: bool,
    ) -> Result<Option<String>> {
        if self.mount.is_some() {
            return Err(DomError::GenerateWithBackingNode);
        }
        generation::generate_node_and_children(self, ctx, at, emit_markup, emit_handlers)
    }

    /// Reconcile the live subtree against `next_props`.
    ///
    /// The sequence is fixed: top-level node patch (unless hinted off), then
    /// the props commit, then child dispatch. Fails with
    /// `ControlWithoutBackingNode` when the component was never generated.
    pub fn control(&mut self, ctx: &mut RenderContext, next_props: Props) -> Result<()> {
        let mut mount = self
            .mount
            .take()
            .ok_or(DomError::ControlWithoutBackingNode)?;
        let result = self.control_mounted(ctx, &mut mount, next_props);
        self.mount = Some(mount);
        result
    }

    fn control_mounted(
        &mut self,
        ctx: &mut RenderContext,
        mount: &mut Mount,
        mut next_props: Props,
    ) -> Result<()> {
        if !next_props.hints.skip_top_node {
            mount.node = mutation::control_single_node(
                ctx,
                mount.node,
                &mount.address,
                &next_props,
                &self.props,
            );
        }
        let spec = ChildSpec::take_from(&mut next_props)?;
        // Commit point: from here on, "previous properties" are gone.
        self.props = next_props;

        if self.props.hints.skip_existing_children {
            return Ok(());
        }
        if !self.props.dynamic_handlers.is_empty() {
            ctx.events
                .register_handlers(&mount.address, &self.props.dynamic_handlers);
        }

        let only = self.props.hints.only_child_keys.as_deref();
        match spec {
            ChildSpec::Keyed(children) | ChildSpec::Implicit(children) => {
                mutation::reconcile_children_by_key(ctx, mount, children, only)
            }
            ChildSpec::Ordered(children) => {
                mutation::reconcile_children_by_array(ctx, mount, children)
            }
        }
    }

    /// Rendered child stored under `key`, when the keyed protocol is active.
    pub fn child_by_key(&self, key: &str) -> Option<&Component> {
        match &self.mount.as_ref()?.children {
            RenderedChildren::Keyed(map) => map.get(key),
            RenderedChildren::Ordered(_) => None,
        }
    }

    /// Rendered child at `index`, in store order.
    pub fn child_at(&self, index: usize) -> Option<&Component> {
        match &self.mount.as_ref()?.children {
            RenderedChildren::Keyed(map) => map.get_index(index).map(|(_, c)| c),
            RenderedChildren::Ordered(list) => list.get(index),
        }
    }

    pub fn child_count(&self) -> usize {
        self.mount.as_ref().map(|m| m.children.len()).unwrap_or(0)
    }

    /// Tear the component out of the document: release every handler
    /// registration and address binding in the subtree, then detach and free
    /// the live nodes.
    pub(crate) fn unmount(&mut self, ctx: &mut RenderContext) {
        let Some(mut mount) = self.mount.take() else {
            return;
        };
        release_subtree_registrations(&mut mount, ctx);
        ctx.document.detach(mount.node);
        ctx.document.free_subtree(mount.node);
        tracing::trace!(address = %mount.address, "unmounted component");
    }
}

fn release_subtree_registrations(mount: &mut Mount, ctx: &mut RenderContext) {
    ctx.events.unregister(&mount.address);
    ctx.document.unbind_address(&mount.address);
    for child in mount.children.components_mut() {
        if let Some(child_mount) = child.mount.as_mut() {
            release_subtree_registrations(child_mount, ctx);
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("tag", &self.tag.name)
            .field("attached", &self.mount.is_some())
            .finish()
    }
}
