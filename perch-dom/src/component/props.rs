use crate::attrs::{self, AttrValue, ClassSet};
use crate::events::{Handler, HandlerMap};
use indexmap::IndexMap;
use smartstring::{LazyCompact, SmartString};

use super::instance::Component;

pub type PropName = SmartString<LazyCompact>;
pub type ChildKey = SmartString<LazyCompact>;

type Name = SmartString<LazyCompact>;

/// A value in the main property bag: either a recognized tag attribute or an
/// inline named child.
#[derive(Debug)]
pub enum PropValue {
    Attr(AttrValue),
    Child(Component),
}

/// Caller-supplied control hints. All of them only ever shrink the work a
/// control call performs; omitting them is always correct.
#[derive(Debug, Clone, Default)]
pub struct ControlHints {
    /// Leave the node's own attributes/style/text untouched.
    pub skip_top_node: bool,
    /// Return right after the top-level patch; children are known unaffected.
    pub skip_existing_children: bool,
    /// Restrict keyed reconciliation to these child keys.
    pub only_child_keys: Option<Vec<ChildKey>>,
}

/// Declarative property tree for one component.
///
/// Attributes and inline named children share the main bag, exactly as they
/// share one namespace on the declaration side; the reserved-name table keeps
/// them apart. Children may instead be given through `child_set` (matched by
/// key across renders) or `child_list` (matched by position); one protocol
/// per render pass.
#[derive(Debug, Default)]
pub struct Props {
    pub(crate) entries: IndexMap<PropName, PropValue>,
    pub(crate) style: IndexMap<PropName, Name>,
    pub(crate) content: Option<String>,
    pub(crate) handlers: HandlerMap,
    pub(crate) dynamic_handlers: HandlerMap,
    pub(crate) child_set: Option<IndexMap<ChildKey, Component>>,
    pub(crate) child_list: Option<Vec<Component>>,
    pub(crate) hints: ControlHints,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a recognized tag attribute.
    pub fn attr(mut self, name: impl Into<PropName>, value: impl Into<AttrValue>) -> Self {
        self.entries
            .insert(name.into(), PropValue::Attr(value.into()));
        self
    }

    /// Set the `class_set` attribute from (name, enabled) pairs.
    pub fn class_set<'a>(self, classes: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let mut set = ClassSet::new();
        for (name, enabled) in classes {
            set.insert(Name::from(name), enabled);
        }
        self.attr("class_set", AttrValue::ClassSet(set))
    }

    /// Set one style property.
    pub fn style(mut self, name: impl Into<PropName>, value: impl Into<PropName>) -> Self {
        self.style.insert(name.into(), value.into());
        self
    }

    /// Set the text content rendered inside the tag.
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    /// Bind an event handler, registered when the component is generated.
    pub fn on(mut self, event: &str, handler: Handler) -> Self {
        self.handlers.insert(Name::from(event), handler);
        self
    }

    /// Bind a handler that is re-registered on every control call.
    pub fn dynamic_on(mut self, event: &str, handler: Handler) -> Self {
        self.dynamic_handlers.insert(Name::from(event), handler);
        self
    }

    /// Add an inline named child to the main bag.
    pub fn child(mut self, name: impl Into<PropName>, child: Component) -> Self {
        self.entries.insert(name.into(), PropValue::Child(child));
        self
    }

    /// Supply the identity-keyed child set.
    pub fn child_set<K>(mut self, children: impl IntoIterator<Item = (K, Component)>) -> Self
    where
        K: Into<ChildKey>,
    {
        let set = self.child_set.get_or_insert_with(IndexMap::new);
        for (key, child) in children {
            set.insert(key.into(), child);
        }
        self
    }

    /// Supply the positional child list.
    pub fn child_list(mut self, children: impl IntoIterator<Item = Component>) -> Self {
        self.child_list
            .get_or_insert_with(Vec::new)
            .extend(children);
        self
    }

    pub fn skip_top_node(mut self) -> Self {
        self.hints.skip_top_node = true;
        self
    }

    pub fn skip_existing_children(mut self) -> Self {
        self.hints.skip_existing_children = true;
        self
    }

    /// Restrict child reconciliation to the given keys.
    pub fn only_control_keys<K>(mut self, keys: impl IntoIterator<Item = K>) -> Self
    where
        K: Into<ChildKey>,
    {
        self.hints.only_child_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Rendered (markup-facing) attribute map. Unrecognized attribute names
    /// are dropped; flags set to false are omitted.
    pub(crate) fn rendered_attrs(&self) -> IndexMap<Name, Name> {
        let mut out = IndexMap::new();
        for (name, value) in &self.entries {
            let PropValue::Attr(value) = value else {
                continue;
            };
            if !attrs::is_tag_attr_name(name) {
                tracing::debug!(name = name.as_str(), "ignoring unrecognized attribute");
                continue;
            }
            if let Some(rendered) = value.render() {
                out.insert(Name::from(attrs::rendered_attr_name(name)), rendered);
            }
        }
        out
    }
}
