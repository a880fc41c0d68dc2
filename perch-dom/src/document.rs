//! The live document tree: an arena of mutable nodes addressed both by handle
//! and by position identifier.
//!
//! Structural and attribute mutations that touch an already-built tree are
//! appended to a drainable journal so a rendering backend (or a test) can
//! observe exactly what changed. Construction of detached subtrees during
//! generation is silent; the subtree becomes visible through the single
//! insertion that attaches it.

use crate::address::NodeAddress;
use indexmap::IndexMap;
use smartstring::{LazyCompact, SmartString};
use std::collections::HashMap;
use std::fmt::Write as _;

type Name = SmartString<LazyCompact>;

/// Handle to a live node. Stable for the node's lifetime; slots are reused
/// after a subtree is freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

/// One mutable node of the live tree.
#[derive(Debug, Clone)]
pub struct LiveNode {
    pub tag: Name,
    /// Raw markup fragment injected into the opening tag, if the component's
    /// tag definition carries one.
    pub tag_text: Option<Name>,
    pub attrs: IndexMap<Name, Name>,
    pub style: IndexMap<Name, Name>,
    pub text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl LiveNode {
    fn new(tag: &str, tag_text: Option<&str>) -> Self {
        Self {
            tag: Name::from(tag),
            tag_text: tag_text.map(Name::from),
            attrs: IndexMap::new(),
            style: IndexMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|v| v.as_str())
    }

    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(|v| v.as_str())
    }
}

/// Observable mutation of an already-built tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetAttribute {
        node: NodeId,
        name: Name,
        value: Name,
    },
    RemoveAttribute {
        node: NodeId,
        name: Name,
    },
    SetStyleProperty {
        node: NodeId,
        name: Name,
        value: Name,
    },
    RemoveStyleProperty {
        node: NodeId,
        name: Name,
    },
    SetText {
        node: NodeId,
        value: String,
    },
    ClearText {
        node: NodeId,
    },
    InsertChild {
        parent: NodeId,
        index: usize,
        child: NodeId,
    },
    RemoveChild {
        parent: NodeId,
        index: usize,
    },
    MountRoot {
        root: NodeId,
    },
}

/// Arena-backed live document for one render context.
#[derive(Default)]
pub struct Document {
    nodes: Vec<Option<LiveNode>>,
    free_list: Vec<u32>,
    by_address: HashMap<NodeAddress, NodeId>,
    root: Option<NodeId>,
    journal: Vec<Mutation>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached node. Not journaled; the node is invisible until
    /// attached.
    pub fn create_node(&mut self, tag: &str, tag_text: Option<&str>) -> NodeId {
        let node = LiveNode::new(tag, tag_text);
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx as usize] = Some(node);
            NodeId(idx)
        } else {
            let idx = self.nodes.len() as u32;
            self.nodes.push(Some(node));
            NodeId(idx)
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&LiveNode> {
        self.nodes.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut LiveNode> {
        self.nodes.get_mut(id.0 as usize)?.as_mut()
    }

    /// Record the position identifier for a live node.
    pub fn bind_address(&mut self, at: &NodeAddress, node: NodeId) {
        self.by_address.insert(at.clone(), node);
    }

    pub fn unbind_address(&mut self, at: &NodeAddress) {
        self.by_address.remove(at);
    }

    pub fn node_at(&self, at: &NodeAddress) -> Option<NodeId> {
        self.by_address.get(at).copied()
    }

    /// Install `root` as the document root.
    pub fn mount_root(&mut self, root: NodeId) {
        self.root = Some(root);
        self.journal.push(Mutation::MountRoot { root });
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(live) = self.get_mut(node) {
            live.attrs.insert(Name::from(name), Name::from(value));
            self.journal.push(Mutation::SetAttribute {
                node,
                name: Name::from(name),
                value: Name::from(value),
            });
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(live) = self.get_mut(node) {
            if live.attrs.shift_remove(name).is_some() {
                self.journal.push(Mutation::RemoveAttribute {
                    node,
                    name: Name::from(name),
                });
            }
        }
    }

    pub fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(live) = self.get_mut(node) {
            live.style.insert(Name::from(name), Name::from(value));
            self.journal.push(Mutation::SetStyleProperty {
                node,
                name: Name::from(name),
                value: Name::from(value),
            });
        }
    }

    pub fn remove_style_property(&mut self, node: NodeId, name: &str) {
        if let Some(live) = self.get_mut(node) {
            if live.style.shift_remove(name).is_some() {
                self.journal.push(Mutation::RemoveStyleProperty {
                    node,
                    name: Name::from(name),
                });
            }
        }
    }

    pub fn set_text(&mut self, node: NodeId, value: Option<&str>) {
        if let Some(live) = self.get_mut(node) {
            match value {
                Some(text) => {
                    live.text = Some(text.to_string());
                    self.journal.push(Mutation::SetText {
                        node,
                        value: text.to_string(),
                    });
                }
                None => {
                    if live.text.take().is_some() {
                        self.journal.push(Mutation::ClearText { node });
                    }
                }
            }
        }
    }

    /// Construction-time append of a detached child. Not journaled.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(live) = self.get_mut(parent) {
            live.children.push(child);
        }
        if let Some(live) = self.get_mut(child) {
            live.parent = Some(parent);
        }
    }

    /// Attach `child` under `parent` at `index` (clamped to the child count).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        let index = {
            let Some(live) = self.get_mut(parent) else {
                return;
            };
            let index = index.min(live.children.len());
            live.children.insert(index, child);
            index
        };
        if let Some(live) = self.get_mut(child) {
            live.parent = Some(parent);
        }
        self.journal.push(Mutation::InsertChild {
            parent,
            index,
            child,
        });
    }

    /// Unlink `node` from its parent (journaled) or from the root slot.
    pub fn detach(&mut self, node: NodeId) {
        let parent = self.get(node).and_then(|live| live.parent);
        if let Some(parent) = parent {
            let index = self.index_of(parent, node);
            if let Some(index) = index {
                if let Some(live) = self.get_mut(parent) {
                    live.children.remove(index);
                }
                self.journal.push(Mutation::RemoveChild { parent, index });
            }
            if let Some(live) = self.get_mut(node) {
                live.parent = None;
            }
        } else if self.root == Some(node) {
            self.root = None;
        }
    }

    /// Free `node` and every descendant. The caller detaches first; freeing
    /// is silent.
    pub fn free_subtree(&mut self, node: NodeId) {
        let children = self
            .get(node)
            .map(|live| live.children.clone())
            .unwrap_or_default();
        for child in children {
            self.free_subtree(child);
        }
        let idx = node.0 as usize;
        if idx < self.nodes.len() && self.nodes[idx].is_some() {
            self.nodes[idx] = None;
            self.free_list.push(node.0);
        }
    }

    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.get(parent)?.children.iter().position(|c| *c == child)
    }

    pub fn child_count(&self, parent: NodeId) -> usize {
        self.get(parent).map(|live| live.children.len()).unwrap_or(0)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the mutation journal.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    /// Serialize the subtree rooted at `node` as markup.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, node);
        out
    }

    fn write_node(&self, out: &mut String, node: NodeId) {
        let Some(live) = self.get(node) else {
            return;
        };
        out.push('<');
        out.push_str(&live.tag);
        if let Some(tag_text) = &live.tag_text {
            out.push_str(tag_text);
        }
        for (name, value) in &live.attrs {
            let _ = write!(out, " {}='{}'", name, escape_attr(value));
        }
        if !live.style.is_empty() {
            out.push_str(" style='");
            for (i, (name, value)) in live.style.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{}: {};", name, escape_attr(value));
            }
            out.push('\'');
        }
        out.push('>');
        if let Some(text) = &live.text {
            out.push_str(&escape_text(text));
        }
        for child in &live.children {
            self.write_node(out, *child);
        }
        let _ = write!(out, "</{}>", live.tag);
    }
}

pub(crate) fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

pub(crate) fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
