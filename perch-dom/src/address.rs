use smallvec::SmallVec;
use smartstring::{LazyCompact, SmartString};
use std::fmt;

type Segment = SmartString<LazyCompact>;

/// Stable position identifier for a node within one render root.
///
/// Addresses are derived structurally: the root carries a name, every child
/// extends its parent by one segment (the child key, or the index for
/// positional children). The same key under the same parent always yields the
/// same address, across renders. Comparison and hashing work on the segment
/// list, so keys containing separator characters cannot collide.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NodeAddress {
    segments: SmallVec<[Segment; 4]>,
}

impl NodeAddress {
    /// Address of a render root.
    pub fn root(name: &str) -> Self {
        let mut segments = SmallVec::new();
        segments.push(Segment::from(name));
        Self { segments }
    }

    /// Address of the child stored under `key`.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::from(key));
        Self { segments }
    }

    /// Address of the positional child at `index`.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::from(index.to_string()));
        Self { segments }
    }

    /// Parent address, or `None` for a render root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() <= 1 {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The key or index this address was derived with.
    pub fn last_segment(&self) -> &str {
        self.segments.last().map(|s| s.as_str()).unwrap_or("")
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeAddress({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_child_derivation_is_stable() {
        let root = NodeAddress::root("app");
        assert_eq!(root.child("header"), root.child("header"));
        assert_ne!(root.child("header"), root.child("footer"));
    }

    #[test]
    fn test_display_form() {
        let addr = NodeAddress::root("app").child("list").child_index(2);
        assert_eq!(addr.to_string(), ".app.list.2");
    }

    #[test]
    fn test_parent_chain() {
        let addr = NodeAddress::root("app").child("list").child("row");
        let parent = addr.parent().unwrap();
        assert_eq!(parent, NodeAddress::root("app").child("list"));
        assert_eq!(parent.parent().unwrap(), NodeAddress::root("app"));
        assert!(NodeAddress::root("app").parent().is_none());
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut set = HashSet::new();
        set.insert(NodeAddress::root("a").child("x"));
        set.insert(NodeAddress::root("a").child("x"));
        set.insert(NodeAddress::root("a").child("y"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_root_metadata() {
        let root = NodeAddress::root("app");
        assert!(root.is_root());
        assert_eq!(root.depth(), 1);
        let child = root.child("k");
        assert!(!child.is_root());
        assert_eq!(child.last_segment(), "k");
    }
}
