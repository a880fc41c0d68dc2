use crate::attrs;
use indexmap::IndexMap;

use super::instance::Component;
use super::props::{ChildKey, PropValue, Props};
use super::{DomError, Result};

/// Which child-specification protocol a property tree uses for one
/// generate/control call. Decided once here, then dispatched exhaustively;
/// the three forms never mix within a call.
pub(crate) enum ChildSpec {
    /// `child_set`: programmer-chosen keys carry identity across renders.
    Keyed(IndexMap<ChildKey, Component>),
    /// `child_list`: position carries identity.
    Ordered(Vec<Component>),
    /// Inline named children from the main bag, with reserved names filtered
    /// out. Keyed semantics; the name is the key.
    Implicit(IndexMap<ChildKey, Component>),
}

impl ChildSpec {
    /// Extract the child specification from `props`, leaving the bag holding
    /// attributes only. Precedence when more than one form is supplied:
    /// `child_set` wins over `child_list`, which wins over inline children.
    pub(crate) fn take_from(props: &mut Props) -> Result<ChildSpec> {
        if let Some(set) = props.child_set.take() {
            if props.child_list.take().is_some() {
                tracing::warn!("both child_set and child_list supplied; child_set wins");
            }
            return Ok(ChildSpec::Keyed(set));
        }
        if let Some(list) = props.child_list.take() {
            return Ok(ChildSpec::Ordered(list));
        }

        let mut named = IndexMap::new();
        let entries = std::mem::take(&mut props.entries);
        let mut kept = IndexMap::with_capacity(entries.len());
        for (name, value) in entries {
            match value {
                PropValue::Child(child) => {
                    if attrs::is_reserved_name(&name) {
                        // Leave the bag partially drained; this is a caller
                        // bug, not a recoverable state.
                        props.entries = kept;
                        return Err(DomError::ReservedChildName(name.to_string()));
                    }
                    named.insert(name, child);
                }
                attr => {
                    kept.insert(name, attr);
                }
            }
        }
        props.entries = kept;
        Ok(ChildSpec::Implicit(named))
    }
}
