//! perch-dom: declarative native-tag components over a live document tree.
//!
//! Components are built from property trees, generated into markup plus an
//! event delegation registry once, and thereafter reconciled in place:
//! controlling an attached component with a new property tree mutates only
//! the attributes, text, children, and handler bindings that changed.

pub mod address;
pub mod attrs;
pub mod component;
pub mod context;
pub mod document;
pub mod events;
pub mod tags;

mod generation;
mod mutation;

pub use address::NodeAddress;
pub use attrs::AttrValue;
pub use component::{
    ChildKey, Component, ControlHints, DomError, PropName, PropValue, Props, Result, TagDef,
};
pub use context::RenderContext;
pub use document::{Document, LiveNode, Mutation, NodeId};
pub use events::{DomEvent, EventRegistry, Handler, HandlerMap};
