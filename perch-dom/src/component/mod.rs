//! Native tag components: construction, one-time generation, and control.

mod child_spec;
mod instance;
mod props;

pub use instance::{Component, TagDef};
pub use props::{ChildKey, ControlHints, PropName, PropValue, Props};

pub(crate) use child_spec::ChildSpec;
pub(crate) use instance::{Mount, RenderedChildren};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    /// `control` was invoked on a component that was never generated. A
    /// caller bug; the operation is aborted before touching anything.
    #[error("control invoked on a component with no backing node")]
    ControlWithoutBackingNode,

    /// `generate` was invoked a second time. Attachment happens exactly once
    /// per instance; later updates go through `control`.
    #[error("generate invoked on a component that already has a backing node")]
    GenerateWithBackingNode,

    /// A child component was stored under a reserved property name.
    #[error("reserved property name {0:?} cannot hold a child component")]
    ReservedChildName(String),
}

pub type Result<T> = std::result::Result<T, DomError>;
