use crate::document::Document;
use crate::events::EventRegistry;

/// Everything a generate or control pass mutates: the live document and the
/// event delegation registry. Passed explicitly through every call, so
/// independent contexts give fully independent render roots.
#[derive(Default)]
pub struct RenderContext {
    pub document: Document,
    pub events: EventRegistry,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }
}
