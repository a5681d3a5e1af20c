//! Collapse guard
//!
//! Decides whether an automatic collapse is currently permitted. The
//! predicate is evaluated against the document as it is *now* — once
//! when a leave event arrives, and again when the settle timer fires,
//! because guards can appear or vanish in between.

use autohide_dom::Document;
use tracing::trace;

use crate::locator::PanelLocator;

/// Evaluates the collapse-permission predicate
#[derive(Debug, Clone, Default)]
pub struct GuardEvaluator;

impl GuardEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// True iff the panel is not pinned open and no visually
    /// significant guard element is present
    pub fn may_collapse(&self, locator: &PanelLocator, doc: &Document) -> bool {
        if locator.panel_pinned(doc) {
            trace!("collapse blocked: panel pinned open");
            return false;
        }
        let guards = locator.find_guards(doc);
        if !guards.is_empty() {
            trace!(count = guards.len(), "collapse blocked: guard present");
            return false;
        }
        true
    }
}
