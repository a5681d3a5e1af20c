//! Toggle actuation
//!
//! The one side effect this engine is allowed: a single synthetic
//! activation dispatched at the host page's toggle control. All state
//! inspection happens in the caller's re-checks; the actuator stays a
//! fire-once primitive.

use autohide_dom::Document;
use tracing::{debug, warn};

use crate::locator::PanelLocator;

/// Dispatches synthetic activations at the toggle control
#[derive(Debug, Clone, Default)]
pub struct ToggleActuator;

impl ToggleActuator {
    pub fn new() -> Self {
        Self
    }

    /// Flip panel visibility by activating the toggle control
    ///
    /// Missing toggle is logged and skipped; never an error.
    pub fn toggle(&self, locator: &PanelLocator, doc: &mut Document) {
        let Some(toggle) = locator.find_toggle(doc) else {
            warn!("toggle control not found, skipping activation");
            return;
        };
        debug!("activating panel toggle");
        doc.dispatch_activation(toggle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autohide_dom::NodeId;

    fn set_class(doc: &mut Document, node: NodeId, class: &str) {
        doc.tree_mut()
            .get_mut(node)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("class", class);
    }

    #[test]
    fn test_missing_toggle_is_noop() {
        let mut doc = Document::new();
        ToggleActuator::new().toggle(&PanelLocator::default(), &mut doc);
        assert_eq!(doc.activation_count(), 0);
    }

    #[test]
    fn test_dispatches_exactly_one_activation() {
        let mut doc = Document::new();
        let toggle = doc.tree_mut().create_element("button");
        set_class(&mut doc, toggle, "nav-panel-toggle");
        let root = doc.tree().root();
        doc.tree_mut().append_child(root, toggle);

        ToggleActuator::new().toggle(&PanelLocator::default(), &mut doc);
        assert_eq!(doc.activations_at(toggle), 1);
    }
}
