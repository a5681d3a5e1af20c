//! Panel location
//!
//! Stateless lookups of the panel, its toggle control, and guard
//! elements against the live document. Absence is an empty result;
//! nothing here caches across calls because the host page can mutate
//! the tree at any time.

use autohide_dom::{Document, NodeId};

/// Visibility state of the panel, inferred fresh per decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Collapsed,
    Expanded,
    /// Panel not currently locatable
    Unknown,
}

/// Class names the locator matches against
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Class on the panel element
    pub panel_class: String,
    /// Class on the toggle control
    pub toggle_class: String,
    /// Classes marking guard elements (open dialogs etc.)
    pub guard_classes: Vec<String>,
    /// Class marking the panel as explicitly pinned open
    pub pinned_class: String,
    /// Class present while the panel is collapsed
    pub collapsed_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            panel_class: "nav-panel".to_string(),
            toggle_class: "nav-panel-toggle".to_string(),
            guard_classes: vec!["color-picker".to_string(), "popover".to_string()],
            pinned_class: "pinned-open".to_string(),
            collapsed_class: "collapsed".to_string(),
        }
    }
}

/// Locates the panel, toggle, and guards in the current document
#[derive(Debug, Clone)]
pub struct PanelLocator {
    selectors: Selectors,
}

impl PanelLocator {
    pub fn new(selectors: Selectors) -> Self {
        Self { selectors }
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    /// Find the panel element, if the host has rendered it
    pub fn find_panel(&self, doc: &Document) -> Option<NodeId> {
        doc.first_element_with_class(&self.selectors.panel_class)
    }

    /// Find the toggle control, if present
    pub fn find_toggle(&self, doc: &Document) -> Option<NodeId> {
        doc.first_element_with_class(&self.selectors.toggle_class)
    }

    /// Guard elements that are present and visually significant
    ///
    /// An element present in markup but zero-sized does not count.
    pub fn find_guards(&self, doc: &Document) -> Vec<NodeId> {
        let mut guards = Vec::new();
        for class in &self.selectors.guard_classes {
            for node in doc.elements_with_class(class) {
                if !doc.bounding_rect(node).is_empty() {
                    guards.push(node);
                }
            }
        }
        guards
    }

    /// Infer the panel's visibility state from its class list
    pub fn panel_state(&self, doc: &Document) -> PanelState {
        let Some(panel) = self.find_panel(doc) else {
            return PanelState::Unknown;
        };
        let collapsed = doc
            .tree()
            .get(panel)
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.has_class(&self.selectors.collapsed_class));
        if collapsed {
            PanelState::Collapsed
        } else {
            PanelState::Expanded
        }
    }

    /// Check whether the panel is pinned open by an explicit gesture
    pub fn panel_pinned(&self, doc: &Document) -> bool {
        self.find_panel(doc)
            .and_then(|panel| doc.tree().get(panel))
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.has_class(&self.selectors.pinned_class))
    }
}

impl Default for PanelLocator {
    fn default() -> Self {
        Self::new(Selectors::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autohide_dom::Rect;

    fn set_class(doc: &mut Document, node: NodeId, class: &str) {
        doc.tree_mut()
            .get_mut(node)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("class", class);
    }

    fn demo_doc() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let panel = doc.tree_mut().create_element("aside");
        let toggle = doc.tree_mut().create_element("button");
        set_class(&mut doc, panel, "nav-panel");
        set_class(&mut doc, toggle, "nav-panel-toggle");
        let root = doc.tree().root();
        doc.tree_mut().append_child(root, panel);
        doc.tree_mut().append_child(panel, toggle);
        (doc, panel, toggle)
    }

    #[test]
    fn test_lookups_tolerate_absence() {
        let locator = PanelLocator::default();
        let doc = Document::new();
        assert_eq!(locator.find_panel(&doc), None);
        assert_eq!(locator.find_toggle(&doc), None);
        assert!(locator.find_guards(&doc).is_empty());
        assert_eq!(locator.panel_state(&doc), PanelState::Unknown);
    }

    #[test]
    fn test_finds_panel_and_toggle() {
        let locator = PanelLocator::default();
        let (doc, panel, toggle) = demo_doc();
        assert_eq!(locator.find_panel(&doc), Some(panel));
        assert_eq!(locator.find_toggle(&doc), Some(toggle));
        assert_eq!(locator.panel_state(&doc), PanelState::Expanded);
    }

    #[test]
    fn test_collapsed_state() {
        let locator = PanelLocator::default();
        let (mut doc, panel, _) = demo_doc();
        set_class(&mut doc, panel, "nav-panel collapsed");
        assert_eq!(locator.panel_state(&doc), PanelState::Collapsed);
    }

    #[test]
    fn test_zero_sized_guard_not_significant() {
        let locator = PanelLocator::default();
        let (mut doc, panel, _) = demo_doc();
        let picker = doc.tree_mut().create_element("div");
        set_class(&mut doc, picker, "color-picker");
        doc.tree_mut().append_child(panel, picker);

        // Present in markup but unmeasured: not a guard
        assert!(locator.find_guards(&doc).is_empty());

        doc.set_rect(picker, Rect::from_xywh(20.0, 20.0, 200.0, 150.0));
        assert_eq!(locator.find_guards(&doc), vec![picker]);
    }

    #[test]
    fn test_pinned_detection() {
        let locator = PanelLocator::default();
        let (mut doc, panel, _) = demo_doc();
        assert!(!locator.panel_pinned(&doc));
        set_class(&mut doc, panel, "nav-panel pinned-open");
        assert!(locator.panel_pinned(&doc));
    }
}
