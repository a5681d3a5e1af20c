//! Document - High-level document API
//!
//! Owns the tree plus everything the engine reads from the host page:
//! measured rects, the listener registry, and the activation log that
//! records synthetic activations dispatched at elements.

use std::collections::HashMap;

use tracing::debug;

use crate::{DomTree, ListenerRegistry, MutationRecord, NodeId, Rect};

/// Host-page document
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Measured bounding rects, written by the host's layout
    rects: HashMap<NodeId, Rect>,
    /// Pointer listener registry
    listeners: ListenerRegistry,
    /// Synthetic activations dispatched this session, oldest first
    activations: Vec<NodeId>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            tree: DomTree::new(),
            rects: HashMap::new(),
            listeners: ListenerRegistry::new(),
            activations: Vec::new(),
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Access the listener registry
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Access the listener registry mutably
    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element(self.tree.root(), &|elem| elem.id.as_deref() == Some(id))
    }

    /// First connected element carrying a class
    pub fn first_element_with_class(&self, class: &str) -> Option<NodeId> {
        self.find_element(self.tree.root(), &|elem| elem.has_class(class))
    }

    /// All connected elements carrying a class, in tree order
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements(self.tree.root(), class, &mut out);
        out
    }

    fn find_element(
        &self,
        start: NodeId,
        pred: &dyn Fn(&crate::ElementData) -> bool,
    ) -> Option<NodeId> {
        for (node_id, node) in self.tree.children(start) {
            if let Some(elem) = node.as_element() {
                if pred(elem) {
                    return Some(node_id);
                }
            }
            if let Some(found) = self.find_element(node_id, pred) {
                return Some(found);
            }
        }
        None
    }

    fn collect_elements(&self, start: NodeId, class: &str, out: &mut Vec<NodeId>) {
        for (node_id, node) in self.tree.children(start) {
            if let Some(elem) = node.as_element() {
                if elem.has_class(class) {
                    out.push(node_id);
                }
            }
            self.collect_elements(node_id, class, out);
        }
    }

    /// Record a measured rect for a node
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
    }

    /// Measured bounding rect; unmeasured nodes report zero size
    pub fn bounding_rect(&self, node: NodeId) -> Rect {
        self.rects.get(&node).copied().unwrap_or_default()
    }

    /// Dispatch a synthetic activation (click) at an element
    ///
    /// The host page owns the element's behavior; the document only
    /// records that the activation happened.
    pub fn dispatch_activation(&mut self, node: NodeId) {
        debug!(node = node.0, "synthetic activation dispatched");
        self.activations.push(node);
    }

    /// Number of activations dispatched so far
    pub fn activation_count(&self) -> usize {
        self.activations.len()
    }

    /// Activations dispatched at a specific element
    pub fn activations_at(&self, node: NodeId) -> usize {
        self.activations.iter().filter(|&&n| n == node).count()
    }

    /// Drain pending child-list mutation records
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        self.tree.take_mutations()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_panel() -> (Document, NodeId) {
        let mut doc = Document::new();
        let panel = doc.tree_mut().create_element("aside");
        doc.tree_mut()
            .get_mut(panel)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("class", "nav-panel");
        let root = doc.tree().root();
        doc.tree_mut().append_child(root, panel);
        (doc, panel)
    }

    #[test]
    fn test_class_query() {
        let (doc, panel) = doc_with_panel();
        assert_eq!(doc.first_element_with_class("nav-panel"), Some(panel));
        assert_eq!(doc.first_element_with_class("missing"), None);
        assert_eq!(doc.elements_with_class("nav-panel"), vec![panel]);
    }

    #[test]
    fn test_detached_elements_not_found() {
        let (mut doc, panel) = doc_with_panel();
        doc.tree_mut().detach(panel);
        assert_eq!(doc.first_element_with_class("nav-panel"), None);
    }

    #[test]
    fn test_unmeasured_rect_is_empty() {
        let (mut doc, panel) = doc_with_panel();
        assert!(doc.bounding_rect(panel).is_empty());
        doc.set_rect(panel, Rect::from_xywh(0.0, 0.0, 240.0, 800.0));
        assert!(!doc.bounding_rect(panel).is_empty());
    }

    #[test]
    fn test_activation_log() {
        let (mut doc, panel) = doc_with_panel();
        assert_eq!(doc.activation_count(), 0);
        doc.dispatch_activation(panel);
        doc.dispatch_activation(panel);
        assert_eq!(doc.activations_at(panel), 2);
    }
}
