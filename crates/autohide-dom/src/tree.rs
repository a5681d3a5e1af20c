//! DOM Tree (arena-based allocation)
//!
//! Structural mutations append child-list records to a pending log so
//! observers can react to nodes appearing or disappearing.

use crate::{Node, NodeId};

/// Child-list mutation record
#[derive(Debug, Clone)]
pub struct MutationRecord {
    /// Parent whose child list changed
    pub target: NodeId,
    /// Nodes added under the target
    pub added_nodes: Vec<NodeId>,
    /// Nodes removed from under the target
    pub removed_nodes: Vec<NodeId>,
}

/// Arena-based DOM tree
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
    pending_mutations: Vec<MutationRecord>,
}

impl DomTree {
    /// Create a tree containing only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            pending_mutations: Vec::new(),
        }
    }

    /// Root node id
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena (detached nodes included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree holds only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Allocate a new element node, initially detached
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Allocate a new text node, initially detached
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content.to_string()))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append a detached node as the last child of a parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.get(child).is_some_and(|n| !n.parent.is_valid()));

        let prev_last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }
        if prev_last.is_valid() {
            self.nodes[prev_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;

        self.pending_mutations.push(MutationRecord {
            target: parent,
            added_nodes: vec![child],
            removed_nodes: Vec::new(),
        });
    }

    /// Detach a node from its parent (node stays in the arena)
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let parent = node.parent;
        if !parent.is_valid() {
            return;
        }
        let prev = node.prev_sibling;
        let next = node.next_sibling;

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }
        {
            let node = &mut self.nodes[id.0 as usize];
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }

        self.pending_mutations.push(MutationRecord {
            target: parent,
            added_nodes: Vec::new(),
            removed_nodes: vec![id],
        });
    }

    /// Iterate direct children of a node
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next: first }
    }

    /// Check whether a node is connected to the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        while current.is_valid() {
            if current == NodeId::ROOT {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Drain pending child-list mutation records
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.pending_mutations)
    }

    /// Check if any mutation records are pending
    pub fn has_pending_mutations(&self) -> bool {
        !self.pending_mutations.is_empty()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
