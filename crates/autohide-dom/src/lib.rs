//! autohide DOM - Host-page substrate
//!
//! The slice of the host page the automation engine can observe:
//! an arena DOM tree, element class lists, measured bounding geometry,
//! pointer/lifecycle events, and child-list mutation records.

mod document;
mod events;
mod geometry;
mod node;
mod tree;

pub use document::Document;
pub use events::{ListenerId, ListenerRegistry, PageSignal, PointerEvent, PointerKind};
pub use geometry::Rect;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::{Children, DomTree, MutationRecord};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Check that this id refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
