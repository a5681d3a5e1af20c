//! Events
//!
//! Pointer events, page lifecycle signals, and the listener registry
//! event targets use to track subscriptions.

use crate::NodeId;

/// Pointer event types the engine cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Enter,
    Leave,
}

/// Pointer event
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Element the pointer entered or left
    pub target: NodeId,
}

impl PointerEvent {
    pub fn enter(target: NodeId) -> Self {
        Self { kind: PointerKind::Enter, target }
    }

    pub fn leave(target: NodeId) -> Self {
        Self { kind: PointerKind::Leave, target }
    }
}

/// Page lifecycle signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    /// Page is being discarded (navigation or close)
    Unload,
}

/// Listener identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Registered listener entry
#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    target: NodeId,
    kind: PointerKind,
}

/// Listener registry
///
/// Bookkeeping only; delivery is the embedder's job. Stable ids make
/// attach/detach exactly-once verifiable.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
    next_id: u32,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for a (target, kind) pair
    pub fn add(&mut self, target: NodeId, kind: PointerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, target, kind });
        id
    }

    /// Remove a listener by id (no-op if already removed)
    pub fn remove(&mut self, id: ListenerId) {
        self.listeners.retain(|l| l.id != id);
    }

    /// Check whether a listener id is still registered
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Count listeners registered for a (target, kind) pair
    pub fn count(&self, target: NodeId, kind: PointerKind) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    /// Total registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Check whether an event would be delivered to any listener
    pub fn matches(&self, event: &PointerEvent) -> bool {
        self.listeners
            .iter()
            .any(|l| l.target == event.target && l.kind == event.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut reg = ListenerRegistry::new();
        let node = NodeId::ROOT;

        let a = reg.add(node, PointerKind::Enter);
        let b = reg.add(node, PointerKind::Leave);
        assert_eq!(reg.count(node, PointerKind::Enter), 1);
        assert!(reg.matches(&PointerEvent::enter(node)));

        reg.remove(a);
        assert!(!reg.contains(a));
        assert!(reg.contains(b));
        assert!(!reg.matches(&PointerEvent::enter(node)));

        // Removing twice is harmless
        reg.remove(a);
        assert_eq!(reg.len(), 1);
    }
}
