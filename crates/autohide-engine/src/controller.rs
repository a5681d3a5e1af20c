//! Controller
//!
//! Owns the engine lifecycle and the single pending hover intent.
//! Attaches pointer listeners once the panel is locatable, retries via
//! child-list mutation watching until then, and guarantees that entry
//! to `Stopped` cancels every pending timer in the same turn.

use autohide_dom::{Document, ListenerId, NodeId, PointerEvent, PointerKind};
use tracing::debug;

use crate::actuator::ToggleActuator;
use crate::guard::GuardEvaluator;
use crate::intent::{Direction, IntentRecognizer};
use crate::locator::{PanelLocator, PanelState};

use std::time::Instant;

/// Engine lifecycle: exactly two phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No listeners attached, no timers pending
    Stopped,
    /// Listeners attached (or being awaited via mutation watching)
    Running,
}

/// Wires intent recognition, guard evaluation, and actuation together
pub struct Controller {
    locator: PanelLocator,
    guard: GuardEvaluator,
    actuator: ToggleActuator,
    intent: IntentRecognizer,
    lifecycle: Lifecycle,
    /// Panel the listeners are attached to, NONE while unattached
    panel: NodeId,
    listeners: Vec<ListenerId>,
    /// Watching child-list mutations for the panel to appear
    watching: bool,
}

impl Controller {
    pub fn new(locator: PanelLocator, intent: IntentRecognizer) -> Self {
        Self {
            locator,
            guard: GuardEvaluator::new(),
            actuator: ToggleActuator::new(),
            intent,
            lifecycle: Lifecycle::Stopped,
            panel: NodeId::NONE,
            listeners: Vec::new(),
            watching: false,
        }
    }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn locator(&self) -> &PanelLocator {
        &self.locator
    }

    /// Start the engine (no-op if already running)
    ///
    /// If the panel is not yet rendered, the controller watches
    /// mutations and attaches as soon as it appears.
    pub fn start(&mut self, doc: &mut Document) {
        if self.lifecycle == Lifecycle::Running {
            return;
        }
        debug!("controller starting");
        self.lifecycle = Lifecycle::Running;
        if !self.try_attach(doc) {
            self.watching = true;
        }
    }

    /// Stop the engine (no-op if already stopped)
    ///
    /// Cancels the pending intent and detaches all listeners in the
    /// same synchronous turn; nothing can fire afterwards.
    pub fn stop(&mut self, doc: &mut Document) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        debug!("controller stopping");
        self.intent.cancel();
        self.detach(doc);
        self.watching = false;
        self.lifecycle = Lifecycle::Stopped;
    }

    /// Page teardown: always stops, regardless of the enable flag
    pub fn on_teardown(&mut self, doc: &mut Document) {
        self.stop(doc);
    }

    /// Pointer event delivery
    pub fn on_pointer(&mut self, doc: &Document, event: &PointerEvent, now: Instant) {
        if self.lifecycle != Lifecycle::Running || event.target != self.panel {
            return;
        }
        match event.kind {
            PointerKind::Enter => self.intent.pointer_enter(now),
            PointerKind::Leave => {
                // First guard check, at the moment the leave occurs
                let may = self.guard.may_collapse(&self.locator, doc);
                self.intent.pointer_leave(now, may);
            }
        }
    }

    /// Mutation batch delivery: retry panel attachment, or re-arm
    /// watching if the panel was removed out from under us
    pub fn on_mutations(&mut self, doc: &mut Document) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        if self.panel.is_valid() && !doc.tree().is_connected(self.panel) {
            debug!("panel disconnected, resuming watch");
            self.intent.cancel();
            self.detach(doc);
            self.watching = true;
        }
        if self.watching && self.try_attach(doc) {
            self.watching = false;
        }
    }

    /// Fire the pending intent if its settle window has elapsed
    ///
    /// Both directions re-check the *current* document before
    /// actuating; a failed re-check discards the intent silently.
    pub fn on_tick(&mut self, doc: &mut Document, now: Instant) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        let Some(direction) = self.intent.poll(now) else {
            return;
        };
        match direction {
            Direction::Expand => {
                // Idempotence: only expand a panel that is still collapsed
                if self.locator.panel_state(doc) == PanelState::Collapsed {
                    self.actuator.toggle(&self.locator, doc);
                } else {
                    debug!("expand discarded: panel no longer collapsed");
                }
            }
            Direction::Collapse => {
                // Second, authoritative guard check at fire time
                let permitted = self.guard.may_collapse(&self.locator, doc)
                    && self.locator.panel_state(doc) == PanelState::Expanded;
                if permitted {
                    self.actuator.toggle(&self.locator, doc);
                } else {
                    debug!("collapse discarded at fire time");
                }
            }
        }
    }

    /// Whether a settle timer is currently pending
    pub fn has_pending_intent(&self) -> bool {
        !self.intent.is_idle()
    }

    fn try_attach(&mut self, doc: &mut Document) -> bool {
        debug_assert!(self.listeners.is_empty());
        let Some(panel) = self.locator.find_panel(doc) else {
            return false;
        };
        let enter = doc.listeners_mut().add(panel, PointerKind::Enter);
        let leave = doc.listeners_mut().add(panel, PointerKind::Leave);
        self.listeners = vec![enter, leave];
        self.panel = panel;
        debug!(panel = ?panel, "pointer listeners attached");
        true
    }

    fn detach(&mut self, doc: &mut Document) {
        for id in self.listeners.drain(..) {
            doc.listeners_mut().remove(id);
        }
        self.panel = NodeId::NONE;
    }
}
