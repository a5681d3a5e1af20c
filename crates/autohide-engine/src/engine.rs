//! Engine facade
//!
//! Explicitly constructed wiring of the settings gate and controller.
//! No globals: tests build as many independent engines as they like.

use autohide_dom::{Document, PointerEvent};
use tracing::debug;

use crate::controller::{Controller, Lifecycle};
use crate::intent::IntentRecognizer;
use crate::locator::{PanelLocator, Selectors};
use crate::settings::{ConfigChange, ConfigStore, SettingsGate};

use std::time::Instant;

/// The embedded visibility-automation engine
pub struct AutoHideEngine<S: ConfigStore> {
    store: S,
    gate: SettingsGate,
    controller: Controller,
}

impl<S: ConfigStore> AutoHideEngine<S> {
    pub fn new(store: S, selectors: Selectors) -> Self {
        Self {
            store,
            gate: SettingsGate::new(),
            controller: Controller::new(PanelLocator::new(selectors), IntentRecognizer::new()),
        }
    }

    /// Access the configuration store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the configuration store mutably
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.controller.lifecycle()
    }

    /// Install the engine into a page: reads the flag and starts if
    /// enabled. An unreadable store leaves the engine stopped.
    pub fn attach(&mut self, doc: &mut Document) {
        if self.gate.read(&self.store) {
            self.controller.start(doc);
        } else {
            debug!("auto-hide disabled, engine not started");
        }
    }

    /// Configuration change notification from the store's subscription
    pub fn on_config_change(&mut self, change: &ConfigChange, doc: &mut Document) {
        match self.gate.relevant(change) {
            Some(true) => self.controller.start(doc),
            Some(false) => self.controller.stop(doc),
            None => {}
        }
    }

    /// Pointer event routed from the host page
    pub fn on_pointer(&mut self, doc: &Document, event: &PointerEvent, now: Instant) {
        self.controller.on_pointer(doc, event, now);
    }

    /// Child-list mutation batch from the host page
    pub fn on_mutations(&mut self, doc: &mut Document) {
        self.controller.on_mutations(doc);
    }

    /// Clock tick: fires any settled intent
    pub fn on_tick(&mut self, doc: &mut Document, now: Instant) {
        self.controller.on_tick(doc, now);
    }

    /// Page teardown signal: always stops, regardless of the flag
    pub fn on_teardown(&mut self, doc: &mut Document) {
        self.controller.on_teardown(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MemoryStore, SettingValue, AUTO_HIDE_KEY};
    use autohide_dom::{NodeId, PointerKind, Rect};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn set_class(doc: &mut Document, node: NodeId, class: &str) {
        doc.tree_mut()
            .get_mut(node)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("class", class);
    }

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let panel = doc.tree_mut().create_element("aside");
        let toggle = doc.tree_mut().create_element("button");
        set_class(&mut doc, panel, "nav-panel");
        set_class(&mut doc, toggle, "nav-panel-toggle");
        let root = doc.tree().root();
        doc.tree_mut().append_child(root, panel);
        doc.tree_mut().append_child(panel, toggle);
        doc.set_rect(panel, Rect::from_xywh(0.0, 0.0, 240.0, 800.0));
        (doc, panel, toggle)
    }

    fn enabled_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(AUTO_HIDE_KEY, SettingValue::Bool(true));
        store
    }

    #[test]
    fn test_disabled_flag_attaches_nothing() {
        // Scenario C
        let (mut doc, panel, toggle) = page();
        let mut engine = AutoHideEngine::new(MemoryStore::new(), Selectors::default());
        engine.attach(&mut doc);

        assert_eq!(engine.lifecycle(), Lifecycle::Stopped);
        assert!(doc.listeners().is_empty());

        let t0 = Instant::now();
        engine.on_pointer(&doc, &PointerEvent::leave(panel), t0);
        engine.on_tick(&mut doc, t0 + ms(2_000));
        assert_eq!(doc.activations_at(toggle), 0);
    }

    #[test]
    fn test_enabled_flag_runs_engine() {
        let (mut doc, panel, toggle) = page();
        let mut engine = AutoHideEngine::new(enabled_store(), Selectors::default());
        engine.attach(&mut doc);
        assert_eq!(engine.lifecycle(), Lifecycle::Running);

        let t0 = Instant::now();
        engine.on_pointer(&doc, &PointerEvent::leave(panel), t0);
        engine.on_tick(&mut doc, t0 + ms(600));
        assert_eq!(doc.activations_at(toggle), 1);
    }

    #[test]
    fn test_flag_change_stops_and_restarts() {
        let (mut doc, panel, _) = page();
        let mut engine = AutoHideEngine::new(enabled_store(), Selectors::default());
        engine.attach(&mut doc);

        let off = engine.store_mut().set(AUTO_HIDE_KEY, SettingValue::Bool(false));
        engine.on_config_change(&off, &mut doc);
        assert_eq!(engine.lifecycle(), Lifecycle::Stopped);
        assert!(doc.listeners().is_empty());

        let on = engine.store_mut().set(AUTO_HIDE_KEY, SettingValue::Bool(true));
        engine.on_config_change(&on, &mut doc);
        assert_eq!(engine.lifecycle(), Lifecycle::Running);
        assert_eq!(doc.listeners().count(panel, PointerKind::Enter), 1);
    }

    #[test]
    fn test_unrelated_change_does_not_stop() {
        let (mut doc, _, _) = page();
        let mut engine = AutoHideEngine::new(enabled_store(), Selectors::default());
        engine.attach(&mut doc);

        let change = engine.store_mut().set("theme.dark", SettingValue::Bool(false));
        engine.on_config_change(&change, &mut doc);
        assert_eq!(engine.lifecycle(), Lifecycle::Running);
    }

    #[test]
    fn test_disable_mid_window_cancels_timer() {
        let (mut doc, panel, toggle) = page();
        let mut engine = AutoHideEngine::new(enabled_store(), Selectors::default());
        engine.attach(&mut doc);

        let t0 = Instant::now();
        engine.on_pointer(&doc, &PointerEvent::leave(panel), t0);

        let off = engine.store_mut().set(AUTO_HIDE_KEY, SettingValue::Bool(false));
        engine.on_config_change(&off, &mut doc);

        engine.on_tick(&mut doc, t0 + ms(2_000));
        assert_eq!(doc.activations_at(toggle), 0);
    }

    #[test]
    fn test_independent_engines() {
        let (mut doc_a, panel_a, toggle_a) = page();
        let (mut doc_b, _, toggle_b) = page();
        let mut engine_a = AutoHideEngine::new(enabled_store(), Selectors::default());
        let mut engine_b = AutoHideEngine::new(MemoryStore::new(), Selectors::default());
        engine_a.attach(&mut doc_a);
        engine_b.attach(&mut doc_b);

        let t0 = Instant::now();
        engine_a.on_pointer(&doc_a, &PointerEvent::leave(panel_a), t0);
        engine_a.on_tick(&mut doc_a, t0 + ms(600));
        assert_eq!(doc_a.activations_at(toggle_a), 1);
        assert_eq!(doc_b.activations_at(toggle_b), 0);
    }

    #[test]
    fn test_teardown_with_flag_still_enabled() {
        let (mut doc, _, _) = page();
        let mut engine = AutoHideEngine::new(enabled_store(), Selectors::default());
        engine.attach(&mut doc);

        engine.on_teardown(&mut doc);
        assert_eq!(engine.lifecycle(), Lifecycle::Stopped);
        assert!(doc.listeners().is_empty());
    }
}
