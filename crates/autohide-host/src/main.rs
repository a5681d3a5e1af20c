//! autohide host simulator - Main Entry Point
//!
//! Builds a demo page, installs the engine, and replays a scripted
//! hover session with a stepped clock so the whole pipeline runs end
//! to end without a real browser.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use autohide_dom::{Document, NodeId, PointerEvent, Rect};
use autohide_engine::{
    AUTO_HIDE_KEY, AutoHideEngine, MemoryStore, Selectors, SettingValue,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    info!("starting autohide host simulator");

    let mut page = HostPage::build();
    let mut store = MemoryStore::new();
    store.set(AUTO_HIDE_KEY, SettingValue::Bool(true));

    let mut engine = AutoHideEngine::new(store, Selectors::default());
    engine.attach(&mut page.doc);

    let t0 = Instant::now();

    // The user's pointer brushes the panel and leaves quickly: no action.
    page.pointer(&mut engine, PointerEvent::enter(page.panel), t0);
    page.tick(&mut engine, t0 + ms(150));
    page.pointer(&mut engine, PointerEvent::leave(page.panel), t0 + ms(150));
    page.tick(&mut engine, t0 + ms(700));
    info!(toggles = page.toggle_count(), "after brush-past");

    // The pointer leaves and stays away: the panel collapses.
    page.pointer(&mut engine, PointerEvent::leave(page.panel), t0 + ms(800));
    page.tick(&mut engine, t0 + ms(1_400));
    info!(toggles = page.toggle_count(), "after settled leave");

    // A color picker opens inside the panel; the next leave is ignored.
    page.open_picker();
    page.pointer(&mut engine, PointerEvent::enter(page.panel), t0 + ms(1_500));
    page.tick(&mut engine, t0 + ms(1_900));
    page.pointer(&mut engine, PointerEvent::leave(page.panel), t0 + ms(2_000));
    page.tick(&mut engine, t0 + ms(2_700));
    info!(toggles = page.toggle_count(), "with picker open");

    // Picker closed: the deferred behavior works again.
    page.close_picker();
    page.pointer(&mut engine, PointerEvent::leave(page.panel), t0 + ms(2_800));
    page.tick(&mut engine, t0 + ms(3_400));
    info!(toggles = page.toggle_count(), "after picker closed");

    // Navigation away tears everything down.
    engine.on_teardown(&mut page.doc);
    info!("page unloaded, engine stopped");

    Ok(())
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Demo page: a nav panel with its toggle and an optional color picker
struct HostPage {
    doc: Document,
    panel: NodeId,
    toggle: NodeId,
    picker: NodeId,
    /// Activations already applied to the panel's class list
    applied: usize,
}

impl HostPage {
    fn build() -> Self {
        let mut doc = Document::new();
        let panel = doc.tree_mut().create_element("aside");
        let toggle = doc.tree_mut().create_element("button");
        let picker = doc.tree_mut().create_element("div");
        set_class(&mut doc, panel, "nav-panel");
        set_class(&mut doc, toggle, "nav-panel-toggle");
        set_class(&mut doc, picker, "color-picker");

        let root = doc.tree().root();
        doc.tree_mut().append_child(root, panel);
        doc.tree_mut().append_child(panel, toggle);
        doc.set_rect(panel, Rect::from_xywh(0.0, 0.0, 240.0, 800.0));
        doc.set_rect(toggle, Rect::from_xywh(8.0, 8.0, 24.0, 24.0));

        Self { doc, panel, toggle, picker, applied: 0 }
    }

    /// Route a pointer event, then apply any resulting activations
    fn pointer(&mut self, engine: &mut AutoHideEngine<MemoryStore>, ev: PointerEvent, now: Instant) {
        engine.on_pointer(&self.doc, &ev, now);
        self.settle(engine, now);
    }

    /// Advance the clock and apply any resulting activations
    fn tick(&mut self, engine: &mut AutoHideEngine<MemoryStore>, now: Instant) {
        engine.on_tick(&mut self.doc, now);
        self.settle(engine, now);
    }

    /// Host-side bookkeeping after each turn: deliver mutation batches
    /// and apply the toggle's click behavior
    fn settle(&mut self, engine: &mut AutoHideEngine<MemoryStore>, _now: Instant) {
        if self.doc.tree().has_pending_mutations() {
            self.doc.take_mutations();
            engine.on_mutations(&mut self.doc);
        }
        while self.applied < self.doc.activations_at(self.toggle) {
            self.flip_panel();
            self.applied += 1;
        }
    }

    /// The toggle's click handler: flip the collapsed class
    fn flip_panel(&mut self) {
        let panel = self.panel;
        let elem = self
            .doc
            .tree_mut()
            .get_mut(panel)
            .unwrap()
            .as_element_mut()
            .unwrap();
        if elem.has_class("collapsed") {
            elem.remove_class("collapsed");
        } else {
            elem.add_class("collapsed");
        }
    }

    fn open_picker(&mut self) {
        let panel = self.panel;
        let picker = self.picker;
        self.doc.tree_mut().append_child(panel, picker);
        self.doc.set_rect(picker, Rect::from_xywh(16.0, 40.0, 200.0, 160.0));
    }

    fn close_picker(&mut self) {
        let picker = self.picker;
        self.doc.tree_mut().detach(picker);
    }

    fn toggle_count(&self) -> usize {
        self.doc.activations_at(self.toggle)
    }
}

fn set_class(doc: &mut Document, node: NodeId, class: &str) {
    doc.tree_mut()
        .get_mut(node)
        .unwrap()
        .as_element_mut()
        .unwrap()
        .set_attr("class", class);
}
