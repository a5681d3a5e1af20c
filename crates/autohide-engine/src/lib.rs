//! autohide engine
//!
//! Watches a host-page navigation panel, infers show/hide intent from
//! pointer hover behavior, and triggers the panel's own toggle control
//! without ever fighting the user's explicit actions or interactions
//! the host page itself is performing.
//!
//! Everything runs on the host's single cooperative turn model: the
//! embedder routes pointer events, mutation batches, clock ticks, and
//! the teardown signal into an [`AutoHideEngine`]; the engine's only
//! externally observable effect is a synthetic activation dispatched
//! at the toggle control.

mod actuator;
mod controller;
mod engine;
mod guard;
mod intent;
mod locator;
mod settings;

pub use actuator::ToggleActuator;
pub use controller::{Controller, Lifecycle};
pub use engine::AutoHideEngine;
pub use guard::GuardEvaluator;
pub use intent::{Direction, HoverIntent, IntentRecognizer, T_COLLAPSE, T_EXPAND};
pub use locator::{PanelLocator, PanelState, Selectors};
pub use settings::{
    AUTO_HIDE_KEY, ConfigChange, ConfigError, ConfigStore, MemoryStore, SettingValue,
    SettingsGate,
};
