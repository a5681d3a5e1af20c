//! Hover intent recognition
//!
//! Debounces raw pointer enter/leave events into a stable "settle"
//! signal. Three states, one cancellable timer: starting any new
//! timer cancels the prior one, so two timers can never race.

use std::time::{Duration, Instant};

use tracing::trace;

/// Settle window before a hover implies "expand"
pub const T_EXPAND: Duration = Duration::from_millis(300);

/// Settle window before a hover-out implies "collapse"
pub const T_COLLAPSE: Duration = Duration::from_millis(500);

/// Direction of a recognized intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Expand,
    Collapse,
}

/// The single pending settle timer
#[derive(Debug, Clone, Copy)]
pub struct HoverIntent {
    pub direction: Direction,
    pub deadline: Instant,
}

/// Pointer-intent state machine
///
/// `Idle` when `pending` is `None`; `PendingExpand` or
/// `PendingCollapse` per the pending intent's direction.
#[derive(Debug)]
pub struct IntentRecognizer {
    pending: Option<HoverIntent>,
    t_expand: Duration,
    t_collapse: Duration,
}

impl IntentRecognizer {
    pub fn new() -> Self {
        Self::with_windows(T_EXPAND, T_COLLAPSE)
    }

    /// Construct with custom settle windows (tests tune these)
    pub fn with_windows(t_expand: Duration, t_collapse: Duration) -> Self {
        Self { pending: None, t_expand, t_collapse }
    }

    /// The pending intent, if any
    pub fn pending(&self) -> Option<&HoverIntent> {
        self.pending.as_ref()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Pointer entered the panel
    pub fn pointer_enter(&mut self, now: Instant) {
        match self.pending {
            // Hover-out never settled: cancel, no action
            Some(HoverIntent { direction: Direction::Collapse, .. }) => {
                trace!("pending collapse cancelled by re-enter");
                self.pending = None;
            }
            // Already waiting to expand: keep the original deadline
            Some(HoverIntent { direction: Direction::Expand, .. }) => {}
            None => {
                trace!("expand settle timer started");
                self.pending = Some(HoverIntent {
                    direction: Direction::Expand,
                    deadline: now + self.t_expand,
                });
            }
        }
    }

    /// Pointer left the panel
    ///
    /// `may_collapse` is the guard predicate evaluated at this moment;
    /// when it is false no collapse timer is started at all.
    pub fn pointer_leave(&mut self, now: Instant, may_collapse: bool) {
        match self.pending {
            // Hover pass-through that never settled: cancel, no action
            Some(HoverIntent { direction: Direction::Expand, .. }) => {
                trace!("pending expand cancelled by pass-through");
                self.pending = None;
            }
            Some(HoverIntent { direction: Direction::Collapse, .. }) => {}
            None => {
                if may_collapse {
                    trace!("collapse settle timer started");
                    self.pending = Some(HoverIntent {
                        direction: Direction::Collapse,
                        deadline: now + self.t_collapse,
                    });
                } else {
                    trace!("leave ignored: collapse not permitted");
                }
            }
        }
    }

    /// Take the settled intent if its deadline has passed
    ///
    /// Callers re-check panel state (and the guard, for collapse)
    /// before acting on the returned direction.
    pub fn poll(&mut self, now: Instant) -> Option<Direction> {
        let intent = self.pending?;
        if now < intent.deadline {
            return None;
        }
        self.pending = None;
        Some(intent.direction)
    }

    /// Cancel any pending intent
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            trace!("pending intent cancelled");
        }
    }
}

impl Default for IntentRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
