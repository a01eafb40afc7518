//! Per-appliance automation state machine.
//!
//! One `AutomationState` exists per actively automated press. The machine
//! has two states: idle (`active == false`, no listener) and running
//! (`active == true`, listener subscribed). Each tick either advances the
//! emulated hold and forwards a synthetic step, or finishes: deactivates,
//! cancels the listener, and tells the caller to drop the entry.

use press_world::{ApplianceId, ListenerId, OperatorId, PressSection, PressWorld, TickScheduler};
use tracing::{debug, warn};

/// What a tick did to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Guard fired: not running, or the target no longer resolves.
    Skipped,
    /// Hold time advanced and a step was forwarded.
    Stepped,
    /// Reached terminal state; the registry entry should be removed.
    Finished,
}

/// Automation state for one press.
///
/// Invariant between operations: `active` exactly when a listener handle
/// is stored.
#[derive(Debug)]
pub struct AutomationState {
    active: bool,
    seconds_active: f32,
    operator: OperatorId,
    target: ApplianceId,
    listener: Option<ListenerId>,
}

impl AutomationState {
    pub fn new(target: ApplianceId, operator: OperatorId) -> Self {
        Self {
            active: false,
            seconds_active: 0.0,
            operator,
            target,
            listener: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Accumulated emulated hold time, in seconds.
    pub fn seconds_active(&self) -> f32 {
        self.seconds_active
    }

    pub fn target(&self) -> ApplianceId {
        self.target
    }

    pub fn operator(&self) -> OperatorId {
        self.operator
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    /// Marks the state running for `operator`, resetting progress.
    ///
    /// Callers must check [`is_active`](Self::is_active) first; activation
    /// while already running is handled as a no-op one level up.
    pub(crate) fn begin(&mut self, operator: OperatorId) {
        self.active = true;
        self.seconds_active = 0.0;
        self.operator = operator;
    }

    pub(crate) fn attach_listener(&mut self, listener: ListenerId) {
        self.listener = Some(listener);
    }

    /// Advances the machine by one tick.
    ///
    /// While `seconds_active` is under `max_active_seconds` and the press
    /// has not finished compressing on its own, the hold advances by `dt`
    /// and one synthetic step is forwarded. Otherwise the machine goes
    /// terminal: it deactivates and cancels its listener, leaving entry
    /// removal to the caller. The cap comparison is strict, so the final
    /// step may carry up to the cap plus one tick's delta.
    pub(crate) fn tick(
        &mut self,
        dt: f32,
        world: &mut dyn PressWorld,
        scheduler: &mut dyn TickScheduler,
        max_active_seconds: f32,
    ) -> TickOutcome {
        if !self.active {
            return TickOutcome::Skipped;
        }
        if !world.appliance_exists(self.target) {
            // Cleanup raced this tick; the broken hook does the real work.
            warn!("tick for stale {}, skipping", self.target);
            return TickOutcome::Skipped;
        }

        if self.seconds_active < max_active_seconds && !world.compress_finished(self.target) {
            self.seconds_active += dt;
            world.step_interaction(
                self.target,
                self.seconds_active,
                self.operator,
                PressSection::Screw,
            );
            TickOutcome::Stepped
        } else {
            debug!(
                "automation finished for {} after {:.2}s",
                self.target, self.seconds_active
            );
            self.active = false;
            if let Some(listener) = self.listener.take() {
                scheduler.cancel_recurring(listener);
            }
            TickOutcome::Finished
        }
    }

    /// Forces the machine terminal, cancelling the listener if one exists.
    /// Safe to call in any state.
    pub(crate) fn deactivate(&mut self, scheduler: &mut dyn TickScheduler) {
        self.active = false;
        if let Some(listener) = self.listener.take() {
            scheduler.cancel_recurring(listener);
        }
    }
}
