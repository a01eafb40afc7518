//! Owned table from appliance id to automation state.
//!
//! At most one entry per appliance. Entries are created on activation and
//! removed on exactly three paths: the tick machine finishing, the
//! emergency unscrew, and the appliance-broken notification. Removal is
//! proactive on all three so a later activation never reuses stale state.

use std::collections::HashMap;

use press_world::{ApplianceId, OperatorId, PressSection, PressWorld, TickMessage, TickScheduler};
use tracing::debug;

use crate::config::AutomationConfig;
use crate::state::{AutomationState, TickOutcome};

#[derive(Debug, Default)]
pub struct AutomationRegistry {
    entries: HashMap<ApplianceId, AutomationState>,
}

impl AutomationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts automation for `id`, mirroring what a manual engagement
    /// would have done.
    ///
    /// Idempotent while running: a second activation leaves progress and
    /// the subscription untouched and returns false. Otherwise the entry
    /// is (re)armed, the press gets one synthetic begin call, and a
    /// recurring tick is subscribed unless a live handle is already
    /// stored.
    pub fn activate(
        &mut self,
        id: ApplianceId,
        operator: OperatorId,
        world: &mut dyn PressWorld,
        scheduler: &mut dyn TickScheduler,
        config: &AutomationConfig,
    ) -> bool {
        if self.entries.get(&id).is_some_and(AutomationState::is_active) {
            debug!("automation already running for {id}, ignoring activation");
            return false;
        }

        let state = self
            .entries
            .entry(id)
            .or_insert_with(|| AutomationState::new(id, operator));
        state.begin(operator);
        world.begin_interaction(id, operator, PressSection::Screw, true);
        if state.listener().is_none() {
            let listener = scheduler.schedule_recurring(id, config.tick_period());
            state.attach_listener(listener);
        }
        debug!("automation started for {id}");
        true
    }

    /// Drives the state machine for one delivered tick.
    ///
    /// A tick for an appliance without an entry is a safe no-op; that
    /// happens when a message was already in flight while the entry was
    /// torn down.
    pub fn dispatch_tick(
        &mut self,
        msg: TickMessage,
        world: &mut dyn PressWorld,
        scheduler: &mut dyn TickScheduler,
        config: &AutomationConfig,
    ) -> TickOutcome {
        let Some(state) = self.entries.get_mut(&msg.appliance) else {
            return TickOutcome::Skipped;
        };
        let outcome = state.tick(msg.dt_seconds, world, scheduler, config.max_active_seconds);
        if outcome == TickOutcome::Finished {
            self.entries.remove(&msg.appliance);
        }
        outcome
    }

    /// Tears the entry for `id` down: listener cancelled first, entry
    /// removed second. Idempotent; returns whether an entry existed.
    pub fn shutdown(&mut self, id: ApplianceId, scheduler: &mut dyn TickScheduler) -> bool {
        let Some(state) = self.entries.get_mut(&id) else {
            return false;
        };
        state.deactivate(scheduler);
        self.entries.remove(&id);
        debug!("automation removed for {id}");
        true
    }

    /// Whether `id` currently has a running entry.
    pub fn is_active(&self, id: ApplianceId) -> bool {
        self.entries.get(&id).is_some_and(AutomationState::is_active)
    }

    pub fn state(&self, id: ApplianceId) -> Option<&AutomationState> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
