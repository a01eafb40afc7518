//! Interception layer over the host's interaction lifecycle.
//!
//! The host calls one hook per lifecycle event before running its default
//! handling. Each hook answers [`Interception::Handled`] (suppress the
//! default) or [`Interception::PassThrough`] (run it). Two gates decide
//! what happens on a start event: the emergency unscrew gate (ctrl held,
//! press unscrewable) tears a running automation down and still passes
//! through so the manual unscrew proceeds; the activation gate (sneak held
//! on the screw zone) redirects the event into automation.

use press_world::{
    AreaSelection, BlockPos, CancelReason, InteractionHint, OperatorControls, OperatorId,
    PressSection, PressWorld, TickMessage, TickScheduler, AUTOMATE_HINT,
};
use tracing::debug;

use crate::config::{AutomationConfig, ConfigError};
use crate::registry::AutomationRegistry;
use crate::state::TickOutcome;

/// Verdict a lifecycle hook hands back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// The event was consumed; skip the default handling.
    Handled,
    /// Run the default handling unchanged.
    PassThrough,
}

/// Drives automation off the host's interaction lifecycle events.
#[derive(Debug)]
pub struct AutomationController {
    registry: AutomationRegistry,
    config: AutomationConfig,
}

impl Default for AutomationController {
    fn default() -> Self {
        Self {
            registry: AutomationRegistry::new(),
            config: AutomationConfig::default(),
        }
    }
}

impl AutomationController {
    /// Builds a controller from validated config.
    pub fn new(config: AutomationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: AutomationRegistry::new(),
            config,
        })
    }

    pub fn registry(&self) -> &AutomationRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    /// The activation gesture: sneak held while targeting the screw zone.
    ///
    /// Pure predicate, evaluated fresh per event. The same predicate marks
    /// later step/stop/cancel events as belonging to an automated session.
    fn wants_automation(controls: &OperatorControls, selection: &AreaSelection) -> bool {
        selection.selection_index == PressSection::Screw.selection_index() && controls.sneak
    }

    /// The emergency unscrew gesture: ctrl held on a press that allows
    /// disengaging. Tears any automation entry down; the event itself
    /// stays with the host so the manual unscrew runs normally.
    fn check_emergency_unscrew(
        &mut self,
        world: &dyn PressWorld,
        scheduler: &mut dyn TickScheduler,
        controls: &OperatorControls,
        selection: &AreaSelection,
    ) -> bool {
        if !controls.ctrl {
            return false;
        }
        let Some(id) = world.resolve_appliance_at(selection.position) else {
            return false;
        };
        if !world.can_unscrew(id) {
            return false;
        }
        self.registry.shutdown(id, scheduler);
        true
    }

    /// Interaction-start hook.
    ///
    /// Emergency gate first; if it fires, automation handling is skipped
    /// for this event entirely. Otherwise the activation gate may redirect
    /// the engagement into automation. A selection that resolves to no
    /// appliance always falls through to the host.
    pub fn on_interact_start(
        &mut self,
        world: &mut dyn PressWorld,
        scheduler: &mut dyn TickScheduler,
        operator: OperatorId,
        controls: &OperatorControls,
        selection: &AreaSelection,
    ) -> Interception {
        if self.check_emergency_unscrew(world, scheduler, controls, selection) {
            return Interception::PassThrough;
        }
        if !Self::wants_automation(controls, selection) {
            return Interception::PassThrough;
        }
        let Some(id) = world.resolve_appliance_at(selection.position) else {
            return Interception::PassThrough;
        };

        self.registry
            .activate(id, operator, world, scheduler, &self.config);
        Interception::Handled
    }

    /// Interaction-step hook. The recurring tick is the sole source of
    /// step events for an automated session, so a matching manual step is
    /// suppressed to avoid double-driving the press.
    pub fn on_interact_step(
        &self,
        _elapsed_seconds: f32,
        controls: &OperatorControls,
        selection: &AreaSelection,
    ) -> Interception {
        if Self::wants_automation(controls, selection) {
            debug!("automated session, suppressing manual step");
            return Interception::Handled;
        }
        Interception::PassThrough
    }

    /// Interaction-stop hook; same suppression rule as step.
    pub fn on_interact_stop(
        &self,
        _elapsed_seconds: f32,
        controls: &OperatorControls,
        selection: &AreaSelection,
    ) -> Interception {
        if Self::wants_automation(controls, selection) {
            debug!("automated session, suppressing manual stop");
            return Interception::Handled;
        }
        Interception::PassThrough
    }

    /// Interaction-cancel hook; same suppression rule as step.
    pub fn on_interact_cancel(
        &self,
        _elapsed_seconds: f32,
        controls: &OperatorControls,
        selection: &AreaSelection,
        _reason: CancelReason,
    ) -> Interception {
        if Self::wants_automation(controls, selection) {
            debug!("automated session, suppressing manual cancel");
            return Interception::Handled;
        }
        Interception::PassThrough
    }

    /// Appliance-broken notification. Unconditionally tears down whatever
    /// automation the press at `pos` had, so no tick ever fires against a
    /// destroyed appliance. Safe when nothing resolves or nothing runs.
    pub fn on_appliance_broken(
        &mut self,
        world: &dyn PressWorld,
        scheduler: &mut dyn TickScheduler,
        pos: BlockPos,
    ) {
        if let Some(id) = world.resolve_appliance_at(pos) {
            self.registry.shutdown(id, scheduler);
        }
    }

    /// Read-only help augmentation: advertises the automation gesture
    /// while the press accepts screwing. Never duplicates the hint.
    pub fn augment_interaction_help(
        &self,
        world: &dyn PressWorld,
        pos: BlockPos,
        hints: &mut Vec<InteractionHint>,
    ) {
        let Some(id) = world.resolve_appliance_at(pos) else {
            return;
        };
        if world.can_screw(id) && !hints.contains(&AUTOMATE_HINT) {
            hints.push(AUTOMATE_HINT);
        }
    }

    /// Tick pump entry point; the host forwards every delivered
    /// [`TickMessage`] here.
    pub fn on_tick(
        &mut self,
        world: &mut dyn PressWorld,
        scheduler: &mut dyn TickScheduler,
        msg: TickMessage,
    ) -> TickOutcome {
        self.registry
            .dispatch_tick(msg, world, scheduler, &self.config)
    }
}
