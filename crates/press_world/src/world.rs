//! Traits at the seam between the automation engine and its host.

use std::time::Duration;

use crate::{ApplianceId, BlockPos, ListenerId, OperatorId, PressSection};

/// The host world as the automation engine sees it.
///
/// All appliance access goes by id. Implementations must treat unknown ids
/// as safe no-ops (`false` for queries, nothing for commands); the engine
/// relies on this when an appliance vanishes between ticks.
pub trait PressWorld {
    /// Resolves the appliance selected at `pos`, if any.
    fn resolve_appliance_at(&self, pos: BlockPos) -> Option<ApplianceId>;

    /// Whether `id` still refers to a live appliance.
    fn appliance_exists(&self, id: ApplianceId) -> bool;

    /// Whether the press currently accepts the screw-down interaction.
    fn can_screw(&self, id: ApplianceId) -> bool;

    /// Whether the press currently allows being unscrewed.
    fn can_unscrew(&self, id: ApplianceId) -> bool;

    /// Whether the press's compress animation has already finished.
    fn compress_finished(&self, id: ApplianceId) -> bool;

    /// Mirrors a manual engagement of the appliance.
    ///
    /// `synthetic` marks the call as engine-driven rather than a real
    /// operator input.
    fn begin_interaction(
        &mut self,
        id: ApplianceId,
        operator: OperatorId,
        section: PressSection,
        synthetic: bool,
    );

    /// Forwards one interaction step carrying the accumulated hold time.
    fn step_interaction(
        &mut self,
        id: ApplianceId,
        elapsed_seconds: f32,
        operator: OperatorId,
        section: PressSection,
    );
}

/// The host's recurring-timer facility.
///
/// One callback per subscription per period until cancelled. All callbacks
/// for one appliance are delivered serially on the host's execution
/// context; the engine assumes no tick overlaps another tick or a
/// lifecycle hook for the same appliance.
pub trait TickScheduler {
    /// Subscribes a recurring tick for `appliance` and returns its handle.
    fn schedule_recurring(&mut self, appliance: ApplianceId, period: Duration) -> ListenerId;

    /// Cancels a subscription. Cancelling an unknown or already-cancelled
    /// handle is a no-op.
    fn cancel_recurring(&mut self, listener: ListenerId);
}
