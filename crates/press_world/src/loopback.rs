//! In-memory host for local runs and tests.
//!
//! Provides a `PressWorld` and a `TickScheduler` that keep everything in
//! the same process with no real game engine behind them. The world keeps
//! an arena of appliances with settable capability flags and records every
//! interaction call it receives, so tests can assert exactly what the
//! engine forwarded.

use std::collections::HashMap;
use std::time::Duration;

use tracing::warn;

use crate::{
    ApplianceId, BlockPos, ListenerId, OperatorId, PressSection, PressWorld, TickMessage,
    TickScheduler,
};

/// Error type for loopback host setup operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("no appliance with id {0}")]
    UnknownAppliance(ApplianceId),

    #[error("position {0} already holds an appliance")]
    PositionOccupied(BlockPos),
}

/// One interaction call delivered to a loopback appliance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionCall {
    Begin {
        operator: OperatorId,
        section: PressSection,
        synthetic: bool,
    },
    Step {
        elapsed_seconds: f32,
        operator: OperatorId,
        section: PressSection,
    },
}

#[derive(Debug)]
struct LoopbackAppliance {
    /// Position of the appliance entity (one below the selectable top block).
    position: BlockPos,
    can_screw: bool,
    can_unscrew: bool,
    compress_finished: bool,
    calls: Vec<InteractionCall>,
}

/// In-memory appliance arena implementing [`PressWorld`].
#[derive(Debug, Default)]
pub struct LoopbackWorld {
    next_id: u64,
    appliances: HashMap<ApplianceId, LoopbackAppliance>,
    by_position: HashMap<BlockPos, ApplianceId>,
}

impl LoopbackWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a press whose top block sits at `top`.
    ///
    /// The press starts screwable, not unscrewable, with the compress
    /// animation unfinished.
    pub fn spawn_press(&mut self, top: BlockPos) -> Result<ApplianceId, WorldError> {
        let entity_pos = top.down();
        if self.by_position.contains_key(&entity_pos) {
            return Err(WorldError::PositionOccupied(entity_pos));
        }

        self.next_id += 1;
        let id = ApplianceId(self.next_id);
        self.appliances.insert(
            id,
            LoopbackAppliance {
                position: entity_pos,
                can_screw: true,
                can_unscrew: false,
                compress_finished: false,
                calls: Vec::new(),
            },
        );
        self.by_position.insert(entity_pos, id);
        Ok(id)
    }

    /// Removes the appliance from the arena. Its id stops resolving.
    pub fn destroy_press(&mut self, id: ApplianceId) -> Result<(), WorldError> {
        let appliance = self
            .appliances
            .remove(&id)
            .ok_or(WorldError::UnknownAppliance(id))?;
        self.by_position.remove(&appliance.position);
        Ok(())
    }

    pub fn set_can_screw(&mut self, id: ApplianceId, value: bool) -> Result<(), WorldError> {
        self.appliance_mut(id)?.can_screw = value;
        Ok(())
    }

    pub fn set_can_unscrew(&mut self, id: ApplianceId, value: bool) -> Result<(), WorldError> {
        self.appliance_mut(id)?.can_unscrew = value;
        Ok(())
    }

    pub fn set_compress_finished(
        &mut self,
        id: ApplianceId,
        value: bool,
    ) -> Result<(), WorldError> {
        self.appliance_mut(id)?.compress_finished = value;
        Ok(())
    }

    /// Interaction calls delivered to `id`, oldest first. Empty for
    /// unknown ids.
    pub fn calls(&self, id: ApplianceId) -> &[InteractionCall] {
        self.appliances
            .get(&id)
            .map(|a| a.calls.as_slice())
            .unwrap_or(&[])
    }

    /// Number of step calls delivered to `id`.
    pub fn step_count(&self, id: ApplianceId) -> usize {
        self.calls(id)
            .iter()
            .filter(|call| matches!(call, InteractionCall::Step { .. }))
            .count()
    }

    fn appliance_mut(&mut self, id: ApplianceId) -> Result<&mut LoopbackAppliance, WorldError> {
        self.appliances
            .get_mut(&id)
            .ok_or(WorldError::UnknownAppliance(id))
    }
}

impl PressWorld for LoopbackWorld {
    fn resolve_appliance_at(&self, pos: BlockPos) -> Option<ApplianceId> {
        self.by_position.get(&pos.down()).copied()
    }

    fn appliance_exists(&self, id: ApplianceId) -> bool {
        self.appliances.contains_key(&id)
    }

    fn can_screw(&self, id: ApplianceId) -> bool {
        self.appliances.get(&id).is_some_and(|a| a.can_screw)
    }

    fn can_unscrew(&self, id: ApplianceId) -> bool {
        self.appliances.get(&id).is_some_and(|a| a.can_unscrew)
    }

    fn compress_finished(&self, id: ApplianceId) -> bool {
        self.appliances
            .get(&id)
            .is_some_and(|a| a.compress_finished)
    }

    fn begin_interaction(
        &mut self,
        id: ApplianceId,
        operator: OperatorId,
        section: PressSection,
        synthetic: bool,
    ) {
        match self.appliances.get_mut(&id) {
            Some(appliance) => appliance.calls.push(InteractionCall::Begin {
                operator,
                section,
                synthetic,
            }),
            None => warn!("begin_interaction on unknown {id}"),
        }
    }

    fn step_interaction(
        &mut self,
        id: ApplianceId,
        elapsed_seconds: f32,
        operator: OperatorId,
        section: PressSection,
    ) {
        match self.appliances.get_mut(&id) {
            Some(appliance) => appliance.calls.push(InteractionCall::Step {
                elapsed_seconds,
                operator,
                section,
            }),
            None => warn!("step_interaction on unknown {id}"),
        }
    }
}

#[derive(Debug)]
struct Subscription {
    listener: ListenerId,
    appliance: ApplianceId,
    #[allow(dead_code)]
    period: Duration,
}

/// Manually pumped scheduler implementing [`TickScheduler`].
///
/// `advance` stands in for the host's game loop: it emits one
/// [`TickMessage`] per live subscription and leaves delivery to the
/// caller, which lets tests hold a message "in flight" across a
/// cancellation.
#[derive(Debug, Default)]
pub struct LoopbackScheduler {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl LoopbackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one tick per live subscription, carrying `dt` as the delta.
    pub fn advance(&mut self, dt: Duration) -> Vec<TickMessage> {
        self.subscriptions
            .iter()
            .map(|sub| TickMessage {
                appliance: sub.appliance,
                dt_seconds: dt.as_secs_f32(),
            })
            .collect()
    }

    pub fn live_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_subscribed(&self, listener: ListenerId) -> bool {
        self.subscriptions
            .iter()
            .any(|sub| sub.listener == listener)
    }
}

impl TickScheduler for LoopbackScheduler {
    fn schedule_recurring(&mut self, appliance: ApplianceId, period: Duration) -> ListenerId {
        self.next_id += 1;
        let listener = ListenerId(self.next_id);
        self.subscriptions.push(Subscription {
            listener,
            appliance,
            period,
        });
        listener
    }

    fn cancel_recurring(&mut self, listener: ListenerId) {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.listener != listener);
        if self.subscriptions.len() == before {
            warn!("cancel_recurring on unknown {listener}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> OperatorId {
        uuid::Uuid::from_u128(0xA11CE)
    }

    #[test]
    fn test_resolve_goes_through_top_block() {
        let mut world = LoopbackWorld::new();
        let top = BlockPos::new(0, 5, 0);
        let id = world.spawn_press(top).unwrap();

        assert_eq!(world.resolve_appliance_at(top), Some(id));
        // The entity position itself is not a valid selection target.
        assert_eq!(world.resolve_appliance_at(top.down()), None);
    }

    #[test]
    fn test_spawn_rejects_occupied_position() {
        let mut world = LoopbackWorld::new();
        let top = BlockPos::new(1, 1, 1);
        world.spawn_press(top).unwrap();
        assert!(matches!(
            world.spawn_press(top),
            Err(WorldError::PositionOccupied(_))
        ));
    }

    #[test]
    fn test_destroyed_press_stops_resolving() {
        let mut world = LoopbackWorld::new();
        let top = BlockPos::new(2, 3, 4);
        let id = world.spawn_press(top).unwrap();
        world.destroy_press(id).unwrap();

        assert!(!world.appliance_exists(id));
        assert_eq!(world.resolve_appliance_at(top), None);
        assert!(matches!(
            world.destroy_press(id),
            Err(WorldError::UnknownAppliance(_))
        ));
    }

    #[test]
    fn test_unknown_id_queries_are_false() {
        let world = LoopbackWorld::new();
        let ghost = ApplianceId(99);
        assert!(!world.appliance_exists(ghost));
        assert!(!world.can_screw(ghost));
        assert!(!world.can_unscrew(ghost));
        assert!(!world.compress_finished(ghost));
        assert!(world.calls(ghost).is_empty());
    }

    #[test]
    fn test_interaction_calls_are_recorded() {
        let mut world = LoopbackWorld::new();
        let id = world.spawn_press(BlockPos::new(0, 0, 0)).unwrap();

        world.begin_interaction(id, operator(), PressSection::Screw, true);
        world.step_interaction(id, 0.5, operator(), PressSection::Screw);

        assert_eq!(world.calls(id).len(), 2);
        assert_eq!(world.step_count(id), 1);
        assert_eq!(
            world.calls(id)[0],
            InteractionCall::Begin {
                operator: operator(),
                section: PressSection::Screw,
                synthetic: true,
            }
        );
    }

    #[test]
    fn test_scheduler_subscribe_and_cancel() {
        let mut scheduler = LoopbackScheduler::new();
        let appliance = ApplianceId(1);
        let listener = scheduler.schedule_recurring(appliance, Duration::from_millis(25));
        assert!(scheduler.is_subscribed(listener));

        let ticks = scheduler.advance(Duration::from_millis(25));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].appliance, appliance);

        scheduler.cancel_recurring(listener);
        assert!(!scheduler.is_subscribed(listener));
        assert!(scheduler.advance(Duration::from_millis(25)).is_empty());

        // Cancelling again is a no-op.
        scheduler.cancel_recurring(listener);
        assert_eq!(scheduler.live_subscriptions(), 0);
    }
}
