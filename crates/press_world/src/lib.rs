//! Host-facing contracts for press-type appliance automation.
//!
//! The automation engine never touches the game world directly; everything
//! it needs from the host goes through the [`PressWorld`] and
//! [`TickScheduler`] traits defined here. Appliances are addressed by
//! stable ids, so "the appliance is gone" is simply "the id no longer
//! resolves" rather than a dangling reference.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Interaction vocabulary shared by host and engine
pub mod interaction;
/// In-memory host implementation for local runs and tests
pub mod loopback;
/// Traits at the host seam
pub mod world;

pub use interaction::{
    AreaSelection, CancelReason, InteractionHint, OperatorControls, PressSection, TickMessage,
    AUTOMATE_HINT,
};
pub use loopback::{LoopbackScheduler, LoopbackWorld, WorldError};
pub use world::{PressWorld, TickScheduler};

/// Identity of the operator whose interaction is being emulated.
///
/// Matches the host's client identity scheme.
pub type OperatorId = uuid::Uuid;

/// Stable arena id of an appliance instance.
///
/// Holding an id implies nothing about liveness; resolve it through the
/// world on every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplianceId(pub u64);

impl fmt::Display for ApplianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "appliance#{}", self.0)
    }
}

/// Opaque handle of a recurring timer subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Integer block position in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position one block below.
    ///
    /// The press is selected by its top block while the appliance entity
    /// sits in the block underneath, so lookups shift down by one.
    pub const fn down(self) -> Self {
        Self {
            x: self.x,
            y: self.y - 1,
            z: self.z,
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_pos_down() {
        let top = BlockPos::new(4, 10, -3);
        assert_eq!(top.down(), BlockPos::new(4, 9, -3));
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(ApplianceId(7).to_string(), "appliance#7");
        assert_eq!(ListenerId(3).to_string(), "listener#3");
        assert_eq!(BlockPos::new(1, 2, 3).to_string(), "1, 2, 3");
    }
}
