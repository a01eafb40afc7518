//! Interaction lifecycle vocabulary shared by the host and the engine.
//!
//! A held interaction normally runs start -> repeated step -> (stop |
//! cancel), driven by the operator holding a key. Automation substitutes
//! timer-driven synthetic steps for the held key; these types describe the
//! selection, the modifier keys, and the tick messages involved.

use serde::{Deserialize, Serialize};

use crate::{ApplianceId, BlockPos};

/// Selectable zones of a press appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressSection {
    /// The basin holding the material being pressed.
    Base,
    /// The screw on top; the only zone that accepts automation.
    Screw,
}

impl PressSection {
    /// Selection box index the host assigns to this zone.
    pub const fn selection_index(self) -> u8 {
        match self {
            PressSection::Base => 0,
            PressSection::Screw => 1,
        }
    }

    pub fn from_selection_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PressSection::Base),
            1 => Some(PressSection::Screw),
            _ => None,
        }
    }
}

/// Snapshot of the requesting operator's modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatorControls {
    /// Secondary-action modifier (held crouch/sneak key).
    pub sneak: bool,
    /// Primary modifier (held ctrl key).
    pub ctrl: bool,
}

/// What the operator's cursor currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaSelection {
    /// Selected block position (the press's top block).
    pub position: BlockPos,
    /// Selection box index under the cursor.
    pub selection_index: u8,
}

impl AreaSelection {
    pub const fn new(position: BlockPos, selection_index: u8) -> Self {
        Self {
            position,
            selection_index,
        }
    }
}

/// Why the host cancelled a held interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    ReleasedKey,
    MovedAway,
    Destroyed,
    Death,
}

/// One entry in the host's interaction help display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionHint {
    /// Action code the host maps to a display string.
    pub action: &'static str,
    /// Hotkey code shown next to the action.
    pub hotkey: &'static str,
}

/// Hint advertised while the press accepts the automated screw interaction.
pub const AUTOMATE_HINT: InteractionHint = InteractionHint {
    action: "automate-press",
    hotkey: "sneak",
};

/// Plain-data tick dispatched by the scheduler.
///
/// Carries no captured state; the receiving handler looks the automation
/// entry up fresh, so a removed or replaced entry is never driven through
/// a stale capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMessage {
    pub appliance: ApplianceId,
    /// Elapsed game time since the previous callback, in seconds.
    pub dt_seconds: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_indices_round_trip() {
        assert_eq!(PressSection::Screw.selection_index(), 1);
        assert_eq!(
            PressSection::from_selection_index(1),
            Some(PressSection::Screw)
        );
        assert_eq!(
            PressSection::from_selection_index(0),
            Some(PressSection::Base)
        );
        assert_eq!(PressSection::from_selection_index(2), None);
    }
}
