//! Timer-driven automation for the hold-to-press appliance interaction.
//!
//! Normally an operator keeps the interact key held while the press screws
//! down, with the host feeding step events for as long as the key is down.
//! This crate replaces the held key: a sneak-click on the screw starts an
//! automation entry that subscribes a recurring tick and forwards
//! synthetic step events until the hold-time cap is reached, the press
//! reports its compress animation finished, or the automation is torn down
//! (ctrl-click emergency unscrew, or the press being broken).
//!
//! The engine never reaches into the host directly; see `press_world` for
//! the traits at that seam. Entry point is [`AutomationController`], which
//! the host calls from its interaction lifecycle hooks and its tick pump.

/// Tunable parameters and their validation
pub mod config;
/// Lifecycle interception and gates
pub mod controller;
/// Appliance-to-state table
pub mod registry;
/// Per-appliance automation state machine
pub mod state;

pub use config::{AutomationConfig, ConfigError};
pub use controller::{AutomationController, Interception};
pub use registry::AutomationRegistry;
pub use state::{AutomationState, TickOutcome};
