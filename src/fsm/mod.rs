//! Measurement mode state machine.
//!
//! ```text
//!              voltage switch asserted
//!   ┌────────────┐ ──────────────────▶ ┌─────────┐
//!   │ Resistance │                     │ Voltage │
//!   └────────────┘ ◀────────────────── └─────────┘
//!        resistance switch asserted (voltage switch released)
//! ```
//!
//! Both switches are active-low push buttons.  The voltage switch wins
//! when both are held; with neither held the current mode is kept.
//! [`ModeController::poll`] is pure; the entry sequence that reroutes the
//! front end lives in the service, driven by the [`ModeDescriptor`] table.

pub mod states;

use embedded_hal::digital::PinState;
use log::info;

pub use states::{ModeDescriptor, RoutingPins, build_mode_table};

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Active measurement function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Resistance = 0,
    Voltage = 1,
}

impl Mode {
    /// Total number of modes — used to size the descriptor table.
    pub const COUNT: usize = 2;
}

// ---------------------------------------------------------------------------
// Switch inputs
// ---------------------------------------------------------------------------

/// Raw levels of the two mode switches.  Low = pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchLevels {
    pub resistance: PinState,
    pub voltage: PinState,
}

impl SwitchLevels {
    /// Both switches released (pull-ups win).
    pub const RELEASED: Self = Self {
        resistance: PinState::High,
        voltage: PinState::High,
    };

    pub fn resistance_asserted(&self) -> bool {
        self.resistance == PinState::Low
    }

    pub fn voltage_asserted(&self) -> bool {
        self.voltage == PinState::Low
    }
}

/// A mode change decided by [`ModeController::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the current mode and the per-mode descriptor table.
pub struct ModeController {
    table: [ModeDescriptor; Mode::COUNT],
    current: Mode,
    transitions: u32,
}

impl ModeController {
    pub fn new(initial: Mode) -> Self {
        Self {
            table: build_mode_table(),
            current: initial,
            transitions: 0,
        }
    }

    /// Boot rule: voltage switch held → Voltage, anything else → Resistance.
    pub fn initial_mode(voltage_switch: PinState) -> Mode {
        if voltage_switch == PinState::Low {
            Mode::Voltage
        } else {
            Mode::Resistance
        }
    }

    /// Mode selected by the switches, given the mode currently active.
    pub fn poll(switches: SwitchLevels, current: Mode) -> Mode {
        if switches.voltage_asserted() {
            Mode::Voltage
        } else if switches.resistance_asserted() {
            Mode::Resistance
        } else {
            current
        }
    }

    /// Apply one switch poll.  Returns the transition if the mode changed.
    pub fn update(&mut self, switches: SwitchLevels) -> Option<Transition> {
        let next = Self::poll(switches, self.current);
        if next == self.current {
            return None;
        }
        let transition = Transition {
            from: self.current,
            to: next,
        };
        info!(
            "Mode transition: {} -> {}",
            self.descriptor(self.current).name,
            self.descriptor(next).name
        );
        self.current = next;
        self.transitions = self.transitions.wrapping_add(1);
        Some(transition)
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn descriptor(&self, mode: Mode) -> &ModeDescriptor {
        &self.table[mode as usize]
    }

    /// Mode changes since boot.
    pub fn transition_count(&self) -> u32 {
        self.transitions
    }
}
