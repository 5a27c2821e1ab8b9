//! Per-mode descriptors: front-end routing and entry actions.
//!
//! | Mode       | RES_PATH | VOLT_PATH | VOLT_BUF | SHDN_N | R1..R4 | glyphs |
//! |------------|----------|-----------|----------|--------|--------|--------|
//! | Resistance | H        | L         | L        | H      | search | redraw |
//! | Voltage    | L        | H         | H        | L      | 0100   | —      |

use embedded_hal::digital::PinState;

use super::Mode;
use crate::measure::RangeChannel;

/// Levels for the four routing outputs, in pin order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingPins {
    /// Resistance divider path MOSFET.
    pub res_path: PinState,
    /// Voltage input path MOSFET.
    pub volt_path: PinState,
    /// Voltage attenuator buffer MOSFET.
    pub volt_buffer: PinState,
    /// Analog shutdown line, active low.
    pub shutdown_n: PinState,
}

impl RoutingPins {
    pub fn levels(&self) -> [PinState; 4] {
        [self.res_path, self.volt_path, self.volt_buffer, self.shutdown_n]
    }
}

/// Static descriptor for a single mode.
pub struct ModeDescriptor {
    pub mode: Mode,
    pub name: &'static str,
    pub routing: RoutingPins,
    /// Range channel forced on entry, if the mode uses a fixed divider.
    pub fixed_range: Option<RangeChannel>,
    /// Whether the decimal point and unit glyphs are drawn on entry.
    pub draws_glyphs: bool,
}

/// Build the descriptor table, indexed by `Mode as usize`.
pub fn build_mode_table() -> [ModeDescriptor; Mode::COUNT] {
    [
        ModeDescriptor {
            mode: Mode::Resistance,
            name: "RESISTANCE",
            routing: RoutingPins {
                res_path: PinState::High,
                volt_path: PinState::Low,
                volt_buffer: PinState::Low,
                shutdown_n: PinState::High,
            },
            fixed_range: None,
            draws_glyphs: true,
        },
        ModeDescriptor {
            mode: Mode::Voltage,
            name: "VOLTAGE",
            routing: RoutingPins {
                res_path: PinState::Low,
                volt_path: PinState::High,
                volt_buffer: PinState::High,
                shutdown_n: PinState::Low,
            },
            fixed_range: Some(RangeChannel::VOLTAGE_DIVIDER),
            draws_glyphs: false,
        },
    ]
}
