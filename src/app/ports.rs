//! Port traits: the hexagonal boundary between the tester logic and the
//! board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TesterService (domain)
//! ```
//!
//! Driven adapters implement these traits.  The
//! [`TesterService`](super::service::TesterService) consumes them through
//! generics, so the measurement and mode logic never touch a peripheral
//! directly and run unchanged against the host simulator.
//!
//! Every method is fallible.  The service decides per call site whether a
//! failure abandons the cycle or is only logged.

use crate::display::{DisplayFrame, DisplayOp};
use crate::error::Error;
use crate::fsm::{RoutingPins, SwitchLevels};
use crate::measure::{RangePins, RawSample};

// ───────────────────────────────────────────────────────────────
// Inputs (board → domain)
// ───────────────────────────────────────────────────────────────

/// The two active-low mode switches.
pub trait SwitchPort {
    fn read_switches(&mut self) -> Result<SwitchLevels, Error>;
}

/// The analog-to-digital converter.
pub trait AdcPort {
    /// One signed conversion result.
    fn read_sample(&mut self) -> Result<RawSample, Error>;
}

// ───────────────────────────────────────────────────────────────
// Outputs (domain → board)
// ───────────────────────────────────────────────────────────────

/// Analog front end: range select lines and mode routing lines.
pub trait FrontEndPort {
    /// Drive all four range-select lines.
    fn set_range(&mut self, pins: RangePins) -> Result<(), Error>;

    /// Drive all four routing lines.
    fn set_routing(&mut self, routing: RoutingPins) -> Result<(), Error>;
}

/// Two-row character display.
pub trait DisplayPort {
    fn set_cursor(&mut self, pos: u8) -> Result<(), Error>;

    fn write_char(&mut self, c: u8) -> Result<(), Error>;

    /// Clear all cells and home the cursor.  The caller waits
    /// [`CLEAR_SETTLE_MS`](crate::display::CLEAR_SETTLE_MS) before the
    /// next write.
    fn clear(&mut self) -> Result<(), Error>;

    /// Replay a rendered frame, stopping at the first failed write.
    fn draw(&mut self, frame: &DisplayFrame) -> Result<(), Error> {
        for op in frame.ops() {
            match *op {
                DisplayOp::SetCursor(pos) => self.set_cursor(pos)?,
                DisplayOp::Char(c) => self.write_char(c)?,
            }
        }
        Ok(())
    }
}

/// Continuity buzzer.
pub trait AlertPort {
    fn set_alert(&mut self, on: bool) -> Result<(), Error>;
}

/// Status LED used for the mode-change blink.
pub trait IndicatorPort {
    fn set_indicator(&mut self, on: bool) -> Result<(), Error>;
}

/// Everything the service needs from the board, as one bound.
pub trait TesterHardware:
    SwitchPort + AdcPort + FrontEndPort + DisplayPort + AlertPort + IndicatorPort
{
}

impl<T> TesterHardware for T where
    T: SwitchPort + AdcPort + FrontEndPort + DisplayPort + AlertPort + IndicatorPort
{
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
