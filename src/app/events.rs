//! Outbound application events.
//!
//! The [`TesterService`](super::service::TesterService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use crate::error::Error;
use crate::fsm::Mode;
use crate::measure::Reading;

/// Structured events emitted by the tester core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the boot mode).
    Started(Mode),

    /// A switch poll changed the active mode.
    ModeChanged { from: Mode, to: Mode },

    /// A measurement completed this cycle.
    Measured(Reading),

    /// A port failed; the cycle carried on in degraded form.
    Degraded(Error),
}
