//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the logger
//! (UART / USB-CDC in production).  Measurements go out at `debug` since
//! they arrive every loop iteration.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::measure::Reading;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | mode={:?}", mode);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
            AppEvent::Measured(Reading::Resistance(r)) => {
                debug!(
                    "MEAS  | {} ohm | {} | {:.1} mV | {:?}",
                    r.ohms, r.channel, r.divider_mv, r.acceptance
                );
            }
            AppEvent::Measured(Reading::Voltage(v)) => {
                debug!("MEAS  | {} mV | raw={}", v.millivolts, v.raw.0);
            }
            AppEvent::Degraded(err) => {
                warn!("DEGR  | {}", err);
            }
        }
    }
}
