//! Continuity alert.
//!
//! The buzzer follows the latest measurement with no latching: on while a
//! resistance reading is at or below the threshold, off otherwise, and
//! always off in voltage mode.

use crate::app::ports::AlertPort;
use crate::error::Error;
use crate::fsm::Mode;

pub struct AlertController {
    threshold_ohms: u32,
    on: bool,
}

impl AlertController {
    pub fn new(threshold_ohms: u32) -> Self {
        Self {
            threshold_ohms,
            on: false,
        }
    }

    /// Pure decision for `mode` and the latest resistance.
    pub fn decide(&self, mode: Mode, resistance_ohms: u32) -> bool {
        match mode {
            Mode::Resistance => resistance_ohms <= self.threshold_ohms,
            Mode::Voltage => false,
        }
    }

    /// Drive the alert output.  The output is written every call; the
    /// cached state only changes if the write succeeded.
    pub fn update(
        &mut self,
        hw: &mut impl AlertPort,
        mode: Mode,
        resistance_ohms: u32,
    ) -> Result<bool, Error> {
        let on = self.decide(mode, resistance_ohms);
        hw.set_alert(on)?;
        self.on = on;
        Ok(on)
    }

    /// Last state successfully written to the output.
    pub fn is_on(&self) -> bool {
        self.on
    }
}
