//! Measurement engine — raw samples, range selection and the two meters.
//!
//! ```text
//!   AdcPort ──▶ RawSample ──┬──▶ ResistanceMeter (auto-range over FrontEndPort)
//!                           └──▶ VoltageMeter    (fixed attenuation)
//! ```
//!
//! Both meters produce a [`Reading`] that the display formatter and the
//! alert controller consume within the same loop iteration.

pub mod range;
pub mod resistance;
pub mod voltage;

use crate::config::MeterConfig;

pub use range::{RangeChannel, RangePins, RangeSelector};
pub use resistance::{Acceptance, ResistanceMeasurement, ResistanceMeter};
pub use voltage::{VoltageMeasurement, VoltageMeter};

/// One signed 16-bit conversion result from the ADC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample(pub i16);

impl RawSample {
    /// Voltage at the ADC input in millivolts.
    pub fn to_millivolts(self, config: &MeterConfig) -> f32 {
        f32::from(self.0) * config.resolution_factor()
    }

    /// Decode the two-byte big-endian transfer the converter returns.
    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(i16::from_be_bytes(bytes))
    }
}

/// Result of one measurement cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Resistance(ResistanceMeasurement),
    Voltage(VoltageMeasurement),
}
