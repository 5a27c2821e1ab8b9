//! DC voltage meter.
//!
//! Single fixed scale: the input passes an 11:1 attenuator (with the
//! 10 kΩ reference switched in) before reaching the ADC.  One sample per
//! call, no range search.

use log::debug;

use crate::app::ports::AdcPort;
use crate::config::MeterConfig;
use crate::error::Error;

use super::RawSample;

/// A signed voltage reading in whole millivolts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageMeasurement {
    pub millivolts: i32,
    /// Sample the reading was derived from.
    pub raw: RawSample,
    /// Scaled value before rounding.
    pub exact_mv: f32,
}

/// `raw · (attenuation · resolution) · calibration`, in millivolts.
pub fn scale(raw: RawSample, config: &MeterConfig) -> f32 {
    f32::from(raw.0) * (config.voltage_attenuation * config.resolution_factor())
        * config.voltage_calibration
}

/// Round half away from zero, then truncate toward zero.
pub fn round_half_away(mv: f32) -> i32 {
    if mv >= 0.0 {
        (mv + 0.5) as i32
    } else {
        (mv - 0.5) as i32
    }
}

pub struct VoltageMeter;

impl VoltageMeter {
    pub fn new() -> Self {
        Self
    }

    pub fn measure(
        &self,
        hw: &mut impl AdcPort,
        config: &MeterConfig,
    ) -> Result<VoltageMeasurement, Error> {
        let raw = hw.read_sample()?;
        let exact_mv = scale(raw, config);
        debug!(
            "raw={:6}  {:.4} mV  ({:.2} V)",
            raw.0,
            exact_mv,
            exact_mv / 1000.0
        );
        Ok(VoltageMeasurement {
            millivolts: round_half_away(exact_mv),
            raw,
            exact_mv,
        })
    }
}

impl Default for VoltageMeter {
    fn default() -> Self {
        Self::new()
    }
}
