//! Calibration and timing parameters
//!
//! Every device constant the measurement pipeline depends on lives in
//! [`MeterConfig`], so calibration can be audited and tested separately
//! from control flow.  Values are fixed at build time; there is no
//! persistent storage for them.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core measurement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterConfig {
    // --- ADC ---
    /// ADC full-scale input (millivolts) at unity gain
    pub adc_reference_mv: f32,
    /// Codes per full scale at 16-bit resolution
    pub adc_full_scale_codes: f32,

    // --- Resistance ---
    /// Divider supply used in the resistance equation (millivolts)
    pub divider_supply_mv: f32,
    /// Lower edge of the acceptance window (exclusive, millivolts)
    pub window_low_mv: f32,
    /// Upper edge of the acceptance window (exclusive, millivolts)
    pub window_high_mv: f32,
    /// Measured gain correction per range channel (ch0..ch3)
    pub range_gains: [f32; 4],
    /// Resistance at or below which the buzzer sounds (ohms)
    pub continuity_threshold_ohms: u32,

    // --- Voltage ---
    /// Input attenuator ratio
    pub voltage_attenuation: f32,
    /// Voltage gain correction
    pub voltage_calibration: f32,

    // --- Timing ---
    /// Outer loop cadence (milliseconds)
    pub loop_interval_ms: u32,
    /// Divider settle time after switching range (milliseconds)
    pub range_settle_ms: u32,
    /// Indicator blinks on a mode change
    pub blink_count: u8,
    /// Indicator on/off half-period (milliseconds)
    pub blink_interval_ms: u32,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            // ADC: MCP3425, PGA x1
            adc_reference_mv: 2048.0,
            adc_full_scale_codes: 32768.0,

            // Resistance
            divider_supply_mv: 2048.0,
            window_low_mv: 500.0,
            window_high_mv: 1500.0,
            range_gains: [0.986, 0.975, 1.000, 0.668],
            continuity_threshold_ohms: 80,

            // Voltage
            voltage_attenuation: 11.0,
            voltage_calibration: 0.998,

            // Timing
            loop_interval_ms: 50,
            range_settle_ms: 100,
            blink_count: 3,
            blink_interval_ms: 100,
        }
    }
}

impl MeterConfig {
    /// Millivolts per ADC code (0.0625 with the defaults).
    pub fn resolution_factor(&self) -> f32 {
        self.adc_reference_mv / self.adc_full_scale_codes
    }

    /// Reject parameter sets that would break the range search or the
    /// scaling pipeline.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.adc_reference_mv > 0.0 && self.adc_full_scale_codes > 0.0) {
            return Err(Error::Config("ADC resolution must be positive"));
        }
        if self.window_low_mv >= self.window_high_mv {
            return Err(Error::Config("acceptance window is empty"));
        }
        if self.window_high_mv >= self.divider_supply_mv {
            return Err(Error::Config("acceptance window exceeds divider supply"));
        }
        if self.range_gains.iter().any(|g| !(*g > 0.0)) {
            return Err(Error::Config("range gain must be positive"));
        }
        if !(self.voltage_attenuation > 0.0 && self.voltage_calibration > 0.0) {
            return Err(Error::Config("voltage scaling must be positive"));
        }
        if self.loop_interval_ms == 0 {
            return Err(Error::Config("loop interval must be non-zero"));
        }
        if self.blink_interval_ms == 0 {
            return Err(Error::Config("blink interval must be non-zero"));
        }
        Ok(())
    }

    /// JSON rendering for the boot-time console dump.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
