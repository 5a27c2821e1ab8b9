//! Auto-ranging resistance meter.
//!
//! The unknown resistor forms a divider with one of four reference
//! resistors.  The ADC samples the voltage across the reference:
//!
//! ```text
//!   mV = supply · Rref / (Rx + Rref)   ⇒   Rx = Rref · (supply − mV) / mV
//! ```
//!
//! ## Search
//!
//! Starting from the channel that won the previous call:
//!
//! 1. Drive the channel's select line, wait the settle time, sample.
//! 2. Accept if `window_low < mV < window_high`.
//! 3. Otherwise step to a larger reference when `mV ≤ window_low`, or a
//!    smaller one when `mV ≥ window_high`.  When no such channel exists
//!    (already at ch3 or ch0) the reading is accepted as is.
//!
//! For an ideal divider the decades overlap, so an unknown sitting just
//! above 3.1× a reference reads low on that channel and high on the next
//! one.  The search would bounce between the two forever; after
//! [`MAX_SEARCH_STEPS`] samples the last reading is reported instead.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::{AdcPort, FrontEndPort};
use crate::config::MeterConfig;
use crate::error::Error;

use super::range::{RangeChannel, RangeSelector};

/// Samples taken before an oscillating search gives up.  Two full sweeps;
/// a search that does not reverse direction needs at most four.
pub const MAX_SEARCH_STEPS: usize = 2 * RangeChannel::COUNT;

/// Why the search stopped on the reported channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Divider voltage inside the usable window.
    InWindow,
    /// Out of window but already at ch0 or ch3.
    SearchLimit,
    /// The search kept reversing and ran out of steps.
    StepBudget,
}

/// Outcome of evaluating one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    Accept(Acceptance),
    Retry(RangeChannel),
}

/// A resistance reading, rounded to whole ohms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceMeasurement {
    pub ohms: u32,
    /// Channel the reading was taken on.
    pub channel: RangeChannel,
    /// Divider voltage the reading was computed from.
    pub divider_mv: f32,
    pub acceptance: Acceptance,
}

/// Acceptance test for one divider sample on `channel`.
pub fn evaluate(channel: RangeChannel, mv: f32, config: &MeterConfig) -> SearchStep {
    if mv > config.window_low_mv && mv < config.window_high_mv {
        return SearchStep::Accept(Acceptance::InWindow);
    }
    let next = if mv <= config.window_low_mv {
        channel.larger()
    } else {
        channel.smaller()
    };
    match next {
        Some(next) => SearchStep::Retry(next),
        None => SearchStep::Accept(Acceptance::SearchLimit),
    }
}

/// Divider equation with the channel's calibration gain, rounded half up.
///
/// Float-to-int conversion saturates: 0 mV (open probes on ch3) reports
/// `u32::MAX`, a divider voltage above the supply reports 0.
pub fn divider_ohms(channel: RangeChannel, mv: f32, config: &MeterConfig) -> u32 {
    let dut = channel.decade_scale() * (config.divider_supply_mv - mv) / mv;
    let dut = dut * channel.gain(config);
    (dut + 0.5) as u32
}

/// Auto-ranging meter.  Holds the winning channel between calls so a
/// steady reading costs a single settle time.
pub struct ResistanceMeter {
    channel: RangeChannel,
}

impl ResistanceMeter {
    pub fn new() -> Self {
        Self::starting_at(RangeChannel::MIN)
    }

    pub fn starting_at(channel: RangeChannel) -> Self {
        Self { channel }
    }

    /// Channel the next search starts from.
    pub fn channel(&self) -> RangeChannel {
        self.channel
    }

    /// Run the range search and compute the resistance.
    ///
    /// A failed pin write or ADC read abandons the search; the channel
    /// reached so far is kept for the next call.
    pub fn measure<H, D>(
        &mut self,
        hw: &mut H,
        delay: &mut D,
        config: &MeterConfig,
    ) -> Result<ResistanceMeasurement, Error>
    where
        H: FrontEndPort + AdcPort,
        D: DelayNs,
    {
        let mut steps = 0;
        loop {
            hw.set_range(RangeSelector::pins(self.channel))?;
            delay.delay_ms(config.range_settle_ms);
            let mv = hw.read_sample()?.to_millivolts(config);
            steps += 1;

            let acceptance = match evaluate(self.channel, mv, config) {
                SearchStep::Accept(acceptance) => acceptance,
                SearchStep::Retry(_) if steps >= MAX_SEARCH_STEPS => Acceptance::StepBudget,
                SearchStep::Retry(next) => {
                    debug!("range: {:.1} mV on {} -> {}", mv, self.channel, next);
                    self.channel = next;
                    continue;
                }
            };

            return Ok(ResistanceMeasurement {
                ohms: divider_ohms(self.channel, mv, config),
                channel: self.channel,
                divider_mv: mv,
                acceptance,
            });
        }
    }
}

impl Default for ResistanceMeter {
    fn default() -> Self {
        Self::new()
    }
}
