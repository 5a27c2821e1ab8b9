//! Application service: the hexagonal core.
//!
//! [`TesterService`] owns the process-wide state (current mode, the range
//! channel the resistance search resumes from, the calibration table) and
//! exposes a deterministic step function.  All I/O flows through port
//! traits and an injected [`DelayNs`], so a host test can drive it one
//! simulated cycle at a time.
//!
//! ```text
//!  SwitchPort ──▶ ┌──────────────────────────────┐ ──▶ DisplayPort
//!     AdcPort ──▶ │        TesterService          │ ──▶ AlertPort
//!                 │ Modes · Meters · Alert        │ ──▶ FrontEndPort
//!                 └──────────────────────────────┘ ──▶ EventSink
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::alert::AlertController;
use crate::config::MeterConfig;
use crate::display::{CLEAR_SETTLE_MS, DisplayFormatter};
use crate::error::Error;
use crate::fsm::{Mode, ModeController, SwitchLevels};
use crate::measure::{RangeChannel, RangeSelector, Reading, ResistanceMeter, VoltageMeter};

use super::events::AppEvent;
use super::ports::{EventSink, TesterHardware};

/// What one call to [`TesterService::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Mode active at the end of the cycle.
    pub mode: Mode,
    /// Whether the switch poll changed the mode this cycle.
    pub transitioned: bool,
    /// `None` when the measurement was abandoned.
    pub reading: Option<Reading>,
    /// Alert output state after the cycle.
    pub alert_on: bool,
    /// First port failure seen during the cycle.
    pub error: Option<Error>,
}

// ───────────────────────────────────────────────────────────────
// TesterService
// ───────────────────────────────────────────────────────────────

pub struct TesterService {
    config: MeterConfig,
    modes: ModeController,
    resistance: ResistanceMeter,
    voltage: VoltageMeter,
    alert: AlertController,
    /// Latest accepted resistance, fed to the alert in voltage mode.
    last_ohms: u32,
    tick_count: u64,
}

impl TesterService {
    /// Construct the service.  Does **not** touch the board; call
    /// [`start`](Self::start) next.
    pub fn new(config: MeterConfig) -> Self {
        let alert = AlertController::new(config.continuity_threshold_ohms);
        Self {
            config,
            modes: ModeController::new(Mode::Resistance),
            resistance: ResistanceMeter::new(),
            voltage: VoltageMeter::new(),
            alert,
            last_ohms: u32::MAX,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Pick the boot mode from the voltage switch and configure the front
    /// end for it.  No blink and no clear at boot.
    pub fn start<H, D, S>(&mut self, hw: &mut H, _delay: &mut D, sink: &mut S) -> Mode
    where
        H: TesterHardware,
        D: DelayNs,
        S: EventSink,
    {
        let mut first_error = None;
        let switches = match hw.read_switches() {
            Ok(levels) => levels,
            Err(e) => {
                Self::degrade(e, &mut first_error, sink);
                SwitchLevels::RELEASED
            }
        };
        let mode = ModeController::initial_mode(switches.voltage);
        self.modes = ModeController::new(mode);
        self.configure_front_end(mode, hw, &mut first_error, sink);
        if self.modes.descriptor(mode).draws_glyphs {
            if let Err(e) = hw.draw(&DisplayFormatter::resistance_glyphs()) {
                Self::degrade(e, &mut first_error, sink);
            }
        }
        info!("Tester started in {}", self.modes.descriptor(mode).name);
        sink.emit(&AppEvent::Started(mode));
        mode
    }

    /// One loop iteration without the outer sleep: poll switches, run the
    /// entry sequence on a mode change, measure, render, update the alert.
    pub fn tick<H, D, S>(&mut self, hw: &mut H, delay: &mut D, sink: &mut S) -> TickReport
    where
        H: TesterHardware,
        D: DelayNs,
        S: EventSink,
    {
        self.tick_count += 1;
        let mut first_error = None;

        // 1. Switches; a failed read counts as nothing pressed.
        let switches = match hw.read_switches() {
            Ok(levels) => levels,
            Err(e) => {
                Self::degrade(e, &mut first_error, sink);
                SwitchLevels::RELEASED
            }
        };

        // 2. Mode entry sequence
        let transition = self.modes.update(switches);
        if let Some(t) = transition {
            sink.emit(&AppEvent::ModeChanged {
                from: t.from,
                to: t.to,
            });
            self.enter_mode(t.to, hw, delay, &mut first_error, sink);
        }

        // 3. Measure, render, alert
        let mode = self.modes.current();
        let reading = self.measure(mode, hw, delay, &mut first_error, sink);

        TickReport {
            mode,
            transitioned: transition.is_some(),
            reading,
            alert_on: self.alert.is_on(),
            error: first_error,
        }
    }

    /// Production loop: tick, sleep the loop interval, repeat until power-off.
    pub fn run_forever<H, D, S>(&mut self, hw: &mut H, delay: &mut D, sink: &mut S) -> !
    where
        H: TesterHardware,
        D: DelayNs,
        S: EventSink,
    {
        loop {
            self.tick(hw, delay, sink);
            delay.delay_ms(self.config.loop_interval_ms);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    /// Channel the next resistance search starts from.
    pub fn range_channel(&self) -> RangeChannel {
        self.resistance.channel()
    }

    pub fn alert_on(&self) -> bool {
        self.alert.is_on()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn transition_count(&self) -> u32 {
        self.modes.transition_count()
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Routing, blink, clear, then the mode's fixed glyphs.
    fn enter_mode<H, D, S>(
        &self,
        mode: Mode,
        hw: &mut H,
        delay: &mut D,
        first_error: &mut Option<Error>,
        sink: &mut S,
    ) where
        H: TesterHardware,
        D: DelayNs,
        S: EventSink,
    {
        self.configure_front_end(mode, hw, first_error, sink);

        for _ in 0..self.config.blink_count {
            if let Err(e) = hw.set_indicator(true) {
                Self::degrade(e, first_error, sink);
            }
            delay.delay_ms(self.config.blink_interval_ms);
            if let Err(e) = hw.set_indicator(false) {
                Self::degrade(e, first_error, sink);
            }
            delay.delay_ms(self.config.blink_interval_ms);
        }

        if let Err(e) = hw.clear() {
            Self::degrade(e, first_error, sink);
        }
        delay.delay_ms(CLEAR_SETTLE_MS);

        if self.modes.descriptor(mode).draws_glyphs {
            if let Err(e) = hw.draw(&DisplayFormatter::resistance_glyphs()) {
                Self::degrade(e, first_error, sink);
            }
        }
    }

    /// Apply the mode's routing lines and its fixed range, if any.
    fn configure_front_end<H, S>(
        &self,
        mode: Mode,
        hw: &mut H,
        first_error: &mut Option<Error>,
        sink: &mut S,
    ) where
        H: TesterHardware,
        S: EventSink,
    {
        let desc = self.modes.descriptor(mode);
        let routing = desc.routing;
        let fixed_range = desc.fixed_range;
        if let Err(e) = hw.set_routing(routing) {
            Self::degrade(e, first_error, sink);
        }
        if let Some(channel) = fixed_range {
            if let Err(e) = hw.set_range(RangeSelector::pins(channel)) {
                Self::degrade(e, first_error, sink);
            }
        }
    }

    fn measure<H, D, S>(
        &mut self,
        mode: Mode,
        hw: &mut H,
        delay: &mut D,
        first_error: &mut Option<Error>,
        sink: &mut S,
    ) -> Option<Reading>
    where
        H: TesterHardware,
        D: DelayNs,
        S: EventSink,
    {
        let (reading, frame, ohms) = match mode {
            Mode::Resistance => match self.resistance.measure(hw, delay, &self.config) {
                Ok(m) => {
                    debug!(
                        "{} ohm on {} ({:?}, {:.1} mV)",
                        m.ohms, m.channel, m.acceptance, m.divider_mv
                    );
                    self.last_ohms = m.ohms;
                    (
                        Reading::Resistance(m),
                        DisplayFormatter::render_resistance(m.ohms),
                        m.ohms,
                    )
                }
                Err(e) => {
                    Self::degrade(e, first_error, sink);
                    return None;
                }
            },
            Mode::Voltage => match self.voltage.measure(hw, &self.config) {
                Ok(m) => (
                    Reading::Voltage(m),
                    DisplayFormatter::render_voltage(m.millivolts),
                    self.last_ohms,
                ),
                Err(e) => {
                    Self::degrade(e, first_error, sink);
                    return None;
                }
            },
        };

        if let Err(e) = hw.draw(&frame) {
            Self::degrade(e, first_error, sink);
        }
        if let Err(e) = self.alert.update(hw, mode, ohms) {
            Self::degrade(e, first_error, sink);
        }
        sink.emit(&AppEvent::Measured(reading));
        Some(reading)
    }

    /// Log a port failure, keep the first one for the report, and emit it.
    fn degrade(err: Error, first_error: &mut Option<Error>, sink: &mut impl EventSink) {
        warn!("Degraded: {}", err);
        first_error.get_or_insert(err);
        sink.emit(&AppEvent::Degraded(err));
    }
}
