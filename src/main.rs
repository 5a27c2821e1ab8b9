//! Multitester Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter (I²C ADC + LCD, GPIO, LEDC)   LogEventSink    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            TesterService (pure logic)                  │    │
//! │  │  ModeController · ResistanceMeter · VoltageMeter       │    │
//! │  │  DisplayFormatter · AlertController                    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, config::TimerConfig};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use multitester::adapters::{HardwareAdapter, LogEventSink};
use multitester::app::service::TesterService;
use multitester::config::MeterConfig;
use multitester::drivers::{Buzzer, FrontEnd, ModeSwitches, StatusIndicator};
use multitester::pins;

type Out = PinDriver<'static, AnyOutputPin, Output>;
type In = PinDriver<'static, AnyIOPin, Input>;

/// Push-pull output on a GPIO listed in [`pins`].
fn output(gpio: i32) -> Result<Out> {
    // SAFETY: every GPIO number in `pins` is claimed exactly once, here
    // in `main`, and never through `Peripherals::pins`.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    Ok(PinDriver::output(pin)?)
}

/// Input with the internal pull-up enabled.
fn pulled_up_input(gpio: i32) -> Result<In> {
    // SAFETY: see `output`.
    let pin = unsafe { AnyIOPin::new(gpio) };
    let mut drv = PinDriver::input(pin)?;
    drv.set_pull(Pull::Up)?;
    Ok(drv)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Multitester v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Calibration table ──────────────────────────────────
    let mut config = MeterConfig::default();
    if let Err(e) = config.validate() {
        warn!("{}, using defaults", e);
        config = MeterConfig::default();
    }
    match config.to_json() {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config dump failed: {}", e),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    let p = Peripherals::take()?;

    let i2c = I2cDriver::new(
        p.i2c0,
        // SAFETY: see `output`.
        unsafe { AnyIOPin::new(pins::I2C_SDA_GPIO) },
        unsafe { AnyIOPin::new(pins::I2C_SCL_GPIO) },
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ)),
    )?;

    let buzzer_timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::default().frequency(Hertz(pins::BUZZER_PWM_FREQ_HZ)),
    )?;
    let buzzer_pwm = LedcDriver::new(
        p.ledc.channel0,
        &buzzer_timer,
        // SAFETY: see `output`.
        unsafe { AnyOutputPin::new(pins::BUZZER_GPIO) },
    )?;

    let front_end = FrontEnd::new(
        [
            output(pins::R1_GPIO)?,
            output(pins::R2_GPIO)?,
            output(pins::R3_GPIO)?,
            output(pins::R4_GPIO)?,
        ],
        [
            output(pins::RES_PATH_GPIO)?,
            output(pins::VOLT_PATH_GPIO)?,
            output(pins::VOLT_BUFFER_GPIO)?,
            output(pins::SHDN_N_GPIO)?,
        ],
    )?;
    let switches = ModeSwitches::new(
        pulled_up_input(pins::SW_RES_GPIO)?,
        pulled_up_input(pins::SW_VOL_GPIO)?,
    );
    let indicator = StatusIndicator::new(output(pins::LED_GPIO)?);

    let mut hw = HardwareAdapter::new(i2c, front_end, switches, indicator, Buzzer::new(buzzer_pwm));
    let mut delay = FreeRtos;
    let mut sink = LogEventSink::new();

    // Degraded, not fatal: the loop keeps running with a dead LCD or ADC.
    if let Err(e) = hw.bring_up(&mut delay) {
        warn!("Bring-up incomplete: {}", e);
    }

    // ── 4. Run ────────────────────────────────────────────────
    let mut service = TesterService::new(config);
    service.start(&mut hw, &mut delay, &mut sink);
    service.run_forever(&mut hw, &mut delay, &mut sink)
}
