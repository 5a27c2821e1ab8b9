//! Hardware adapter: bridges the board drivers to the domain port traits.
//!
//! Owns the shared I²C bus and every driver, exposing them through the
//! port traits in [`crate::app::ports`].  Generic over the embedded-hal
//! traits so the same adapter runs on ESP-IDF and against host fakes.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;
use embedded_hal::pwm::SetDutyCycle;
use log::{info, warn};

use crate::app::ports::{
    AdcPort, AlertPort, DisplayPort, FrontEndPort, IndicatorPort, SwitchPort,
};
use crate::drivers::mcp3425::POWER_UP_MS;
use crate::drivers::{Aqm0802, Buzzer, FrontEnd, Mcp3425, ModeSwitches, StatusIndicator};
use crate::error::Error;
use crate::fsm::{RoutingPins, SwitchLevels};
use crate::measure::{RangePins, RawSample};
use crate::pins;

/// Concrete adapter that combines all tester hardware behind port traits.
pub struct HardwareAdapter<I2C, OUT, IN, PWM> {
    i2c: I2C,
    adc: Mcp3425,
    lcd: Aqm0802,
    front_end: FrontEnd<OUT>,
    switches: ModeSwitches<IN>,
    indicator: StatusIndicator<OUT>,
    buzzer: Buzzer<PWM>,
}

impl<I2C, OUT, IN, PWM> HardwareAdapter<I2C, OUT, IN, PWM>
where
    I2C: I2c,
    OUT: OutputPin,
    IN: InputPin,
    PWM: SetDutyCycle,
{
    pub fn new(
        i2c: I2C,
        front_end: FrontEnd<OUT>,
        switches: ModeSwitches<IN>,
        indicator: StatusIndicator<OUT>,
        buzzer: Buzzer<PWM>,
    ) -> Self {
        Self {
            i2c,
            adc: Mcp3425::new(pins::ADC_ADDR),
            lcd: Aqm0802::new(pins::LCD_ADDR),
            front_end,
            switches,
            indicator,
            buzzer,
        }
    }

    /// Silence the buzzer, initialise the LCD and start the ADC.
    ///
    /// Every step is attempted even if an earlier one fails; the first
    /// failure is returned so the caller can log it and carry on.
    pub fn bring_up<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        let mut result = Ok(());

        if let Err(e) = self.buzzer.set(false) {
            warn!("bring-up: buzzer: {}", e);
            result = result.and(Err(e));
        }
        if let Err(e) = self.lcd.init(&mut self.i2c, delay) {
            warn!("bring-up: {}", e);
            result = result.and(Err(e));
        }
        if let Err(e) = self.adc.configure(&mut self.i2c) {
            warn!("bring-up: {}", e);
            result = result.and(Err(e));
        }
        delay.delay_ms(POWER_UP_MS);

        if result.is_ok() {
            info!(
                "Peripherals initialised (LCD 0x{:02X}, ADC 0x{:02X})",
                pins::LCD_ADDR,
                pins::ADC_ADDR
            );
        }
        result
    }
}

// ── Input ports ───────────────────────────────────────────────

impl<I2C, OUT, IN, PWM> SwitchPort for HardwareAdapter<I2C, OUT, IN, PWM>
where
    IN: InputPin,
{
    fn read_switches(&mut self) -> Result<SwitchLevels, Error> {
        self.switches.read()
    }
}

impl<I2C, OUT, IN, PWM> AdcPort for HardwareAdapter<I2C, OUT, IN, PWM>
where
    I2C: I2c,
{
    fn read_sample(&mut self) -> Result<RawSample, Error> {
        self.adc.read_raw(&mut self.i2c)
    }
}

// ── Output ports ──────────────────────────────────────────────

impl<I2C, OUT, IN, PWM> FrontEndPort for HardwareAdapter<I2C, OUT, IN, PWM>
where
    OUT: OutputPin,
{
    fn set_range(&mut self, pins: RangePins) -> Result<(), Error> {
        self.front_end.set_range(pins)
    }

    fn set_routing(&mut self, routing: RoutingPins) -> Result<(), Error> {
        self.front_end.set_routing(routing)
    }
}

impl<I2C, OUT, IN, PWM> DisplayPort for HardwareAdapter<I2C, OUT, IN, PWM>
where
    I2C: I2c,
{
    fn set_cursor(&mut self, pos: u8) -> Result<(), Error> {
        self.lcd.set_cursor(&mut self.i2c, pos)
    }

    fn write_char(&mut self, c: u8) -> Result<(), Error> {
        self.lcd.write_char(&mut self.i2c, c)
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.lcd.clear(&mut self.i2c)
    }
}

impl<I2C, OUT, IN, PWM> AlertPort for HardwareAdapter<I2C, OUT, IN, PWM>
where
    PWM: SetDutyCycle,
{
    fn set_alert(&mut self, on: bool) -> Result<(), Error> {
        self.buzzer.set(on)
    }
}

impl<I2C, OUT, IN, PWM> IndicatorPort for HardwareAdapter<I2C, OUT, IN, PWM>
where
    OUT: OutputPin,
{
    fn set_indicator(&mut self, on: bool) -> Result<(), Error> {
        self.indicator.set(on)
    }
}
