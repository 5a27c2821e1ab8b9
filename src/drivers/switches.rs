//! Mode push-switches (pulled up, active low).

use embedded_hal::digital::{InputPin, PinState};

use crate::error::{Error, PinRole};
use crate::fsm::SwitchLevels;

pub struct ModeSwitches<P> {
    resistance: P,
    voltage: P,
}

impl<P: InputPin> ModeSwitches<P> {
    pub fn new(resistance: P, voltage: P) -> Self {
        Self {
            resistance,
            voltage,
        }
    }

    /// Raw levels; interpretation is left to the mode controller.
    pub fn read(&mut self) -> Result<SwitchLevels, Error> {
        let resistance = Self::level(&mut self.resistance)?;
        let voltage = Self::level(&mut self.voltage)?;
        Ok(SwitchLevels {
            resistance,
            voltage,
        })
    }

    fn level(pin: &mut P) -> Result<PinState, Error> {
        pin.is_high()
            .map(PinState::from)
            .map_err(|_| Error::Pin(PinRole::Switch))
    }
}
