//! Single status LED, blinked on mode changes.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::{Error, PinRole};

pub struct StatusIndicator<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> StatusIndicator<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), Error> {
        self.pin
            .set_state(PinState::from(on))
            .map_err(|_| Error::Pin(PinRole::Indicator))?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
