//! Analog front-end pin bank.
//!
//! Four range-select outputs pick the reference resistor; four routing
//! outputs switch the input between the resistance divider and the
//! voltage attenuator.  Everything is driven low at construction so no
//! reference or path is connected until a mode is applied.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::{Error, PinRole};
use crate::fsm::RoutingPins;
use crate::measure::RangePins;

pub struct FrontEnd<P> {
    range: [P; 4],
    routing: [P; 4],
}

impl<P: OutputPin> FrontEnd<P> {
    /// `range` is R1..R4; `routing` is resistance path, voltage path,
    /// voltage buffer, shutdown (active low).
    pub fn new(range: [P; 4], routing: [P; 4]) -> Result<Self, Error> {
        let mut fe = Self { range, routing };
        Self::drive(&mut fe.range, [PinState::Low; 4], PinRole::Range)?;
        Self::drive(&mut fe.routing, [PinState::Low; 4], PinRole::Routing)?;
        Ok(fe)
    }

    pub fn set_range(&mut self, pins: RangePins) -> Result<(), Error> {
        Self::drive(&mut self.range, pins.0, PinRole::Range)
    }

    pub fn set_routing(&mut self, routing: RoutingPins) -> Result<(), Error> {
        Self::drive(&mut self.routing, routing.levels(), PinRole::Routing)
    }

    /// Give the pins back.
    pub fn release(self) -> ([P; 4], [P; 4]) {
        (self.range, self.routing)
    }

    fn drive(pins: &mut [P; 4], levels: [PinState; 4], role: PinRole) -> Result<(), Error> {
        for (pin, level) in pins.iter_mut().zip(levels) {
            pin.set_state(level).map_err(|_| Error::Pin(role))?;
        }
        Ok(())
    }
}
