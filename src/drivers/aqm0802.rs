//! AQM0802A 8×2 character LCD (ST7032 controller) on I²C.
//!
//! Every transfer is two bytes: a control byte selecting the command or
//! data register, then the payload.  Only clear/home and the booster
//! enable during init need a settle delay; the caller handles the one
//! after a runtime [`Aqm0802::clear`].

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::{BusError, Error};

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const SET_DDRAM_ADDR: u8 = 0x80;
const CLEAR_DISPLAY: u8 = 0x01;

/// Init commands with the wait that follows each (ms).
const INIT_SEQUENCE: [(u8, u32); 9] = [
    (0x38, 0),   // function set, 8-bit, 2 lines
    (0x39, 0),   // extended instruction set
    (0x14, 0),   // internal OSC
    (0x70, 0),   // contrast low bits
    (0x56, 0),   // power/icon/contrast high bits
    (0x6C, 200), // follower on, booster settles
    (0x38, 0),   // normal instruction set
    (0x0C, 0),   // display on, cursor off
    (0x01, 2),   // clear
];

pub struct Aqm0802 {
    addr: u8,
}

impl Aqm0802 {
    pub fn new(addr: u8) -> Self {
        Self { addr }
    }

    /// Send the power-up sequence.  A failed command does not stop the
    /// rest of the sequence; the first failure is returned at the end.
    pub fn init<I: I2c, D: DelayNs>(&self, i2c: &mut I, delay: &mut D) -> Result<(), Error> {
        let mut result = Ok(());
        for (cmd, wait_ms) in INIT_SEQUENCE {
            if let Err(e) = self.command(i2c, cmd) {
                result = result.and(Err(e));
            }
            if wait_ms > 0 {
                delay.delay_ms(wait_ms);
            }
        }
        result
    }

    pub fn set_cursor<I: I2c>(&self, i2c: &mut I, pos: u8) -> Result<(), Error> {
        self.command(i2c, SET_DDRAM_ADDR | pos)
    }

    pub fn write_char<I: I2c>(&self, i2c: &mut I, c: u8) -> Result<(), Error> {
        self.transfer(i2c, CONTROL_DATA, c)
    }

    pub fn clear<I: I2c>(&self, i2c: &mut I) -> Result<(), Error> {
        self.command(i2c, CLEAR_DISPLAY)
    }

    fn command<I: I2c>(&self, i2c: &mut I, cmd: u8) -> Result<(), Error> {
        self.transfer(i2c, CONTROL_COMMAND, cmd)
    }

    fn transfer<I: I2c>(&self, i2c: &mut I, control: u8, byte: u8) -> Result<(), Error> {
        i2c.write(self.addr, &[control, byte])
            .map_err(|e| Error::Display(BusError::from_i2c(&e)))
    }
}
