//! MCP3425 16-bit delta-sigma ADC.
//!
//! Configured once for continuous conversion at 16 bits / 15 SPS with the
//! PGA at ×1.  Each read returns the latest result as a big-endian `i16`;
//! the configuration byte that follows it is not needed.

use embedded_hal::i2c::I2c;

use crate::error::{BusError, Error};
use crate::measure::RawSample;

/// Continuous mode, 16-bit, 15 SPS, PGA ×1.
pub const CONFIG_16BIT_CONTINUOUS: u8 = 0x98;

/// Wait after [`Mcp3425::configure`] before the first valid sample.
pub const POWER_UP_MS: u32 = 200;

/// Driver handle.  Holds only the bus address so the bus can be shared.
pub struct Mcp3425 {
    addr: u8,
}

impl Mcp3425 {
    pub fn new(addr: u8) -> Self {
        Self { addr }
    }

    pub fn configure<I: I2c>(&self, i2c: &mut I) -> Result<(), Error> {
        i2c.write(self.addr, &[CONFIG_16BIT_CONTINUOUS])
            .map_err(|e| Error::Adc(BusError::from_i2c(&e)))
    }

    pub fn read_raw<I: I2c>(&self, i2c: &mut I) -> Result<RawSample, Error> {
        let mut buf = [0u8; 2];
        i2c.read(self.addr, &mut buf)
            .map_err(|e| Error::Adc(BusError::from_i2c(&e)))?;
        Ok(RawSample::from_be_bytes(buf))
    }
}
