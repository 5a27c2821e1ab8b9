//! Unified error types for the tester firmware.
//!
//! Every port returns `Result<_, Error>`.  None of these are fatal: the
//! service logs them, records them in the tick report and keeps running,
//! the same way the bare-metal firmware ignored failed bus transfers.
//! All variants are `Copy` so they can be carried in reports and events
//! without allocation.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A transfer to or from the ADC failed.
    Adc(BusError),
    /// A transfer to the character display failed.
    Display(BusError),
    /// A GPIO read or write failed.
    Pin(PinRole),
    /// The buzzer PWM channel rejected a duty update.
    Alert,
    /// Configuration failed validation.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adc(e) => write!(f, "adc: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Pin(role) => write!(f, "pin: {role} failed"),
            Self::Alert => write!(f, "alert: PWM update failed"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Two-wire bus errors
// ---------------------------------------------------------------------------

/// Condensed I2C failure cause, derived from [`embedded_hal::i2c::ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The target did not acknowledge its address or a data byte.
    NoAcknowledge,
    /// Another controller won arbitration.
    ArbitrationLoss,
    /// Misplaced start/stop or other bus-level fault.
    Bus,
    /// Receive overrun.
    Overrun,
    /// Anything the HAL could not classify.
    Other,
}

impl BusError {
    /// Classify any HAL I2C error.
    pub fn from_i2c<E: embedded_hal::i2c::Error>(err: &E) -> Self {
        match err.kind() {
            ErrorKind::NoAcknowledge(_) => Self::NoAcknowledge,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLoss,
            ErrorKind::Bus => Self::Bus,
            ErrorKind::Overrun => Self::Overrun,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAcknowledge => write!(f, "no acknowledge"),
            Self::ArbitrationLoss => write!(f, "arbitration lost"),
            Self::Bus => write!(f, "bus error"),
            Self::Overrun => write!(f, "overrun"),
            Self::Other => write!(f, "transfer failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pin roles
// ---------------------------------------------------------------------------

/// Which group of pins a GPIO failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    /// R1..R4 range-select outputs.
    Range,
    /// Mode routing MOSFETs and the shutdown line.
    Routing,
    /// Mode switch inputs.
    Switch,
    /// Status LED.
    Indicator,
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range => write!(f, "range select"),
            Self::Routing => write!(f, "mode routing"),
            Self::Switch => write!(f, "mode switch"),
            Self::Indicator => write!(f, "status indicator"),
        }
    }
}

impl From<PinRole> for Error {
    fn from(role: PinRole) -> Self {
        Self::Pin(role)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
