//! Range channels and the pin pattern that selects each one.
//!
//! Four reference resistors sit in the divider network, one decade apart.
//! Exactly one of the R1..R4 select lines is driven high at a time.

use embedded_hal::digital::PinState;

use crate::config::MeterConfig;

/// Decade scale of the reference resistor on each channel (ohms).
const DECADE_SCALE: [f32; RangeChannel::COUNT] = [1_000.0, 10_000.0, 100_000.0, 1_000_000.0];

/// Index of the active reference resistor, always within `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RangeChannel(u8);

impl RangeChannel {
    /// Number of fitted reference resistors.
    pub const COUNT: usize = 4;
    /// 1 kΩ reference. Search boundary for low resistances.
    pub const MIN: Self = Self(0);
    /// 1 MΩ reference. Search boundary for high resistances.
    pub const MAX: Self = Self(3);
    /// 10 kΩ reference, switched in as the fixed divider in voltage mode.
    pub const VOLTAGE_DIVIDER: Self = Self(1);

    /// `None` when `index` is outside `0..=3`.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Next larger reference (higher decade), or `None` at [`Self::MAX`].
    pub fn larger(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Next smaller reference (lower decade), or `None` at [`Self::MIN`].
    pub fn smaller(self) -> Option<Self> {
        self.0.checked_sub(1).and_then(Self::new)
    }

    /// ×1k / ×10k / ×100k / ×1M.
    pub fn decade_scale(self) -> f32 {
        DECADE_SCALE[self.0 as usize]
    }

    /// Calibration gain for this channel from the config table.
    pub fn gain(self, config: &MeterConfig) -> f32 {
        config.range_gains[self.0 as usize]
    }

    /// All channels, lowest decade first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl core::fmt::Display for RangeChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

/// Levels for the R1..R4 select outputs, in pin order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePins(pub [PinState; RangeChannel::COUNT]);

impl RangePins {
    /// Every select line low (no reference switched in).
    pub const NONE: Self = Self([PinState::Low; RangeChannel::COUNT]);

    /// The channel whose line is high, if exactly one is.
    pub fn selected(&self) -> Option<RangeChannel> {
        let mut high = self
            .0
            .iter()
            .enumerate()
            .filter(|(_, level)| **level == PinState::High);
        match (high.next(), high.next()) {
            (Some((idx, _)), None) => RangeChannel::new(idx as u8),
            _ => None,
        }
    }
}

/// Maps a range channel onto the analog-front-end select lines.
pub struct RangeSelector;

impl RangeSelector {
    /// One-hot pin pattern for `channel`.
    pub fn pins(channel: RangeChannel) -> RangePins {
        let mut levels = [PinState::Low; RangeChannel::COUNT];
        levels[channel.index() as usize] = PinState::High;
        RangePins(levels)
    }
}
