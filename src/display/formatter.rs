//! Renders measurements into the fixed cell layout.
//!
//! ```text
//!   Resistance   row 0: T T T T . R R R     row 1: _ _ _ _ _ _ k Ω
//!   Voltage      row 0: ± V V . C C V _
//! ```
//!
//! `.`, `k` and `Ω` are drawn once when resistance mode is entered; the
//! per-cycle frame only rewrites the digit groups.  Digit groups keep the
//! low-order digits of the value, so an over-wide value is truncated
//! rather than flagged.

use heapless::Vec;

use super::{DisplayFrame, OHM_GLYPH, ROW1};

/// Widest digit group the layout uses.
pub const MAX_DIGITS: usize = 4;

const THOUSANDS_AT: u8 = 0x00;
const DECIMAL_POINT_AT: u8 = 0x04;
const REMAINDER_AT: u8 = 0x05;
const KILO_AT: u8 = ROW1 + 6;
const OHM_AT: u8 = ROW1 + 7;
const VOLTAGE_AT: u8 = 0x00;

/// Zero-padded decimal digits of `value mod 10^width`, most significant
/// first.  `width` is clamped to [`MAX_DIGITS`].
pub fn digits(value: u32, width: usize) -> Vec<u8, MAX_DIGITS> {
    let width = width.min(MAX_DIGITS);
    let mut buf = [b'0'; MAX_DIGITS];
    let mut v = value;
    for slot in buf.iter_mut().rev() {
        *slot = b'0' + (v % 10) as u8;
        v /= 10;
    }
    Vec::from_slice(&buf[MAX_DIGITS - width..]).unwrap_or_default()
}

pub struct DisplayFormatter;

impl DisplayFormatter {
    /// `ohms / 1000` as four digits at 0x00, `ohms % 1000` as three at 0x05.
    pub fn render_resistance(ohms: u32) -> DisplayFrame {
        let mut frame = DisplayFrame::new();
        frame
            .cursor(THOUSANDS_AT)
            .text(&digits(ohms / 1000, 4))
            .cursor(REMAINDER_AT)
            .text(&digits(ohms % 1000, 3));
        frame
    }

    /// Decimal point and `kΩ` for the resistance layout.
    pub fn resistance_glyphs() -> DisplayFrame {
        let mut frame = DisplayFrame::new();
        frame
            .cursor(DECIMAL_POINT_AT)
            .char(b'.')
            .cursor(KILO_AT)
            .char(b'k')
            .cursor(OHM_AT)
            .char(OHM_GLYPH);
        frame
    }

    /// `±VV.CCV ` from signed millivolts.  The trailing blank clears any
    /// digit left over from a wider previous frame.
    pub fn render_voltage(millivolts: i32) -> DisplayFrame {
        let sign = if millivolts < 0 { b'-' } else { b'+' };
        let magnitude = millivolts.unsigned_abs();
        let mut frame = DisplayFrame::new();
        frame
            .cursor(VOLTAGE_AT)
            .char(sign)
            .text(&digits(magnitude / 1000, 2))
            .char(b'.')
            .text(&digits((magnitude % 1000) / 10, 2))
            .char(b'V')
            .char(b' ');
        frame
    }
}
