//! Character display frames.
//!
//! The AQM0802A has two rows of eight cells; row 0 starts at DDRAM
//! address 0x00, row 1 at 0x40.  The cursor auto-increments after each
//! character, so a frame is a short list of cursor moves and characters
//! that the service replays through the display port.

pub mod formatter;

use heapless::Vec;

pub use formatter::{DisplayFormatter, digits};

/// Columns per row.
pub const COLUMNS: u8 = 8;
/// DDRAM address of the first cell on row 1.
pub const ROW1: u8 = 0x40;
/// Character code of the Ω glyph in the controller's CGROM.
pub const OHM_GLYPH: u8 = 0x1E;

/// Settle time after a clear/home command.
pub const CLEAR_SETTLE_MS: u32 = 2;

/// Largest frame the formatter produces, with headroom.
pub const FRAME_CAPACITY: usize = 12;

/// One primitive display write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOp {
    /// Move the cursor to a DDRAM address.
    SetCursor(u8),
    /// Write one character at the cursor and advance it.
    Char(u8),
}

/// A rendered frame: bounded, heap-free list of display writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFrame {
    ops: Vec<DisplayOp, FRAME_CAPACITY>,
}

impl DisplayFrame {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn cursor(&mut self, pos: u8) -> &mut Self {
        self.push(DisplayOp::SetCursor(pos))
    }

    pub fn char(&mut self, c: u8) -> &mut Self {
        self.push(DisplayOp::Char(c))
    }

    pub fn text(&mut self, bytes: &[u8]) -> &mut Self {
        for &c in bytes {
            self.char(c);
        }
        self
    }

    fn push(&mut self, op: DisplayOp) -> &mut Self {
        if self.ops.push(op).is_err() {
            debug_assert!(false, "display frame overflow");
        }
        self
    }

    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    /// Characters in write order, ignoring cursor moves.
    pub fn chars(&self) -> impl Iterator<Item = u8> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DisplayOp::Char(c) => Some(*c),
            DisplayOp::SetCursor(_) => None,
        })
    }
}
