//! Peripheral drivers, generic over `embedded-hal` 1.0 traits.
//!
//! I²C drivers hold only their bus address and borrow the bus per call,
//! so the ADC and the LCD can share one controller owned by the hardware
//! adapter.

pub mod aqm0802;
pub mod buzzer;
pub mod front_end;
pub mod indicator;
pub mod mcp3425;
pub mod switches;


pub use aqm0802::Aqm0802;
pub use buzzer::Buzzer;
pub use front_end::FrontEnd;
pub use indicator::StatusIndicator;
pub use mcp3425::Mcp3425;
pub use switches::ModeSwitches;
