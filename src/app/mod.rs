//! Application core: the tester's decision logic, zero direct I/O.
//!
//! The service strings together mode selection, measurement, rendering
//! and the continuity alert.  All interaction with the board happens
//! through the port traits in [`ports`], so this layer runs on the host
//! against a simulated board.

pub mod events;
pub mod ports;
pub mod service;
