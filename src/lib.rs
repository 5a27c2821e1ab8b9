//! Multitester firmware library.
//!
//! Auto-ranging resistance and DC voltage measurement for a handheld
//! tester.  Everything that makes a decision lives here and is generic
//! over `embedded-hal` traits, so it builds and tests on the host; the
//! firmware binary only wires ESP-IDF peripherals behind the ports.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alert;
pub mod app;
pub mod config;
pub mod display;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod measure;
pub mod pins;
