//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                          | Connects to             |
//! |------------|-------------------------------------|-------------------------|
//! | `hardware` | SwitchPort, AdcPort, FrontEndPort,  | MCP3425, AQM0802A, GPIO |
//! |            | DisplayPort, AlertPort, IndicatorPort | LEDC buzzer           |
//! | `log_sink` | EventSink                           | Serial log output       |

pub mod hardware;
pub mod log_sink;

pub use hardware::HardwareAdapter;
pub use log_sink::LogEventSink;
