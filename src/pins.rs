//! GPIO / peripheral pin assignments for the tester main board.
//!
//! Single source of truth — the board bring-up in `main.rs` references
//! this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Range select (one reference resistor per channel)
// ---------------------------------------------------------------------------

/// Channel 0 reference (1 kΩ decade).
pub const R1_GPIO: i32 = 13;
/// Channel 1 reference (10 kΩ decade). Also the fixed voltage-mode divider.
pub const R2_GPIO: i32 = 10;
/// Channel 2 reference (100 kΩ decade).
pub const R3_GPIO: i32 = 8;
/// Channel 3 reference (1 MΩ decade).
pub const R4_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Front-end routing MOSFETs
// ---------------------------------------------------------------------------

/// Resistance divider path enable.
pub const RES_PATH_GPIO: i32 = 3;
/// Voltage input path enable.
pub const VOLT_PATH_GPIO: i32 = 2;
/// Voltage attenuator buffer enable.
pub const VOLT_BUFFER_GPIO: i32 = 14;
/// Analog shutdown, active LOW. HIGH = shutdown released.
pub const SHDN_N_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// User interface
// ---------------------------------------------------------------------------

/// Piezo buzzer, LEDC PWM.
pub const BUZZER_GPIO: i32 = 5;
/// Status LED, blinked on mode change.
pub const LED_GPIO: i32 = 21;
/// Resistance mode push-switch (active-low, internal pull-up).
pub const SW_RES_GPIO: i32 = 17;
/// Voltage mode push-switch (active-low, internal pull-up).
pub const SW_VOL_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// I²C bus (ADC + character LCD)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 40;
pub const I2C_SCL_GPIO: i32 = 41;
/// Standard-mode bus clock.
pub const I2C_BAUD_HZ: u32 = 100_000;

/// AQM0802A 8x2 character LCD.
pub const LCD_ADDR: u8 = 0x3E;
/// MCP3425 16-bit delta-sigma ADC.
pub const ADC_ADDR: u8 = 0x68;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the buzzer (1 kHz tone).
pub const BUZZER_PWM_FREQ_HZ: u32 = 1_000;
/// Buzzer duty while sounding.
pub const BUZZER_DUTY_PERCENT: u8 = 50;
