//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the readout hardware.
//! Pin mappings, bus timing, sampling parameters and the per-unit
//! calibration constants are centralized here.
//!
//! The calibration values are empirical: they were measured against a
//! reference thermometer on one board and must be re-measured per unit.

use fixed::types::I16F16;

use crate::sensor::calibration::{BreakpointTable, LinearCalibration};
use crate::sensor::WaitMode;
use crate::types::{Column, OversampleCount, Page};

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// OLED controller 7-bit I2C address
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// Minimum clock high time on the software bus in nanoseconds
///
/// 600 ns is the fast-mode minimum; the controller accepts it with margin.
pub const BUS_CLOCK_HIGH_NS: u32 = 600;

/// Minimum clock low time after each clock pulse in nanoseconds
pub const BUS_CLOCK_LOW_NS: u32 = 1_300;

/// Data low to clock low in a start condition, in nanoseconds
pub const BUS_START_HOLD_NS: u32 = 600;

/// Data valid to clock released, in nanoseconds
///
/// Covers the pull-up rise time on top of the 100 ns fast-mode setup.
pub const BUS_DATA_SETUP_NS: u32 = 400;

/// Clock released to data released in a stop condition, in nanoseconds
pub const BUS_STOP_SETUP_NS: u32 = 600;

/// Display width in pixel columns
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixel rows (16 pages of 8 rows)
pub const DISPLAY_HEIGHT: u32 = 128;

/// Conversions averaged per reading
pub const OVERSAMPLE_COUNT: u8 = 32;

/// [`OVERSAMPLE_COUNT`], checked at compile time
pub const OVERSAMPLE: OversampleCount = match OversampleCount::new(OVERSAMPLE_COUNT) {
    Some(count) => count,
    None => panic!("OVERSAMPLE_COUNT must be 1-64"),
};

/// How `sample()` waits for a conversion to complete
pub const WAIT_MODE: WaitMode = WaitMode::Halt;

/// Period of the outer acquire/render loop in milliseconds
pub const SAMPLE_PERIOD_MS: u64 = 1_000;

/// Internal sensor scale, degrees per LSB (0.8929)
pub const INTERNAL_SCALE: I16F16 = I16F16::from_bits(58_517);

/// Internal sensor offset in degrees (258.52)
pub const INTERNAL_OFFSET: I16F16 = I16F16::from_bits(16_942_367);

/// Thermocouple breakpoints, temperature x10 at raw 0, 512 and 1024
///
/// Type K through the PGA at maximum gain.
pub const THERMOCOUPLE_BREAKPOINTS: [i32; 3] = [0, 6_610, 13_720];

/// Internal sensor curve, checked at compile time
pub const INTERNAL_CALIBRATION: LinearCalibration =
    match LinearCalibration::new(INTERNAL_SCALE, INTERNAL_OFFSET) {
        Ok(curve) => curve,
        Err(_) => panic!("INTERNAL_SCALE must not be negative"),
    };

/// Thermocouple curve, checked at compile time
pub const THERMOCOUPLE_CALIBRATION: BreakpointTable<'static> =
    match BreakpointTable::new(&THERMOCOUPLE_BREAKPOINTS) {
        Ok(table) => table,
        Err(_) => panic!("THERMOCOUPLE_BREAKPOINTS must have two or more non-decreasing entries"),
    };

/// Where the internal sensor reading is drawn
pub const INTERNAL_ANCHOR: (Column, Page) = (Column::MIN, Page::MIN);

/// Where the thermocouple reading is drawn
pub const THERMOCOUPLE_ANCHOR: (Column, Page) = match Page::new(8) {
    Some(page) => (Column::MIN, page),
    None => panic!("thermocouple page out of range"),
};

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Software bus data line (open drain, external pull-up)
    pub const BUS_SDA: &str = "PB9";

    /// Software bus clock line (open drain, external pull-up)
    pub const BUS_SCL: &str = "PB8";

    /// Thermocouple amplifier input (OPAMP1 non-inverting)
    pub const THERMOCOUPLE_IN: &str = "PA1";
}

/// ADC channel assignments
pub mod adc {
    //! ADC1 input channel numbers on the STM32G474

    /// Internal temperature sensor
    pub const TEMPERATURE_CHANNEL: u8 = 16;

    /// OPAMP1 internal output (thermocouple after the PGA)
    pub const OPAMP1_CHANNEL: u8 = 13;

    /// Converter resolution in bits
    pub const RESOLUTION_BITS: u32 = 10;
}
