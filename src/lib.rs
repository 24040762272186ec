//! Thermocouple OLED Readout Firmware Library
//!
//! This library provides the core functionality for a two-channel
//! temperature readout: the MCU die sensor and an amplified thermocouple,
//! shown on a page-addressed monochrome OLED. The display sits on two
//! plain GPIO lines, so the two-wire bus is bit-banged.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        Thermometer (acquire → render, 1 s period)            │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │        DISPLAY DRIVER        │   ACQUISITION & CALIBRATION   │
//! │  init │ cursor │ glyphs      │  oversample │ linear │ table   │
//! ├──────────────────────────────┼──────────────────────────────┤
//! │   SOFTWARE I2C (bit-banged)  │        CONVERTER SEAM         │
//! ├──────────────────────────────┴──────────────────────────────┤
//! │            HAL: open-drain GPIO │ ADC │ cycle delay           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Fire-and-forget bus**: bus and display operations return `()`;
//!   the wire protocol has no acknowledge check and the API does not
//!   pretend otherwise
//! - **Type-driven design**: columns, pages, glyphs and samples are
//!   validated once at construction
//! - **Integer-only calibration**: fixed-point linear map and shift-based
//!   table interpolation, no floating point
//! - **Functional core, imperative shell**: protocol and math are generic
//!   over `embedded-hal` and crate traits and run on the host

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Open-drain lines, the software bus, and STM32G474 bindings.
pub mod hal;

/// Peripheral Drivers
///
/// OLED controller and its glyph table.
pub mod drivers;

/// Temperature Acquisition
///
/// Converter protocol, oversampling and calibration.
pub mod sensor;

/// Acquire-and-render application logic
pub mod thermometer;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::drivers::display::Display;
    pub use crate::hal::i2c::{BusTiming, SoftI2c, TwoWire};
    pub use crate::sensor::{Acquisition, SensorSettings};
    pub use crate::thermometer::{Readings, Thermometer};

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
