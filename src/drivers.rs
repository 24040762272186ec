//! Peripheral Drivers
//!
//! The OLED controller and the glyph table it draws from. Both sit on top
//! of the [`TwoWire`](crate::hal::i2c::TwoWire) seam and never touch pins.

pub mod display;
pub mod font;
