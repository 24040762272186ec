//! Hardware Abstraction Layer
//!
//! Pin and bus seams shared by every build, plus the STM32G474 bindings
//! behind the `embedded` feature. The bus protocol only ever sees the
//! [`gpio::OpenDrain`] capability, so it runs unchanged against a
//! recording pin on the host.

pub mod gpio;
pub mod i2c;

#[cfg(feature = "embedded")]
pub mod adc;
#[cfg(feature = "embedded")]
pub mod timer;
