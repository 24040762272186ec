//! Software I2C Bus
//!
//! Write-only, bit-banged two-wire bus on two open-drain GPIO lines.
//! There is no arbitration, no clock stretching and no acknowledge check:
//! the ninth clock of every byte is issued so the slave can acknowledge,
//! but the data line is never sampled. Nothing on this bus can report
//! failure, and nothing here pretends to.
//!
//! # Bus states
//!
//! ```text
//!        start(addr)            stop()
//!  Idle ─────────────▶ Transmitting ─────▶ Idle
//!                       │      ▲
//!                       └──────┘ write_byte()
//! ```
//!
//! Calling [`TwoWire::write_byte`] while idle produces an undefined
//! waveform on the wire. [`TwoWire::begin`] returns a [`Transaction`]
//! that always ends with a stop, which is the way to use the bus
//! from normal code.

use embedded_hal::delay::DelayNs;

use crate::config::{
    BUS_CLOCK_HIGH_NS, BUS_CLOCK_LOW_NS, BUS_DATA_SETUP_NS, BUS_START_HOLD_NS, BUS_STOP_SETUP_NS,
    DISPLAY_I2C_ADDR,
};
use crate::hal::gpio::OpenDrain;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// OLED display controller address
    pub const DISPLAY: Self = Self::new(DISPLAY_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }

    /// Address byte sent after start for a write (R/W bit = 0)
    #[must_use]
    pub const fn write_byte(self) -> u8 {
        self.0 << 1
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// Bus timing parameters, all in nanoseconds
///
/// Each wait separates two edges whose order the slave samples; pin
/// writes alone are far faster than the pull-up rise time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusTiming {
    /// Clock held released for each bit
    pub clock_high_ns: u32,
    /// Clock held low after each bit
    pub clock_low_ns: u32,
    /// Data low before clock low in a start condition
    pub start_hold_ns: u32,
    /// Data valid before the clock is released
    pub data_setup_ns: u32,
    /// Clock released before data is released in a stop condition
    pub stop_setup_ns: u32,
}

impl BusTiming {
    /// Timing from the compile-time configuration
    #[must_use]
    pub const fn from_config() -> Self {
        Self {
            clock_high_ns: BUS_CLOCK_HIGH_NS,
            clock_low_ns: BUS_CLOCK_LOW_NS,
            start_hold_ns: BUS_START_HOLD_NS,
            data_setup_ns: BUS_DATA_SETUP_NS,
            stop_setup_ns: BUS_STOP_SETUP_NS,
        }
    }
}

impl Default for BusTiming {
    fn default() -> Self {
        Self::from_config()
    }
}

/// Write-only two-wire bus master
///
/// None of these operations can fail or confirm delivery.
pub trait TwoWire {
    /// Issue a start condition, then send `address_byte`
    ///
    /// The bus must be idle.
    fn start(&mut self, address_byte: u8);

    /// Clock out one byte, MSB first, followed by an unchecked acknowledge clock
    ///
    /// Only valid between [`start`](Self::start) and [`stop`](Self::stop).
    fn write_byte(&mut self, value: u8);

    /// Issue a stop condition, returning the bus to idle
    fn stop(&mut self);

    /// Open a write transaction to `address`
    fn begin(&mut self, address: I2cAddress) -> Transaction<'_, Self>
    where
        Self: Sized,
    {
        self.start(address.write_byte());
        Transaction { bus: self }
    }

    /// Send `bytes` to `address` in one transaction
    fn write_transaction(&mut self, address: I2cAddress, bytes: &[u8])
    where
        Self: Sized,
    {
        self.begin(address).write_all(bytes);
    }
}

/// An open transaction; the stop condition is sent when it is dropped
pub struct Transaction<'a, B: TwoWire> {
    bus: &'a mut B,
}

impl<B: TwoWire> Transaction<'_, B> {
    /// Send one byte
    pub fn write(&mut self, value: u8) -> &mut Self {
        self.bus.write_byte(value);
        self
    }

    /// Send every byte in order
    pub fn write_all(&mut self, bytes: &[u8]) -> &mut Self {
        for &b in bytes {
            self.bus.write_byte(b);
        }
        self
    }

    /// End the transaction now
    pub fn finish(self) {}
}

impl<B: TwoWire> Drop for Transaction<'_, B> {
    fn drop(&mut self) {
        self.bus.stop();
    }
}

/// Bit-banged bus on two open-drain lines
pub struct SoftI2c<SDA, SCL, D> {
    sda: SDA,
    scl: SCL,
    delay: D,
    timing: BusTiming,
}

impl<SDA, SCL, D> SoftI2c<SDA, SCL, D>
where
    SDA: OpenDrain,
    SCL: OpenDrain,
    D: DelayNs,
{
    /// Take ownership of the two lines; call [`init`](Self::init) before use
    #[must_use]
    pub fn new(sda: SDA, scl: SCL, delay: D, timing: BusTiming) -> Self {
        Self {
            sda,
            scl,
            delay,
            timing,
        }
    }

    /// Release both lines, leaving the bus idle
    pub fn init(&mut self) {
        self.sda.release();
        self.scl.release();
    }

    /// Give the lines back
    pub fn free(self) -> (SDA, SCL, D) {
        (self.sda, self.scl, self.delay)
    }

    /// Let data settle, release the clock, hold it high, pull it low again
    fn pulse_clock(&mut self) {
        self.delay.delay_ns(self.timing.data_setup_ns);
        self.scl.release();
        self.delay.delay_ns(self.timing.clock_high_ns);
        self.scl.drive_low();
        self.delay.delay_ns(self.timing.clock_low_ns);
    }
}

impl<SDA, SCL, D> TwoWire for SoftI2c<SDA, SCL, D>
where
    SDA: OpenDrain,
    SCL: OpenDrain,
    D: DelayNs,
{
    fn start(&mut self, address_byte: u8) {
        // data falls while the clock is still released
        self.sda.drive_low();
        self.delay.delay_ns(self.timing.start_hold_ns);
        self.scl.drive_low();
        self.delay.delay_ns(self.timing.clock_low_ns);
        self.write_byte(address_byte);
    }

    fn write_byte(&mut self, value: u8) {
        for bit in (0..8).rev() {
            self.sda.drive_low();
            if value & (1 << bit) != 0 {
                self.sda.release();
            }
            self.pulse_clock();
        }

        // acknowledge slot: clocked, never sampled
        self.sda.release();
        self.pulse_clock();
    }

    fn stop(&mut self) {
        self.sda.drive_low();
        self.delay.delay_ns(self.timing.data_setup_ns);
        self.scl.release();
        self.delay.delay_ns(self.timing.stop_setup_ns);
        self.sda.release();
    }
}
