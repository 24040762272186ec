//! GPIO Abstractions
//!
//! Open-drain line control for the software bus. A bus line is only ever
//! pulled low or let go; the external pull-up provides the high level.

use embedded_hal::digital::OutputPin;

/// Logical level of a released-or-driven line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    /// Pulled low by this device
    Low,
    /// High impedance, reads high through the pull-up
    Released,
}

impl LineState {
    /// Level a reader on the bus would see
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::Released)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LineState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "LOW"),
            Self::Released => defmt::write!(f, "REL"),
        }
    }
}

/// A line that can be pulled low or released, never driven high
pub trait OpenDrain {
    /// Pull the line low
    fn drive_low(&mut self);

    /// Let the pull-up take the line high
    fn release(&mut self);

    /// Put the line into `state`
    fn set(&mut self, state: LineState) {
        match state {
            LineState::Low => self.drive_low(),
            LineState::Released => self.release(),
        }
    }
}

/// Any `embedded-hal` output configured as open drain
///
/// `set_high` on an open-drain output turns the driver off, which is a
/// release. Pin errors are dropped: the bus has no way to report them.
impl<P: OutputPin> OpenDrain for P {
    fn drive_low(&mut self) {
        let _ = self.set_low();
    }

    fn release(&mut self) {
        let _ = self.set_high();
    }
}
