//! Shared types used across the firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at construction time: display coordinates, raw converter samples,
//! oversampling counts and temperatures.

use core::fmt;

/// Display column (0-127)
///
/// The controller silently corrupts its addressing state when given an
/// out-of-range column, so the value is checked once here instead.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Column(u8);

impl Column {
    /// Number of addressable columns
    pub const COUNT: u8 = 128;

    /// Leftmost column
    pub const MIN: Self = Self(0);

    /// Rightmost column
    pub const MAX: Self = Self(Self::COUNT - 1);

    /// Create a column, returns None if out of range
    #[must_use]
    pub const fn new(column: u8) -> Option<Self> {
        if column < Self::COUNT {
            Some(Self(column))
        } else {
            None
        }
    }

    /// Get the raw column number
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Lower nibble, sent with the "set lower column" command
    #[must_use]
    pub const fn low_nibble(self) -> u8 {
        self.0 & 0x0F
    }

    /// Upper nibble, sent with the "set higher column" command
    #[must_use]
    pub const fn high_nibble(self) -> u8 {
        self.0 >> 4
    }

    /// Move right by `columns`, returns None past the right edge
    #[must_use]
    pub const fn checked_add(self, columns: u8) -> Option<Self> {
        match self.0.checked_add(columns) {
            Some(c) => Self::new(c),
            None => None,
        }
    }

    /// Iterate over every column, left to right
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Column {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "col {}", self.0);
    }
}

/// Display page (0-15), a horizontal band eight pixels tall
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Page(u8);

impl Page {
    /// Number of addressable pages
    pub const COUNT: u8 = 16;

    /// Top page
    pub const MIN: Self = Self(0);

    /// Bottom page
    pub const MAX: Self = Self(Self::COUNT - 1);

    /// Create a page, returns None if out of range
    #[must_use]
    pub const fn new(page: u8) -> Option<Self> {
        if page < Self::COUNT {
            Some(Self(page))
        } else {
            None
        }
    }

    /// Get the raw page number
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate over every page, top to bottom
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Page {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "page {}", self.0);
    }
}

/// One 10-bit conversion result (0-1023)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RawSample(u16);

impl RawSample {
    /// Converter resolution in bits
    pub const BITS: u32 = 10;

    /// Largest representable sample
    pub const MAX: u16 = (1 << Self::BITS) - 1;

    /// Create from a converter reading, returns None if wider than 10 bits
    #[must_use]
    pub const fn new(raw: u16) -> Option<Self> {
        if raw <= Self::MAX {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Create from a data register value, keeping only the low 10 bits
    #[must_use]
    pub const fn from_register(value: u32) -> Self {
        Self((value & Self::MAX as u32) as u16)
    }

    /// Get the raw value
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RawSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ADC({})", self.0);
    }
}

/// Number of conversions averaged per reading (1-64)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OversampleCount(u8);

impl OversampleCount {
    /// Upper bound, keeps the accumulator far from overflow
    pub const MAX: u8 = 64;

    /// Create an oversample count, returns None for zero or above [`Self::MAX`]
    #[must_use]
    pub const fn new(count: u8) -> Option<Self> {
        if count > 0 && count <= Self::MAX {
            Some(Self(count))
        } else {
            None
        }
    }

    /// Get the count
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for OversampleCount {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "x{}", self.0);
    }
}

/// Whole-degree temperature in Celsius
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Celsius(i16);

impl Celsius {
    /// Create from whole degrees
    #[must_use]
    pub const fn new(degrees: i16) -> Self {
        Self(degrees)
    }

    /// Get whole degrees
    #[must_use]
    pub const fn degrees(self) -> i16 {
        self.0
    }
}

impl fmt::Debug for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Celsius {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}°C", self.0);
    }
}
