//! Calibration Curves
//!
//! Integer and fixed-point conversion of averaged converter readings to
//! Celsius. Nothing here touches hardware, so every curve can be checked
//! directly against its table.

use core::fmt;

use fixed::types::I16F16;

use crate::types::Celsius;

/// Raw-count width of one thermocouple table bucket, as a shift
pub const BUCKET_SHIFT: u32 = 9;

/// Raw-count width of one thermocouple table bucket
pub const BUCKET_WIDTH: u16 = 1 << BUCKET_SHIFT;

/// Added to the tenths result before dividing down to whole degrees
pub const ROUNDING_BIAS: i32 = 5;

/// Rejected calibration data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationError {
    /// A breakpoint table needs at least two entries to interpolate
    TooFewBreakpoints,
    /// Breakpoint at `index` is lower than the one before it
    NotMonotonic {
        /// Offending breakpoint
        index: usize,
    },
    /// A negative scale would make the linear curve decreasing
    NegativeScale,
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewBreakpoints => write!(f, "breakpoint table needs two entries"),
            Self::NotMonotonic { index } => write!(f, "breakpoint {index} decreases"),
            Self::NegativeScale => write!(f, "linear scale is negative"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CalibrationError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::TooFewBreakpoints => defmt::write!(f, "TooFewBreakpoints"),
            Self::NotMonotonic { index } => defmt::write!(f, "NotMonotonic({})", index),
            Self::NegativeScale => defmt::write!(f, "NegativeScale"),
        }
    }
}

/// `celsius = average * scale - offset`, truncated toward zero
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearCalibration {
    scale: I16F16,
    offset: I16F16,
}

impl LinearCalibration {
    /// Create a linear curve; the scale must not be negative
    pub const fn new(scale: I16F16, offset: I16F16) -> Result<Self, CalibrationError> {
        if scale.is_negative() {
            return Err(CalibrationError::NegativeScale);
        }
        Ok(Self { scale, offset })
    }

    /// Degrees per LSB
    #[must_use]
    pub const fn scale(&self) -> I16F16 {
        self.scale
    }

    /// Degrees subtracted after scaling
    #[must_use]
    pub const fn offset(&self) -> I16F16 {
        self.offset
    }

    /// Map an averaged reading to whole degrees
    ///
    /// Saturates at the `I16F16` range instead of wrapping, which keeps the
    /// mapping non-decreasing over every input.
    #[must_use]
    pub fn celsius(&self, average: u16) -> Celsius {
        let degrees = I16F16::saturating_from_num(average)
            .saturating_mul(self.scale)
            .saturating_sub(self.offset)
            .round_to_zero();
        Celsius::new(degrees.to_num::<i16>())
    }
}

/// Table position of an averaged reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bucket {
    index: usize,
    fragment: u16,
}

impl Bucket {
    /// Lower breakpoint of the bucket
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Counts past the lower breakpoint (0-512)
    #[must_use]
    pub const fn fragment(self) -> u16 {
        self.fragment
    }
}

/// Piecewise-linear curve of temperature x10 at raw 0, 512, 1024, ...
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakpointTable<'a> {
    points: &'a [i32],
}

impl<'a> BreakpointTable<'a> {
    /// Check and wrap a table; entries must never decrease
    pub const fn new(points: &'a [i32]) -> Result<Self, CalibrationError> {
        if points.len() < 2 {
            return Err(CalibrationError::TooFewBreakpoints);
        }
        let mut i = 1;
        while i < points.len() {
            if points[i] < points[i - 1] {
                return Err(CalibrationError::NotMonotonic { index: i });
            }
            i += 1;
        }
        Ok(Self { points })
    }

    /// Breakpoints in tenths of a degree
    #[must_use]
    pub const fn points(&self) -> &'a [i32] {
        self.points
    }

    /// Locate `average` in the table
    ///
    /// Readings past the last breakpoint clamp to it: the last bucket with
    /// a full-width fragment.
    #[must_use]
    pub fn bucket(&self, average: u16) -> Bucket {
        let last = self.points.len() - 2;
        let index = usize::from(average >> BUCKET_SHIFT);
        if index <= last {
            Bucket {
                index,
                fragment: average & (BUCKET_WIDTH - 1),
            }
        } else {
            Bucket {
                index: last,
                fragment: BUCKET_WIDTH,
            }
        }
    }

    /// Interpolated temperature in tenths of a degree, before rounding
    #[must_use]
    pub fn tenths(&self, average: u16) -> i32 {
        let bucket = self.bucket(average);
        let low = self.points[bucket.index];
        let high = self.points[bucket.index + 1];
        let span = i64::from(high) - i64::from(low);
        let extra = (i64::from(bucket.fragment) * span) >> BUCKET_SHIFT;
        i32::try_from(i64::from(low) + extra).unwrap_or(i32::MAX)
    }

    /// Interpolated temperature in whole degrees
    #[must_use]
    pub fn celsius(&self, average: u16) -> Celsius {
        interpolate(self, average)
    }
}

/// `(t[b] + ((average - b*512) * (t[b+1] - t[b]) >> 9) + 5) / 10`, with `b = average >> 9`
#[must_use]
pub fn interpolate(table: &BreakpointTable<'_>, average: u16) -> Celsius {
    let degrees = table.tenths(average).saturating_add(ROUNDING_BIAS) / 10;
    Celsius::new(saturate_i16(degrees))
}

fn saturate_i16(value: i32) -> i16 {
    i16::try_from(value).unwrap_or(if value < 0 { i16::MIN } else { i16::MAX })
}
