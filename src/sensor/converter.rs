//! Analog Converter Seam
//!
//! The converter is an exclusively owned resource with a strict
//! configure-then-sample protocol: one conversion in flight, and a source
//! switch always goes through [`Converter::configure`] first.

use crate::types::{OversampleCount, RawSample};

/// Analog input selected by the multiplexer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalogInput {
    /// On-die temperature sensor
    InternalTemperature,
    /// External thermocouple through the on-chip amplifier
    Thermocouple,
}

/// Front-end gain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gain {
    /// No amplification
    Unity,
    /// Highest gain the amplifier offers
    Max,
}

/// One of the two fixed converter configurations
///
/// Both use the internal low-noise reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelSetup {
    /// Multiplexer input
    pub input: AnalogInput,
    /// Amplifier gain
    pub gain: Gain,
}

impl ChannelSetup {
    /// Internal temperature sensor at unity gain
    pub const INTERNAL_SENSOR: Self = Self {
        input: AnalogInput::InternalTemperature,
        gain: Gain::Unity,
    };

    /// Amplified thermocouple at maximum gain
    pub const THERMOCOUPLE: Self = Self {
        input: AnalogInput::Thermocouple,
        gain: Gain::Max,
    };
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelSetup {
    fn format(&self, f: defmt::Formatter) {
        match self.input {
            AnalogInput::InternalTemperature => defmt::write!(f, "internal"),
            AnalogInput::Thermocouple => defmt::write!(f, "thermocouple"),
        }
    }
}

/// How to wait for a conversion to finish
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WaitMode {
    /// Poll the completion flag in a tight loop
    #[default]
    Spin,
    /// Halt the core between polls; quieter for the analog front end
    Halt,
}

#[cfg(feature = "embedded")]
impl defmt::Format for WaitMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Spin => defmt::write!(f, "spin"),
            Self::Halt => defmt::write!(f, "halt"),
        }
    }
}

/// Single-conversion analog-to-digital converter
pub trait Converter {
    /// Select input, reference and gain for the following conversions
    fn configure(&mut self, setup: ChannelSetup);

    /// Start one conversion
    fn start(&mut self);

    /// Whether the conversion started last has finished
    fn is_complete(&mut self) -> bool;

    /// Read the finished result and clear the completion flag
    fn take(&mut self) -> RawSample;

    /// Stop the core until something happens, e.g. a conversion completes
    ///
    /// The default returns at once, turning a halting wait into a spin.
    fn halt(&mut self) {}
}

/// Run one conversion and return its result
///
/// Blocks until the converter reports completion. There is no timeout.
pub fn sample<C: Converter>(converter: &mut C, wait: WaitMode) -> RawSample {
    converter.start();
    while !converter.is_complete() {
        match wait {
            WaitMode::Spin => core::hint::spin_loop(),
            WaitMode::Halt => converter.halt(),
        }
    }
    converter.take()
}

/// Average `count` consecutive conversions (integer division)
pub fn average<C: Converter>(converter: &mut C, wait: WaitMode, count: OversampleCount) -> u16 {
    let sum: u32 = (0..count.get())
        .map(|_| u32::from(sample(converter, wait).get()))
        .sum();
    // the mean of 10-bit samples always fits
    (sum / u32::from(count.get())) as u16
}
