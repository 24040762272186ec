//! Temperature Acquisition
//!
//! Configures the converter for one source, throws away the first
//! conversion after the switch, oversamples and calibrates.

use crate::config::{INTERNAL_CALIBRATION, OVERSAMPLE, THERMOCOUPLE_CALIBRATION, WAIT_MODE};
use crate::sensor::calibration::{BreakpointTable, LinearCalibration};
use crate::sensor::converter::{self, ChannelSetup, Converter, WaitMode};
use crate::types::{Celsius, OversampleCount};

/// Sampling and calibration parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorSettings<'t> {
    /// How each conversion is waited for
    pub wait: WaitMode,
    /// Conversions averaged per reading
    pub oversample: OversampleCount,
    /// Internal sensor curve
    pub internal: LinearCalibration,
    /// Thermocouple curve
    pub thermocouple: BreakpointTable<'t>,
}

impl SensorSettings<'static> {
    /// Settings from the compile-time configuration
    #[must_use]
    pub const fn from_config() -> Self {
        Self {
            wait: WAIT_MODE,
            oversample: OVERSAMPLE,
            internal: INTERNAL_CALIBRATION,
            thermocouple: THERMOCOUPLE_CALIBRATION,
        }
    }
}

impl Default for SensorSettings<'static> {
    fn default() -> Self {
        Self::from_config()
    }
}

/// Reads both temperature sources through one converter
pub struct Acquisition<'t, C> {
    converter: C,
    settings: SensorSettings<'t>,
}

impl<'t, C: Converter> Acquisition<'t, C> {
    /// Take ownership of the converter
    #[must_use]
    pub fn new(converter: C, settings: SensorSettings<'t>) -> Self {
        Self {
            converter,
            settings,
        }
    }

    /// Active settings
    #[must_use]
    pub const fn settings(&self) -> &SensorSettings<'t> {
        &self.settings
    }

    /// Borrow the converter
    pub fn converter_mut(&mut self) -> &mut C {
        &mut self.converter
    }

    /// Give the converter back
    pub fn free(self) -> C {
        self.converter
    }

    /// Oversampled average for `setup`
    ///
    /// The first conversion after reconfiguring is discarded.
    pub fn read_average(&mut self, setup: ChannelSetup) -> u16 {
        let SensorSettings {
            wait, oversample, ..
        } = self.settings;

        self.converter.configure(setup);
        let _ = converter::sample(&mut self.converter, wait);
        let average = converter::average(&mut self.converter, wait, oversample);

        #[cfg(feature = "embedded")]
        defmt::trace!("{} average {} over {}", setup, average, oversample);

        average
    }

    /// Die temperature from the internal sensor
    pub fn read_internal(&mut self) -> Celsius {
        let average = self.read_average(ChannelSetup::INTERNAL_SENSOR);
        self.settings.internal.celsius(average)
    }

    /// Thermocouple temperature
    pub fn read_thermocouple(&mut self) -> Celsius {
        let average = self.read_average(ChannelSetup::THERMOCOUPLE);
        self.settings.thermocouple.celsius(average)
    }
}
